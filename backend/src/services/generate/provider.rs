//! HTTP client for the external generative API.
//!
//! The credential comes from a `Credentials` implementation injected into
//! every call, and a fresh `reqwest` client is built per call; together they
//! make key rotation effective immediately without restarting the server.
//!
//! Provider responses are JSON. When a body fails to parse, the error is
//! enriched with the parse position and a snippet of the surrounding text
//! before it is surfaced, since truncated or HTML-wrapped provider output is
//! otherwise hard to diagnose from a bare "expected value" message.

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;

/// Source of the provider API key, resolved at call time.
pub trait Credentials {
    fn api_key(&self) -> Result<String, String>;
}

/// Reads the key from the `GURU_API_KEY` environment variable on every call.
pub struct EnvCredentials;

impl Credentials for EnvCredentials {
    fn api_key(&self) -> Result<String, String> {
        std::env::var("GURU_API_KEY")
            .map_err(|_| "GURU_API_KEY belum diatur di lingkungan server".to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    pub parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub text: Option<String>,
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
pub struct InlineData {
    pub data: String,
}

/// Generates an image for `description`; returns base64 image bytes.
pub async fn generate_image(
    credentials: &dyn Credentials,
    config: &Config,
    description: &str,
) -> Result<String, String> {
    let body = json!({
        "contents": [{ "parts": [{ "text": image_instruction(description) }] }],
        "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] }
    });
    let raw = call_provider(credentials, config, &config.image_model, &body).await?;
    let response = parse_provider_json(&raw)?;
    extract_inline_image(&response)
}

/// Generates a detailed illustration prompt for `description`.
pub async fn generate_detailed_prompt(
    credentials: &dyn Credentials,
    config: &Config,
    description: &str,
) -> Result<String, String> {
    let body = json!({
        "contents": [{ "parts": [{ "text": prompt_instruction(description) }] }]
    });
    let raw = call_provider(credentials, config, &config.text_model, &body).await?;
    let response = parse_provider_json(&raw)?;
    extract_text(&response)
}

fn image_instruction(description: &str) -> String {
    format!(
        "Buat satu gambar ilustrasi edukatif yang ramah anak untuk materi ajar: {}",
        description
    )
}

fn prompt_instruction(description: &str) -> String {
    format!(
        "Tulis prompt text-to-image yang sangat detail (gaya, komposisi, warna, suasana) \
         untuk saran gambar berikut, dalam satu paragraf: {}",
        description
    )
}

async fn call_provider(
    credentials: &dyn Credentials,
    config: &Config,
    model: &str,
    body: &serde_json::Value,
) -> Result<String, String> {
    let key = credentials.api_key()?;
    let url = format!("{}/models/{}:generateContent", config.api_base, model);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .query(&[("key", key.as_str())])
        .json(body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    let text = response.text().await.map_err(|e| e.to_string())?;
    if !status.is_success() {
        return Err(format!("provider mengembalikan {}: {}", status, text));
    }
    Ok(text)
}

/// Parses a provider response body, enriching parse failures with position
/// and context.
pub fn parse_provider_json(raw: &str) -> Result<GenerateContentResponse, String> {
    serde_json::from_str(raw).map_err(|err| enrich_parse_error(raw, &err))
}

/// Builds a parse-error message carrying the line/column position and up to
/// 40 characters of raw text on either side of the failure point.
fn enrich_parse_error(raw: &str, err: &serde_json::Error) -> String {
    let offset = byte_offset(raw, err.line(), err.column());
    let start = offset.saturating_sub(40);
    let end = (offset + 40).min(raw.len());
    let start = ceil_char_boundary(raw, start);
    let end = ceil_char_boundary(raw, end);
    let snippet = &raw[start..end];
    format!(
        "respons provider bukan JSON yang valid ({}; baris {}, kolom {}): ...{}...",
        err,
        err.line(),
        err.column(),
        snippet
    )
}

fn byte_offset(raw: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }
    let mut offset = 0;
    for (i, l) in raw.split('\n').enumerate() {
        if i + 1 == line {
            return (offset + column.saturating_sub(1)).min(raw.len());
        }
        offset += l.len() + 1;
    }
    raw.len()
}

fn ceil_char_boundary(raw: &str, mut idx: usize) -> usize {
    while idx < raw.len() && !raw.is_char_boundary(idx) {
        idx += 1;
    }
    idx.min(raw.len())
}

/// Pulls the first inline image payload out of a parsed response.
pub fn extract_inline_image(response: &GenerateContentResponse) -> Result<String, String> {
    parts(response)
        .iter()
        .find_map(|part| part.inline_data.as_ref().map(|d| d.data.clone()))
        .ok_or_else(|| "respons provider tidak memuat data gambar".to_string())
}

/// Pulls the first text part out of a parsed response.
pub fn extract_text(response: &GenerateContentResponse) -> Result<String, String> {
    parts(response)
        .iter()
        .find_map(|part| part.text.clone())
        .ok_or_else(|| "respons provider tidak memuat teks".to_string())
}

fn parts(response: &GenerateContentResponse) -> Vec<&Part> {
    response
        .candidates
        .iter()
        .flatten()
        .filter_map(|candidate| candidate.content.as_ref())
        .filter_map(|content| content.parts.as_ref())
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_response_with_inline_image_parses() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"inlineData":{"data":"QQ=="}}]}}]}"#;
        let response = parse_provider_json(raw).unwrap();
        assert_eq!(extract_inline_image(&response).unwrap(), "QQ==");
    }

    #[test]
    fn valid_response_with_text_parses() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"sebuah prompt"}]}}]}"#;
        let response = parse_provider_json(raw).unwrap();
        assert_eq!(extract_text(&response).unwrap(), "sebuah prompt");
    }

    #[test]
    fn text_extraction_fails_cleanly_when_parts_are_missing() {
        let raw = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        let response = parse_provider_json(raw).unwrap();
        assert!(extract_text(&response).is_err());
        assert!(extract_inline_image(&response).is_err());
    }

    #[test]
    fn parse_error_carries_position_and_snippet() {
        let raw = r#"{"candidates": [ {"content": oops } ]}"#;
        let err = parse_provider_json(raw).unwrap_err();
        assert!(err.contains("baris 1"), "missing line info: {}", err);
        assert!(err.contains("oops"), "missing snippet: {}", err);
    }

    #[test]
    fn parse_error_snippet_respects_char_boundaries() {
        let raw = "{\"a\": \u{00e9}\u{00e9}\u{00e9}\u{00e9} not json";
        let err = parse_provider_json(raw).unwrap_err();
        assert!(err.contains("bukan JSON"));
    }

    #[test]
    fn html_error_page_is_reported_with_context() {
        let raw = "<html><body>502 Bad Gateway</body></html>";
        let err = parse_provider_json(raw).unwrap_err();
        assert!(err.contains("502 Bad Gateway"));
    }
}
