//! Rewrites image-suggestion placeholders in an HTML document into
//! interactive upload/generate widgets.
//!
//! Generated documents mark the spots where an illustration would help with
//! the textual pattern `[Gambar: <deskripsi>]`. Before such a document is
//! shown in the preview iframe, `transform_placeholders` replaces each
//! occurrence with a widget block (file upload, AI image generation, AI
//! prompt generation) and appends a single companion script that wires the
//! widgets to the host via `postMessage`.
//!
//! The transformation is a pure string rewrite: no I/O, no randomness, and
//! the same input always produces the same output. Text that merely looks
//! like a placeholder (unterminated bracket, nested `]`) is not matched and
//! passes through untouched.

use regex::Regex;

/// Prefix for the per-widget correlation key. The full id is
/// `image-uploader-<index>` with the index counting occurrences in document
/// order, starting at 0.
pub const UPLOADER_ID_PREFIX: &str = "image-uploader-";

/// One widget derived from a placeholder occurrence.
///
/// `uploader_id` is the sole correlation key for every later message about
/// this widget; the two region ids below are the only DOM contract between
/// the transformed markup and the companion script.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetInstance {
    pub uploader_id: String,
    pub description: String,
}

impl WidgetInstance {
    /// Id of the region showing the description and the three actions.
    pub fn prompt_region_id(&self) -> String {
        format!("prompt-container-{}", self.uploader_id)
    }

    /// Id of the initially hidden region that receives the result.
    pub fn result_region_id(&self) -> String {
        format!("result-container-{}", self.uploader_id)
    }
}

fn placeholder_regex() -> Regex {
    Regex::new(r"\[Gambar: ([^\]]*)\]").unwrap()
}

/// Lists the widgets that `transform_placeholders` would produce for `html`,
/// in document order.
///
/// This is the typed registry host-side code uses instead of re-deriving DOM
/// ids by string concatenation.
pub fn widget_registry(html: &str) -> Vec<WidgetInstance> {
    placeholder_regex()
        .captures_iter(html)
        .enumerate()
        .map(|(index, caps)| WidgetInstance {
            uploader_id: uploader_id(index),
            description: caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string(),
        })
        .collect()
}

/// Builds the correlation key for the placeholder at `index`.
pub fn uploader_id(index: usize) -> String {
    format!("{}{}", UPLOADER_ID_PREFIX, index)
}

/// Escapes single quotes so a description can sit inside a single-quoted
/// script string literal in the widget markup.
pub fn escape_single_quotes(text: &str) -> String {
    text.replace('\'', "\\'")
}

/// Replaces every `[Gambar: ...]` placeholder in `html` with widget markup
/// and, when at least one placeholder was found, injects the companion
/// script immediately before the closing `</body>` tag.
///
/// Documents without a `</body>` keep the widget markup but get no script;
/// documents without placeholders are returned unchanged.
pub fn transform_placeholders(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut index = 0usize;
    let rewritten = placeholder_regex().replace_all(html, |caps: &regex::Captures| {
        let description = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let markup = widget_markup(index, description);
        index += 1;
        markup
    });

    if index == 0 {
        return html.to_string();
    }

    let mut out = rewritten.into_owned();
    if let Some(pos) = out.rfind("</body>") {
        out.insert_str(pos, COMPANION_SCRIPT);
    }
    out
}

/// Renders the widget block for one placeholder. Deterministic for a given
/// `index` and `description`.
///
/// The visible description stays as written; the copies handed to the inline
/// handlers are quote-escaped so they survive the single-quoted literals.
fn widget_markup(index: usize, description: &str) -> String {
    let id = uploader_id(index);
    let escaped = escape_single_quotes(description);
    format!(
        concat!(
            r#"<div class="image-widget" data-uploader-id="{id}">"#,
            "\n",
            r#"<div class="image-prompt" id="prompt-container-{id}">"#,
            "\n",
            r#"<p class="image-description"><b>Saran gambar:</b> {description}</p>"#,
            "\n",
            r#"<label class="widget-action">Unggah Gambar<input type="file" accept="image/*" style="display:none;" onchange="handleFileUpload(event, '{id}')"></label>"#,
            "\n",
            r#"<button class="widget-action" onclick="handleGenerateImage(event, '{id}', '{escaped}')">Buat Gambar (AI)</button>"#,
            "\n",
            r#"<button class="widget-action" onclick="handleGenerateDetailedPrompt(event, '{id}', '{escaped}')">Buat Prompt Detail (AI)</button>"#,
            "\n",
            r#"</div>"#,
            "\n",
            r#"<div class="image-result" id="result-container-{id}" style="display:none;"></div>"#,
            "\n",
            r#"</div>"#
        ),
        id = id,
        description = description,
        escaped = escaped,
    )
}

/// Script injected once per transformed document. Runs inside the iframe.
///
/// Local uploads resolve entirely in the embedded document via a FileReader
/// data URL. The two AI actions swap the prompt region for a loading line and
/// post a request to the parent; the parent cannot be origin-pinned from
/// here, hence the `*` target. The inbound listener ignores anything without
/// an `uploaderId` and renders per-widget through the small region lookup, so
/// an id that no longer exists in the document makes the message a no-op.
const COMPANION_SCRIPT: &str = r#"<script>
function widgetRegions(uploaderId) {
    return {
        prompt: document.getElementById('prompt-container-' + uploaderId),
        result: document.getElementById('result-container-' + uploaderId)
    };
}
function showResult(regions, node) {
    regions.result.innerHTML = '';
    regions.result.appendChild(node);
    regions.result.style.display = 'block';
    regions.prompt.style.display = 'none';
}
function imageNode(src, alt) {
    var img = document.createElement('img');
    img.src = src;
    img.alt = alt;
    img.style.maxWidth = '100%';
    return img;
}
function handleFileUpload(event, uploaderId) {
    var file = event.target.files && event.target.files[0];
    if (!file) { return; }
    var reader = new FileReader();
    reader.onload = function (e) {
        var regions = widgetRegions(uploaderId);
        if (!regions.prompt || !regions.result) { return; }
        showResult(regions, imageNode(e.target.result, 'Gambar unggahan'));
    };
    reader.readAsDataURL(file);
}
function requestGeneration(event, type, uploaderId, description) {
    event.preventDefault();
    var regions = widgetRegions(uploaderId);
    if (!regions.prompt) { return; }
    regions.prompt.innerHTML = '<p class="widget-loading">Sedang diproses...</p>';
    window.parent.postMessage({ type: type, uploaderId: uploaderId, description: description }, '*');
}
function handleGenerateImage(event, uploaderId, description) {
    requestGeneration(event, 'generateImage', uploaderId, description);
}
function handleGenerateDetailedPrompt(event, uploaderId, description) {
    requestGeneration(event, 'generateDetailedPrompt', uploaderId, description);
}
window.addEventListener('message', function (event) {
    var data = event.data || {};
    if (!data.uploaderId) { return; }
    var regions = widgetRegions(data.uploaderId);
    if (!regions.prompt || !regions.result) { return; }
    if (data.type === 'error') {
        regions.prompt.innerHTML = '';
        var line = document.createElement('p');
        line.className = 'widget-error';
        line.textContent = 'Error: ' + data.error;
        regions.prompt.appendChild(line);
        return;
    }
    if (data.type === 'imageGenerated') {
        showResult(regions, imageNode('data:image/png;base64,' + data.data, 'Gambar hasil AI'));
    } else if (data.type === 'promptGenerated') {
        var area = document.createElement('textarea');
        area.readOnly = true;
        area.rows = 6;
        area.style.width = '100%';
        area.value = data.data;
        showResult(regions, area);
    }
});
</script>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    const BODY_WRAP: (&str, &str) = ("<html><body>", "</body></html>");

    fn wrap(inner: &str) -> String {
        format!("{}{}{}", BODY_WRAP.0, inner, BODY_WRAP.1)
    }

    #[test]
    fn empty_input_returns_empty_output() {
        assert_eq!(transform_placeholders(""), "");
    }

    #[test]
    fn input_without_placeholders_is_returned_unchanged() {
        let html = wrap("<p>Materi tanpa gambar</p>");
        assert_eq!(transform_placeholders(&html), html);
        assert!(!transform_placeholders(&html).contains("<script>"));
    }

    #[test]
    fn each_placeholder_gets_a_sequential_widget() {
        let html = wrap("[Gambar: a][Gambar: b][Gambar: c]");
        let out = transform_placeholders(&html);
        for i in 0..3 {
            assert!(out.contains(&format!("id=\"prompt-container-image-uploader-{}\"", i)));
            assert!(out.contains(&format!("id=\"result-container-image-uploader-{}\"", i)));
        }
        assert!(!out.contains("image-uploader-3"));
        assert!(!out.contains("[Gambar:"));
    }

    #[test]
    fn companion_script_is_injected_once_before_closing_body() {
        let html = wrap("[Gambar: peta dunia]");
        let out = transform_placeholders(&html);
        assert_eq!(out.matches("<script>").count(), 1);
        let script_pos = out.find("<script>").unwrap();
        let body_pos = out.rfind("</body>").unwrap();
        assert!(script_pos < body_pos);
    }

    #[test]
    fn no_body_tag_means_widgets_but_no_script() {
        let out = transform_placeholders("Lihat: [Gambar: kucing]");
        assert!(out.contains("id=\"prompt-container-image-uploader-0\""));
        assert!(!out.contains("<script>"));
    }

    #[test]
    fn second_pass_over_transformed_output_is_a_no_op() {
        let once = transform_placeholders(&wrap("[Gambar: rumah adat]"));
        let twice = transform_placeholders(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn single_quotes_are_escaped_only_inside_script_literals() {
        let out = transform_placeholders(&wrap("[Gambar: pasar 'tradisional' pagi]"));
        // Inline handler arguments carry the escaped copy.
        assert!(out.contains(r"'pasar \'tradisional\' pagi'"));
        // The visible description keeps the quotes as written.
        assert!(out.contains("<b>Saran gambar:</b> pasar 'tradisional' pagi</p>"));
    }

    #[test]
    fn round_trip_scenario_from_generated_content() {
        let html = wrap("Lihat ini: [Gambar: kucing lucu]");
        let out = transform_placeholders(&html);
        assert!(out.contains("id=\"prompt-container-image-uploader-0\""));
        assert!(out.contains("kucing lucu"));
        assert!(out.contains("function handleGenerateImage"));
    }

    #[test]
    fn companion_script_renders_png_data_urls_and_error_prefix() {
        let out = transform_placeholders(&wrap("[Gambar: x]"));
        assert!(out.contains("'data:image/png;base64,' + data.data"));
        assert!(out.contains("'Error: ' + data.error"));
        assert!(out.contains("if (!data.uploaderId) { return; }"));
    }

    #[test]
    fn unterminated_and_nested_placeholders_pass_through() {
        let html = wrap("[Gambar: tanpa penutup <p>x</p> [Gambar: [dalam]]");
        let out = transform_placeholders(&html);
        // Only the inner `[Gambar: [dalam]` run cannot match (contains `[` is
        // fine, `]` terminates it), so exactly one widget appears: the one for
        // the text up to the first `]`.
        assert!(out.contains("image-uploader-0"));
        assert!(!out.contains("image-uploader-1"));
    }

    #[test]
    fn empty_description_still_produces_a_widget() {
        let out = transform_placeholders(&wrap("[Gambar: ]"));
        assert!(out.contains("id=\"prompt-container-image-uploader-0\""));
    }

    #[test]
    fn widget_markup_is_deterministic() {
        let a = transform_placeholders(&wrap("[Gambar: sawah]"));
        let b = transform_placeholders(&wrap("[Gambar: sawah]"));
        assert_eq!(a, b);
    }

    #[test]
    fn registry_matches_document_order() {
        let html = wrap("[Gambar: satu] text [Gambar: dua]");
        let widgets = widget_registry(&html);
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].uploader_id, "image-uploader-0");
        assert_eq!(widgets[0].description, "satu");
        assert_eq!(widgets[1].uploader_id, "image-uploader-1");
        assert_eq!(widgets[1].description, "dua");
        assert_eq!(
            widgets[0].prompt_region_id(),
            "prompt-container-image-uploader-0"
        );
        assert_eq!(
            widgets[1].result_region_id(),
            "result-container-image-uploader-1"
        );
    }
}
