//! Cross-context messages exchanged between the preview iframe and the host.
//!
//! The JSON wire shape is fixed: every payload carries a `type` discriminant
//! and an `uploaderId` naming the widget it concerns. The embedded side posts
//! `WidgetRequest`s up to the host; the host answers with a `WidgetResponse`
//! addressed to the same `uploaderId`. Payloads that lack either required
//! field fail to deserialize, which is how both sides drop them silently.

use serde::{Deserialize, Serialize};

/// Request posted by a widget in the embedded document (embedded -> host).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetRequest {
    #[serde(rename_all = "camelCase")]
    GenerateImage {
        uploader_id: String,
        description: String,
    },
    #[serde(rename_all = "camelCase")]
    GenerateDetailedPrompt {
        uploader_id: String,
        description: String,
    },
}

impl WidgetRequest {
    pub fn uploader_id(&self) -> &str {
        match self {
            WidgetRequest::GenerateImage { uploader_id, .. }
            | WidgetRequest::GenerateDetailedPrompt { uploader_id, .. } => uploader_id,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            WidgetRequest::GenerateImage { description, .. }
            | WidgetRequest::GenerateDetailedPrompt { description, .. } => description,
        }
    }
}

/// Result or failure delivered back into the embedded document
/// (host -> embedded).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetResponse {
    /// `data` is a base64 image payload.
    #[serde(rename_all = "camelCase")]
    ImageGenerated { uploader_id: String, data: String },
    /// `data` is plain text.
    #[serde(rename_all = "camelCase")]
    PromptGenerated { uploader_id: String, data: String },
    #[serde(rename_all = "camelCase")]
    Error { uploader_id: String, error: String },
}

impl WidgetResponse {
    pub fn uploader_id(&self) -> &str {
        match self {
            WidgetResponse::ImageGenerated { uploader_id, .. }
            | WidgetResponse::PromptGenerated { uploader_id, .. }
            | WidgetResponse::Error { uploader_id, .. } => uploader_id,
        }
    }

    /// Error response for the widget that issued `request`.
    pub fn error_for(request: &WidgetRequest, error: impl Into<String>) -> Self {
        WidgetResponse::Error {
            uploader_id: request.uploader_id().to_string(),
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape_matches_the_embedded_script() {
        let req = WidgetRequest::GenerateImage {
            uploader_id: "image-uploader-0".to_string(),
            description: "kucing lucu".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "generateImage");
        assert_eq!(json["uploaderId"], "image-uploader-0");
        assert_eq!(json["description"], "kucing lucu");
    }

    #[test]
    fn detailed_prompt_request_roundtrips() {
        let raw = r#"{"type":"generateDetailedPrompt","uploaderId":"image-uploader-2","description":"peta"}"#;
        let req: WidgetRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(req.uploader_id(), "image-uploader-2");
        assert_eq!(req.description(), "peta");
    }

    #[test]
    fn response_wire_shape_matches_the_embedded_script() {
        let resp = WidgetResponse::ImageGenerated {
            uploader_id: "image-uploader-1".to_string(),
            data: "QQ==".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["type"], "imageGenerated");
        assert_eq!(json["uploaderId"], "image-uploader-1");
        assert_eq!(json["data"], "QQ==");

        let err = WidgetResponse::Error {
            uploader_id: "image-uploader-1".to_string(),
            error: "Quota exceeded".to_string(),
        };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["error"], "Quota exceeded");
    }

    #[test]
    fn payload_without_uploader_id_is_rejected() {
        let raw = r#"{"type":"generateImage","description":"tanpa id"}"#;
        assert!(serde_json::from_str::<WidgetRequest>(raw).is_err());
    }

    #[test]
    fn payload_without_type_is_rejected() {
        let raw = r#"{"uploaderId":"image-uploader-0","description":"x"}"#;
        assert!(serde_json::from_str::<WidgetRequest>(raw).is_err());
    }

    #[test]
    fn error_for_reuses_the_requesting_widget_id() {
        let req = WidgetRequest::GenerateDetailedPrompt {
            uploader_id: "image-uploader-7".to_string(),
            description: "gunung".to_string(),
        };
        let resp = WidgetResponse::error_for(&req, "Kuota habis");
        assert_eq!(resp.uploader_id(), "image-uploader-7");
    }
}
