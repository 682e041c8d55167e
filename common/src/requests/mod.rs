use serde::{Deserialize, Serialize};

/// Request payload for the generation endpoints. `description` is the image
/// suggestion text captured from the placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub description: String,
}

/// Response payload of the generation endpoints: base64 image bytes for
/// `/api/generate/image`, plain text for `/api/generate/prompt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPayload {
    pub data: String,
}
