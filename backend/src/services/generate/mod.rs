//! # Generation Service Module
//!
//! API endpoints the preview host calls on behalf of a widget. Each request
//! carries the image-suggestion description; each response is the payload
//! the host forwards into the embedded document. Failures come back as a
//! plain-text error body, which the host converts into the widget-scoped
//! `error` message.
//!
//! ## Registered routes
//!
//! *   **`POST /api/generate/image`** — handler `image::process`; returns
//!     base64 image bytes generated for the description.
//! *   **`POST /api/generate/prompt`** — handler `prompt::process`; returns
//!     a detailed illustration prompt as plain text.

use actix_web::web::{post, scope};
use actix_web::Scope;

mod image;
mod prompt;
pub mod provider;

const API_PATH: &str = "/api/generate";

/// Configures and returns the Actix `Scope` for the generation routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/image", post().to(image::process))
        .route("/prompt", post().to(prompt::process))
}
