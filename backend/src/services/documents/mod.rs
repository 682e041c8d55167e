//! # Document Service Module
//!
//! Endpoints for storing and retrieving generated documents. A document is
//! one named content section with its canonical raw HTML; the interactive
//! widget markup is derived client-side and never persisted.
//!
//! ## Registered routes
//!
//! *   **`POST /api/documents/save`** — handler `save::process`; creates or
//!     replaces a document from a JSON `Document` payload.
//! *   **`GET /api/documents/{document_id}`** — handler `get::process`;
//!     returns the stored document as JSON.

use actix_web::web::{get, post, scope};
use actix_web::Scope;
use rusqlite::Connection;

mod get;
mod save;

const API_PATH: &str = "/api/documents";

pub(crate) const DB_PATH: &str = "guru_asisten.sqlite";

/// Configures and returns the Actix `Scope` for the document routes.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/save", post().to(save::process))
        .route("/{document_id}", get().to(get::process))
}

/// Creates the documents table if this is a fresh database file.
pub fn ensure_schema() -> Result<(), String> {
    let conn = Connection::open(DB_PATH).map_err(|e| e.to_string())?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            html TEXT NOT NULL
        )",
        [],
    )
    .map_err(|e| e.to_string())?;
    Ok(())
}
