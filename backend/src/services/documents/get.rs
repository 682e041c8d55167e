use actix_web::web;
use rusqlite::{params, Connection};

use common::model::document::Document;

/// Actix handler for `GET /api/documents/{document_id}`.
pub async fn process(document_id: web::Path<String>) -> impl actix_web::Responder {
    match get_document(&document_id) {
        Ok(document) => actix_web::HttpResponse::Ok().json(document),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Gagal memuat dokumen: {}", e)),
    }
}

fn get_document(document_id: &str) -> Result<Document, String> {
    let conn = Connection::open(super::DB_PATH).map_err(|e| e.to_string())?;
    fetch_document(&conn, document_id)
}

fn fetch_document(conn: &Connection, document_id: &str) -> Result<Document, String> {
    let mut stmt = conn
        .prepare("SELECT id, title, html FROM documents WHERE id = ?1")
        .map_err(|e| e.to_string())?;
    let document_iter = stmt
        .query_map(params![document_id], |row| {
            Ok(Document {
                id: row.get(0)?,
                title: row.get(1)?,
                html: row.get(2)?,
            })
        })
        .map_err(|e| e.to_string())?;

    let document = match document_iter.into_iter().next() {
        Some(Ok(document)) => document,
        Some(Err(e)) => return Err(e.to_string()),
        None => return Err("Dokumen tidak ditemukan".to_string()),
    };

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE documents (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                html TEXT NOT NULL
            )",
            [],
        )
        .unwrap();
        conn
    }

    #[test]
    fn stored_document_is_returned_by_id() {
        let conn = test_connection();
        conn.execute(
            "INSERT INTO documents (id, title, html) VALUES (?1, ?2, ?3)",
            params!["doc-1", "Bahan Ajar", "<p>materi</p>"],
        )
        .unwrap();

        let document = fetch_document(&conn, "doc-1").unwrap();
        assert_eq!(document.id, "doc-1");
        assert_eq!(document.title, "Bahan Ajar");
        assert_eq!(document.html, "<p>materi</p>");
    }

    #[test]
    fn unknown_id_reports_not_found() {
        let conn = test_connection();
        let err = fetch_document(&conn, "tidak-ada").unwrap_err();
        assert_eq!(err, "Dokumen tidak ditemukan");
    }
}
