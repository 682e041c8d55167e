use actix_web::{web, Responder};
use rusqlite::{params, Connection};

use common::model::document::Document;

pub async fn process(payload: web::Json<Document>) -> impl Responder {
    match save_document(&payload) {
        Ok(_) => actix_web::HttpResponse::Ok().body("Dokumen tersimpan"),
        Err(e) => actix_web::HttpResponse::ServiceUnavailable()
            .body(format!("Gagal menyimpan dokumen: {}", e)),
    }
}

fn save_document(payload: &Document) -> Result<(), String> {
    if payload.id.trim().is_empty() {
        return Err("Id dokumen tidak boleh kosong".to_string());
    }

    let conn = Connection::open(super::DB_PATH).map_err(|e| e.to_string())?;
    conn.execute(
        "INSERT OR REPLACE INTO documents (id, title, html) VALUES (?1, ?2, ?3)",
        params![&payload.id, &payload.title, &payload.html],
    )
    .map_err(|e| e.to_string())?;

    Ok(())
}
