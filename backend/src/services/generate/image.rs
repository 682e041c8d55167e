use actix_web::{web, HttpResponse, Responder};
use log::warn;

use common::requests::{GenerateRequest, GeneratedPayload};

use super::provider::{self, EnvCredentials};
use crate::config::Config;

pub async fn process(config: web::Data<Config>, payload: web::Json<GenerateRequest>) -> impl Responder {
    let credentials = EnvCredentials;
    match provider::generate_image(&credentials, &config, &payload.description).await {
        Ok(data) => HttpResponse::Ok().json(GeneratedPayload { data }),
        Err(e) => {
            warn!("image generation failed: {}", e);
            HttpResponse::ServiceUnavailable().body(format!("Gagal membuat gambar: {}", e))
        }
    }
}
