use actix_web::{HttpResponse, get};
use chrono::Utc;

use crate::models::health::HealthResponse;

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME"),
        time: Utc::now(),
    };

    HttpResponse::Ok().json(response)
}
