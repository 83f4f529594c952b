use actix_web::{HttpResponse, post, web};
use serde_json::json;

use crate::errors::AppError;
use crate::models::dto::PaymentRequest;
use crate::services::payment_service::PaymentService;
use crate::state::AppState;

/// POST /reservations/{reservation_id}/payment (public)
#[post("/reservations/{reservation_id}/payment")]
pub async fn process_payment(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<PaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let payment = PaymentService::process(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Payment processed successfully",
        "payment_id": payment.payment_id,
    })))
}

pub fn payment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(process_payment);
}
