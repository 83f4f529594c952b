use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateReservationRequest, UpdateReservationRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::reservation_service::ReservationService;
use crate::services::ticket_service::TicketService;
use crate::state::AppState;

/// POST /reservation/addreservation (public)
#[post("/addreservation")]
pub async fn add_reservation(
    state: web::Data<AppState>,
    body: web::Json<CreateReservationRequest>,
) -> Result<HttpResponse, AppError> {
    let reservation = ReservationService::create(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Reservation added successfully",
        "reservation": reservation,
    })))
}

#[get("/getreservation")]
pub async fn get_reservations(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reservations = ReservationService::list(&state.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Reservation Listed:",
        "reservation": reservations,
    })))
}

#[get("/getreservation/{reservation_id}")]
pub async fn get_reservation(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let reservation = ReservationService::get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Reservation fetched successfully",
        "reservation": reservation,
    })))
}

#[put("/updatereservation/{reservation_id}")]
pub async fn update_reservation(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateReservationRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    ReservationService::update(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Reservation updated successfully" })))
}

#[delete("/deletereservation/{reservation_id}")]
pub async fn delete_reservation(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    ReservationService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Reservation deleted successfully" })))
}

/// GET /reservation/{reservation_id}/ticket: renders the QR ticket.
#[get("/{reservation_id}/ticket")]
pub async fn generate_ticket(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let link = TicketService::render(&state.db, &state.config.uploads_dir, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "QR code generated",
        "qrCodeDownloadLink": link,
    })))
}

pub fn reservation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reservation")
            .service(add_reservation)
            .service(get_reservations)
            .service(get_reservation)
            .service(update_reservation)
            .service(delete_reservation)
            .service(generate_ticket),
    );
}
