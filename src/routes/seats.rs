use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateSeatRequest, UpdateSeatRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::seat_service::SeatService;
use crate::state::AppState;

#[post("/addseat")]
pub async fn add_seat(
    auth: AuthUser,
    state: web::Data<AppState>,
    body: web::Json<CreateSeatRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    let seat = SeatService::create(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Seat added successfully",
        "seat_id": seat.seat_id,
    })))
}

#[get("/getseats")]
pub async fn get_seats(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let seats = SeatService::list(&state.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Getting seats Info:",
        "seats": seats,
    })))
}

#[get("/getseat/{seat_id}")]
pub async fn get_seat(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let seat = SeatService::get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Seat fetched successfully",
        "seat": seat,
    })))
}

#[put("/updateseat/{seat_id}")]
pub async fn update_seat(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateSeatRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    SeatService::update(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Seat updated successfully" })))
}

#[delete("/deleteseats/{seat_id}")]
pub async fn delete_seat(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    SeatService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Seat deleted successfully" })))
}

pub fn seat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/seats")
            .service(add_seat)
            .service(get_seats)
            .service(get_seat)
            .service(update_seat)
            .service(delete_seat),
    );
}
