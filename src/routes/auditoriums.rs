use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateAuditoriumRequest, UpdateAuditoriumRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::auditorium_service::AuditoriumService;
use crate::state::AppState;

#[post("/addaudi")]
pub async fn add_auditorium(
    auth: AuthUser,
    state: web::Data<AppState>,
    body: web::Json<CreateAuditoriumRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    let auditorium = AuditoriumService::create(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Auditorium added successfully!",
        "auditorium_id": auditorium.auditorium_id,
    })))
}

#[get("/getAudi")]
pub async fn get_auditoriums(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let auditoriums = AuditoriumService::list(&state.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "List of Audis:",
        "audi": auditoriums,
    })))
}

#[get("/getAudi/{auditorium_id}")]
pub async fn get_auditorium(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let auditorium = AuditoriumService::get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Auditorium fetched successfully",
        "audi": auditorium,
    })))
}

#[put("/updateaudi/{auditorium_id}")]
pub async fn update_auditorium(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateAuditoriumRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    AuditoriumService::update(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Auditorium updated successfully" })))
}

#[delete("/deleteAudi/{auditorium_id}")]
pub async fn delete_auditorium(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    AuditoriumService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Auditorium deleted successfully" })))
}

pub fn auditorium_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auditorium")
            .service(add_auditorium)
            .service(get_auditoriums)
            .service(get_auditorium)
            .service(update_auditorium)
            .service(delete_auditorium),
    );
}
