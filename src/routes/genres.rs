use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateGenreRequest, UpdateGenreRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::genre_service::GenreService;
use crate::state::AppState;

#[post("/createGenre")]
pub async fn create_genre(
    auth: AuthUser,
    state: web::Data<AppState>,
    body: web::Json<CreateGenreRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    let genre = GenreService::create(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Genre Created successfully",
        "genre": genre,
    })))
}

#[get("/getgenres")]
pub async fn get_genres(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let genres = GenreService::list(&state.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "All genres fetched successfully",
        "genres": genres,
    })))
}

#[get("/getgenre/{genre_id}")]
pub async fn get_genre(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let genre = GenreService::get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Genre fetched successfully",
        "genre": genre,
    })))
}

#[put("/update/{genre_id}")]
pub async fn update_genre(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateGenreRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    GenreService::update(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Genre updated successfully!" })))
}

#[delete("/delete/{genre_id}")]
pub async fn delete_genre(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    GenreService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Genre deleted successfully" })))
}

pub fn genre_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/genres")
            .service(create_genre)
            .service(get_genres)
            .service(get_genre)
            .service(update_genre)
            .service(delete_genre),
    );
}
