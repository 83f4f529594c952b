use actix_web::{HttpResponse, delete, get, post, put, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateShowtimeRequest, UpdateShowtimeRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::showtime_service::ShowtimeService;
use crate::state::AppState;

#[post("/addShowtime")]
pub async fn add_showtime(
    auth: AuthUser,
    state: web::Data<AppState>,
    body: web::Json<CreateShowtimeRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    let showtime = ShowtimeService::create(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Showtime added successfully",
        "showtime_id": showtime.showtime_id,
    })))
}

#[get("/getshowtimes")]
pub async fn get_showtimes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let showtimes = ShowtimeService::list(&state.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Show time listed",
        "showtimes": showtimes,
    })))
}

#[get("/getshowtime/{showtime_id}")]
pub async fn get_showtime(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let showtime = ShowtimeService::get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Showtime fetched successfully",
        "showtime": showtime,
    })))
}

#[put("/updateshowtime/{showtime_id}")]
pub async fn update_showtime(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateShowtimeRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    ShowtimeService::update(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Showtime updated successfully" })))
}

#[delete("/deleteshowtime/{showtime_id}")]
pub async fn delete_showtime(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    ShowtimeService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Showtime deleted successfully" })))
}

pub fn showtime_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/showtimes")
            .service(add_showtime)
            .service(get_showtimes)
            .service(get_showtime)
            .service(update_showtime)
            .service(delete_showtime),
    );
}

#[cfg(test)]
mod tests {
    use crate::models::roles::Role;
    use crate::routes::configure_routes;
    use crate::test_utils::{
        RecordingMailer, bearer, seed_auditorium, seed_movie, seed_user, setup_test_db, test_state,
    };
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_showtime_gating_and_price_check() {
        let dir = tempfile::tempdir().unwrap();
        let db = setup_test_db().await;
        let movie = seed_movie(&db).await;
        let audi = seed_auditorium(&db).await;
        let customer = seed_user(&db, "ali", Role::Customer).await;
        let admin = seed_user(&db, "boss", Role::Admin).await;
        let state = test_state(db, Arc::new(RecordingMailer::default()), dir.path());
        let customer_token = bearer(&state, &customer);
        let admin_token = bearer(&state, &admin);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;
        let showtime = json!({
            "movie_id": movie.movie_id,
            "auditorium_id": audi.auditorium_id,
            "ticket_price": 12.5,
            "show_time": "2026-11-01T20:30:00"
        });

        let req = test::TestRequest::post()
            .uri("/api/showtimes/addShowtime")
            .set_json(&showtime)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::post()
            .uri("/api/showtimes/addShowtime")
            .insert_header(("Authorization", customer_token))
            .set_json(&showtime)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/showtimes/addShowtime")
            .insert_header(("Authorization", admin_token.clone()))
            .set_json(json!({
                "movie_id": movie.movie_id,
                "auditorium_id": audi.auditorium_id,
                "ticket_price": 0
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "ticket_price must be a positive number");

        let req = test::TestRequest::post()
            .uri("/api/showtimes/addShowtime")
            .insert_header(("Authorization", admin_token))
            .set_json(&showtime)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let showtime_id = body["showtime_id"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri(&format!("/api/showtimes/getshowtime/{}", showtime_id))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["showtime"]["ticket_price"], 12.5);
    }
}
