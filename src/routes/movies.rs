use actix_web::{HttpResponse, delete, get, put, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateMovieRequest, PageQuery, UpdateMovieRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::movie_service::MovieService;
use crate::state::AppState;

/// POST /movies (management). Registered on both "" and "/".
pub async fn create_movie(
    auth: AuthUser,
    state: web::Data<AppState>,
    body: web::Json<CreateMovieRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    let movie_id = MovieService::create(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({
        "message": "Movie added successfully",
        "movieId": movie_id,
    })))
}

#[get("/getallmovie")]
pub async fn get_all_movies(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let (movies, pagination) = MovieService::list_page(&state.db, &query).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "List of movies",
        "movies": movies,
        "pagination": pagination,
    })))
}

#[get("/getmoviebyid/{movie_id}")]
pub async fn get_movie(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let movie = MovieService::get(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Details of the movie",
        "movie": movie,
    })))
}

#[put("/updatemovie/{movie_id}")]
pub async fn update_movie(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateMovieRequest>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    MovieService::update(&state.db, path.into_inner(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Movie updated successfully" })))
}

#[delete("/deletemovie/{movie_id}")]
pub async fn delete_movie(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    MovieService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Movie deleted successfully" })))
}

pub fn movie_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/movies")
            .service(web::resource(["", "/"]).route(web::post().to(create_movie)))
            .service(get_all_movies)
            .service(get_movie)
            .service(update_movie)
            .service(delete_movie),
    );
}

#[cfg(test)]
mod tests {
    use crate::models::roles::Role;
    use crate::routes::configure_routes;
    use crate::test_utils::{RecordingMailer, bearer, seed_genre, seed_user, setup_test_db, test_state};
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_movie_lifecycle_over_http() {
        let dir = tempfile::tempdir().unwrap();
        let db = setup_test_db().await;
        let genre = seed_genre(&db).await;
        let admin = seed_user(&db, "boss", Role::Admin).await;
        let customer = seed_user(&db, "ali", Role::Customer).await;
        let state = test_state(db, Arc::new(RecordingMailer::default()), dir.path());
        let admin_token = bearer(&state, &admin);
        let customer_token = bearer(&state, &customer);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let movie = json!({
            "title": "Heat",
            "description": "A heist film",
            "poster_url": "/posters/heat.jpg",
            "genre_id": genre.genre_id,
            "duration_minutes": 170
        });

        let req = test::TestRequest::post()
            .uri("/api/movies")
            .insert_header(("Authorization", customer_token))
            .set_json(&movie)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/movies/")
            .insert_header(("Authorization", admin_token.clone()))
            .set_json(&movie)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let movie_id = body["movieId"].as_i64().unwrap();

        let req = test::TestRequest::get()
            .uri("/api/movies/getallmovie?page=abc&limit=0")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["pagination"]["page"], 1);
        assert_eq!(body["pagination"]["limit"], 10);
        assert_eq!(body["pagination"]["total"], 1);
        assert_eq!(body["pagination"]["totalPages"], 1);

        let req = test::TestRequest::put()
            .uri(&format!("/api/movies/updatemovie/{}", movie_id))
            .insert_header(("Authorization", admin_token.clone()))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/movies")
            .insert_header(("Authorization", admin_token))
            .set_json(json!({ "title": "No genre" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_movie_and_bad_id() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(setup_test_db().await, Arc::new(RecordingMailer::default()), dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/movies/getmoviebyid/9").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Movie not found");

        let req = test::TestRequest::get().uri("/api/movies/getmoviebyid/nine").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
