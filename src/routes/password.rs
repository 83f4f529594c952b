use actix_web::{HttpRequest, HttpResponse, post, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::bearer_token;
use crate::models::dto::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::services::crud;
use crate::services::password_reset_service::PasswordResetService;
use crate::state::AppState;

const RESET_SENT: &str = "If an account exists, a reset link has been sent";

#[post("/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    body: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    crud::validate_request(&*body)?;

    PasswordResetService::request_reset(
        &state.db,
        state.mailer.as_ref(),
        &state.config.backend_url,
        state.config.reset_token_ttl,
        &body.email,
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": RESET_SENT })))
}

/// The reset token travels in `Authorization: Bearer <token>`.
#[post("/reset-password")]
pub async fn reset_password(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    PasswordResetService::redeem(
        &state.db,
        state.mailer.as_ref(),
        bearer_token(&req),
        body.into_inner(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(json!({ "message": "Password reset successful" })))
}

pub fn password_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/password")
            .service(forgot_password)
            .service(reset_password),
    );
}

#[cfg(test)]
mod tests {
    use crate::models::roles::Role;
    use crate::routes::configure_routes;
    use crate::test_utils::{RecordingMailer, seed_user, setup_test_db, test_state};
    use actix_web::{App, http::StatusCode, test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_forgot_then_reset_once() {
        let dir = tempfile::tempdir().unwrap();
        let db = setup_test_db().await;
        let user = seed_user(&db, "ali", Role::Customer).await;
        let mailer = Arc::new(RecordingMailer::default());
        let state = test_state(db, mailer.clone(), dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/password/forgot-password")
            .set_json(json!({ "email": "ghost@example.com" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], super::RESET_SENT);
        assert!(mailer.subjects().is_empty());

        let req = test::TestRequest::post()
            .uri("/api/password/forgot-password")
            .set_json(json!({ "email": user.email }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        // the token is the only 64-hex-character word of the mail
        let mail = mailer.last_body().unwrap();
        let token = mail
            .split_whitespace()
            .find(|w| w.len() == 64 && w.chars().all(|c| c.is_ascii_hexdigit()))
            .unwrap()
            .to_string();

        let redeem = |password: &str| {
            test::TestRequest::post()
                .uri("/api/password/reset-password")
                .insert_header(("Authorization", format!("Bearer {}", token)))
                .set_json(json!({ "newPassword": password }))
                .to_request()
        };

        assert_eq!(test::call_service(&app, redeem("brand-new")).await.status(), StatusCode::OK);

        let resp = test::call_service(&app, redeem("other-new")).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid or expired token");

        let req = test::TestRequest::post()
            .uri("/api/user/login")
            .set_json(json!({ "username": "ali", "password": "brand-new" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_reset_without_token() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(setup_test_db().await, Arc::new(RecordingMailer::default()), dir.path());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/password/reset-password")
            .set_json(json!({ "newPassword": "brand-new" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Reset token is required");
    }
}
