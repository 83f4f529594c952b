use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde_json::json;

use crate::errors::AppError;
use crate::middleware::AuthUser;
use crate::models::dto::{LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest};
use crate::models::roles::MANAGEMENT_ROLES;
use crate::services::account_service::AccountService;
use crate::state::AppState;

/// POST /user/signup (public)
#[post("/signup")]
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    AccountService::signup(&state.db, body.into_inner()).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "User registered successfully" })))
}

/// POST /user/login (public)
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let (token, user) = AccountService::login(&state.db, &state.tokens, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login Successful",
        token,
        user,
    }))
}

/// GET /user/getOwnProfile/{user_id} (owner or management)
#[get("/getOwnProfile/{user_id}")]
pub async fn get_own_profile(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    auth.authorize_owner_or(user_id, MANAGEMENT_ROLES)?;

    let user = AccountService::get(&state.db, user_id).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "User details fetched successfully",
        "user": user,
    })))
}

/// PATCH /user/updateOwnProfile/{user_id} (owner or management)
#[patch("/updateOwnProfile/{user_id}")]
pub async fn update_own_profile(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    auth.authorize_owner_or(user_id, MANAGEMENT_ROLES)?;

    AccountService::update_profile(&state.db, user_id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Profile updated successfully" })))
}

/// DELETE /user/DeleteProfilebyAdmin/{user_id} (management)
#[delete("/DeleteProfilebyAdmin/{user_id}")]
pub async fn delete_profile(
    auth: AuthUser,
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    AccountService::delete(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "User deleted successfully!" })))
}

/// GET /user/getAllCustomers (management)
#[get("/getAllCustomers")]
pub async fn get_all_customers(
    auth: AuthUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    auth.authorize(MANAGEMENT_ROLES)?;

    let customers = AccountService::list_customers(&state.db).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Customers fetched successfully",
        "customers": customers,
    })))
}

pub fn account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(signup)
            .service(login)
            .service(get_own_profile)
            .service(update_own_profile)
            .service(delete_profile)
            .service(get_all_customers),
    );
}
