use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::{Ready, ready};

use crate::errors::AppError;
use crate::models::roles::Role;
use crate::state::AppState;

/// Verified caller identity, extracted from `Authorization: Bearer <token>`.
/// Declaring it as a handler argument makes the route require a valid token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i32,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Passes only when the caller's role is in `allowed`.
    pub fn authorize(&self, allowed: &[Role]) -> Result<(), AppError> {
        authorize(self.role, allowed)
    }

    /// Account owner, or anyone in `allowed`.
    pub fn authorize_owner_or(&self, owner_id: i32, allowed: &[Role]) -> Result<(), AppError> {
        if self.user_id == owner_id {
            return Ok(());
        }
        self.authorize(allowed)
    }
}

pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden {
            required: allowed.to_vec(),
            actual: role,
        })
    }
}

/// The token part of a `Bearer` authorization header, if any.
pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            return ready(Err(AppError::Internal("application state missing".to_string())));
        };

        let result = state.tokens.verify(bearer_token(req)).map(|claims| AuthUser {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        });

        ready(result)
    }
}
