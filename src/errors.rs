use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use sea_orm::DbErr;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

use crate::models::roles::Role;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid fields: {0}")]
    InvalidFields(ValidationErrors),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("token is missing role information")]
    MalformedClaims,

    #[error("role {actual} is not in {required:?}")]
    Forbidden { required: Vec<Role>, actual: Role },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("invalid or expired reset token")]
    InvalidOrExpiredToken,

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("mail error: {0}")]
    Mail(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// One entry of the `errors` array returned for field validation failures.
#[derive(Debug, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// The message shown to API callers. Internal causes stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::Unauthenticated(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::InvalidFields(errors) => field_errors(errors)
                .into_iter()
                .next()
                .map(|e| e.message)
                .unwrap_or_else(|| "Validation failed".to_string()),
            AppError::InvalidToken => "Invalid or expired token".to_string(),
            AppError::MalformedClaims => {
                "Invalid token structure. Missing role information.".to_string()
            }
            AppError::Forbidden { .. } => "Access denied. Insufficient permissions.".to_string(),
            AppError::InvalidOrExpiredToken => "Invalid or expired token".to_string(),
            AppError::Mail(msg) => msg.clone(),
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::Database(e) => error!(error = %e, "database error"),
            AppError::Internal(msg) => error!(message = %msg, "internal error"),
            AppError::Mail(msg) => error!(message = %msg, "mail delivery failed"),
            AppError::Forbidden { required, actual } => {
                warn!(required = ?required, actual = %actual, "access denied")
            }
            _ => {}
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidFields(_)
            | AppError::MalformedClaims
            | AppError::InvalidOrExpiredToken => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated(_) | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Mail(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.log();

        let body = match self {
            AppError::InvalidFields(errors) => json!({
                "message": self.public_message(),
                "errors": field_errors(errors),
            }),
            _ => json!({ "message": self.public_message() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::InvalidFields(errors)
    }
}

/// Flattens validator output into a stable, field-sorted list.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| FieldError {
                field: field.clone(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(
            AppError::Validation("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::Forbidden {
                required: vec![Role::Admin],
                actual: Role::Customer
            }
            .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidOrExpiredToken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_database_details_are_hidden() {
        let err = AppError::Database(DbErr::Custom("relation users does not exist".into()));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_forbidden_does_not_echo_roles() {
        let err = AppError::Forbidden {
            required: vec![Role::SuperAdmin, Role::Admin],
            actual: Role::Customer,
        };
        let message = err.public_message();
        assert!(!message.contains("Customer"));
        assert!(!message.contains("Admin"));
    }

    #[test]
    fn test_field_errors_are_sorted_and_carry_messages() {
        let mut errors = ValidationErrors::new();
        let mut phone = ValidationError::new("phone");
        phone.message = Some("Phone number must be exactly 11 digits!".into());
        errors.add("phoneNo", phone);
        errors.add("email", ValidationError::new("email"));

        let flat = field_errors(&errors);
        assert_eq!(flat.len(), 2);
        assert_eq!(flat[0].field, "email");
        assert_eq!(flat[0].message, "email is invalid");
        assert_eq!(flat[1].message, "Phone number must be exactly 11 digits!");

        let err = AppError::from(errors);
        assert_eq!(err.public_message(), "email is invalid");
    }
}
