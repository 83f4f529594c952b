// Request and response bodies of the HTTP API.
//
// Create requests use plain field types: a missing or mistyped field is
// rejected while the JSON body is extracted. Update requests use Option<T>
// per field: a key that is absent or null is "not provided", any other value
// (0, false and "" included) is provided.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::roles::Role;

/// Phone numbers are exactly 11 ASCII digits, e.g. "03001234567".
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.len() == 11 && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        let mut error = ValidationError::new("phone");
        error.message = Some("Phone number must be exactly 11 digits!".into());
        Err(error)
    }
}

// ----------------------------------------------------------------------------
// Accounts
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and email are required!"))]
    pub username: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required!"))]
    pub email: String,
    #[serde(rename = "phoneNo", default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone_no: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required!"))]
    pub password: String,
    pub role_id: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required!"))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password are required!"))]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "username cannot be empty"))]
    pub username: Option<String>,
    #[validate(email(message = "A valid email is required!"))]
    pub email: Option<String>,
    #[serde(rename = "phoneNo")]
    #[validate(custom(function = "validate_phone"))]
    pub phone_no: Option<String>,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role_id: i32,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: AccountSummary,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Email is required!"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[serde(rename = "newPassword", default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
}

// ----------------------------------------------------------------------------
// Catalogue
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGenreRequest {
    #[validate(length(min = 1, message = "Provide genre_name and description for the movie"))]
    pub genre_name: String,
    #[validate(length(min = 1, message = "Provide genre_name and description for the movie"))]
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateGenreRequest {
    #[validate(length(min = 1, message = "genre_name cannot be empty"))]
    pub genre_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "poster_url is required"))]
    pub poster_url: String,
    pub genre_id: i32,
    #[validate(range(min = 1, message = "duration_minutes must be a positive number"))]
    pub duration_minutes: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub genre_id: Option<i32>,
    #[validate(range(min = 1, message = "duration_minutes must be a positive number"))]
    pub duration_minutes: Option<i32>,
}

/// `?page=&limit=` on the movie listing. Kept as raw strings so that garbage
/// falls back to the defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

// ----------------------------------------------------------------------------
// Venue and schedule
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAuditoriumRequest {
    #[validate(length(min = 1, message = "auditorium_name is required"))]
    pub auditorium_name: String,
    #[validate(range(min = 0, message = "total_seats cannot be negative"))]
    pub total_seats: i32,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateAuditoriumRequest {
    #[validate(length(min = 1, message = "auditorium_name cannot be empty"))]
    pub auditorium_name: Option<String>,
    #[validate(range(min = 0, message = "total_seats cannot be negative"))]
    pub total_seats: Option<i32>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSeatRequest {
    pub auditorium_id: i32,
    #[validate(length(min = 1, message = "seat_number is required"))]
    pub seat_number: String,
    pub is_vip: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateSeatRequest {
    pub auditorium_id: Option<i32>,
    #[validate(length(min = 1, message = "seat_number cannot be empty"))]
    pub seat_number: Option<String>,
    pub is_vip: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateShowtimeRequest {
    pub movie_id: i32,
    pub auditorium_id: i32,
    pub ticket_price: f64,
    pub show_time: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateShowtimeRequest {
    pub movie_id: Option<i32>,
    pub auditorium_id: Option<i32>,
    pub ticket_price: Option<f64>,
    pub show_time: Option<NaiveDateTime>,
}

// ----------------------------------------------------------------------------
// Bookings
// ----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateReservationRequest {
    pub user_id: i32,
    pub showtime_id: i32,
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub seat_ids: Vec<i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateReservationRequest {
    pub user_id: Option<i32>,
    pub showtime_id: Option<i32>,
    pub total_amount: Option<f64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PaymentRequest {
    pub user_id: i32,
    pub amount: f64,
    #[serde(default)]
    #[validate(length(min = 1, message = "Payment method is required"))]
    pub payment_method: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Transaction ID is required"))]
    pub transaction_id: String,
    pub payment_gateway: Option<String>,
    pub payment_reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_must_be_eleven_digits() {
        assert!(validate_phone("03001234567").is_ok());
        assert!(validate_phone("123").is_err());
        assert!(validate_phone("0300123456a").is_err());
        assert!(validate_phone("030012345678").is_err());
    }

    #[test]
    fn test_update_distinguishes_absent_from_falsy() {
        let body: UpdateSeatRequest =
            serde_json::from_str(r#"{"is_vip": false, "auditorium_id": null}"#).unwrap();
        assert_eq!(body.is_vip, Some(false));
        assert_eq!(body.auditorium_id, None);
        assert_eq!(body.seat_number, None);

        let body: UpdateAuditoriumRequest =
            serde_json::from_str(r#"{"total_seats": 0}"#).unwrap();
        assert_eq!(body.total_seats, Some(0));
    }

    #[test]
    fn test_signup_reports_short_phone() {
        let body: SignupRequest = serde_json::from_str(
            r#"{"username":"ali","email":"ali@example.com","phoneNo":"123","password":"secret1"}"#,
        )
        .unwrap();
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("phone_no") || fields.contains_key("phoneNo"));
    }

    #[test]
    fn test_payment_requires_method_and_transaction() {
        let body: PaymentRequest =
            serde_json::from_str(r#"{"user_id": 1, "amount": 12.5}"#).unwrap();
        let errors = body.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("payment_method"));
        assert!(fields.contains_key("transaction_id"));
    }
}
