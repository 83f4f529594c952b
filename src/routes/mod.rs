pub mod health;
pub mod accounts;
pub mod genres;
pub mod movies;
pub mod auditoriums;
pub mod seats;
pub mod showtimes;
pub mod reservations;
pub mod payments;
pub mod password;

use actix_web::{error, web};

use crate::errors::AppError;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(
            web::scope("/api")
                .service(health::health_check)
                .configure(accounts::account_routes)
                .configure(genres::genre_routes)
                .configure(movies::movie_routes)
                .configure(auditoriums::auditorium_routes)
                .configure(seats::seat_routes)
                .configure(showtimes::showtime_routes)
                .configure(reservations::reservation_routes)
                .configure(payments::payment_routes)
                .configure(password::password_routes),
        );
}

/// Malformed or incomplete JSON bodies answer 400 `{message}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = match &err {
            error::JsonPayloadError::Deserialize(e) => format!("Invalid request body: {}", e),
            other => other.to_string(),
        };
        error::Error::from(AppError::Validation(message))
    })
}

/// Non-numeric ids in the path answer 400 `{message}`.
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        error::Error::from(AppError::Validation(format!("Invalid path parameter: {}", err)))
    })
}
