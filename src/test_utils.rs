// Test utilities shared across the unit tests. Only compiled for tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::config::{Config, MailConfig};
use crate::db;
use crate::errors::AppError;
use crate::models::reservations::ReservationStatus;
use crate::models::roles::Role;
use crate::models::{auditoriums, genres, movies, reservations, seats, showtimes, users};
use crate::services::mail_service::Mailer;
use crate::state::AppState;
use crate::utils::jwt::TokenService;
use crate::utils::password;

pub const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";
pub const TEST_PASSWORD: &str = "secret1";

/// Fresh in-memory database with every table created.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    db::sync_schema(&db).await.expect("Failed to create schema");
    db
}

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET, Duration::hours(1))
}

pub fn test_config(uploads_dir: &Path) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        token_ttl: Duration::hours(1),
        reset_token_ttl: Duration::hours(1),
        host: "127.0.0.1".to_string(),
        port: 0,
        uploads_dir: uploads_dir.to_path_buf(),
        auto_migrate: true,
        backend_url: "http://localhost:9000".to_string(),
        log_json: false,
        mail: MailConfig {
            smtp: None,
            from: "Cinema <no-reply@cinema-booking.local>".to_string(),
        },
    }
}

pub fn test_state(db: DatabaseConnection, mailer: Arc<RecordingMailer>, uploads_dir: &Path) -> AppState {
    AppState::new(db, test_config(uploads_dir), mailer)
}

/// `Authorization` header value for the given account.
pub fn bearer(state: &AppState, user: &users::Model) -> String {
    let role = Role::try_from(user.role_id).expect("seeded role");
    let token = state
        .tokens
        .issue(user.user_id, &user.email, role)
        .expect("token");
    format!("Bearer {}", token)
}

/// Keeps every message instead of sending it; `failing()` rejects them all.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn subjects(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|(_, subject, _)| subject.clone())
            .collect()
    }

    pub fn last_body(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, _, body)| body.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::Mail("relay unavailable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

pub async fn seed_user(db: &DatabaseConnection, username: &str, role: Role) -> users::Model {
    users::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{}@example.com", username)),
        phone_no: Set("03001234567".to_string()),
        password: Set(password::hash_password(TEST_PASSWORD.to_string()).await.unwrap()),
        role_id: Set(role.id()),
        reset_token: Set(None),
        reset_token_expiry: Set(None),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_genre(db: &DatabaseConnection) -> genres::Model {
    genres::ActiveModel {
        genre_name: Set("Drama".to_string()),
        description: Set("Serious stories".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_movie(db: &DatabaseConnection) -> movies::Model {
    let genre = seed_genre(db).await;
    movies::ActiveModel {
        title: Set("Heat".to_string()),
        description: Set("A heist film".to_string()),
        poster_url: Set("/posters/heat.jpg".to_string()),
        genre_id: Set(genre.genre_id),
        duration_minutes: Set(170),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_auditorium(db: &DatabaseConnection) -> auditoriums::Model {
    auditoriums::ActiveModel {
        auditorium_name: Set("Hall 1".to_string()),
        total_seats: Set(100),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_seat(db: &DatabaseConnection, auditorium_id: i32, label: &str) -> seats::Model {
    seats::ActiveModel {
        auditorium_id: Set(auditorium_id),
        seat_number: Set(label.to_string()),
        is_vip: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// A showtime with its own movie, genre and auditorium.
pub async fn seed_showtime(db: &DatabaseConnection) -> showtimes::Model {
    let movie = seed_movie(db).await;
    let auditorium = seed_auditorium(db).await;
    showtimes::ActiveModel {
        movie_id: Set(movie.movie_id),
        auditorium_id: Set(auditorium.auditorium_id),
        ticket_price: Set(Decimal::new(1250, 2)),
        show_time: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_reservation(
    db: &DatabaseConnection,
    user_id: i32,
    showtime_id: i32,
) -> reservations::Model {
    reservations::ActiveModel {
        user_id: Set(user_id),
        showtime_id: Set(showtime_id),
        total_amount: Set(Decimal::new(25, 0)),
        status: Set(ReservationStatus::Pending),
        created_at: Set(Utc::now().naive_utc()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
