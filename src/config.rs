// Process-wide configuration, read once from the environment (and `.env`).

use chrono::Duration;
use std::env;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 9000;
const DEFAULT_UPLOADS_DIR: &str = "uploads";
const DEFAULT_BACKEND_URL: &str = "http://localhost:9000";
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_LOG_FILTER: &str = "cinema_booking_api=info,actix_web=info";
const INSECURE_JWT_SECRET: &str = "default-insecure-key-change-this";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    /// `None` means mail is logged instead of delivered.
    pub smtp: Option<SmtpConfig>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub reset_token_ttl: Duration,
    pub host: String,
    pub port: u16,
    pub uploads_dir: PathBuf,
    pub auto_migrate: bool,
    pub backend_url: String,
    pub log_json: bool,
    pub mail: MailConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using an insecure development key");
            INSECURE_JWT_SECRET.to_string()
        });

        let smtp = match optional("EMAIL_HOST") {
            Some(host) => Some(SmtpConfig {
                host,
                port: parse_or("EMAIL_PORT", DEFAULT_SMTP_PORT)?,
                username: optional("EMAIL_USER"),
                password: optional("EMAIL_PASSWORD"),
            }),
            None => None,
        };

        let from = optional("EMAIL_FROM")
            .unwrap_or_else(|| "Cinema Booking <no-reply@cinema-booking.local>".to_string());
        if from.parse::<lettre::message::Mailbox>().is_err() {
            return Err(ConfigError::Invalid {
                name: "EMAIL_FROM",
                value: from,
            });
        }

        Ok(Self {
            database_url,
            jwt_secret,
            token_ttl: Duration::hours(1),
            reset_token_ttl: Duration::hours(1),
            host: optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", DEFAULT_PORT)?,
            uploads_dir: optional("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOADS_DIR)),
            auto_migrate: parse_or("AUTO_MIGRATE", false)?,
            backend_url: optional("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            log_json: parse_or("LOG_JSON", false)?,
            mail: MailConfig { smtp, from },
        })
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// filter; `log_json` switches to one JSON object per line.
pub fn init_tracing(log_json: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    if log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
