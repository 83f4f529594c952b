use chrono::NaiveDateTime;
use image::Luma;
use qrcode::QrCode;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
};
use std::path::{Path, PathBuf};

use crate::errors::AppError;
use crate::models::{auditoriums, movies, reservation_seats, reservations, seats, showtimes, users};

/// One reservation joined with everything printed on its ticket.
#[derive(Debug, FromQueryResult)]
pub struct TicketRow {
    pub reservation_id: i32,
    pub username: String,
    pub show_time: Option<NaiveDateTime>,
    pub movie_title: String,
    pub auditorium_name: String,
}

#[derive(Debug)]
pub struct TicketView {
    pub row: TicketRow,
    pub seats: String,
}

impl TicketView {
    /// Text encoded into the QR code.
    pub fn summary(&self) -> String {
        let show_time = self
            .row
            .show_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "TBA".to_string());

        format!(
            "Reservation ID: {}, User: {}, Movie: {}, Auditorium: {}, Showtime: {}, Seats: {}",
            self.row.reservation_id,
            self.row.username,
            self.row.movie_title,
            self.row.auditorium_name,
            show_time,
            self.seats
        )
    }
}

pub struct TicketService;

impl TicketService {
    pub async fn load(db: &DatabaseConnection, reservation_id: i32) -> Result<TicketView, AppError> {
        let row = reservations::Entity::find()
            .select_only()
            .column(reservations::Column::ReservationId)
            .column(users::Column::Username)
            .column(showtimes::Column::ShowTime)
            .column_as(movies::Column::Title, "movie_title")
            .column(auditoriums::Column::AuditoriumName)
            .join(JoinType::InnerJoin, reservations::Relation::User.def())
            .join(JoinType::InnerJoin, reservations::Relation::Showtime.def())
            .join(JoinType::InnerJoin, showtimes::Relation::Movie.def())
            .join(JoinType::InnerJoin, showtimes::Relation::Auditorium.def())
            .filter(reservations::Column::ReservationId.eq(reservation_id))
            .into_model::<TicketRow>()
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Reservation not found".to_string()))?;

        let labels: Vec<String> = reservation_seats::Entity::find()
            .select_only()
            .column(seats::Column::SeatNumber)
            .join(JoinType::InnerJoin, reservation_seats::Relation::Seat.def())
            .filter(reservation_seats::Column::ReservationId.eq(reservation_id))
            .order_by_asc(seats::Column::SeatNumber)
            .into_tuple::<String>()
            .all(db)
            .await?;

        Ok(TicketView {
            row,
            seats: join_seat_labels(labels),
        })
    }

    /// Writes `qrcode_<id>.png` under `uploads_dir`, replacing any previous
    /// render, and returns its public path.
    pub async fn render(
        db: &DatabaseConnection,
        uploads_dir: &Path,
        reservation_id: i32,
    ) -> Result<String, AppError> {
        let ticket = Self::load(db, reservation_id).await?;
        let file_name = format!("qrcode_{}.png", reservation_id);
        let path = uploads_dir.join(&file_name);

        tokio::fs::create_dir_all(uploads_dir)
            .await
            .map_err(|e| AppError::Internal(format!("Cannot create {}: {}", uploads_dir.display(), e)))?;

        write_qr_png(ticket.summary(), path).await?;

        tracing::info!(reservation_id, file = %file_name, "ticket rendered");
        Ok(format!("/uploads/{}", file_name))
    }
}

/// Seat labels in ascending order, comma separated. "-" when none are assigned.
pub fn join_seat_labels(mut labels: Vec<String>) -> String {
    if labels.is_empty() {
        return "-".to_string();
    }
    labels.sort();
    labels.join(", ")
}

async fn write_qr_png(data: String, path: PathBuf) -> Result<(), AppError> {
    tokio::task::spawn_blocking(move || {
        let code = QrCode::new(data.as_bytes())
            .map_err(|e| AppError::Internal(format!("QR encoding failed: {}", e)))?;
        let image = code.render::<Luma<u8>>().min_dimensions(256, 256).build();
        image
            .save(&path)
            .map_err(|e| AppError::Internal(format!("Cannot write {}: {}", path.display(), e)))
    })
    .await
    .map_err(|e| AppError::Internal(format!("QR render task failed: {}", e)))?
}
