use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::AppError;
use crate::models::dto::{CreateShowtimeRequest, UpdateShowtimeRequest};
use crate::models::showtimes;
use crate::services::crud::{self, provided};

pub struct ShowtimeService;

impl ShowtimeService {
    pub async fn create(
        db: &DatabaseConnection,
        body: CreateShowtimeRequest,
    ) -> Result<showtimes::Model, AppError> {
        let ticket_price = crud::positive_decimal("ticket_price", body.ticket_price)?;

        let showtime = showtimes::ActiveModel {
            movie_id: Set(body.movie_id),
            auditorium_id: Set(body.auditorium_id),
            ticket_price: Set(ticket_price),
            show_time: Set(body.show_time),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(
            showtime_id = showtime.showtime_id,
            movie_id = showtime.movie_id,
            "showtime added"
        );
        Ok(showtime)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<showtimes::Model>, AppError> {
        Ok(showtimes::Entity::find()
            .order_by_asc(showtimes::Column::ShowtimeId)
            .all(db)
            .await?)
    }

    pub async fn get(
        db: &DatabaseConnection,
        showtime_id: i32,
    ) -> Result<showtimes::Model, AppError> {
        crud::find_by_id::<showtimes::Entity, _>(db, showtime_id).await
    }

    /// `ticket_price` is only checked when it is part of the update.
    pub async fn update(
        db: &DatabaseConnection,
        showtime_id: i32,
        body: UpdateShowtimeRequest,
    ) -> Result<(), AppError> {
        let ticket_price = body
            .ticket_price
            .map(|price| crud::positive_decimal("ticket_price", price))
            .transpose()?;

        let changes = showtimes::ActiveModel {
            movie_id: provided(body.movie_id),
            auditorium_id: provided(body.auditorium_id),
            ticket_price: provided(ticket_price),
            show_time: provided(body.show_time.map(Some)),
            ..Default::default()
        };
        crud::update_by_id::<showtimes::Entity, _, _>(db, showtime_id, changes).await
    }

    pub async fn delete(db: &DatabaseConnection, showtime_id: i32) -> Result<(), AppError> {
        crud::delete_by_id::<showtimes::Entity, _>(db, showtime_id).await
    }
}
