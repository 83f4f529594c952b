use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use crate::errors::AppError;
use crate::models::dto::{CreateReservationRequest, UpdateReservationRequest};
use crate::models::reservations::{self, ReservationStatus};
use crate::models::{payments, reservation_seats};
use crate::services::crud::{self, provided};

pub struct ReservationService;

impl ReservationService {
    /// Inserts the reservation and one seat assignment per entry of
    /// `seat_ids`, in a single transaction.
    pub async fn create(
        db: &DatabaseConnection,
        body: CreateReservationRequest,
    ) -> Result<reservations::Model, AppError> {
        let total_amount = crud::positive_decimal("total_amount", body.total_amount)?;
        let status = parse_status(&body.status)?;

        let txn = db.begin().await?;

        let reservation = reservations::ActiveModel {
            user_id: Set(body.user_id),
            showtime_id: Set(body.showtime_id),
            total_amount: Set(total_amount),
            status: Set(status),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !body.seat_ids.is_empty() {
            let assignments = body.seat_ids.iter().map(|seat_id| reservation_seats::ActiveModel {
                reservation_id: Set(reservation.reservation_id),
                seat_id: Set(*seat_id),
                ..Default::default()
            });
            reservation_seats::Entity::insert_many(assignments)
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            reservation_id = reservation.reservation_id,
            user_id = reservation.user_id,
            seats = body.seat_ids.len(),
            "reservation added"
        );
        Ok(reservation)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<reservations::Model>, AppError> {
        Ok(reservations::Entity::find()
            .order_by_asc(reservations::Column::ReservationId)
            .all(db)
            .await?)
    }

    pub async fn get(
        db: &DatabaseConnection,
        reservation_id: i32,
    ) -> Result<reservations::Model, AppError> {
        crud::find_by_id::<reservations::Entity, _>(db, reservation_id).await
    }

    /// `total_amount` and `status` are only checked when they are part of the update.
    pub async fn update(
        db: &DatabaseConnection,
        reservation_id: i32,
        body: UpdateReservationRequest,
    ) -> Result<(), AppError> {
        let total_amount = body
            .total_amount
            .map(|amount| crud::positive_decimal("total_amount", amount))
            .transpose()?;
        let status = body.status.as_deref().map(parse_status).transpose()?;

        let changes = reservations::ActiveModel {
            user_id: provided(body.user_id),
            showtime_id: provided(body.showtime_id),
            total_amount: provided(total_amount),
            status: provided(status),
            ..Default::default()
        };
        crud::update_by_id::<reservations::Entity, _, _>(db, reservation_id, changes).await
    }

    /// Removes the reservation together with its seat assignments. A
    /// reservation that already has payments is kept.
    pub async fn delete(db: &DatabaseConnection, reservation_id: i32) -> Result<(), AppError> {
        let paid = payments::Entity::find()
            .filter(payments::Column::ReservationId.eq(reservation_id))
            .count(db)
            .await?;
        if paid > 0 {
            return Err(AppError::Conflict(
                "Reservation has payments and cannot be deleted".to_string(),
            ));
        }

        let txn = db.begin().await?;
        reservation_seats::Entity::delete_many()
            .filter(reservation_seats::Column::ReservationId.eq(reservation_id))
            .exec(&txn)
            .await?;
        crud::delete_by_id::<reservations::Entity, _>(&txn, reservation_id).await?;
        txn.commit().await?;

        tracing::info!(reservation_id, "reservation deleted");
        Ok(())
    }
}

fn parse_status(raw: &str) -> Result<ReservationStatus, AppError> {
    raw.parse::<ReservationStatus>().map_err(AppError::Validation)
}
