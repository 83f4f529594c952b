use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::AppError;
use crate::models::dto::{CreateSeatRequest, UpdateSeatRequest};
use crate::models::seats;
use crate::services::crud::{self, provided};

pub struct SeatService;

impl SeatService {
    pub async fn create(
        db: &DatabaseConnection,
        body: CreateSeatRequest,
    ) -> Result<seats::Model, AppError> {
        crud::validate_request(&body)?;

        let seat = seats::ActiveModel {
            auditorium_id: Set(body.auditorium_id),
            seat_number: Set(body.seat_number),
            is_vip: Set(body.is_vip),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(seat_id = seat.seat_id, auditorium_id = seat.auditorium_id, "seat added");
        Ok(seat)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<seats::Model>, AppError> {
        Ok(seats::Entity::find()
            .order_by_asc(seats::Column::SeatId)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, seat_id: i32) -> Result<seats::Model, AppError> {
        crud::find_by_id::<seats::Entity, _>(db, seat_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        seat_id: i32,
        body: UpdateSeatRequest,
    ) -> Result<(), AppError> {
        crud::validate_request(&body)?;

        let changes = seats::ActiveModel {
            auditorium_id: provided(body.auditorium_id),
            seat_number: provided(body.seat_number),
            is_vip: provided(body.is_vip),
            ..Default::default()
        };
        crud::update_by_id::<seats::Entity, _, _>(db, seat_id, changes).await
    }

    pub async fn delete(db: &DatabaseConnection, seat_id: i32) -> Result<(), AppError> {
        crud::delete_by_id::<seats::Entity, _>(db, seat_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{seed_auditorium, setup_test_db};

    #[tokio::test]
    async fn test_vip_flag_can_be_cleared() {
        let db = setup_test_db().await;
        let audi = seed_auditorium(&db).await;
        let seat = SeatService::create(
            &db,
            CreateSeatRequest {
                auditorium_id: audi.auditorium_id,
                seat_number: "A1".to_string(),
                is_vip: true,
            },
        )
        .await
        .unwrap();

        let body = UpdateSeatRequest {
            is_vip: Some(false),
            ..Default::default()
        };
        SeatService::update(&db, seat.seat_id, body).await.unwrap();

        let fetched = SeatService::get(&db, seat.seat_id).await.unwrap();
        assert!(!fetched.is_vip);
        assert_eq!(fetched.seat_number, "A1");
    }

    #[tokio::test]
    async fn test_empty_update_and_missing_seat() {
        let db = setup_test_db().await;
        assert!(matches!(
            SeatService::update(&db, 1, UpdateSeatRequest::default()).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            SeatService::delete(&db, 1).await,
            Err(AppError::NotFound(msg)) if msg == "Seat not found"
        ));
    }
}
