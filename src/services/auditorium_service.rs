use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::AppError;
use crate::models::auditoriums;
use crate::models::dto::{CreateAuditoriumRequest, UpdateAuditoriumRequest};
use crate::services::crud::{self, provided};

pub struct AuditoriumService;

impl AuditoriumService {
    pub async fn create(
        db: &DatabaseConnection,
        body: CreateAuditoriumRequest,
    ) -> Result<auditoriums::Model, AppError> {
        crud::validate_request(&body)?;

        let auditorium = auditoriums::ActiveModel {
            auditorium_name: Set(body.auditorium_name),
            total_seats: Set(body.total_seats),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(auditorium_id = auditorium.auditorium_id, "auditorium added");
        Ok(auditorium)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<auditoriums::Model>, AppError> {
        Ok(auditoriums::Entity::find()
            .order_by_asc(auditoriums::Column::AuditoriumId)
            .all(db)
            .await?)
    }

    pub async fn get(
        db: &DatabaseConnection,
        auditorium_id: i32,
    ) -> Result<auditoriums::Model, AppError> {
        crud::find_by_id::<auditoriums::Entity, _>(db, auditorium_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        auditorium_id: i32,
        body: UpdateAuditoriumRequest,
    ) -> Result<(), AppError> {
        crud::validate_request(&body)?;

        let changes = auditoriums::ActiveModel {
            auditorium_name: provided(body.auditorium_name),
            total_seats: provided(body.total_seats),
            ..Default::default()
        };
        crud::update_by_id::<auditoriums::Entity, _, _>(db, auditorium_id, changes).await
    }

    pub async fn delete(db: &DatabaseConnection, auditorium_id: i32) -> Result<(), AppError> {
        crud::delete_by_id::<auditoriums::Entity, _>(db, auditorium_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn test_zero_seats_is_a_real_update() {
        let db = setup_test_db().await;
        let audi = AuditoriumService::create(
            &db,
            CreateAuditoriumRequest {
                auditorium_name: "Hall 1".to_string(),
                total_seats: 120,
            },
        )
        .await
        .unwrap();

        let body = UpdateAuditoriumRequest {
            total_seats: Some(0),
            ..Default::default()
        };
        AuditoriumService::update(&db, audi.auditorium_id, body).await.unwrap();

        let fetched = AuditoriumService::get(&db, audi.auditorium_id).await.unwrap();
        assert_eq!(fetched.total_seats, 0);
        assert_eq!(fetched.auditorium_name, "Hall 1");
    }

    #[tokio::test]
    async fn test_negative_seat_count_is_rejected() {
        let db = setup_test_db().await;
        let result = AuditoriumService::create(
            &db,
            CreateAuditoriumRequest {
                auditorium_name: "Hall 2".to_string(),
                total_seats: -1,
            },
        )
        .await;
        assert!(matches!(result, Err(AppError::InvalidFields(_))));
    }

    #[tokio::test]
    async fn test_missing_auditorium() {
        let db = setup_test_db().await;
        assert!(matches!(
            AuditoriumService::get(&db, 5).await,
            Err(AppError::NotFound(msg)) if msg == "Auditorium not found"
        ));
        let body = UpdateAuditoriumRequest {
            auditorium_name: Some("Hall 9".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            AuditoriumService::update(&db, 5, body).await,
            Err(AppError::NotFound(_))
        ));
    }
}
