use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::errors::AppError;
use crate::models::dto::{CreateGenreRequest, UpdateGenreRequest};
use crate::models::genres;
use crate::services::crud::{self, provided};

pub struct GenreService;

impl GenreService {
    pub async fn create(
        db: &DatabaseConnection,
        body: CreateGenreRequest,
    ) -> Result<genres::Model, AppError> {
        crud::validate_request(&body)?;

        let genre = genres::ActiveModel {
            genre_name: Set(body.genre_name),
            description: Set(body.description),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(genre_id = genre.genre_id, "genre created");
        Ok(genre)
    }

    pub async fn list(db: &DatabaseConnection) -> Result<Vec<genres::Model>, AppError> {
        Ok(genres::Entity::find()
            .order_by_asc(genres::Column::GenreId)
            .all(db)
            .await?)
    }

    pub async fn get(db: &DatabaseConnection, genre_id: i32) -> Result<genres::Model, AppError> {
        crud::find_by_id::<genres::Entity, _>(db, genre_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        genre_id: i32,
        body: UpdateGenreRequest,
    ) -> Result<(), AppError> {
        crud::validate_request(&body)?;

        let changes = genres::ActiveModel {
            genre_name: provided(body.genre_name),
            description: provided(body.description),
            ..Default::default()
        };
        crud::update_by_id::<genres::Entity, _, _>(db, genre_id, changes).await
    }

    pub async fn delete(db: &DatabaseConnection, genre_id: i32) -> Result<(), AppError> {
        crud::delete_by_id::<genres::Entity, _>(db, genre_id).await
    }
}
