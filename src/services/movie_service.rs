use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
};

use crate::errors::AppError;
use crate::models::dto::{CreateMovieRequest, PageQuery, Pagination, UpdateMovieRequest};
use crate::models::{genres, movies};
use crate::services::crud::{self, provided};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

pub struct MovieService;

impl MovieService {
    /// Inserts a movie once its genre is known to exist. Returns the new id.
    pub async fn create(db: &DatabaseConnection, body: CreateMovieRequest) -> Result<i32, AppError> {
        crud::validate_request(&body)?;
        Self::ensure_genre(db, body.genre_id).await?;

        let movie = movies::ActiveModel {
            title: Set(body.title),
            description: Set(body.description),
            poster_url: Set(body.poster_url),
            genre_id: Set(body.genre_id),
            duration_minutes: Set(body.duration_minutes),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(movie_id = movie.movie_id, genre_id = movie.genre_id, "movie created");
        Ok(movie.movie_id)
    }

    pub async fn list_page(
        db: &DatabaseConnection,
        query: &PageQuery,
    ) -> Result<(Vec<movies::Model>, Pagination), AppError> {
        let page = page_param(query.page.as_deref(), DEFAULT_PAGE);
        let limit = page_param(query.limit.as_deref(), DEFAULT_LIMIT).min(MAX_LIMIT);

        let paginator = movies::Entity::find()
            .order_by_asc(movies::Column::MovieId)
            .paginate(db, limit);

        let total = paginator.num_items().await?;
        // An offset past what the store can bind is past the last row anyway.
        let items = if page_offset(page, limit).is_some() {
            paginator.fetch_page(page - 1).await?
        } else {
            Vec::new()
        };

        Ok((
            items,
            Pagination {
                page,
                limit,
                total,
                total_pages: total.div_ceil(limit),
            },
        ))
    }

    pub async fn get(db: &DatabaseConnection, movie_id: i32) -> Result<movies::Model, AppError> {
        crud::find_by_id::<movies::Entity, _>(db, movie_id).await
    }

    pub async fn update(
        db: &DatabaseConnection,
        movie_id: i32,
        body: UpdateMovieRequest,
    ) -> Result<(), AppError> {
        crud::validate_request(&body)?;

        let changes = movies::ActiveModel {
            title: provided(body.title),
            description: provided(body.description),
            poster_url: provided(body.poster_url),
            genre_id: provided(body.genre_id),
            duration_minutes: provided(body.duration_minutes),
            ..Default::default()
        };
        crud::ensure_changes(&changes)?;

        if let Some(genre_id) = body.genre_id {
            Self::ensure_genre(db, genre_id).await?;
        }

        crud::update_by_id::<movies::Entity, _, _>(db, movie_id, changes).await
    }

    pub async fn delete(db: &DatabaseConnection, movie_id: i32) -> Result<(), AppError> {
        crud::delete_by_id::<movies::Entity, _>(db, movie_id).await
    }

    async fn ensure_genre(db: &DatabaseConnection, genre_id: i32) -> Result<(), AppError> {
        crud::find_by_id::<genres::Entity, _>(db, genre_id).await?;
        Ok(())
    }
}

/// Positive integer query parameter, or the default for anything else.
fn page_param(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .map(|v| v as u64)
        .unwrap_or(default)
}

/// Row offset of `page`, or `None` when it does not fit in a signed 64-bit bind.
fn page_offset(page: u64, limit: u64) -> Option<u64> {
    (page - 1)
        .checked_mul(limit)
        .filter(|offset| i64::try_from(*offset).is_ok())
}
