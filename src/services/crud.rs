// Shared building blocks for the per-resource services: lookup by id,
// partial update, delete, and the field checks they all repeat.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Value,
};
use validator::Validate;

use crate::errors::AppError;
use crate::models::Resource;

pub fn not_found<E: Resource>() -> AppError {
    AppError::NotFound(format!("{} not found", E::NAME))
}

pub async fn find_by_id<E, C>(db: &C, id: i32) -> Result<E::Model, AppError>
where
    E: Resource,
    C: ConnectionTrait,
{
    E::find()
        .filter(E::id_column().eq(id))
        .one(db)
        .await?
        .ok_or_else(not_found::<E>)
}

/// Rejects an update that carries no field at all. Runs before any store call.
pub fn ensure_changes<A: ActiveModelTrait>(active: &A) -> Result<(), AppError> {
    if active.is_changed() {
        Ok(())
    } else {
        Err(AppError::Validation(
            "At least one field is required to update".to_string(),
        ))
    }
}

/// Writes only the columns set on `active` to the row with the given id.
/// Zero affected rows means the id does not resolve.
pub async fn update_by_id<E, A, C>(db: &C, id: i32, active: A) -> Result<(), AppError>
where
    E: Resource,
    A: ActiveModelTrait<Entity = E>,
    C: ConnectionTrait,
{
    ensure_changes(&active)?;

    let result = E::update_many()
        .set(active)
        .filter(E::id_column().eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(not_found::<E>());
    }
    Ok(())
}

pub async fn delete_by_id<E, C>(db: &C, id: i32) -> Result<(), AppError>
where
    E: Resource,
    C: ConnectionTrait,
{
    let result = E::delete_many()
        .filter(E::id_column().eq(id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(not_found::<E>());
    }
    Ok(())
}

/// `Some` becomes a column write, `None` leaves the column untouched.
pub fn provided<V: Into<Value>>(value: Option<V>) -> ActiveValue<V> {
    match value {
        Some(v) => ActiveValue::Set(v),
        None => ActiveValue::NotSet,
    }
}

/// Money fields arrive as JSON numbers and must be strictly positive.
pub fn positive_decimal(field: &str, value: f64) -> Result<Decimal, AppError> {
    let invalid = || AppError::Validation(format!("{} must be a positive number", field));

    if !value.is_finite() || value <= 0.0 {
        return Err(invalid());
    }

    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .filter(|d| d.is_sign_positive() && !d.is_zero())
        .ok_or_else(invalid)
}

pub fn validate_request<T: Validate>(body: &T) -> Result<(), AppError> {
    body.validate().map_err(AppError::from)
}
