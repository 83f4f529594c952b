// Database connection and schema bootstrap

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema};

use crate::models::{
    auditoriums, genres, movies, payments, reservation_seats, reservations, seats, showtimes, users,
};

pub async fn establish_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Creates any missing table from the entity definitions. Parents come
/// before children so that foreign keys resolve.
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, users::Entity).await?;
    create_table(db, genres::Entity).await?;
    create_table(db, movies::Entity).await?;
    create_table(db, auditoriums::Entity).await?;
    create_table(db, seats::Entity).await?;
    create_table(db, showtimes::Entity).await?;
    create_table(db, reservations::Entity).await?;
    create_table(db, reservation_seats::Entity).await?;
    create_table(db, payments::Entity).await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();

    db.execute(backend.build(&statement)).await?;
    tracing::debug!(table = %entity.table_name(), "table ready");
    Ok(())
}
