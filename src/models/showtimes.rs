use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "showtimes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub showtime_id: i32,
    pub movie_id: i32,
    pub auditorium_id: i32,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub ticket_price: Decimal,
    pub show_time: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movies::Entity",
        from = "Column::MovieId",
        to = "super::movies::Column::MovieId"
    )]
    Movie,

    #[sea_orm(
        belongs_to = "super::auditoriums::Entity",
        from = "Column::AuditoriumId",
        to = "super::auditoriums::Column::AuditoriumId"
    )]
    Auditorium,

    #[sea_orm(has_many = "super::reservations::Entity")]
    Reservations,
}

impl Related<super::movies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

impl Related<super::auditoriums::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Auditorium.def()
    }
}

impl Related<super::reservations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Resource for Entity {
    const NAME: &'static str = "Showtime";

    fn id_column() -> Column {
        Column::ShowtimeId
    }
}
