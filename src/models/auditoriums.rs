use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "auditoriums")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub auditorium_id: i32,
    pub auditorium_name: String,
    pub total_seats: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seats::Entity")]
    Seats,

    #[sea_orm(has_many = "super::showtimes::Entity")]
    Showtimes,
}

impl Related<super::seats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seats.def()
    }
}

impl Related<super::showtimes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Showtimes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Resource for Entity {
    const NAME: &'static str = "Auditorium";

    fn id_column() -> Column {
        Column::AuditoriumId
    }
}
