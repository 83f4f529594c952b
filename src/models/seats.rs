use serde::{Serialize, Deserialize};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub seat_id: i32,
    pub auditorium_id: i32,
    pub seat_number: String, // label printed on the ticket, e.g. "A1"
    pub is_vip: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::auditoriums::Entity",
        from = "Column::AuditoriumId",
        to = "super::auditoriums::Column::AuditoriumId"
    )]
    Auditorium,

    #[sea_orm(has_many = "super::reservation_seats::Entity")]
    ReservationSeats,
}

impl Related<super::auditoriums::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Auditorium.def()
    }
}

impl Related<super::reservation_seats::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationSeats.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl super::Resource for Entity {
    const NAME: &'static str = "Seat";

    fn id_column() -> Column {
        Column::SeatId
    }
}
