use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::reservation_item::ReservationItemDto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub holder_cpf: String,
    pub reservation_date: String,
    /// Free-text state label ('pending', 'confirmed', ...), no enforced enum
    pub status: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::HolderCpf",
        to = "super::user::Column::Cpf",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::reservation_item::Entity")]
    ReservationItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::reservation_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReservationItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Request body for creating or updating a reservation with its items.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReservationDto {
    pub id: Option<i32>,
    pub holder_cpf: String,
    /// Defaults to today when not provided
    pub reservation_date: Option<String>,
    /// Defaults to "pending" when not provided
    pub status: Option<String>,
    #[serde(default)]
    pub items: Vec<ReservationItemDto>,
}
