use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sale_item::SaleItemDto;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub sale_date: String,
    pub tent_id: i32,
    pub buyer_cpf: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tent::Entity",
        from = "Column::TentId",
        to = "super::tent::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Tent,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerCpf",
        to = "super::user::Column::Cpf",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::sale_item::Entity")]
    SaleItem,
}

impl Related<super::tent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tent.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::sale_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SaleItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Request body for creating or updating a sale together with its items.
/// The id is ignored on create; on update the path id wins over the body.
#[derive(Debug, Serialize, Deserialize)]
pub struct SaleDto {
    pub id: Option<i32>,
    /// Defaults to today when not provided
    pub sale_date: Option<String>,
    pub tent_id: i32,
    pub buyer_cpf: String,
    #[serde(default)]
    pub items: Vec<SaleItemDto>,
}
