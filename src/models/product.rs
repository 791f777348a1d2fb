use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    pub image: Option<Vec<u8>>,
    pub tent_id: Option<i32>,
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
    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,
}

impl Related<super::tent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tent.def()
    }
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: Option<i32>,
    pub name: String,
    pub price: f64,
    pub description: Option<String>,
    /// Base64-encoded product image
    pub image: Option<String>,
    pub tent_id: Option<i32>,
}

impl From<Model> for ProductDto {
    fn from(model: Model) -> Self {
        ProductDto {
            id: Some(model.id),
            name: model.name,
            price: model.price,
            description: model.description,
            image: model.image.as_deref().map(utils::encode_blob),
            tent_id: model.tent_id,
        }
    }
}
