use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub owner_cpf: String,
    pub name: String,
    pub license: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerCpf",
        to = "super::user::Column::Cpf",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(has_many = "super::stock::Entity")]
    Stock,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::stock::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Stock.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct TentDto {
    pub id: Option<i32>,
    pub owner_cpf: String,
    pub name: String,
    /// Base64-encoded vendor license document
    pub license: Option<String>,
}

impl From<Model> for TentDto {
    fn from(model: Model) -> Self {
        TentDto {
            id: Some(model.id),
            owner_cpf: model.owner_cpf,
            name: model.name,
            license: model.license.as_deref().map(utils::encode_blob),
        }
    }
}
