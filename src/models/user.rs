use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub cpf: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String, // stored and compared in plaintext, no hashing
    pub photo: Option<Vec<u8>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::tent::Entity")]
    Tent,
}

impl Related<super::tent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDto {
    pub cpf: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
    /// Base64-encoded profile photo
    pub photo: Option<String>,
}

impl From<Model> for UserDto {
    fn from(model: Model) -> Self {
        UserDto {
            cpf: model.cpf,
            name: model.name,
            phone: model.phone,
            email: model.email,
            password: model.password,
            photo: model.photo.as_deref().map(utils::encode_blob),
        }
    }
}
