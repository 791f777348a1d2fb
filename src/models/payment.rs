use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// A payment may be recorded without a matching sale
    pub sale_id: Option<i32>,
    pub buyer_cpf: String,
    pub tent_id: i32,
    pub method: String,
    pub payment_date: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::SaleId",
        to = "super::sale::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Sale,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::BuyerCpf",
        to = "super::user::Column::Cpf",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::tent::Entity",
        from = "Column::TentId",
        to = "super::tent::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Tent,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::tent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentDto {
    pub id: Option<i32>,
    pub sale_id: Option<i32>,
    pub buyer_cpf: String,
    pub tent_id: i32,
    pub method: String,
    /// Defaults to today when not provided
    pub payment_date: Option<String>,
}
