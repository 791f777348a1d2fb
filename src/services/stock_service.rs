//! Stock Service - per-(product, tent) quantities
//!
//! Writes go through a single-statement upsert: inserting an existing key
//! replaces the quantity instead of erroring, so exactly one row exists per
//! (product, tent) pair and concurrent writers serialize at the database.

use sea_orm::sea_query::OnConflict;
use sea_orm::*;
use serde::Serialize;

use crate::models::product::Entity as Product;
use crate::models::stock::{self, Entity as Stock, StockDto};
use crate::services::ServiceError;

/// A stock row enriched with its product's descriptive fields
#[derive(Debug, Clone, Serialize)]
pub struct StockWithProduct {
    pub product_id: i32,
    pub tent_id: i32,
    pub quantity: i16,
    pub product_name: String,
    pub product_price: f64,
    pub product_description: Option<String>,
}

/// Insert or replace the quantity for a (product, tent) pair.
///
/// Non-positive quantities are rejected by the handler before this call.
pub async fn save_stock(db: &DatabaseConnection, dto: &StockDto) -> Result<(), ServiceError> {
    Stock::insert(stock::ActiveModel {
        product_id: Set(dto.product_id),
        tent_id: Set(dto.tent_id),
        quantity: Set(dto.quantity),
    })
    .on_conflict(
        OnConflict::columns([stock::Column::ProductId, stock::Column::TentId])
            .update_column(stock::Column::Quantity)
            .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    Ok(())
}

/// List a tent's stock, each row joined with its product's details.
pub async fn list_by_tent(
    db: &DatabaseConnection,
    tent_id: i32,
) -> Result<Vec<StockWithProduct>, ServiceError> {
    let rows = Stock::find()
        .filter(stock::Column::TentId.eq(tent_id))
        .find_also_related(Product)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(stock, product)| {
            let (product_name, product_price, product_description) = match product {
                Some(p) => (p.name, p.price, p.description),
                None => ("Unknown".to_string(), 0.0, None),
            };
            StockWithProduct {
                product_id: stock.product_id,
                tent_id: stock.tent_id,
                quantity: stock.quantity,
                product_name,
                product_price,
                product_description,
            }
        })
        .collect())
}

/// Remove a product from a tent's stock.
pub async fn delete_stock(
    db: &DatabaseConnection,
    product_id: i32,
    tent_id: i32,
) -> Result<(), ServiceError> {
    let deleted = Stock::delete_many()
        .filter(stock::Column::ProductId.eq(product_id))
        .filter(stock::Column::TentId.eq(tent_id))
        .exec(db)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
