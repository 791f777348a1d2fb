//! Sale Service - transactional writes for the sale aggregate
//!
//! A sale and its items are one unit: they become visible together or not
//! at all. Updates replace the whole item collection rather than diffing.

use chrono::Local;
use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::sale::{self, Entity as Sale, SaleDto};
use crate::models::sale_item::{self, Entity as SaleItem, SaleItemDto};
use crate::services::ServiceError;

/// A sale with its line items, as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct SaleWithItems {
    pub id: i32,
    pub sale_date: String,
    pub tent_id: i32,
    pub buyer_cpf: String,
    pub items: Vec<SaleItemDto>,
}

fn validate(dto: &SaleDto) -> Result<(), ServiceError> {
    if dto.buyer_cpf.trim().is_empty() {
        return Err(ServiceError::Validation(
            "buyer_cpf must not be empty".to_string(),
        ));
    }
    if dto.items.iter().any(|item| item.quantity <= 0) {
        return Err(ServiceError::Validation(
            "item quantity must be positive".to_string(),
        ));
    }
    Ok(())
}

fn item_rows(sale_id: i32, items: &[SaleItemDto]) -> Vec<sale_item::ActiveModel> {
    items
        .iter()
        .map(|item| sale_item::ActiveModel {
            sale_id: Set(sale_id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        })
        .collect()
}

/// Create a sale together with its items in a single transaction.
///
/// The parent row is inserted first so its generated id can be used as the
/// items' foreign key. Any failure drops the transaction, rolling back both
/// the parent and whatever items were already inserted.
pub async fn create_sale(
    db: &DatabaseConnection,
    dto: SaleDto,
) -> Result<SaleWithItems, ServiceError> {
    validate(&dto)?;

    let sale_date = dto
        .sale_date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    let txn = db.begin().await?;

    let saved = sale::ActiveModel {
        sale_date: Set(sale_date.clone()),
        tent_id: Set(dto.tent_id),
        buyer_cpf: Set(dto.buyer_cpf.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if !dto.items.is_empty() {
        SaleItem::insert_many(item_rows(saved.id, &dto.items))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(SaleWithItems {
        id: saved.id,
        sale_date,
        tent_id: dto.tent_id,
        buyer_cpf: dto.buyer_cpf,
        items: dto.items,
    })
}

/// Update a sale and replace all of its items in a single transaction.
///
/// The id comes from the caller (URL path), overriding any id in the body.
/// Replacing the items wholesale makes the operation idempotent: the same
/// payload twice yields the same item set, not duplicates.
pub async fn update_sale(
    db: &DatabaseConnection,
    id: i32,
    dto: SaleDto,
) -> Result<SaleWithItems, ServiceError> {
    validate(&dto)?;

    let sale_date = dto
        .sale_date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    let txn = db.begin().await?;

    let updated = Sale::update_many()
        .set(sale::ActiveModel {
            sale_date: Set(sale_date.clone()),
            tent_id: Set(dto.tent_id),
            buyer_cpf: Set(dto.buyer_cpf.clone()),
            ..Default::default()
        })
        .filter(sale::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }

    SaleItem::delete_many()
        .filter(sale_item::Column::SaleId.eq(id))
        .exec(&txn)
        .await?;

    if !dto.items.is_empty() {
        SaleItem::insert_many(item_rows(id, &dto.items))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(SaleWithItems {
        id,
        sale_date,
        tent_id: dto.tent_id,
        buyer_cpf: dto.buyer_cpf,
        items: dto.items,
    })
}

/// Delete a sale and its items: children first, then the parent, in one
/// transaction so no orphaned items can remain.
pub async fn delete_sale(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    SaleItem::delete_many()
        .filter(sale_item::Column::SaleId.eq(id))
        .exec(&txn)
        .await?;

    let deleted = Sale::delete_many()
        .filter(sale::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }

    txn.commit().await?;
    Ok(())
}

/// Fetch a sale and its items by id.
pub async fn get_sale(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<SaleWithItems>, ServiceError> {
    let Some(model) = Sale::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let items = SaleItem::find()
        .filter(sale_item::Column::SaleId.eq(id))
        .all(db)
        .await?
        .into_iter()
        .map(SaleItemDto::from)
        .collect();

    Ok(Some(SaleWithItems {
        id: model.id,
        sale_date: model.sale_date,
        tent_id: model.tent_id,
        buyer_cpf: model.buyer_cpf,
        items,
    }))
}

/// List all sales with their items (items fetched in one batched query).
pub async fn list_sales(db: &DatabaseConnection) -> Result<Vec<SaleWithItems>, ServiceError> {
    let sales = Sale::find().all(db).await?;

    let sale_ids: Vec<i32> = sales.iter().map(|s| s.id).collect();

    let mut items_by_sale: HashMap<i32, Vec<SaleItemDto>> = HashMap::new();
    if !sale_ids.is_empty() {
        let items = SaleItem::find()
            .filter(sale_item::Column::SaleId.is_in(sale_ids))
            .all(db)
            .await?;
        for item in items {
            items_by_sale
                .entry(item.sale_id)
                .or_default()
                .push(SaleItemDto::from(item));
        }
    }

    Ok(sales
        .into_iter()
        .map(|model| {
            let items = items_by_sale.remove(&model.id).unwrap_or_default();
            SaleWithItems {
                id: model.id,
                sale_date: model.sale_date,
                tent_id: model.tent_id,
                buyer_cpf: model.buyer_cpf,
                items,
            }
        })
        .collect())
}
