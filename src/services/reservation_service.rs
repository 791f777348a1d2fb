//! Reservation Service - transactional writes for the reservation aggregate
//!
//! Mirrors sale_service: parent + items are one atomic unit, updates replace
//! the item collection wholesale. Reservations additionally carry a
//! free-text status label that can be changed on its own.

use chrono::Local;
use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::reservation::{self, Entity as Reservation, ReservationDto};
use crate::models::reservation_item::{self, Entity as ReservationItem, ReservationItemDto};
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize)]
pub struct ReservationWithItems {
    pub id: i32,
    pub holder_cpf: String,
    pub reservation_date: String,
    pub status: String,
    pub items: Vec<ReservationItemDto>,
}

fn validate(dto: &ReservationDto) -> Result<(), ServiceError> {
    if dto.holder_cpf.trim().is_empty() {
        return Err(ServiceError::Validation(
            "holder_cpf must not be empty".to_string(),
        ));
    }
    if dto.items.iter().any(|item| item.quantity <= 0) {
        return Err(ServiceError::Validation(
            "item quantity must be positive".to_string(),
        ));
    }
    Ok(())
}

fn item_rows(reservation_id: i32, items: &[ReservationItemDto]) -> Vec<reservation_item::ActiveModel> {
    items
        .iter()
        .map(|item| reservation_item::ActiveModel {
            reservation_id: Set(reservation_id),
            product_id: Set(item.product_id),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        })
        .collect()
}

/// Create a reservation together with its items in a single transaction.
pub async fn create_reservation(
    db: &DatabaseConnection,
    dto: ReservationDto,
) -> Result<ReservationWithItems, ServiceError> {
    validate(&dto)?;

    let reservation_date = dto
        .reservation_date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let status = dto.status.unwrap_or_else(|| "pending".to_string());

    let txn = db.begin().await?;

    let saved = reservation::ActiveModel {
        holder_cpf: Set(dto.holder_cpf.clone()),
        reservation_date: Set(reservation_date.clone()),
        status: Set(status.clone()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if !dto.items.is_empty() {
        ReservationItem::insert_many(item_rows(saved.id, &dto.items))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(ReservationWithItems {
        id: saved.id,
        holder_cpf: dto.holder_cpf,
        reservation_date,
        status,
        items: dto.items,
    })
}

/// Update a reservation and replace all of its items in one transaction.
/// The path id wins over any id in the body.
pub async fn update_reservation(
    db: &DatabaseConnection,
    id: i32,
    dto: ReservationDto,
) -> Result<ReservationWithItems, ServiceError> {
    validate(&dto)?;

    let reservation_date = dto
        .reservation_date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());
    let status = dto.status.unwrap_or_else(|| "pending".to_string());

    let txn = db.begin().await?;

    let updated = Reservation::update_many()
        .set(reservation::ActiveModel {
            holder_cpf: Set(dto.holder_cpf.clone()),
            reservation_date: Set(reservation_date.clone()),
            status: Set(status.clone()),
            ..Default::default()
        })
        .filter(reservation::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if updated.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }

    ReservationItem::delete_many()
        .filter(reservation_item::Column::ReservationId.eq(id))
        .exec(&txn)
        .await?;

    if !dto.items.is_empty() {
        ReservationItem::insert_many(item_rows(id, &dto.items))
            .exec(&txn)
            .await?;
    }

    txn.commit().await?;

    Ok(ReservationWithItems {
        id,
        holder_cpf: dto.holder_cpf,
        reservation_date,
        status,
        items: dto.items,
    })
}

/// Change only the status label of a reservation (single statement).
pub async fn update_status(
    db: &DatabaseConnection,
    id: i32,
    status: String,
) -> Result<(), ServiceError> {
    let updated = Reservation::update_many()
        .col_expr(
            reservation::Column::Status,
            sea_orm::sea_query::Expr::value(status),
        )
        .filter(reservation::Column::Id.eq(id))
        .exec(db)
        .await?;
    if updated.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}

/// Delete a reservation and its items, children first, in one transaction.
pub async fn delete_reservation(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    ReservationItem::delete_many()
        .filter(reservation_item::Column::ReservationId.eq(id))
        .exec(&txn)
        .await?;

    let deleted = Reservation::delete_many()
        .filter(reservation::Column::Id.eq(id))
        .exec(&txn)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }

    txn.commit().await?;
    Ok(())
}

/// Fetch a reservation and its items by id.
pub async fn get_reservation(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<ReservationWithItems>, ServiceError> {
    let Some(model) = Reservation::find_by_id(id).one(db).await? else {
        return Ok(None);
    };

    let items = ReservationItem::find()
        .filter(reservation_item::Column::ReservationId.eq(id))
        .all(db)
        .await?
        .into_iter()
        .map(ReservationItemDto::from)
        .collect();

    Ok(Some(ReservationWithItems {
        id: model.id,
        holder_cpf: model.holder_cpf,
        reservation_date: model.reservation_date,
        status: model.status,
        items,
    }))
}

/// List all reservations with their items.
pub async fn list_reservations(
    db: &DatabaseConnection,
) -> Result<Vec<ReservationWithItems>, ServiceError> {
    let reservations = Reservation::find().all(db).await?;

    let ids: Vec<i32> = reservations.iter().map(|r| r.id).collect();

    let mut items_by_reservation: HashMap<i32, Vec<ReservationItemDto>> = HashMap::new();
    if !ids.is_empty() {
        let items = ReservationItem::find()
            .filter(reservation_item::Column::ReservationId.is_in(ids))
            .all(db)
            .await?;
        for item in items {
            items_by_reservation
                .entry(item.reservation_id)
                .or_default()
                .push(ReservationItemDto::from(item));
        }
    }

    Ok(reservations
        .into_iter()
        .map(|model| {
            let items = items_by_reservation.remove(&model.id).unwrap_or_default();
            ReservationWithItems {
                id: model.id,
                holder_cpf: model.holder_cpf,
                reservation_date: model.reservation_date,
                status: model.status,
                items,
            }
        })
        .collect())
}
