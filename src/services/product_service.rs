//! Product Service - catalog CRUD
//!
//! Creating a product that already belongs to a tent also registers an
//! initial stock row for that (product, tent) pair.

use sea_orm::*;

use crate::models::product::{self, Entity as Product, ProductDto};
use crate::models::stock::StockDto;
use crate::services::{ServiceError, stock_service};
use crate::utils;

fn decode_image(image: Option<&str>) -> Result<Option<Vec<u8>>, ServiceError> {
    image
        .map(|value| {
            utils::decode_blob(value)
                .map_err(|_| ServiceError::Validation("image is not valid base64".to_string()))
        })
        .transpose()
}

pub async fn create_product(
    db: &DatabaseConnection,
    dto: ProductDto,
) -> Result<ProductDto, ServiceError> {
    if dto.name.trim().is_empty() {
        return Err(ServiceError::Validation("name must not be empty".to_string()));
    }
    let image = decode_image(dto.image.as_deref())?;

    let saved = product::ActiveModel {
        name: Set(dto.name),
        price: Set(dto.price),
        description: Set(dto.description),
        image: Set(image),
        tent_id: Set(dto.tent_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // A product assigned to a tent starts with one unit in stock
    if let Some(tent_id) = saved.tent_id {
        if tent_id > 0 {
            stock_service::save_stock(
                db,
                &StockDto {
                    product_id: saved.id,
                    tent_id,
                    quantity: 1,
                },
            )
            .await?;
        }
    }

    Ok(ProductDto::from(saved))
}

pub async fn get_product(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<ProductDto>, ServiceError> {
    let model = Product::find_by_id(id).one(db).await?;
    Ok(model.map(ProductDto::from))
}

pub async fn list_products(db: &DatabaseConnection) -> Result<Vec<ProductDto>, ServiceError> {
    let models = Product::find().all(db).await?;
    Ok(models.into_iter().map(ProductDto::from).collect())
}

pub async fn update_product(
    db: &DatabaseConnection,
    id: i32,
    dto: ProductDto,
) -> Result<ProductDto, ServiceError> {
    if dto.name.trim().is_empty() {
        return Err(ServiceError::Validation("name must not be empty".to_string()));
    }
    let image = decode_image(dto.image.as_deref())?;

    let updated = Product::update_many()
        .set(product::ActiveModel {
            name: Set(dto.name.clone()),
            price: Set(dto.price),
            description: Set(dto.description.clone()),
            image: Set(image),
            tent_id: Set(dto.tent_id),
            ..Default::default()
        })
        .filter(product::Column::Id.eq(id))
        .exec(db)
        .await?;
    if updated.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }

    Ok(ProductDto {
        id: Some(id),
        ..dto
    })
}

pub async fn delete_product(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let deleted = Product::delete_many()
        .filter(product::Column::Id.eq(id))
        .exec(db)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}
