use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::models::product::ProductDto;
use crate::services::{ServiceError, product_service};

/// GET /api/products - List all products
pub async fn list_products(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match product_service::list_products(&db).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/products - Create a product (and an initial stock row when a
/// tent is given)
pub async fn create_product(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<ProductDto>,
) -> impl IntoResponse {
    match product_service::create_product(&db, payload).await {
        Ok(product) => (StatusCode::CREATED, Json(product)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/products/:id
pub async fn get_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match product_service::get_product(&db, id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(product)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/products/:id
pub async fn update_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductDto>,
) -> impl IntoResponse {
    match product_service::update_product(&db, id, payload).await {
        Ok(product) => (StatusCode::OK, Json(product)).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match product_service::delete_product(&db, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Product not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
