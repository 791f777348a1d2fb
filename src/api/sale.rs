use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::api::error_response;
use crate::models::sale::SaleDto;
use crate::services::{ServiceError, sale_service};

/// GET /api/sales - List all sales with their items
pub async fn list_sales(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match sale_service::list_sales(&db).await {
        Ok(sales) => (StatusCode::OK, Json(sales)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/sales - Record a sale with its items (one transaction)
pub async fn create_sale(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<SaleDto>,
) -> impl IntoResponse {
    match sale_service::create_sale(&db, payload).await {
        Ok(sale) => (StatusCode::CREATED, Json(sale)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/sales/:id
pub async fn get_sale(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match sale_service::get_sale(&db, id).await {
        Ok(Some(sale)) => (StatusCode::OK, Json(sale)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Sale not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/sales/:id - Update the sale and replace all of its items.
/// The path id wins over any id in the body.
pub async fn update_sale(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<SaleDto>,
) -> impl IntoResponse {
    match sale_service::update_sale(&db, id, payload).await {
        Ok(sale) => (StatusCode::OK, Json(sale)).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Sale not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/sales/:id - Delete the sale and its items
pub async fn delete_sale(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match sale_service::delete_sale(&db, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Sale not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
