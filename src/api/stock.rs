use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::stock::StockDto;
use crate::services::{ServiceError, stock_service};

/// Query parameters for listing stock
#[derive(Debug, Deserialize)]
pub struct ListStockQuery {
    pub tent_id: Option<i32>,
}

/// Query parameters for removing a stock row
#[derive(Debug, Deserialize)]
pub struct DeleteStockQuery {
    pub product_id: Option<i32>,
    pub tent_id: Option<i32>,
}

/// GET /api/stock?tent_id=X - A tent's stock with product details
pub async fn list_stock(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ListStockQuery>,
) -> impl IntoResponse {
    let Some(tent_id) = params.tent_id else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "tent_id query parameter is required" })),
        )
            .into_response();
    };

    match stock_service::list_by_tent(&db, tent_id).await {
        Ok(stock) => (StatusCode::OK, Json(stock)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/stock - Insert or replace the quantity for a (product, tent)
/// pair. Non-positive quantities never reach the database.
pub async fn save_stock(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<StockDto>,
) -> impl IntoResponse {
    if payload.quantity <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Quantity must be greater than zero" })),
        )
            .into_response();
    }

    match stock_service::save_stock(&db, &payload).await {
        Ok(()) => (StatusCode::OK, Json(payload)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/stock?product_id=X&tent_id=Y - Remove a product from a
/// tent's stock
pub async fn delete_stock(
    State(db): State<DatabaseConnection>,
    Query(params): Query<DeleteStockQuery>,
) -> impl IntoResponse {
    let (Some(product_id), Some(tent_id)) = (params.product_id, params.tent_id) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "product_id and tent_id query parameters are required" })),
        )
            .into_response();
    };

    match stock_service::delete_stock(&db, product_id, tent_id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Stock entry not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
