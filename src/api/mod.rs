pub mod comment;
pub mod health;
pub mod payment;
pub mod product;
pub mod reservation;
pub mod sale;
pub mod stock;
pub mod tent;
pub mod user;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::services::ServiceError;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Products
        .route(
            "/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/products/:id",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        // Tents
        .route("/tents", get(tent::list_tents).post(tent::create_tent))
        .route(
            "/tents/:id",
            get(tent::get_tent)
                .put(tent::update_tent)
                .delete(tent::delete_tent),
        )
        // Users
        .route("/usuarios", get(user::list_users).post(user::create_user))
        .route("/usuarios/login", post(user::login))
        .route(
            "/usuarios/:cpf",
            get(user::get_user)
                .put(user::update_user)
                .delete(user::delete_user),
        )
        // Stock (upsert on POST)
        .route(
            "/stock",
            get(stock::list_stock)
                .post(stock::save_stock)
                .delete(stock::delete_stock),
        )
        // Sales
        .route("/sales", get(sale::list_sales).post(sale::create_sale))
        .route(
            "/sales/:id",
            get(sale::get_sale)
                .put(sale::update_sale)
                .delete(sale::delete_sale),
        )
        // Reservations
        .route(
            "/reservations",
            get(reservation::list_reservations).post(reservation::create_reservation),
        )
        .route(
            "/reservations/:id",
            get(reservation::get_reservation)
                .put(reservation::update_reservation)
                .delete(reservation::delete_reservation),
        )
        .route(
            "/reservations/:id/status",
            patch(reservation::update_reservation_status),
        )
        // Payments
        .route(
            "/payments",
            get(payment::list_payments).post(payment::create_payment),
        )
        .route(
            "/payments/:id",
            get(payment::get_payment)
                .put(payment::update_payment)
                .delete(payment::delete_payment),
        )
        // Comments
        .route(
            "/comentarios",
            get(comment::list_comments).post(comment::create_comment),
        )
        .route(
            "/comentarios/:id",
            get(comment::get_comment).delete(comment::delete_comment),
        )
        .with_state(db)
}

/// Shared mapping from service errors to HTTP responses; handlers match
/// `NotFound` themselves when they want a resource-specific message.
pub(crate) fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Resource not found" })),
        )
            .into_response(),
        ServiceError::Database(msg) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("Database error: {}", msg) })),
        )
            .into_response(),
    }
}
