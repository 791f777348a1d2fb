use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::reservation::ReservationDto;
use crate::services::{ServiceError, reservation_service};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// GET /api/reservations - List all reservations with their items
pub async fn list_reservations(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match reservation_service::list_reservations(&db).await {
        Ok(reservations) => (StatusCode::OK, Json(reservations)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/reservations - Place a reservation with its items (one
/// transaction)
pub async fn create_reservation(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<ReservationDto>,
) -> impl IntoResponse {
    match reservation_service::create_reservation(&db, payload).await {
        Ok(reservation) => (StatusCode::CREATED, Json(reservation)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/reservations/:id
pub async fn get_reservation(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match reservation_service::get_reservation(&db, id).await {
        Ok(Some(reservation)) => (StatusCode::OK, Json(reservation)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Reservation not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/reservations/:id - Update the reservation and replace all of
/// its items. The path id wins over any id in the body.
pub async fn update_reservation(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<ReservationDto>,
) -> impl IntoResponse {
    match reservation_service::update_reservation(&db, id, payload).await {
        Ok(reservation) => (StatusCode::OK, Json(reservation)).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Reservation not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /api/reservations/:id/status - Change only the status label
pub async fn update_reservation_status(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateStatusRequest>,
) -> impl IntoResponse {
    match reservation_service::update_status(&db, id, payload.status.clone()).await {
        Ok(()) => (StatusCode::OK, Json(json!({ "id": id, "status": payload.status }))).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Reservation not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/reservations/:id - Delete the reservation and its items
pub async fn delete_reservation(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match reservation_service::delete_reservation(&db, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Reservation not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
