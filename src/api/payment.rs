use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use sea_orm::*;
use serde_json::json;

use crate::models::payment::{self, Entity as Payment, PaymentDto};

/// GET /api/payments - List all payments
pub async fn list_payments(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Payment::find().all(&db).await {
        Ok(payments) => (StatusCode::OK, Json(payments)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /api/payments - Record a payment (sale reference optional)
pub async fn create_payment(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<PaymentDto>,
) -> impl IntoResponse {
    if payload.buyer_cpf.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "buyer_cpf must not be empty" })),
        )
            .into_response();
    }

    let payment_date = payload
        .payment_date
        .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string());

    let new_payment = payment::ActiveModel {
        sale_id: Set(payload.sale_id),
        buyer_cpf: Set(payload.buyer_cpf),
        tent_id: Set(payload.tent_id),
        method: Set(payload.method),
        payment_date: Set(Some(payment_date)),
        ..Default::default()
    };

    match new_payment.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(model)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /api/payments/:id
pub async fn get_payment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Payment::find_by_id(id).one(&db).await {
        Ok(Some(payment)) => (StatusCode::OK, Json(payment)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Payment not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// PUT /api/payments/:id
pub async fn update_payment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<PaymentDto>,
) -> impl IntoResponse {
    let result = Payment::update_many()
        .set(payment::ActiveModel {
            sale_id: Set(payload.sale_id),
            buyer_cpf: Set(payload.buyer_cpf.clone()),
            tent_id: Set(payload.tent_id),
            method: Set(payload.method.clone()),
            payment_date: Set(payload.payment_date.clone()),
            ..Default::default()
        })
        .filter(payment::Column::Id.eq(id))
        .exec(&db)
        .await;

    match result {
        Ok(updated) if updated.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Payment not found" })),
        )
            .into_response(),
        Ok(_) => (
            StatusCode::OK,
            Json(PaymentDto {
                id: Some(id),
                ..payload
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /api/payments/:id
pub async fn delete_payment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Payment::delete_many()
        .filter(payment::Column::Id.eq(id))
        .exec(&db)
        .await
    {
        Ok(deleted) if deleted.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Payment not found" })),
        )
            .into_response(),
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
