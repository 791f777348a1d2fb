use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use sea_orm::*;
use serde::Deserialize;
use serde_json::json;

use crate::models::comment::{self, Entity as Comment};

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub text: String,
    pub product_id: i32,
    pub user_cpf: String,
}

/// Query parameters for listing comments
#[derive(Debug, Deserialize)]
pub struct ListCommentsQuery {
    pub product_id: Option<i32>,
}

/// GET /api/comentarios - Newest first, optionally filtered by product
pub async fn list_comments(
    State(db): State<DatabaseConnection>,
    Query(params): Query<ListCommentsQuery>,
) -> impl IntoResponse {
    let mut query = Comment::find().order_by_desc(comment::Column::PostedAt);

    if let Some(product_id) = params.product_id {
        query = query.filter(comment::Column::ProductId.eq(product_id));
    }

    match query.all(&db).await {
        Ok(comments) => (StatusCode::OK, Json(comments)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /api/comentarios
pub async fn create_comment(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateCommentRequest>,
) -> impl IntoResponse {
    if payload.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "text must not be empty" })),
        )
            .into_response();
    }

    let new_comment = comment::ActiveModel {
        text: Set(payload.text),
        product_id: Set(payload.product_id),
        user_cpf: Set(payload.user_cpf),
        posted_at: Set(Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        ..Default::default()
    };

    match new_comment.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(model)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /api/comentarios/:id
pub async fn get_comment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Comment::find_by_id(id).one(&db).await {
        Ok(Some(comment)) => (StatusCode::OK, Json(comment)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Comment not found" })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// DELETE /api/comentarios/:id
pub async fn delete_comment(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Comment::delete_many()
        .filter(comment::Column::Id.eq(id))
        .exec(&db)
        .await
    {
        Ok(deleted) if deleted.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Comment not found" })),
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
