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
use crate::models::user::UserDto;
use crate::services::{ServiceError, user_service};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// GET /api/usuarios - List all users with their tents
pub async fn list_users(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match user_service::list_users(&db).await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/usuarios - Register a user
pub async fn create_user(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<UserDto>,
) -> impl IntoResponse {
    match user_service::create_user(&db, payload).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /api/usuarios/login - Validate email + password
///
/// Plaintext comparison against the stored password column.
pub async fn login(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    match user_service::validate_login(&db, &payload.email, &payload.password).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/usuarios/:cpf
pub async fn get_user(
    State(db): State<DatabaseConnection>,
    Path(cpf): Path<String>,
) -> impl IntoResponse {
    match user_service::get_user(&db, &cpf).await {
        Ok(Some(user)) => (StatusCode::OK, Json(user)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/usuarios/:cpf
pub async fn update_user(
    State(db): State<DatabaseConnection>,
    Path(cpf): Path<String>,
    Json(payload): Json<UserDto>,
) -> impl IntoResponse {
    match user_service::update_user(&db, &cpf, payload).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/usuarios/:cpf
pub async fn delete_user(
    State(db): State<DatabaseConnection>,
    Path(cpf): Path<String>,
) -> impl IntoResponse {
    match user_service::delete_user(&db, &cpf).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "User not found" })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
