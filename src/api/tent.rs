use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use serde::Serialize;
use serde_json::json;

use crate::api::error_response;
use crate::models::tent::{self, Entity as Tent, TentDto};
use crate::services::stock_service::{self, StockWithProduct};
use crate::utils;

/// A tent with its current stock (product details included)
#[derive(Debug, Serialize)]
pub struct TentWithStock {
    pub id: i32,
    pub owner_cpf: String,
    pub name: String,
    pub license: Option<String>,
    pub items: Vec<StockWithProduct>,
}

fn decode_license(license: Option<&str>) -> Result<Option<Vec<u8>>, axum::response::Response> {
    match license {
        Some(value) => match utils::decode_blob(value) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(_) => Err((
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "license is not valid base64" })),
            )
                .into_response()),
        },
        None => Ok(None),
    }
}

/// GET /api/tents - List all tents
pub async fn list_tents(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Tent::find().all(&db).await {
        Ok(tents) => {
            let tents: Vec<TentDto> = tents.into_iter().map(TentDto::from).collect();
            (StatusCode::OK, Json(tents)).into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// POST /api/tents - Create a tent
pub async fn create_tent(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<TentDto>,
) -> impl IntoResponse {
    let license = match decode_license(payload.license.as_deref()) {
        Ok(license) => license,
        Err(resp) => return resp,
    };

    let new_tent = tent::ActiveModel {
        owner_cpf: Set(payload.owner_cpf),
        name: Set(payload.name),
        license: Set(license),
        ..Default::default()
    };

    match new_tent.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(TentDto::from(model))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

/// GET /api/tents/:id - Tent details with its stock
pub async fn get_tent(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let tent = match Tent::find_by_id(id).one(&db).await {
        Ok(tent) => tent,
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let Some(tent) = tent else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Tent not found" })),
        )
            .into_response();
    };

    match stock_service::list_by_tent(&db, id).await {
        Ok(items) => (
            StatusCode::OK,
            Json(TentWithStock {
                id: tent.id,
                owner_cpf: tent.owner_cpf,
                name: tent.name,
                license: tent.license.as_deref().map(utils::encode_blob),
                items,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PUT /api/tents/:id
pub async fn update_tent(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<TentDto>,
) -> impl IntoResponse {
    let license = match decode_license(payload.license.as_deref()) {
        Ok(license) => license,
        Err(resp) => return resp,
    };

    let result = Tent::update_many()
        .set(tent::ActiveModel {
            owner_cpf: Set(payload.owner_cpf.clone()),
            name: Set(payload.name.clone()),
            license: Set(license),
            ..Default::default()
        })
        .filter(tent::Column::Id.eq(id))
        .exec(&db)
        .await;

    match result {
        Ok(updated) if updated.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Tent not found" })),
        )
            .into_response(),
        Ok(_) => (
            StatusCode::OK,
            Json(TentDto {
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

/// DELETE /api/tents/:id
pub async fn delete_tent(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Tent::delete_many()
        .filter(tent::Column::Id.eq(id))
        .exec(&db)
        .await
    {
        Ok(deleted) if deleted.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Tent not found" })),
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
