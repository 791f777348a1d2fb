//! Services Layer
//!
//! Business logic extracted from HTTP handlers. Services own the database
//! access, including the transactional writes for sale and reservation
//! aggregates; handlers only translate between HTTP and service calls.

use std::fmt;

pub mod product_service;
pub mod reservation_service;
pub mod sale_service;
pub mod stock_service;
pub mod user_service;

/// Error type shared by all service operations.
///
/// Validation failures are detected before any database call; `NotFound`
/// is a client-visible condition, not an internal error; `Database` wraps
/// a persistence failure with the underlying message.
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
    Validation(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Database(msg) => write!(f, "Database error: {}", msg),
            ServiceError::NotFound => write!(f, "Resource not found"),
            ServiceError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}
