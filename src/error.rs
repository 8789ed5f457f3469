//! Error types for the bookshelf server

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::ApiResponse;

/// Failures raised by the catalog store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("book name is missing")]
    MissingName,

    #[error("readPage is greater than pageCount")]
    PageOverflow,

    #[error("book not found")]
    NotFound,

    #[error("book {0} was not stored after insert")]
    PersistFault(String),

    #[error("catalog lock poisoned during {0}")]
    LockPoisoned(&'static str),
}

/// Catalog operation a failure happened in, used to pick the user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    List,
    Get,
    Update,
    Delete,
}

impl Action {
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Create => "Gagal menambahkan buku",
            Action::List => "Gagal menampilkan daftar buku",
            Action::Get => "Gagal menampilkan buku",
            Action::Update => "Gagal memperbarui buku",
            Action::Delete => "Buku gagal dihapus",
        }
    }
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Translate a store failure into the response for the given action
    pub fn from_catalog(action: Action, err: CatalogError) -> Self {
        let prefix = action.failure_prefix();
        match err {
            CatalogError::MissingName => {
                AppError::Validation(format!("{}. Mohon isi nama buku", prefix))
            }
            CatalogError::PageOverflow => AppError::Validation(format!(
                "{}. readPage tidak boleh lebih besar dari pageCount",
                prefix
            )),
            CatalogError::NotFound => match action {
                Action::Get => AppError::NotFound("Buku tidak ditemukan".to_string()),
                _ => AppError::NotFound(format!("{}. Id tidak ditemukan", prefix)),
            },
            CatalogError::PersistFault(_) | CatalogError::LockPoisoned(_) => {
                tracing::error!("Catalog fault during {:?}: {}", action, err);
                match action {
                    Action::Create => AppError::Internal("Buku gagal ditambahkan".to_string()),
                    _ => AppError::Internal(prefix.to_string()),
                }
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::BadRequest(msg) => {
                tracing::debug!("Rejected request body: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ApiResponse::<()>::fail(message))).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
