//! REST API for projects, environments, labels and their properties

mod envs;
mod projects;
mod properties;
mod routes;
mod state;
mod types;

pub use envs::env_routes;
pub use projects::project_routes;
pub use properties::property_routes;
pub use routes::build_router;
pub use state::AppState;
pub use types::*;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(String),
}

/// Handler result wrapped in the response envelope
pub type ApiResult<T> = Result<Json<WebResp<T>>, AppError>;

impl AppError {
    /// Failure for an entity that was asserted to exist
    pub fn not_exist(kind: &str, id: i64) -> Self {
        AppError::NotFound(format!("{} [{}] not exist", kind, id))
    }

    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AppError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(WebResp::failure(code, self.to_string()))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Resource not found".to_string()),
            ref e if is_unique_violation(e) => AppError::Conflict(e.to_string()),
            _ => AppError::Database(err.to_string()),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|e| e.is_unique_violation())
        .unwrap_or(false)
}

/// Trimmed, non-empty name or a `BadRequest`
pub(crate) fn require_name(kind: &str, value: &str) -> Result<String, AppError> {
    let name = value.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest(format!("{} name is required", kind)));
    }
    Ok(name.to_string())
}
