//! Error types for nou-mi

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::import::ImportError;

/// API error type
///
/// Every variant renders as the standard `{ success: false, message }`
/// envelope; the status code is the only thing that varies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or empty session cookie (401)
    #[error("Non authentifié")]
    Unauthorized,

    /// Invalid request: missing file, unreadable file, empty CSV (400)
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            // File-level parse failures are the caller's problem
            ImportError::Parse(e) => ApiError::BadRequest(e.to_string()),
            // Store connectivity failures abort the whole request
            ImportError::Database(e) => {
                ApiError::Internal(format!("Erreur de base de données: {}", e))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
