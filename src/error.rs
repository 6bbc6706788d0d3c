// Request-level errors and their JSON envelopes

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::docker_repo::RuntimeError;
use crate::models::iso_timestamp;

/// Message used for 500s when error detail is hidden.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch containers")]
    Containers(#[from] RuntimeError),

    #[error("Failed to get system info")]
    System(anyhow::Error),

    #[error("API endpoint not found")]
    NotFound { path: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Containers(_) | AppError::System(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Containers(e) => {
                tracing::warn!(error = %e, "Container listing failed");
                json!({
                    "error": self.to_string(),
                    "message": e.to_string(),
                    "timestamp": iso_timestamp(),
                })
            }
            AppError::System(e) => {
                tracing::warn!(error = %e, "System info failed");
                json!({
                    "error": self.to_string(),
                    "message": e.to_string(),
                    "timestamp": iso_timestamp(),
                })
            }
            AppError::NotFound { path } => json!({
                "error": self.to_string(),
                "path": path,
                "timestamp": iso_timestamp(),
            }),
        };
        (status, Json(body)).into_response()
    }
}

/// Envelope for a fault no handler caught. Detail only outside production.
pub fn internal_error_response(detail: &str, expose_details: bool) -> Response {
    let message = if expose_details {
        detail
    } else {
        GENERIC_ERROR_MESSAGE
    };
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal Server Error",
            "message": message,
            "timestamp": iso_timestamp(),
        })),
    )
        .into_response()
}
