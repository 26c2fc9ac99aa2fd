//! API Error Responses
//!
//! Every failure on a request path maps to a structured JSON body. Bad
//! input is the client's problem (400); anything else is ours (500).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use classifier::ClassifierError;
use sensor_window::WindowError;
use serde::Serialize;
use storage::StorageError;
use telemetry_validator::ValidationError;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by request handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Classifier(#[from] ClassifierError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Window(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Classifier(e) => {
                error!("inference failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "inference failure".to_string(),
                )
            }
            ApiError::Storage(e) => {
                error!("storage failure: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage failure".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
