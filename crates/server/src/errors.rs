use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::StoreError;
use thiserror::Error;
use tracing::error;

/// Text shown to chat users when something inside the service broke.
pub const GENERIC_FAILURE: &str = "internal error, please try again later";

/// Infrastructure failure while serving a slash command.
/// The detail is logged; the user only sees `GENERIC_FAILURE`.
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "slash command failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        (status, Json(serde_json::json!({"text": GENERIC_FAILURE}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
