//! Translation of pipeline failures into HTTP responses.
//!
//! Callers only ever see a code and a generic message. Upstream status codes,
//! raw bodies and transport details go to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid page value: {0}")]
    InvalidPage(String),

    #[error(transparent)]
    News(#[from] ng_core::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            ApiError::News(ng_core::Error::Transport(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::News(ng_core::Error::UpstreamStatus { .. })
            | ApiError::News(ng_core::Error::UpstreamPayload(_)) => StatusCode::BAD_GATEWAY,
            ApiError::News(ng_core::Error::Configuration(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidPage(raw) => ErrorResponse {
                code: "InvalidPage".to_string(),
                message: "Page must be greater than or equal to 1".to_string(),
                details: Some(format!("Provided page value: {}", raw)),
            },
            ApiError::News(e) if e.is_upstream() => ErrorResponse {
                code: "ExternalApiError".to_string(),
                message: "Unable to fetch news".to_string(),
                details: None,
            },
            ApiError::News(_) => ErrorResponse {
                code: "InternalServerError".to_string(),
                message: "An unexpected error occurred".to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::InvalidPage(raw) => warn!("Rejected page value {:?}", raw),
            ApiError::News(e) => error!("Error serving news request: {:?}", e),
        }

        (self.status_code(), Json(self.to_response_body())).into_response()
    }
}
