//! API error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rbl_core::RblError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

/// Errors returned by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request body could not be understood
    #[error("{0}")]
    BadRequest(String),

    /// The check itself failed
    #[error(transparent)]
    Check(#[from] RblError),
}

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ApiError {
    /// HTTP status for this error
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Check(e) => StatusCode::from_u16(e.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "RBL check failed");
        } else {
            debug!(status = status.as_u16(), error = %message, "rejected RBL check");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
