use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::reddit::FetchError;

/// Errors surfaced to API callers as `{"detail": ...}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Limit cannot exceed {max}")]
    LimitExceeded { max: i64 },
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),
    #[error("Reddit API error: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("Reddit API request timed out")]
    UpstreamTimeout,
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::LimitExceeded { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidQuery(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Upstream { status, .. } => *status,
            Self::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match err {
            // An upstream success status never reaches here, but an
            // out-of-range code still has to map to something.
            FetchError::Status { status, body } => Self::Upstream {
                status: StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                body,
            },
            FetchError::Timeout => Self::UpstreamTimeout,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(detail) => tracing::error!(%status, "Request failed: {detail}"),
            Self::Upstream { .. } | Self::UpstreamTimeout => {
                tracing::warn!(%status, "Upstream failure: {self}");
            }
            Self::LimitExceeded { .. } | Self::InvalidQuery(_) => {
                tracing::debug!(%status, "Rejected request: {self}");
            }
        }

        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
