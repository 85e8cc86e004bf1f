use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error taxonomy every handler surfaces. Each variant maps to exactly
/// one status code; nothing is retried or swallowed below this boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(&'static str),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    FeatureDisabled(String),
    #[error("{0}")]
    Misconfigured(String),
    #[error("{0}")]
    Upstream(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::FeatureDisabled(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            tracing::error!(error = %e, "request failed");
        }
        (self.status(), Json(ErrorBody { message: self.to_string() })).into_response()
    }
}

/// `top`/`skip` query parameters shared by every collection endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub top: Option<i64>,
    pub skip: Option<i64>,
}
