//! API error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::values::{PathError, UnknownSection};

/// Errors returned by the values API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Section(#[from] UnknownSection),
    #[error("request body must be a JSON object")]
    NotAnObject,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Path(_) | ApiError::NotAnObject => StatusCode::BAD_REQUEST,
            ApiError::Section(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = %status, error = %self, "Rejected request");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
