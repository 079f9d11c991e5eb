//! Error conversion from ContextifyerError to HTTP responses

use crate::error::ContextifyerError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

impl ContextifyerError {
    /// HTTP status this error is reported with
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContextifyerError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ContextifyerError::Serialization(_) => StatusCode::BAD_REQUEST,
            ContextifyerError::DuplicateLabel { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ContextifyerError::Ontology(_) => StatusCode::BAD_GATEWAY,
            ContextifyerError::Http(_) => StatusCode::BAD_GATEWAY,
            ContextifyerError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
            ContextifyerError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ContextifyerError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ContextifyerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Request failed ({}): {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
