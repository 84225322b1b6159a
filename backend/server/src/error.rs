use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;
use upstream::UpstreamError;

use crate::favorites::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("ERROR, PLEASE PASS IN {}", .0.to_uppercase())]
    MissingParameter(&'static str),

    #[error("Invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    fn kind(&self) -> &'static str {
        match self {
            AppError::MissingParameter(_) => "missing_parameter",
            AppError::InvalidParameter { .. } => "invalid_parameter",
            AppError::MalformedPayload => "malformed_payload",
            AppError::MalformedQuery(_) => "malformed_query",
            AppError::Upstream(_) => "upstream_error",
            AppError::Store(_) => "store_error",
            AppError::Config(_) => "config_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_)
            | AppError::InvalidParameter { .. }
            | AppError::MalformedPayload
            | AppError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Store(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            warn!("Request failed: {self}");
        }

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}
