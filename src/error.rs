//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Message sent when the request body is not a JSON object or array.
pub const MESSAGE_INVALID_JSON: &str = "Invalid JSON in the body.";
/// Message sent when bound values do not fit the input container.
pub const MESSAGE_INVALID_INPUT: &str = "Invalid input data.";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    Invalid { key: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed request: missing resource name, invalid JSON.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A bound value does not fit its input field; carries the deserializer's reason.
    #[error("bad request: invalid input data: {0}")]
    InvalidInput(String),
    /// The requested resource is not registered.
    #[error("not implemented: {0}")]
    NotImplemented(String),
    /// Server-side misconfiguration, never caused by the client.
    #[error("internal: {0}")]
    Internal(String),
    /// A status reported by a resource handler above 201.
    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Http { status, .. } => *status,
        }
    }

    /// Client-facing message, without the variant prefix used by `Display`.
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(m) | AppError::NotImplemented(m) | AppError::Internal(m) => m,
            AppError::InvalidInput(_) => MESSAGE_INVALID_INPUT,
            AppError::Http { message, .. } => message,
        }
    }

    /// Structured detail for the envelope's `details` field.
    pub fn details(&self) -> Option<serde_json::Value> {
        match self {
            AppError::InvalidInput(reason) => Some(serde_json::json!({ "reason": reason })),
            _ => None,
        }
    }

    fn code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "bad_request".into(),
            AppError::InvalidInput(_) => "invalid_input".into(),
            AppError::NotImplemented(_) => "not_implemented".into(),
            AppError::Internal(_) => "internal_error".into(),
            AppError::Http { status, .. } => status
                .canonical_reason()
                .map(|r| r.to_lowercase().replace([' ', '-'], "_"))
                .unwrap_or_else(|| "http_error".into()),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(ref m) = self {
            tracing::error!(error = %m, "internal error while dispatching resource");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: self.message().to_string(),
                details: self.details(),
            },
        };
        (status, Json(body)).into_response()
    }
}
