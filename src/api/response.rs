//! Response types for the capacity engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid period label error response.
    pub fn invalid_period(label: &str) -> Self {
        Self::with_details(
            "INVALID_PERIOD",
            format!("Invalid period label: {}", label),
            "Expected a week (W3 2026), month (Feb 2026), quarter (Q1 2026), year (2026) or sprint (26-04)",
        )
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidSettings { field, message } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_SETTINGS",
                    format!("Invalid setting '{}': {}", field, message),
                    "The settings override contains an unusable value",
                ))
            }
            EngineError::InvalidDays { context, days } => {
                ApiErrorResponse::bad_request(ApiError::with_details(
                    "INVALID_DAYS",
                    format!("Invalid days for {}: {}", context, days),
                    "Day quantities must not be negative",
                ))
            }
            EngineError::InvalidPeriod { label } => {
                ApiErrorResponse::bad_request(ApiError::invalid_period(&label))
            }
            EngineError::MemberNotFound { id } => ApiErrorResponse::bad_request(ApiError::new(
                "MEMBER_NOT_FOUND",
                format!("Team member not found: {}", id),
            )),
            EngineError::ProjectNotFound { id } => ApiErrorResponse::bad_request(ApiError::new(
                "PROJECT_NOT_FOUND",
                format!("Project not found: {}", id),
            )),
        }
    }
}
