// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing application key header '{header}'")]
    MissingKey { header: String },

    #[error("Invalid application key")]
    InvalidKey,

    #[error("Invalid {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: &'static str,
    },

    #[error("Resource not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::MissingKey { header } => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": format!("Missing '{header}' header") })),
            )
                .into_response(),
            AppError::InvalidKey => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Invalid access key" })),
            )
                .into_response(),
            AppError::InvalidInput { field, message } => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "type": "INVALID_INPUT",
                    "field": field,
                    "message": message,
                })),
            )
                .into_response(),
            // Row misses carry no body, matching what clients already expect.
            AppError::NotFound => StatusCode::NOT_FOUND.into_response(),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "database_error" })),
                )
                    .into_response()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal_error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
