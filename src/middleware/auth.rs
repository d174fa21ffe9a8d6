// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared-secret authorization middleware.
//!
//! Every request, including ones that match no route, must present the
//! configured application key in the configured header. One global secret,
//! compared by exact string equality.

use crate::error::AppError;
use crate::AppState;
use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use std::sync::Arc;

/// Cap on how much of a request body gets buffered for logging; matches
/// axum's default body limit.
const MAX_LOGGED_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Middleware that requires the application key on every request.
pub async fn require_key(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let client = client_addr(&request);
    let header = &state.config.application_key_header;

    let Some(value) = request.headers().get(header.as_str()) else {
        tracing::warn!(client = %client, "Request without application key");
        return Err(AppError::MissingKey {
            header: header.clone(),
        });
    };

    let presented = value.to_str().unwrap_or_default();
    if presented != state.config.application_key {
        tracing::warn!(
            client = %client,
            key = %presented,
            "Request with an invalid application key"
        );
        return Err(AppError::InvalidKey);
    }

    let request = if state.config.log_requests {
        log_request(request).await?
    } else {
        request
    };

    Ok(next.run(request).await)
}

/// Log method, URL, and body of an authorized request, then hand back an
/// equivalent request with the buffered body restored.
async fn log_request(request: Request) -> Result<Request, AppError> {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, MAX_LOGGED_BODY_BYTES).await.map_err(|err| {
        AppError::Internal(anyhow::anyhow!("Failed to buffer request body: {err}"))
    })?;

    tracing::info!(
        method = %parts.method,
        url = %parts.uri,
        body = %String::from_utf8_lossy(&bytes),
        "Request"
    );

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

fn client_addr(request: &Request) -> String {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
