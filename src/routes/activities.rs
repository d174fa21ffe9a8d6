// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route handlers for the activity lifecycle.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityCounts, NewActivity};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use std::sync::Arc;

/// Activity routes. The key middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/activities", post(create_activity))
        .route("/activities/random", get(random_activity))
        .route("/activities/history", get(history))
        .route("/activities/count", get(count))
        .route("/activities/selected", get(selected_activity))
        .route("/activities/{id}", get(activity_by_id))
        .route("/activities/{id}/select", post(select_activity))
        .route("/activities/{id}/repeat", post(repeat_activity))
        .route("/activities/{id}/done", put(mark_done))
}

/// Pick a random activity that is still to be done.
async fn random_activity(State(state): State<Arc<AppState>>) -> Result<Json<Activity>> {
    let activity = state.db.random_active()?.ok_or(AppError::NotFound)?;
    Ok(Json(activity))
}

/// Completed activities, most recently completed first.
async fn history(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Activity>>> {
    Ok(Json(state.db.history()?))
}

async fn count(State(state): State<Arc<AppState>>) -> Result<Json<ActivityCounts>> {
    Ok(Json(state.db.counts()?))
}

async fn selected_activity(State(state): State<Arc<AppState>>) -> Result<Json<Activity>> {
    let activity = state.db.selected()?.ok_or(AppError::NotFound)?;
    Ok(Json(activity))
}

async fn activity_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Activity>> {
    let activity = state.db.find(id)?.ok_or(AppError::NotFound)?;
    Ok(Json(activity))
}

/// Validate and persist a new activity.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewActivity>,
) -> Result<StatusCode> {
    let draft = payload.validate()?;
    state.db.insert(draft)?;
    tracing::debug!(name = %draft.name, "Activity created");
    Ok(StatusCode::CREATED)
}

/// Make this the one selected activity, deselecting every other.
async fn select_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.db.select(id)?;
    Ok(StatusCode::OK)
}

/// Complete the activity and queue up a fresh copy of it.
async fn repeat_activity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    if !state.db.repeat(id, Utc::now())? {
        return Err(AppError::NotFound);
    }
    Ok(StatusCode::OK)
}

async fn mark_done(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.db.mark_done(id, Utc::now())?;
    Ok(StatusCode::OK)
}
