// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Widoo: pick something to do
//!
//! This crate provides the backend API for the Widoo activity tracker:
//! activities are created, selected, completed, and optionally repeated,
//! all persisted in a single SQLite table.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}
