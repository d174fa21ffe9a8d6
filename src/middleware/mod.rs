// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (authorization, request logging).

pub mod auth;

pub use auth::require_key;
