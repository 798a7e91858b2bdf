/*
 * Copyright 2025 Telecare Contributors
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Axum router configuration for the consult credential API.

pub mod calls;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

async fn health() -> &'static str {
    "OK"
}

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health))
        // Consult call credential surface
        .route("/api/v1/calls", post(calls::create_call))
        .route(
            "/api/v1/calls/{room_id}/credential",
            post(calls::join_credential),
        )
}
