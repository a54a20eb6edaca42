// ABOUTME: Health check endpoint for operational visibility
// ABOUTME: Reports service name, version, and liveness status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status
    pub status: String,
    /// Service name
    pub service: String,
    /// Service version
    pub version: String,
}

/// Health routes handler
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    #[must_use]
    pub fn routes() -> Router {
        Router::new().route("/health", get(Self::handle_health))
    }

    /// Handle GET /health - liveness probe
    async fn handle_health() -> impl IntoResponse {
        let response = HealthResponse {
            status: "healthy".into(),
            service: "mealmajor".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        };
        (StatusCode::OK, Json(response))
    }
}
