// ABOUTME: HTTP route assembly and shared server resources for the REST API
// ABOUTME: Wires auth, recipe, profile, and health routers onto one axum Router
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 MealMajor Contributors

//! REST API routes.
//!
//! Each domain gets its own `Routes` struct building an axum `Router` over the
//! shared [`ServerResources`] state. Handlers are thin: they authenticate,
//! validate, delegate to the database layer, and format responses.

pub mod auth;
pub mod health;
pub mod profiles;
pub mod recipes;

use crate::auth::{extract_bearer_token, AuthContext, AuthManager};
use crate::database::Database;
use crate::errors::AppError;
use axum::http::HeaderMap;
use axum::Router;
use http::Method;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state for all route handlers
pub struct ServerResources {
    /// Database manager
    pub database: Database,
    /// JWT token manager
    pub auth_manager: AuthManager,
}

impl ServerResources {
    /// Bundle the shared resources
    #[must_use]
    pub const fn new(database: Database, auth_manager: AuthManager) -> Self {
        Self {
            database,
            auth_manager,
        }
    }
}

/// Authenticate a request from its `Authorization` header
///
/// # Errors
///
/// Returns an auth error when the header is missing, malformed, or carries an
/// invalid or expired token.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> Result<AuthContext, AppError> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = extract_bearer_token(auth_header)?;
    let claims = resources.auth_manager.validate_token(token)?;
    AuthContext::from_claims(&claims)
}

/// Build the complete API router with tracing and CORS middleware
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        .merge(auth::AuthRoutes::routes(resources.clone()))
        .merge(recipes::RecipeRoutes::routes(resources.clone()))
        .merge(profiles::ProfileRoutes::routes(resources))
        .merge(health::HealthRoutes::routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
