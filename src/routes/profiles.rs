// ABOUTME: Route handlers for dietary-profile management and the filter-label vocabulary
// ABOUTME: Enforces the exclusive None sentinel and case-insensitive custom-label de-dup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

//! Dietary profile routes.
//!
//! Profiles hold each user's selected restrictions and preferences. The "None"
//! sentinel may only appear alone in a set; inconsistent payloads are rejected
//! rather than silently repaired so clients learn about broken toggle logic.

use crate::{
    database::LabelKind,
    errors::AppError,
    models::DietaryProfile,
    routes::{authenticate, ServerResources},
};
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response carrying the merged label vocabularies
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyResponse {
    /// Restriction labels: baseline plus the user's custom labels
    pub restrictions: Vec<String>,
    /// Preference labels: baseline plus the user's custom labels
    pub preferences: Vec<String>,
}

/// Request to persist a custom vocabulary label
#[derive(Debug, Deserialize)]
pub struct AddLabelRequest {
    /// Which vocabulary to extend: "restriction" or "preference"
    pub kind: String,
    /// The new label text
    pub label: String,
}

/// Response for a custom-label insert
#[derive(Debug, Serialize, Deserialize)]
pub struct AddLabelResponse {
    /// Whether the label was added (false when de-duplicated)
    pub added: bool,
}

/// Profile routes handler
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/profile", get(Self::handle_get))
            .route("/api/profile", put(Self::handle_save))
            .route("/api/profile/options", get(Self::handle_options))
            .route("/api/profile/options", post(Self::handle_add_label))
            .with_state(resources)
    }

    /// Handle GET /api/profile - the caller's dietary profile
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let profile = resources
            .database
            .get_dietary_profile(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle PUT /api/profile - replace the caller's dietary profile
    async fn handle_save(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(profile): Json<DietaryProfile>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        if !profile.is_consistent() {
            return Err(AppError::invalid_input(
                "\"None\" cannot be combined with other selections",
            ));
        }

        resources
            .database
            .upsert_dietary_profile(auth.user_id, &profile)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(user_id = %auth.user_id, "dietary profile saved");

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    /// Handle GET /api/profile/options - merged vocabularies for the filter UI
    async fn handle_options(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let restrictions = resources
            .database
            .label_vocabulary(auth.user_id, LabelKind::Restriction)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        let preferences = resources
            .database
            .label_vocabulary(auth.user_id, LabelKind::Preference)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        let response = VocabularyResponse {
            restrictions,
            preferences,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /api/profile/options - persist a custom label
    async fn handle_add_label(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(request): Json<AddLabelRequest>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let kind = match request.kind.as_str() {
            "restriction" => LabelKind::Restriction,
            "preference" => LabelKind::Preference,
            other => {
                return Err(AppError::invalid_input(format!(
                    "Unknown label kind: {other}"
                )))
            }
        };

        let added = resources
            .database
            .add_custom_label(auth.user_id, kind, &request.label)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(AddLabelResponse { added })).into_response())
    }
}
