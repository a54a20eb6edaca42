// ABOUTME: Route handlers for recipe CRUD and keyword search REST endpoints
// ABOUTME: Normalizes storage records at ingestion and enforces owner scoping on mutations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

//! Recipe routes.
//!
//! The search endpoint mirrors the browser engine's fetch contract: a
//! non-empty keyword is required, matching is case-insensitive server-side,
//! and ordering is owned entirely by the storage layer. Mutations require JWT
//! authentication and are scoped to the owning user.

use crate::{
    errors::AppError,
    models::{NewRecipe, Recipe, RecipeRecord, RecipeUpdate},
    routes::{authenticate, ServerResources},
};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Response for a recipe in the UI field shape
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    /// Unique identifier
    pub id: String,
    /// Recipe title
    pub title: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Dietary restriction tags
    pub restrictions: Vec<String>,
    /// Cost in dollars
    pub cost: f64,
    /// Preparation steps
    pub prep_steps: String,
    /// Difficulty from 1 to 5
    pub difficulty: u8,
    /// Owning user
    pub user_id: String,
    /// Creation timestamp
    pub created_at: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            title: recipe.title,
            prep_time: recipe.prep_time,
            ingredients: recipe.ingredients,
            restrictions: recipe.restrictions,
            cost: recipe.cost,
            prep_steps: recipe.prep_steps,
            difficulty: recipe.difficulty,
            user_id: recipe.user_id.to_string(),
            created_at: recipe.created_at.to_rfc3339(),
        }
    }
}

impl From<RecipeRecord> for RecipeResponse {
    fn from(record: RecipeRecord) -> Self {
        record.normalize().into()
    }
}

/// Response for listing recipes
#[derive(Debug, Serialize, Deserialize)]
pub struct ListRecipesResponse {
    /// Recipes in storage order
    pub recipes: Vec<RecipeResponse>,
    /// Total count
    pub total: u32,
}

/// Result shape for recipe mutations
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeMutationResponse {
    /// Whether the operation succeeded
    pub success: bool,
    /// The persisted record, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<RecipeResponse>,
}

/// Query parameters for keyword search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Keyword to match against titles and ingredients
    pub keyword: Option<String>,
}

/// Recipe routes handler
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", get(Self::handle_list))
            .route("/api/recipes", post(Self::handle_create))
            .route("/api/recipes/mine", get(Self::handle_list_mine))
            .route("/api/recipes/:id", get(Self::handle_get))
            .route("/api/recipes/:id", put(Self::handle_update))
            .route("/api/recipes/:id", delete(Self::handle_delete))
            .route("/api/search", get(Self::handle_search))
            .with_state(resources)
    }

    fn list_response(records: Vec<RecipeRecord>) -> ListRecipesResponse {
        let recipes: Vec<RecipeResponse> = records.into_iter().map(Into::into).collect();
        ListRecipesResponse {
            total: u32::try_from(recipes.len()).unwrap_or(0),
            recipes,
        }
    }

    fn parse_id(raw: &str) -> Result<Uuid, AppError> {
        Uuid::parse_str(raw)
            .map_err(|_| AppError::invalid_input(format!("Invalid recipe id: {raw}")))
    }

    /// Handle GET /api/recipes - full listing of the shared recipe pool
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let records = resources
            .database
            .list_all_recipes()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(Self::list_response(records))).into_response())
    }

    /// Handle GET /api/recipes/mine - recipes owned by the authenticated user
    async fn handle_list_mine(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let records = resources
            .database
            .list_recipes_for_user(auth.user_id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(Self::list_response(records))).into_response())
    }

    /// Handle GET /api/search?keyword= - keyword search over the shared pool
    async fn handle_search(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<SearchQuery>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let keyword = query
            .keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| AppError::invalid_input("Keyword is required"))?;

        let records = resources
            .database
            .search_recipes_by_keyword(keyword)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        Ok((StatusCode::OK, Json(Self::list_response(records))).into_response())
    }

    /// Handle GET /api/recipes/:id - single recipe for the detail panel
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        authenticate(&headers, &resources)?;

        let id = Self::parse_id(&id)?;
        let record = resources
            .database
            .get_recipe(id)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .ok_or_else(|| AppError::not_found(format!("Recipe {id}")))?;

        Ok((StatusCode::OK, Json(RecipeResponse::from(record))).into_response())
    }

    /// Handle POST /api/recipes - create a recipe owned by the caller
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<NewRecipe>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        body.validate()?;

        let record = resources
            .database
            .create_recipe(auth.user_id, &body)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(recipe_id = %record.id, user_id = %auth.user_id, "recipe created");

        let response = RecipeMutationResponse {
            success: true,
            recipe: Some(record.into()),
        };
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle PUT /api/recipes/:id - partial update by the owner
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<RecipeUpdate>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        body.validate()?;

        let id = Self::parse_id(&id)?;
        let record = resources
            .database
            .update_recipe(id, auth.user_id, &body)
            .await
            .map_err(|e| {
                tracing::debug!(recipe_id = %id, error = %e, "recipe update rejected");
                AppError::not_found(format!("Recipe {id}"))
            })?;

        let response = RecipeMutationResponse {
            success: true,
            recipe: Some(record.into()),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/recipes/:id - delete by the owner
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let id = Self::parse_id(&id)?;
        resources
            .database
            .delete_recipe(id, auth.user_id)
            .await
            .map_err(|_| AppError::not_found(format!("Recipe {id}")))?;

        tracing::info!(recipe_id = %id, user_id = %auth.user_id, "recipe deleted");

        let response = RecipeMutationResponse {
            success: true,
            recipe: None,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
