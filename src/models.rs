// ABOUTME: Core data models for the MealMajor recipe platform
// ABOUTME: Defines User, Recipe, RecipeRecord normalization, and dietary profile structures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 MealMajor Contributors

//! # Data Models
//!
//! Core data structures shared by the browser engine, the database layer, and
//! the HTTP routes.
//!
//! ## Design Principles
//!
//! - **Storage Agnostic**: the UI-facing [`Recipe`] shape is decoupled from the
//!   raw storage column names via [`RecipeRecord::normalize`]
//! - **Serializable**: all models support JSON serialization for the REST API
//! - **Type Safe**: validation lives next to the types it protects

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Highest allowed recipe difficulty
pub const MAX_DIFFICULTY: u8 = 5;

/// Sentinel label that is mutually exclusive with every other profile selection
pub const NONE_SENTINEL: &str = "None";

/// Baseline dietary restriction vocabulary offered to every user
pub const BASELINE_RESTRICTIONS: &[&str] = &[
    "None",
    "Halal",
    "Vegan",
    "Vegetarian",
    "Gluten-Free",
    "Dairy-Free",
    "Nut Allergy",
];

/// Baseline dietary preference vocabulary offered to every user
pub const BASELINE_PREFERENCES: &[&str] = &[
    "None",
    "Tomatoes",
    "Pickles",
    "Lettuce",
    "Onions",
    "Mushrooms",
    "Peppers",
    "Olives",
];

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned at registration
    pub id: Uuid,
    /// Email address (unique)
    pub email: String,
    /// Optional display name
    pub display_name: Option<String>,
    /// Bcrypt password hash
    pub password_hash: String,
    /// Whether the account can log in
    pub is_active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a fresh id
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash,
            is_active: true,
            created_at: now,
            last_active: now,
        }
    }
}

/// One recipe record in the UI shape the browser engine consumes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Opaque unique identifier, immutable and assigned by the storage layer
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Ordered ingredient list; duplicates allowed
    pub ingredients: Vec<String>,
    /// Dietary restriction tags; set semantics, duplicates meaningless
    #[serde(default)]
    pub restrictions: Vec<String>,
    /// Cost in dollars
    pub cost: f64,
    /// Free-text preparation steps, newline-delimited
    pub prep_steps: String,
    /// Difficulty from 1 to 5
    pub difficulty: u8,
    /// Owning user, meaningful only as a listing scope
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Raw recipe row as stored, before field-name normalization.
///
/// Storage column names differ from the UI shape (`preparation_steps` maps to
/// `prep_steps`); normalization happens exactly once, at ingestion, before any
/// filtering sees the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeRecord {
    /// Storage-assigned identifier
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Dietary restriction tags
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    /// Cost in dollars
    pub cost: f64,
    /// Storage column name for the prep steps text
    pub preparation_steps: String,
    /// Difficulty from 1 to 5
    pub difficulty: u8,
    /// Owning user
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl RecipeRecord {
    /// Map the storage field names into the UI [`Recipe`] shape
    #[must_use]
    pub fn normalize(self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title,
            prep_time: self.prep_time,
            ingredients: self.ingredients,
            restrictions: self.dietary_restrictions,
            cost: self.cost,
            prep_steps: self.preparation_steps,
            difficulty: self.difficulty,
            user_id: self.user_id,
            created_at: self.created_at,
        }
    }
}

/// Payload for creating a recipe
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecipe {
    /// Recipe title
    pub title: String,
    /// Preparation time in minutes
    pub prep_time: u32,
    /// Ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Dietary restriction tags
    #[serde(default)]
    pub restrictions: Vec<String>,
    /// Cost in dollars
    pub cost: f64,
    /// Free-text preparation steps
    #[serde(default)]
    pub prep_steps: String,
    /// Difficulty from 1 to 5
    pub difficulty: u8,
}

impl NewRecipe {
    /// Validate the payload's invariants
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is empty, difficulty is
    /// outside 1-5, or the cost is negative or non-finite.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_input("Recipe title must not be empty"));
        }
        if self.difficulty == 0 || self.difficulty > MAX_DIFFICULTY {
            return Err(AppError::invalid_input(format!(
                "Difficulty must be between 1 and {MAX_DIFFICULTY}"
            )));
        }
        if !self.cost.is_finite() || self.cost < 0.0 {
            return Err(AppError::invalid_input("Cost must be non-negative"));
        }
        Ok(())
    }
}

/// Partial payload for updating a recipe; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeUpdate {
    /// New title, if provided
    pub title: Option<String>,
    /// New prep time, if provided
    pub prep_time: Option<u32>,
    /// New ingredient list, if provided
    pub ingredients: Option<Vec<String>>,
    /// New restriction tags, if provided
    pub restrictions: Option<Vec<String>>,
    /// New cost, if provided
    pub cost: Option<f64>,
    /// New prep steps, if provided
    pub prep_steps: Option<String>,
    /// New difficulty, if provided
    pub difficulty: Option<u8>,
}

impl RecipeUpdate {
    /// Validate the provided fields' invariants
    ///
    /// # Errors
    ///
    /// Returns a validation error when a provided field violates the recipe
    /// invariants (empty title, difficulty outside 1-5, negative cost).
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::invalid_input("Recipe title must not be empty"));
            }
        }
        if let Some(difficulty) = self.difficulty {
            if difficulty == 0 || difficulty > MAX_DIFFICULTY {
                return Err(AppError::invalid_input(format!(
                    "Difficulty must be between 1 and {MAX_DIFFICULTY}"
                )));
            }
        }
        if let Some(cost) = self.cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(AppError::invalid_input("Cost must be non-negative"));
            }
        }
        Ok(())
    }
}

/// Per-user dietary restrictions and preferences.
///
/// Each set may contain the [`NONE_SENTINEL`] only on its own; the toggle
/// helpers in the browser module maintain that exclusivity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietaryProfile {
    /// Selected dietary restrictions
    pub restrictions: Vec<String>,
    /// Selected dietary preferences
    pub preferences: Vec<String>,
}

impl DietaryProfile {
    /// Whether neither set pairs the sentinel with another member
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let exclusive =
            |set: &[String]| !set.iter().any(|s| s == NONE_SENTINEL) || set.len() == 1;
        exclusive(&self.restrictions) && exclusive(&self.preferences)
    }
}
