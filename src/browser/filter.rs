// ABOUTME: Filter criteria model and the pure visibility predicate for recipe browsing
// ABOUTME: Evaluates difficulty/cost/time caps and ALL-of restriction and ingredient matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

//! Client-side recipe filtering.
//!
//! Two parallel copies of [`FilterCriteria`] live in the browser state: the
//! draft reflects in-progress panel edits and the applied copy is the only one
//! the predicate reads. Promotion from draft to applied happens in a single
//! atomic step, so a half-edited filter never leaks into the visible list.

use crate::models::Recipe;
use serde::{Deserialize, Serialize};

/// Multi-criteria recipe filter.
///
/// The default value is fully unconstrained: every recipe passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Maximum difficulty, 0 meaning unconstrained, else 1-5 ("at most N")
    pub max_difficulty: u8,
    /// Maximum cost, unset meaning unconstrained
    pub max_cost: Option<f64>,
    /// Maximum prep time in minutes, unset meaning unconstrained
    pub max_prep_time: Option<u32>,
    /// Required dietary restrictions, recipe must contain ALL
    pub restrictions: Vec<String>,
    /// Required ingredients, recipe must contain ALL
    pub ingredients: Vec<String>,
}

impl FilterCriteria {
    /// Whether no criterion constrains the result
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.max_difficulty == 0
            && self.max_cost.is_none()
            && self.max_prep_time.is_none()
            && self.restrictions.is_empty()
            && self.ingredients.is_empty()
    }

    /// Parse a numeric filter field from free-text input.
    ///
    /// Malformed or negative input degrades to unconstrained rather than
    /// failing predicate evaluation.
    #[must_use]
    pub fn parse_cost_input(raw: &str) -> Option<f64> {
        raw.trim().parse::<f64>().ok().filter(|c| *c >= 0.0)
    }

    /// Parse a prep-time filter field, coercing malformed input to unconstrained
    #[must_use]
    pub fn parse_time_input(raw: &str) -> Option<u32> {
        raw.trim().parse::<u32>().ok()
    }

    /// Evaluate the predicate against a single recipe
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if self.max_difficulty != 0 && recipe.difficulty > self.max_difficulty {
            return false;
        }
        if let Some(max_cost) = self.max_cost {
            if recipe.cost > max_cost {
                return false;
            }
        }
        if let Some(max_time) = self.max_prep_time {
            if recipe.prep_time > max_time {
                return false;
            }
        }
        contains_all(&recipe.restrictions, &self.restrictions)
            && contains_all(&recipe.ingredients, &self.ingredients)
    }

    /// Derive the visible list from a working set.
    ///
    /// Stable filter: order is preserved from the input and no re-sort is
    /// applied. An empty result is a normal value, never an error.
    #[must_use]
    pub fn apply<'a>(&self, working_set: &'a [Recipe]) -> Vec<&'a Recipe> {
        working_set.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Whether every required value case-insensitively matches some element of
/// `haystack`. Folding is Unicode-aware so accented labels compare correctly.
fn contains_all(haystack: &[String], required: &[String]) -> bool {
    required.iter().all(|req| {
        let req = req.to_lowercase();
        haystack.iter().any(|have| have.to_lowercase() == req)
    })
}

/// Filter recipes by a free-text search term on the title.
///
/// The term is trimmed and matched case-insensitively as a substring. An
/// empty (or whitespace-only) term returns the input unchanged, in order.
#[must_use]
pub fn filter_recipes_by_search<'a>(recipes: &'a [Recipe], term: &str) -> Vec<&'a Recipe> {
    let q = term.trim().to_lowercase();
    if q.is_empty() {
        return recipes.iter().collect();
    }
    recipes
        .iter()
        .filter(|r| r.title.to_lowercase().contains(&q))
        .collect()
}
