// ABOUTME: Recipe browser engine managing the working set, filters, selection, and search
// ABOUTME: Drives debounced keyword search, two-phase filter criteria, and stale-fetch suppression
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 MealMajor Contributors

//! # Recipe Browser Engine
//!
//! Session-scoped state for the recipe browsing flow. Raw records arrive from
//! a [`RecipeSource`] (keyword search when the confirmed term is non-empty,
//! full listing otherwise), are normalized once at ingestion, and become the
//! working set. A pure filter over the *applied* criteria derives the visible
//! list; the user selects one visible recipe for the detail panel.
//!
//! The engine is single-owner and event-driven: every transition happens in
//! response to a discrete call. The only suspension point is the fetch, which
//! is guarded by a monotonically increasing sequence number so a superseded
//! fetch can never overwrite a newer one's working set.

pub mod filter;
pub mod toggle;

pub use filter::{filter_recipes_by_search, FilterCriteria};
pub use toggle::{toggle_item, toggle_exclusive};

use crate::models::{Recipe, RecipeRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Quiet period before a raw search input becomes the confirmed term
pub const SEARCH_DEBOUNCE_MS: i64 = 400;

/// Source of raw recipe records for the browser.
///
/// Implemented by the database layer in production and by in-memory fakes in
/// tests. Ordering of returned records is owned entirely by the source; the
/// engine never re-sorts.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Keyword search over the shared recipe list (case-insensitive, server-side)
    async fn search_recipes(&self, keyword: &str) -> Result<Vec<RecipeRecord>>;

    /// Full listing of all recipes visible to the current access scope
    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>>;
}

/// Browsing-session state: working set, filters, selection, and search term
#[derive(Debug, Default)]
pub struct RecipeBrowser {
    working_set: Vec<Recipe>,
    draft: FilterCriteria,
    applied: FilterCriteria,
    selected: Option<Uuid>,
    search_input: String,
    confirmed_term: String,
    debounce_deadline: Option<DateTime<Utc>>,
    filter_panel_open: bool,
    latest_fetch: u64,
}

impl RecipeBrowser {
    /// Create an empty browser with unconstrained filters
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full in-memory sequence of recipes from the last applied fetch
    #[must_use]
    pub fn working_set(&self) -> &[Recipe] {
        &self.working_set
    }

    /// The visible list: working set filtered by the applied criteria.
    ///
    /// Stable and order-preserving; empty when nothing matches.
    #[must_use]
    pub fn visible(&self) -> Vec<&Recipe> {
        self.applied.apply(&self.working_set)
    }

    /// The last confirmed search term driving fetches
    #[must_use]
    pub fn confirmed_term(&self) -> &str {
        &self.confirmed_term
    }

    /// The raw search-input text, distinct from the confirmed term
    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Record a keystroke in the search box, resetting the debounce timer
    pub fn on_search_input(&mut self, text: &str, now: DateTime<Utc>) {
        self.search_input = text.to_owned();
        self.debounce_deadline = Some(now + Duration::milliseconds(SEARCH_DEBOUNCE_MS));
    }

    /// Advance the debounce timer.
    ///
    /// Returns the newly confirmed term once the quiet period has elapsed and
    /// the trimmed input differs from the current confirmed term. The timer
    /// races independently of any in-flight fetch.
    pub fn poll_debounce(&mut self, now: DateTime<Utc>) -> Option<String> {
        let deadline = self.debounce_deadline?;
        if now < deadline {
            return None;
        }
        self.debounce_deadline = None;
        let term = self.search_input.trim().to_owned();
        if term == self.confirmed_term {
            return None;
        }
        self.confirmed_term = term.clone();
        Some(term)
    }

    /// Explicit "Search" action: confirm the raw input immediately, bypassing
    /// the debounce
    pub fn confirm_search(&mut self) -> String {
        self.debounce_deadline = None;
        self.confirmed_term = self.search_input.trim().to_owned();
        self.confirmed_term.clone()
    }

    /// Dispatch a new logical fetch, superseding any in-flight one.
    ///
    /// Returns the ticket that must accompany the completion.
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_fetch += 1;
        self.latest_fetch
    }

    /// Complete a fetch dispatched with `ticket`.
    ///
    /// The records replace the working set only when the ticket still matches
    /// the latest dispatched sequence number; stale completions are discarded
    /// silently. After a successful apply the selection is revalidated against
    /// the fresh working set and cleared when its id is no longer present.
    /// Returns whether the result was applied.
    pub fn complete_fetch(&mut self, ticket: u64, records: Vec<RecipeRecord>) -> bool {
        if ticket != self.latest_fetch {
            tracing::debug!(
                ticket,
                latest = self.latest_fetch,
                "discarding superseded recipe fetch"
            );
            return false;
        }
        self.working_set = records.into_iter().map(RecipeRecord::normalize).collect();
        if let Some(selected) = self.selected {
            if !self.working_set.iter().any(|r| r.id == selected) {
                self.selected = None;
            }
        }
        true
    }

    /// Fetch the working set for the current confirmed term from `source`.
    ///
    /// A non-empty term goes to the keyword-search endpoint, an empty one to
    /// the full listing. Transport or backend failure degrades to an empty
    /// working set and a log line; no error reaches the caller.
    pub async fn refresh<S: RecipeSource + ?Sized>(&mut self, source: &S) {
        let term = self.confirmed_term.clone();
        let ticket = self.begin_fetch();
        let result = if term.is_empty() {
            source.list_recipes().await
        } else {
            source.search_recipes(&term).await
        };
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(term = %term, error = %e, "recipe fetch failed, showing empty results");
                Vec::new()
            }
        };
        self.complete_fetch(ticket, records);
    }

    /// The in-progress filter edits, not yet confirmed
    #[must_use]
    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    /// The last confirmed criteria, which the visible-list predicate reads
    #[must_use]
    pub fn applied(&self) -> &FilterCriteria {
        &self.applied
    }

    /// Whether the filter panel is open
    #[must_use]
    pub fn filter_panel_open(&self) -> bool {
        self.filter_panel_open
    }

    /// Open the filter panel for editing the draft
    pub fn open_filter_panel(&mut self) {
        self.filter_panel_open = true;
    }

    /// Edit the draft's maximum difficulty (0 = unconstrained)
    pub fn set_draft_max_difficulty(&mut self, max: u8) {
        self.draft.max_difficulty = max.min(5);
    }

    /// Edit the draft's maximum cost from free-text input
    pub fn set_draft_max_cost(&mut self, raw: &str) {
        self.draft.max_cost = FilterCriteria::parse_cost_input(raw);
    }

    /// Edit the draft's maximum prep time from free-text input
    pub fn set_draft_max_prep_time(&mut self, raw: &str) {
        self.draft.max_prep_time = FilterCriteria::parse_time_input(raw);
    }

    /// Toggle a required restriction in the draft
    pub fn toggle_draft_restriction(&mut self, value: &str) {
        self.draft.restrictions = toggle_item(&self.draft.restrictions, &value.to_owned());
    }

    /// Toggle a required ingredient in the draft
    pub fn toggle_draft_ingredient(&mut self, value: &str) {
        self.draft.ingredients = toggle_item(&self.draft.ingredients, &value.to_owned());
    }

    /// Promote the entire draft into the applied criteria in one atomic update
    /// and close the filter panel
    pub fn apply_filters(&mut self) {
        self.applied = self.draft.clone();
        self.filter_panel_open = false;
    }

    /// Reset both draft and applied criteria to unconstrained defaults in one
    /// atomic update. The current selection is deliberately preserved.
    pub fn clear_filters(&mut self) {
        self.draft = FilterCriteria::default();
        self.applied = FilterCriteria::default();
    }

    /// Select a recipe for the detail panel
    pub fn select(&mut self, id: Uuid) {
        self.selected = Some(id);
    }

    /// Clear the detail selection
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The recipe currently shown in the detail panel, if any
    #[must_use]
    pub fn selected(&self) -> Option<&Recipe> {
        let id = self.selected?;
        self.working_set.iter().find(|r| r.id == id)
    }

    /// Identity of the selected recipe, if any
    #[must_use]
    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected
    }
}
