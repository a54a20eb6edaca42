// ABOUTME: Integration tests for the recipe browser engine
// ABOUTME: Covers debounce, stale-fetch suppression, two-phase filters, and selection revalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use mealmajor::browser::{RecipeBrowser, RecipeSource, SEARCH_DEBOUNCE_MS};
use mealmajor::models::RecipeRecord;
use std::sync::atomic::{AtomicU32, Ordering};
use uuid::Uuid;

fn record(title: &str, difficulty: u8) -> RecipeRecord {
    RecipeRecord {
        id: Uuid::new_v4(),
        title: title.to_owned(),
        prep_time: 20,
        ingredients: vec!["salt".into()],
        dietary_restrictions: Vec::new(),
        cost: 8.0,
        preparation_steps: "mix\ncook".into(),
        difficulty,
        user_id: Uuid::new_v4(),
        created_at: Utc::now(),
    }
}

/// Source that records which endpoint was hit and returns canned results
struct FakeSource {
    all: Vec<RecipeRecord>,
    search_calls: AtomicU32,
    list_calls: AtomicU32,
    fail: bool,
}

impl FakeSource {
    fn new(all: Vec<RecipeRecord>) -> Self {
        Self {
            all,
            search_calls: AtomicU32::new(0),
            list_calls: AtomicU32::new(0),
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            all: Vec::new(),
            search_calls: AtomicU32::new(0),
            list_calls: AtomicU32::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl RecipeSource for FakeSource {
    async fn search_recipes(&self, keyword: &str) -> Result<Vec<RecipeRecord>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("backend unavailable"));
        }
        let q = keyword.to_lowercase();
        Ok(self
            .all
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&q))
            .cloned()
            .collect())
    }

    async fn list_recipes(&self) -> Result<Vec<RecipeRecord>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(anyhow!("backend unavailable"));
        }
        Ok(self.all.clone())
    }
}

#[test]
fn test_debounce_waits_for_quiet_period() {
    let mut browser = RecipeBrowser::new();
    let t0 = Utc::now();

    browser.on_search_input("chi", t0);
    assert_eq!(browser.poll_debounce(t0 + Duration::milliseconds(100)), None);

    // A keystroke inside the quiet period resets the timer
    browser.on_search_input("chick", t0 + Duration::milliseconds(200));
    assert_eq!(
        browser.poll_debounce(t0 + Duration::milliseconds(SEARCH_DEBOUNCE_MS + 100)),
        None
    );

    let confirm_at = t0 + Duration::milliseconds(200 + SEARCH_DEBOUNCE_MS);
    assert_eq!(browser.poll_debounce(confirm_at), Some("chick".to_owned()));
    assert_eq!(browser.confirmed_term(), "chick");
}

#[test]
fn test_debounce_skips_unchanged_term() {
    let mut browser = RecipeBrowser::new();
    let t0 = Utc::now();

    browser.on_search_input("soup", t0);
    let later = t0 + Duration::milliseconds(SEARCH_DEBOUNCE_MS);
    assert_eq!(browser.poll_debounce(later), Some("soup".to_owned()));

    // Typing the same trimmed text again confirms nothing new
    browser.on_search_input(" soup ", later);
    assert_eq!(
        browser.poll_debounce(later + Duration::milliseconds(SEARCH_DEBOUNCE_MS)),
        None
    );
}

#[test]
fn test_explicit_search_bypasses_debounce() {
    let mut browser = RecipeBrowser::new();
    browser.on_search_input("  tacos  ", Utc::now());
    assert_eq!(browser.confirm_search(), "tacos");
    assert_eq!(browser.confirmed_term(), "tacos");
    // The pending debounce is cancelled by the explicit action
    assert_eq!(
        browser.poll_debounce(Utc::now() + Duration::seconds(10)),
        None
    );
}

#[test]
fn test_stale_fetch_is_discarded() {
    let mut browser = RecipeBrowser::new();

    let old_ticket = browser.begin_fetch();
    let new_ticket = browser.begin_fetch();

    assert!(browser.complete_fetch(new_ticket, vec![record("Fresh Salad", 1)]));
    // The older fetch resolves late and must not overwrite the newer result
    assert!(!browser.complete_fetch(old_ticket, vec![record("Stale Soup", 1)]));

    assert_eq!(browser.working_set().len(), 1);
    assert_eq!(browser.working_set()[0].title, "Fresh Salad");
}

#[test]
fn test_selection_cleared_when_absent_after_fetch() {
    let mut browser = RecipeBrowser::new();
    let kept = record("Kept", 1);
    let dropped = record("Dropped", 1);
    let kept_id = kept.id;
    let dropped_id = dropped.id;

    let ticket = browser.begin_fetch();
    browser.complete_fetch(ticket, vec![kept.clone(), dropped]);
    browser.select(dropped_id);
    assert_eq!(browser.selected_id(), Some(dropped_id));

    let ticket = browser.begin_fetch();
    browser.complete_fetch(ticket, vec![kept]);
    assert_eq!(browser.selected_id(), None);

    // A surviving selection is preserved
    browser.select(kept_id);
    let ticket = browser.begin_fetch();
    browser.complete_fetch(ticket, vec![record("Kept", 1)]);
    // Same title but a fresh id: the old selection no longer resolves
    assert_eq!(browser.selected_id(), None);
}

#[test]
fn test_draft_edits_invisible_until_applied() {
    let mut browser = RecipeBrowser::new();
    let ticket = browser.begin_fetch();
    browser.complete_fetch(
        ticket,
        (1..=5).map(|d| record(&format!("r{d}"), d)).collect(),
    );

    browser.open_filter_panel();
    browser.set_draft_max_difficulty(2);
    assert_eq!(browser.visible().len(), 5);

    browser.apply_filters();
    assert_eq!(browser.visible().len(), 2);
    assert!(!browser.filter_panel_open());
}

#[test]
fn test_clear_filters_resets_both_copies_and_keeps_selection() {
    let mut browser = RecipeBrowser::new();
    let recipes: Vec<RecipeRecord> = (1..=5).map(|d| record(&format!("r{d}"), d)).collect();
    let selected_id = recipes[4].id;
    let ticket = browser.begin_fetch();
    browser.complete_fetch(ticket, recipes);
    browser.select(selected_id);

    browser.set_draft_max_difficulty(1);
    browser.apply_filters();
    assert_eq!(browser.visible().len(), 1);

    browser.clear_filters();
    assert!(browser.draft().is_unconstrained());
    assert!(browser.applied().is_unconstrained());
    assert_eq!(browser.visible().len(), 5);
    // Clearing filters deliberately leaves the detail selection alone
    assert_eq!(browser.selected_id(), Some(selected_id));
}

#[test]
fn test_draft_toggles_use_involutive_semantics() {
    let mut browser = RecipeBrowser::new();
    browser.toggle_draft_restriction("Vegan");
    browser.toggle_draft_restriction("Halal");
    assert_eq!(browser.draft().restrictions, vec!["Vegan", "Halal"]);
    browser.toggle_draft_restriction("Vegan");
    assert_eq!(browser.draft().restrictions, vec!["Halal"]);

    browser.toggle_draft_ingredient("salt");
    browser.toggle_draft_ingredient("salt");
    assert!(browser.draft().ingredients.is_empty());
}

#[tokio::test]
async fn test_refresh_routes_empty_term_to_listing() {
    let source = FakeSource::new(vec![record("Chicken Pasta", 2), record("Beef Burger", 3)]);
    let mut browser = RecipeBrowser::new();

    browser.refresh(&source).await;
    assert_eq!(source.list_calls.load(Ordering::SeqCst), 1);
    assert_eq!(source.search_calls.load(Ordering::SeqCst), 0);
    assert_eq!(browser.working_set().len(), 2);
}

#[tokio::test]
async fn test_refresh_routes_keyword_to_search() {
    let source = FakeSource::new(vec![record("Chicken Pasta", 2), record("Beef Burger", 3)]);
    let mut browser = RecipeBrowser::new();

    browser.on_search_input("chicken", Utc::now());
    browser.confirm_search();
    browser.refresh(&source).await;

    assert_eq!(source.search_calls.load(Ordering::SeqCst), 1);
    assert_eq!(browser.working_set().len(), 1);
    assert_eq!(browser.working_set()[0].title, "Chicken Pasta");
}

#[tokio::test]
async fn test_refresh_failure_degrades_to_empty_working_set() {
    let source = FakeSource::new(vec![record("Chicken Pasta", 2)]);
    let mut browser = RecipeBrowser::new();
    browser.refresh(&source).await;
    assert_eq!(browser.working_set().len(), 1);

    let failing = FakeSource::failing();
    browser.refresh(&failing).await;
    assert!(browser.working_set().is_empty());
    assert!(browser.visible().is_empty());
}

#[tokio::test]
async fn test_refresh_normalizes_storage_fields() {
    let mut raw = record("Lentil Soup", 2);
    raw.preparation_steps = "soak\nboil".into();
    raw.dietary_restrictions = vec!["Vegan".into()];
    let source = FakeSource::new(vec![raw]);

    let mut browser = RecipeBrowser::new();
    browser.refresh(&source).await;

    let recipe = &browser.working_set()[0];
    assert_eq!(recipe.prep_steps, "soak\nboil");
    assert_eq!(recipe.restrictions, vec!["Vegan"]);
}
