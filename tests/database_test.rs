// ABOUTME: Integration tests for the SQLite storage layer
// ABOUTME: Covers user and recipe CRUD, keyword search, profiles, and custom labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use mealmajor::browser::RecipeSource;
use mealmajor::database::{Database, LabelKind};
use mealmajor::models::{DietaryProfile, NewRecipe, RecipeUpdate, User};
use uuid::Uuid;

// Pooled `sqlite::memory:` hands each connection its own database, so tests
// run against a tempfile-backed database instead.
async fn test_database() -> (Database, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = format!("sqlite:{}", dir.path().join("test.db").display());
    let database = Database::new(&url).await.expect("database init");
    (database, dir)
}

async fn test_user(database: &Database, email: &str) -> Uuid {
    let user = User::new(email.to_owned(), "hashed_password".to_owned(), None);
    database.create_user(&user).await.expect("create user")
}

fn new_recipe(title: &str) -> NewRecipe {
    NewRecipe {
        title: title.to_owned(),
        prep_time: 25,
        ingredients: vec!["salt".into(), "pepper".into()],
        restrictions: vec!["Vegetarian".into()],
        cost: 12.5,
        prep_steps: "chop\ncook".into(),
        difficulty: 2,
    }
}

#[tokio::test]
async fn test_user_crud_and_email_uniqueness() {
    let (database, _dir) = test_database().await;

    let user = User::new(
        "alice@example.com".to_owned(),
        "hash".to_owned(),
        Some("Alice".to_owned()),
    );
    let user_id = database.create_user(&user).await.unwrap();

    let loaded = database.get_user(user_id).await.unwrap().unwrap();
    assert_eq!(loaded.email, "alice@example.com");
    assert_eq!(loaded.display_name.as_deref(), Some("Alice"));
    assert!(loaded.is_active);

    let by_email = database
        .get_user_by_email("alice@example.com")
        .await
        .unwrap();
    assert!(by_email.is_some());

    let duplicate = User::new("alice@example.com".to_owned(), "other".to_owned(), None);
    assert!(database.create_user(&duplicate).await.is_err());

    assert!(database
        .get_user_by_email("nobody@example.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_recipe_create_and_get_round_trip() {
    let (database, _dir) = test_database().await;
    let user_id = test_user(&database, "cook@example.com").await;

    let created = database
        .create_recipe(user_id, &new_recipe("Pesto Pasta"))
        .await
        .unwrap();
    assert_eq!(created.user_id, user_id);

    let loaded = database.get_recipe(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "Pesto Pasta");
    assert_eq!(loaded.ingredients, vec!["salt", "pepper"]);
    assert_eq!(loaded.dietary_restrictions, vec!["Vegetarian"]);
    assert_eq!(loaded.preparation_steps, "chop\ncook");
    assert_eq!(loaded.difficulty, 2);

    assert!(database.get_recipe(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_recipe_update_merges_partial_fields() {
    let (database, _dir) = test_database().await;
    let user_id = test_user(&database, "cook@example.com").await;
    let created = database
        .create_recipe(user_id, &new_recipe("Before"))
        .await
        .unwrap();

    let update = RecipeUpdate {
        title: Some("After".to_owned()),
        cost: Some(3.0),
        ..RecipeUpdate::default()
    };
    let merged = database
        .update_recipe(created.id, user_id, &update)
        .await
        .unwrap();
    assert_eq!(merged.title, "After");
    assert!((merged.cost - 3.0).abs() < f64::EPSILON);
    // Untouched fields survive the merge
    assert_eq!(merged.prep_time, 25);
    assert_eq!(merged.difficulty, 2);

    let loaded = database.get_recipe(created.id).await.unwrap().unwrap();
    assert_eq!(loaded.title, "After");
}

#[tokio::test]
async fn test_recipe_mutations_are_owner_scoped() {
    let (database, _dir) = test_database().await;
    let owner = test_user(&database, "owner@example.com").await;
    let intruder = test_user(&database, "intruder@example.com").await;
    let created = database
        .create_recipe(owner, &new_recipe("Guarded"))
        .await
        .unwrap();

    let update = RecipeUpdate {
        title: Some("Hijacked".to_owned()),
        ..RecipeUpdate::default()
    };
    assert!(database
        .update_recipe(created.id, intruder, &update)
        .await
        .is_err());
    assert!(database.delete_recipe(created.id, intruder).await.is_err());

    // The owner can still do both
    database.delete_recipe(created.id, owner).await.unwrap();
    assert!(database.get_recipe(created.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_scopes_shared_pool_and_mine() {
    let (database, _dir) = test_database().await;
    let alice = test_user(&database, "alice@example.com").await;
    let bob = test_user(&database, "bob@example.com").await;

    database
        .create_recipe(alice, &new_recipe("Alice Soup"))
        .await
        .unwrap();
    database
        .create_recipe(bob, &new_recipe("Bob Stew"))
        .await
        .unwrap();

    let all = database.list_all_recipes().await.unwrap();
    assert_eq!(all.len(), 2);

    let mine = database.list_recipes_for_user(alice).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].title, "Alice Soup");
}

#[tokio::test]
async fn test_keyword_search_matches_title_and_ingredients() {
    let (database, _dir) = test_database().await;
    let user_id = test_user(&database, "cook@example.com").await;

    let mut chicken = new_recipe("Chicken Pasta");
    chicken.ingredients = vec!["chicken".into(), "pasta".into()];
    database.create_recipe(user_id, &chicken).await.unwrap();

    let mut hidden = new_recipe("Weeknight Stir Fry");
    hidden.ingredients = vec!["Chicken Thighs".into(), "soy sauce".into()];
    database.create_recipe(user_id, &hidden).await.unwrap();

    let mut beef = new_recipe("Beef Burger");
    beef.ingredients = vec!["beef".into(), "bun".into()];
    database.create_recipe(user_id, &beef).await.unwrap();

    // Case-insensitive; ingredient-only matches included, title matches first
    let results = database.search_recipes_by_keyword("CHICKEN").await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Chicken Pasta");
    assert_eq!(results[1].title, "Weeknight Stir Fry");

    assert!(database
        .search_recipes_by_keyword("pizza")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_database_serves_as_recipe_source() {
    let (database, _dir) = test_database().await;
    let user_id = test_user(&database, "cook@example.com").await;
    database
        .create_recipe(user_id, &new_recipe("Chicken Pasta"))
        .await
        .unwrap();
    database
        .create_recipe(user_id, &new_recipe("Beef Burger"))
        .await
        .unwrap();

    let source: &dyn RecipeSource = &database;
    assert_eq!(source.list_recipes().await.unwrap().len(), 2);
    let found = source.search_recipes("chicken").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Chicken Pasta");
}

#[tokio::test]
async fn test_dietary_profile_defaults_and_upsert() {
    let (database, _dir) = test_database().await;
    let user_id = test_user(&database, "dieter@example.com").await;

    // Absent profile reads as empty
    let profile = database.get_dietary_profile(user_id).await.unwrap();
    assert!(profile.restrictions.is_empty());
    assert!(profile.preferences.is_empty());

    let saved = DietaryProfile {
        restrictions: vec!["Vegan".into()],
        preferences: vec!["Tomatoes".into(), "Olives".into()],
    };
    database
        .upsert_dietary_profile(user_id, &saved)
        .await
        .unwrap();

    let loaded = database.get_dietary_profile(user_id).await.unwrap();
    assert_eq!(loaded.restrictions, vec!["Vegan"]);
    assert_eq!(loaded.preferences, vec!["Tomatoes", "Olives"]);

    // Second upsert replaces, not appends
    let replaced = DietaryProfile {
        restrictions: vec!["Halal".into()],
        preferences: Vec::new(),
    };
    database
        .upsert_dietary_profile(user_id, &replaced)
        .await
        .unwrap();
    let loaded = database.get_dietary_profile(user_id).await.unwrap();
    assert_eq!(loaded.restrictions, vec!["Halal"]);
    assert!(loaded.preferences.is_empty());
}

#[tokio::test]
async fn test_custom_labels_extend_vocabulary_without_duplicates() {
    let (database, _dir) = test_database().await;
    let user_id = test_user(&database, "dieter@example.com").await;

    let baseline = database
        .label_vocabulary(user_id, LabelKind::Restriction)
        .await
        .unwrap();
    assert!(baseline.iter().any(|l| l == "Vegan"));

    assert!(database
        .add_custom_label(user_id, LabelKind::Restriction, "Kosher")
        .await
        .unwrap());

    // Case-insensitive duplicates are rejected, against both baseline and customs
    assert!(!database
        .add_custom_label(user_id, LabelKind::Restriction, "kosher")
        .await
        .unwrap());
    assert!(!database
        .add_custom_label(user_id, LabelKind::Restriction, "VEGAN")
        .await
        .unwrap());
    assert!(!database
        .add_custom_label(user_id, LabelKind::Restriction, "  ")
        .await
        .unwrap());

    let merged = database
        .label_vocabulary(user_id, LabelKind::Restriction)
        .await
        .unwrap();
    assert_eq!(merged.last().map(String::as_str), Some("Kosher"));
    assert_eq!(
        merged.iter().filter(|l| l.eq_ignore_ascii_case("kosher")).count(),
        1
    );

    // Folding is Unicode-aware, not ASCII-only
    assert!(database
        .add_custom_label(user_id, LabelKind::Restriction, "Café-Free")
        .await
        .unwrap());
    assert!(!database
        .add_custom_label(user_id, LabelKind::Restriction, "CAFÉ-FREE")
        .await
        .unwrap());

    // Kinds are independent vocabularies
    assert!(database
        .add_custom_label(user_id, LabelKind::Preference, "Kosher")
        .await
        .unwrap());

    // And vocabularies are per user
    let other = test_user(&database, "other@example.com").await;
    let other_vocab = database
        .label_vocabulary(other, LabelKind::Restriction)
        .await
        .unwrap();
    assert!(!other_vocab.iter().any(|l| l == "Kosher"));
}
