// ABOUTME: Main library entry point for the MealMajor recipe platform
// ABOUTME: Exposes the browser engine, data models, storage, auth, and REST routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

#![deny(unsafe_code)]

//! # MealMajor
//!
//! A recipe-management web service: users register, log in, manage
//! dietary-preference profiles, author recipes, and search/filter a shared
//! recipe list.
//!
//! ## Architecture
//!
//! - **Browser**: the recipe browsing engine — debounced search, two-phase
//!   filter criteria, selection-set toggling, and stale-fetch suppression
//! - **Models**: recipe, user, and dietary-profile data structures
//! - **Database**: SQLite-backed storage with keyword search
//! - **Auth**: JWT session tokens and the read-only user context
//! - **Routes**: REST API over axum
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mealmajor::browser::RecipeBrowser;
//! use chrono::Utc;
//!
//! let mut browser = RecipeBrowser::new();
//! browser.on_search_input("chick", Utc::now());
//! browser.set_draft_max_difficulty(3);
//! browser.apply_filters();
//! let visible = browser.visible();
//! println!("{} recipes visible", visible.len());
//! ```

/// JWT authentication and the read-only authenticated-user context
pub mod auth;

/// Recipe browser engine: search, filtering, and selection state
pub mod browser;

/// Environment-based server configuration
pub mod config;

/// SQLite storage for users, recipes, and profiles
pub mod database;

/// Unified error handling with HTTP response mapping
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Core data models
pub mod models;

/// REST API routes
pub mod routes;
