// ABOUTME: Selection-set toggle helpers for multi-choice filters and dietary profiles
// ABOUTME: Provides plain add/remove-by-presence toggling and the exclusive-sentinel variant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MealMajor Contributors

//! Toggle semantics for multi-select sets.
//!
//! Both helpers are pure: they never mutate their input and toggling is total
//! over its domain. `toggle_item` is its own inverse, which is the property the
//! filter panel and profile checkboxes rely on.

/// Toggle a value's membership in a selection sequence.
///
/// If `item` is present (by equality) the first occurrence is removed;
/// otherwise it is appended at the end. Duplicates in the input are not
/// expected but are left untouched beyond the single removal.
#[must_use]
pub fn toggle_item<T: PartialEq + Clone>(items: &[T], item: &T) -> Vec<T> {
    match items.iter().position(|x| x == item) {
        Some(idx) => {
            let mut out = items.to_vec();
            out.remove(idx);
            out
        }
        None => {
            let mut out = items.to_vec();
            out.push(item.clone());
            out
        }
    }
}

/// Toggle a value in a set whose `sentinel` member is exclusive with all others.
///
/// The dietary-profile rule: selecting the sentinel ("None") clears every other
/// selection, and selecting any other value first drops the sentinel. There is
/// no reachable state where the sentinel coexists with another member.
#[must_use]
pub fn toggle_exclusive(items: &[String], item: &str, sentinel: &str) -> Vec<String> {
    if item == sentinel {
        if items.iter().any(|x| x == sentinel) {
            Vec::new()
        } else {
            vec![sentinel.to_owned()]
        }
    } else {
        let without_sentinel: Vec<String> =
            items.iter().filter(|x| *x != sentinel).cloned().collect();
        toggle_item(&without_sentinel, &item.to_owned())
    }
}
