//! Ordering and visibility resolution for the rendered column set.
//!
//! [`resolve_columns`] is the single pure function that turns the raw column
//! list plus visibility/pin state into the final rendered order:
//!
//! 1. Filter to visible columns (`visibility[key] != false`, always-visible
//!    keys, and the actions column are kept).
//! 2. Deduplicate by key and by case-insensitive header text, first
//!    occurrence wins; at most one actions-labelled column survives.
//! 3. The actions column, if any, is placed first regardless of the pin list.
//! 4. Remaining pin-list entries follow in the order given; unknown keys are
//!    skipped.
//! 5. All other visible columns follow in their original order.
//!
//! The result is deterministic, never longer than the visible set, and never
//! contains more than one actions column. Malformed input (duplicate keys,
//! pins naming missing columns) is normalized, never rejected.

use std::collections::{HashMap, HashSet};

use crate::column::{Column, ACTIONS_KEY, ACTION_KEY};

/// Compute the final rendered column sequence.
pub fn resolve_columns<'a, T>(
    columns: &'a [Column<T>],
    visibility: Option<&HashMap<String, bool>>,
    always_visible: &[String],
    pinned: &[String],
) -> Vec<&'a Column<T>> {
    // Visibility filter + dedup in one pass, preserving input order.
    let mut seen_keys: HashSet<&str> = HashSet::new();
    let mut seen_headers: HashSet<String> = HashSet::new();
    let mut have_actions = false;
    let mut visible: Vec<&Column<T>> = Vec::with_capacity(columns.len());

    for col in columns {
        let shown = col.is_actions()
            || always_visible.iter().any(|k| k == &col.key)
            || visibility.is_none_or(|m| m.get(&col.key).copied() != Some(false));
        if !shown {
            continue;
        }

        if col.is_actions() {
            // Only the first actions-labelled column survives, whatever its key.
            if have_actions {
                continue;
            }
            have_actions = true;
            seen_keys.insert(col.key.as_str());
            visible.push(col);
            continue;
        }

        if seen_keys.contains(col.key.as_str()) {
            continue;
        }
        if let Some(text) = col.header_text() {
            let lower = text.to_lowercase();
            if seen_headers.contains(&lower) {
                continue;
            }
            seen_headers.insert(lower);
        }
        seen_keys.insert(col.key.as_str());
        visible.push(col);
    }

    // Reorder: actions first, then the pin list, then the rest.
    let mut ordered: Vec<&Column<T>> = Vec::with_capacity(visible.len());
    let mut placed: HashSet<&str> = HashSet::new();

    if let Some(actions) = visible.iter().find(|c| c.is_actions()) {
        placed.insert(actions.key.as_str());
        ordered.push(*actions);
    }

    for key in pinned {
        if key == ACTIONS_KEY || key == ACTION_KEY {
            continue;
        }
        if let Some(col) = visible
            .iter()
            .find(|c| &c.key == key && !c.is_actions())
        {
            if placed.insert(col.key.as_str()) {
                ordered.push(*col);
            }
        }
    }

    for col in &visible {
        if placed.insert(col.key.as_str()) {
            ordered.push(*col);
        }
    }

    ordered
}
