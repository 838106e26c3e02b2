//! Tests for the column drag-resize state machine.
//!
//! Covers the 80px clamp, the working/committed width layers, confirmation
//! gating on the persistence callback, and save/cancel resolution.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::collections::HashMap;

use gridview::resize::{DragOutcome, ResizeController, ResizePhase, MIN_COL_WIDTH};

// ============================================================================
// Test Helpers
// ============================================================================

fn widths(entries: &[(&str, f64)]) -> HashMap<String, f64> {
    entries
        .iter()
        .map(|(k, w)| ((*k).to_string(), *w))
        .collect()
}

/// Run a full drag from `start_width` through a pointer delta.
fn drag(ctl: &mut ResizeController, key: &str, start_width: f64, delta: f64) {
    ctl.begin(key, 100.0, start_width);
    ctl.update(100.0 + delta);
}

// ============================================================================
// CLAMPING
// ============================================================================

#[test]
fn test_min_width_clamp() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, -200.0);
    assert_eq!(ctl.width_for("name"), Some(MIN_COL_WIDTH));
}

#[test]
fn test_clamp_is_exactly_80() {
    let mut ctl = ResizeController::new(HashMap::new());
    drag(&mut ctl, "name", 90.0, -11.0);
    assert_eq!(ctl.width_for("name"), Some(80.0));
}

#[test]
fn test_positive_delta_applies_directly() {
    let mut ctl = ResizeController::new(HashMap::new());
    drag(&mut ctl, "name", 120.0, 35.0);
    assert_eq!(ctl.width_for("name"), Some(155.0));
}

#[test]
fn test_width_tracks_latest_pointer_position() {
    let mut ctl = ResizeController::new(HashMap::new());
    ctl.begin("name", 100.0, 120.0);
    ctl.update(160.0);
    ctl.update(50.0);
    ctl.update(140.0);
    assert_eq!(ctl.width_for("name"), Some(160.0));
}

// ============================================================================
// DRAG RESOLUTION
// ============================================================================

#[test]
fn test_unchanged_drag_is_noop() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    ctl.begin("name", 100.0, 150.0);
    ctl.update(100.0);
    assert_eq!(ctl.finish(true), DragOutcome::NoChange);
    assert_eq!(ctl.phase(), &ResizePhase::Idle);
}

#[test]
fn test_changed_drag_without_callback_commits_locally() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    let outcome = ctl.finish(false);
    let DragOutcome::CommitLocal(committed) = outcome else {
        panic!("expected CommitLocal, got {outcome:?}");
    };
    assert_eq!(committed.get("name"), Some(&190.0));
    // No dialog: the working width is the effective width immediately.
    assert_eq!(ctl.phase(), &ResizePhase::Idle);
    assert_eq!(ctl.width_for("name"), Some(190.0));
}

#[test]
fn test_changed_drag_with_callback_waits_for_confirmation() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    assert_eq!(ctl.finish(true), DragOutcome::Confirm);
    assert_eq!(ctl.phase(), &ResizePhase::PendingConfirm);
    // Working width stays live while the dialog is open.
    assert_eq!(ctl.width_for("name"), Some(190.0));
}

#[test]
fn test_first_drag_of_unsized_column_counts_as_change() {
    // No committed width exists yet; any drag result is a change.
    let mut ctl = ResizeController::new(HashMap::new());
    drag(&mut ctl, "name", 150.0, 1.0);
    assert_eq!(ctl.finish(true), DragOutcome::Confirm);
}

// ============================================================================
// SAVE / CANCEL
// ============================================================================

#[test]
fn test_save_hands_over_full_working_map() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0), ("email", 200.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    ctl.finish(true);
    let saved = ctl.save().unwrap();
    assert_eq!(saved.get("name"), Some(&190.0));
    assert_eq!(saved.get("email"), Some(&200.0));
    assert_eq!(ctl.phase(), &ResizePhase::Idle);
}

#[test]
fn test_cancel_reverts_to_committed() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    ctl.finish(true);
    ctl.cancel();
    assert_eq!(ctl.width_for("name"), Some(150.0));
    assert_eq!(ctl.phase(), &ResizePhase::Idle);
}

#[test]
fn test_save_outside_pending_returns_none() {
    let mut ctl = ResizeController::new(HashMap::new());
    assert!(ctl.save().is_none());
}

// ============================================================================
// PROPS SYNC
// ============================================================================

#[test]
fn test_idle_sync_replaces_working_map() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    ctl.sync_committed(widths(&[("name", 175.0)]));
    assert_eq!(ctl.width_for("name"), Some(175.0));
}

#[test]
fn test_sync_during_drag_keeps_working_widths() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    ctl.sync_committed(widths(&[("name", 150.0)]));
    assert_eq!(ctl.width_for("name"), Some(190.0));
    assert!(ctl.is_dragging());
}

#[test]
fn test_sync_while_pending_keeps_working_widths() {
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    ctl.finish(true);
    ctl.sync_committed(widths(&[("name", 150.0)]));
    assert_eq!(ctl.width_for("name"), Some(190.0));
}

#[test]
fn test_sync_after_save_echo_makes_widths_durable() {
    // Consumer persists the widths and re-renders with the saved map.
    let mut ctl = ResizeController::new(widths(&[("name", 150.0)]));
    drag(&mut ctl, "name", 150.0, 40.0);
    ctl.finish(true);
    let saved = ctl.save().unwrap();
    ctl.sync_committed(saved);
    // A fresh drag back to the same width is now a no-op.
    ctl.begin("name", 100.0, 190.0);
    ctl.update(100.0);
    assert_eq!(ctl.finish(true), DragOutcome::NoChange);
}
