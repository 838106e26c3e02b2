//! Tests for the sticky positioning calculator: pinned ranks in rendered
//! order, running-sum left offsets, stacking order, and the gutter target.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use gridview::column::{CellContent, Column};
use gridview::resolve::resolve_columns;
use gridview::sticky::{
    first_unpinned_index, is_pinned, left_offsets, pinned_ranks, z_index, PINNED_GUTTER_PX,
    SCROLL_NUDGE_PX,
};

// ============================================================================
// Test Helpers
// ============================================================================

type Row = ();

fn col(key: &str) -> Column<Row> {
    Column::new(key, key.to_uppercase(), |_| CellContent::Empty)
}

fn pins(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| (*k).to_string()).collect()
}

// ============================================================================
// PINNED RANKS
// ============================================================================

#[test]
fn test_actions_takes_rank_zero() {
    let columns = vec![Column::actions(|_| CellContent::Empty), col("a"), col("b")];
    let ordered: Vec<&Column<Row>> = columns.iter().collect();
    let ranks = pinned_ranks(&ordered, &pins(&["b"]));
    assert_eq!(ranks, vec![Some(0), None, Some(1)]);
}

#[test]
fn test_ranks_follow_rendered_order_not_pin_list_order() {
    // The resolver may reorder pinned columns; ranks count the *rendered*
    // sequence.
    let columns = vec![
        Column::actions(|_| CellContent::Empty),
        col("a"),
        col("b"),
        col("c"),
    ];
    let pinned = pins(&["c", "b"]);
    let ordered = resolve_columns(&columns, None, &[], &pinned);
    let got: Vec<&str> = ordered.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(got, vec!["actions", "c", "b", "a"]);
    let ranks = pinned_ranks(&ordered, &pinned);
    assert_eq!(ranks, vec![Some(0), Some(1), Some(2), None]);
}

#[test]
fn test_no_pins_yields_no_ranks() {
    let columns = vec![col("a"), col("b")];
    let ordered: Vec<&Column<Row>> = columns.iter().collect();
    let ranks = pinned_ranks(&ordered, &pins(&[]));
    assert_eq!(ranks, vec![None, None]);
}

#[test]
fn test_actions_is_implicitly_pinned() {
    let actions = Column::<Row>::actions(|_| CellContent::Empty);
    assert!(is_pinned(&actions, &pins(&[])));
    assert!(!is_pinned(&col("a"), &pins(&[])));
    assert!(is_pinned(&col("a"), &pins(&["a"])));
}

// ============================================================================
// LEFT OFFSETS
// ============================================================================

#[test]
fn test_offsets_are_running_sums() {
    let offsets = left_offsets(&[Some(60.0), Some(150.0), Some(120.0)]);
    assert_eq!(offsets, vec![0.0, 60.0, 210.0]);
}

#[test]
fn test_unmeasured_column_degrades_to_zero_width() {
    // An unmounted cell contributes nothing; later columns still stack.
    let offsets = left_offsets(&[None, Some(150.0), None, Some(90.0)]);
    assert_eq!(offsets, vec![0.0, 0.0, 150.0, 150.0]);
}

#[test]
fn test_empty_plan_yields_no_offsets() {
    assert!(left_offsets(&[]).is_empty());
}

// ============================================================================
// STACKING ORDER
// ============================================================================

#[test]
fn test_z_index_decreases_with_rank() {
    assert_eq!(z_index(0), 6);
    assert_eq!(z_index(1), 5);
    assert_eq!(z_index(2), 4);
    assert!(z_index(0) > z_index(1));
}

#[test]
fn test_z_index_never_below_one() {
    assert_eq!(z_index(5), 1);
    assert_eq!(z_index(6), 1);
    assert_eq!(z_index(100), 1);
}

// ============================================================================
// GUTTER TARGET
// ============================================================================

#[test]
fn test_first_unpinned_follows_pinned_block() {
    let columns = vec![
        Column::actions(|_| CellContent::Empty),
        col("a"),
        col("b"),
    ];
    let ordered: Vec<&Column<Row>> = columns.iter().collect();
    assert_eq!(first_unpinned_index(&ordered, &pins(&["a"])), Some(2));
}

#[test]
fn test_all_pinned_has_no_gutter_target() {
    let columns = vec![col("a"), col("b")];
    let ordered: Vec<&Column<Row>> = columns.iter().collect();
    assert_eq!(first_unpinned_index(&ordered, &pins(&["a", "b"])), None);
}

// ============================================================================
// CONSTANTS
// ============================================================================

#[test]
fn test_nudge_is_subpixel() {
    assert!(SCROLL_NUDGE_PX > 0.0);
    assert!(SCROLL_NUDGE_PX < 1.0);
}

#[test]
fn test_gutter_padding() {
    assert_eq!(PINNED_GUTTER_PX, 8.0);
}
