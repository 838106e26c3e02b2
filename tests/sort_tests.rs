//! Tests for the sort contract: toggle transitions and header indicators.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use gridview::sort::{SortIndicator, SortState};

#[test]
fn test_default_is_unsorted_ascending() {
    let sort = SortState::default();
    assert_eq!(sort.column, None);
    assert!(sort.ascending);
}

#[test]
fn test_clicking_active_column_flips_direction() {
    let sort = SortState::new("name", true);
    let toggled = sort.toggled("name");
    assert_eq!(toggled.column.as_deref(), Some("name"));
    assert!(!toggled.ascending);
    let again = toggled.toggled("name");
    assert!(again.ascending);
}

#[test]
fn test_clicking_other_column_resets_to_ascending() {
    // Regardless of the previous direction.
    let sort = SortState::new("name", false);
    let toggled = sort.toggled("email");
    assert_eq!(toggled.column.as_deref(), Some("email"));
    assert!(toggled.ascending);
}

#[test]
fn test_first_click_sorts_ascending() {
    let toggled = SortState::default().toggled("name");
    assert_eq!(toggled.column.as_deref(), Some("name"));
    assert!(toggled.ascending);
}

#[test]
fn test_indicator_follows_active_column() {
    let sort = SortState::new("name", true);
    assert_eq!(sort.indicator("name"), SortIndicator::Ascending);
    assert_eq!(sort.indicator("email"), SortIndicator::Unsorted);

    let sort = SortState::new("name", false);
    assert_eq!(sort.indicator("name"), SortIndicator::Descending);
}

#[test]
fn test_no_sort_renders_unsorted_everywhere() {
    let sort = SortState::default();
    assert_eq!(sort.indicator("name"), SortIndicator::Unsorted);
}

#[test]
fn test_only_unsorted_indicator_is_dimmed() {
    assert!(SortIndicator::Unsorted.dimmed());
    assert!(!SortIndicator::Ascending.dimmed());
    assert!(!SortIndicator::Descending.dimmed());
}

#[test]
fn test_indicator_glyphs_are_distinct() {
    let glyphs = [
        SortIndicator::Unsorted.glyph(),
        SortIndicator::Ascending.glyph(),
        SortIndicator::Descending.glyph(),
    ];
    assert_ne!(glyphs[0], glyphs[1]);
    assert_ne!(glyphs[1], glyphs[2]);
    assert_ne!(glyphs[0], glyphs[2]);
}
