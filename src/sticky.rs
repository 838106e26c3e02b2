//! Sticky positioning math for pinned columns.
//!
//! CSS `position: sticky` alone cannot express cascading multi-column
//! offsets when the pinned set changes at runtime, so left offsets are
//! computed from measured widths after each relevant render. This module is
//! the pure calculator; all DOM reads and writes live in the thin adapter in
//! `grid::dom`, which keeps everything here unit-testable without a browser.
//!
//! Failure semantics: a column that cannot be measured yet contributes a
//! zero width to the running offset and self-corrects on the next pass.

use crate::column::Column;

/// Sub-pixel nudge applied during scroll to force sticky cells to repaint.
///
/// Some browsers do not repaint `position: sticky` elements on horizontal
/// scroll inside an `overflow: auto` container; shifting `left` by a
/// sub-pixel delta and reverting on the next animation frame forces a layout
/// recalculation without visible flicker.
pub const SCROLL_NUDGE_PX: f64 = 0.1;

/// Left padding on the first non-pinned cell in each row, creating a visual
/// gutter between pinned and scrolling content.
pub const PINNED_GUTTER_PX: f64 = 8.0;

/// Marker class applied to every pinned header/body cell.
pub const PINNED_CLASS: &str = "column-pinned";

/// Marker class applied to the first non-pinned cell in each row.
pub const AFTER_PINNED_CLASS: &str = "after-pinned";

/// Z-index assigned to visual rank 0; ranks further right paint below.
const Z_INDEX_TOP: i32 = 6;

/// Whether a rendered column is pinned: the actions column always is, other
/// columns when their key appears in the pin list.
pub fn is_pinned<T>(col: &Column<T>, pinned: &[String]) -> bool {
    col.is_actions() || pinned.iter().any(|k| k == &col.key)
}

/// Visual pinned rank per rendered column, `None` for unpinned columns.
///
/// Rank 0 is the actions column when present (the resolver places it
/// first); every further pinned column takes the next rank in *rendered*
/// order, not pin-list order.
pub fn pinned_ranks<T>(ordered: &[&Column<T>], pinned: &[String]) -> Vec<Option<usize>> {
    let mut next = 0usize;
    ordered
        .iter()
        .map(|col| {
            if is_pinned(col, pinned) {
                let rank = next;
                next += 1;
                Some(rank)
            } else {
                None
            }
        })
        .collect()
}

/// Running-sum left offsets for the pinned columns, in visual rank order.
///
/// `measured[i]` is the live rendered width of the rank-`i` pinned column;
/// `None` (element not yet laid out) contributes 0.
pub fn left_offsets(measured: &[Option<f64>]) -> Vec<f64> {
    let mut offset = 0.0;
    measured
        .iter()
        .map(|width| {
            let left = offset;
            offset += width.unwrap_or(0.0);
            left
        })
        .collect()
}

/// Z-index for a pinned visual rank. Decreases as rank increases so columns
/// further left always paint above columns to their right, with a floor of 1.
pub fn z_index(rank: usize) -> i32 {
    let rank = i32::try_from(rank).unwrap_or(i32::MAX);
    Z_INDEX_TOP.saturating_sub(rank).max(1)
}

/// Index of the first non-pinned column in the rendered order, the target of
/// the pinned-content gutter. `None` when every column is pinned.
pub fn first_unpinned_index<T>(ordered: &[&Column<T>], pinned: &[String]) -> Option<usize> {
    ordered.iter().position(|col| !is_pinned(col, pinned))
}
