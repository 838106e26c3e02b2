//! Sort contract: the grid renders affordances and forwards clicks.
//!
//! The engine never sorts rows itself. Sort state is owned by the consumer
//! and passed back in as props; clicking a sortable header just emits the
//! column key. [`SortState::toggled`] is the canonical transition consumers
//! apply when handling that click.

/// Active sort, owned by the consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Key of the sorted column, if any.
    pub column: Option<String>,
    /// Sort direction for the active column.
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            column: None,
            ascending: true,
        }
    }
}

impl SortState {
    /// Sort by `column` in the given direction.
    pub fn new(column: impl Into<String>, ascending: bool) -> Self {
        Self {
            column: Some(column.into()),
            ascending,
        }
    }

    /// State after clicking the header for `key`: the active column flips
    /// direction, any other column becomes the ascending sort.
    pub fn toggled(&self, key: &str) -> Self {
        if self.column.as_deref() == Some(key) {
            Self {
                column: self.column.clone(),
                ascending: !self.ascending,
            }
        } else {
            Self {
                column: Some(key.to_string()),
                ascending: true,
            }
        }
    }

    /// Header affordance for the column with `key`.
    pub fn indicator(&self, key: &str) -> SortIndicator {
        if self.column.as_deref() == Some(key) {
            if self.ascending {
                SortIndicator::Ascending
            } else {
                SortIndicator::Descending
            }
        } else {
            SortIndicator::Unsorted
        }
    }
}

/// Icon rendered next to a sortable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Column is not the active sort key.
    Unsorted,
    /// Active sort, ascending.
    Ascending,
    /// Active sort, descending.
    Descending,
}

impl SortIndicator {
    /// Glyph used by the DOM renderer.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Unsorted => "\u{2195}",   // up-down arrow
            Self::Ascending => "\u{2191}",  // up arrow
            Self::Descending => "\u{2193}", // down arrow
        }
    }

    /// The unsorted glyph is dimmed; active directions render at full
    /// opacity.
    pub fn dimmed(self) -> bool {
        self == Self::Unsorted
    }
}
