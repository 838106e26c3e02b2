//! Stateless pagination contract.
//!
//! Page state is owned by the consumer; the grid renders the controls and
//! emits page/size-change requests through callbacks. No clamping or
//! validation happens here: the pager emits exactly the page each control
//! implies and trusts the consumer with the result.

/// Default page-size options offered by the selector.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [u32; 4] = [5, 10, 20, 50];

/// Consumer-owned pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page_number: u32,
    /// Rows per page.
    pub page_size: u32,
    /// Total rows across all pages.
    pub total_count: u64,
    /// Total pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination state.
    pub fn new(page_number: u32, page_size: u32, total_count: u64, total_pages: u32) -> Self {
        Self {
            page_number,
            page_size,
            total_count,
            total_pages,
        }
    }

    /// First and last row ordinals shown on this page, for the
    /// "Showing A to B of C items" label. `(0, 0)` when the page has no rows.
    pub fn showing_range(&self, row_count: usize) -> (u64, u64) {
        if row_count == 0 {
            return (0, 0);
        }
        let page = u64::from(self.page_number.max(1));
        let size = u64::from(self.page_size.max(1));
        let first = (page - 1) * size + 1;
        let last = (page * size).min(self.total_count);
        (first, last)
    }

    /// The full label text.
    pub fn showing_label(&self, row_count: usize) -> String {
        let (first, last) = self.showing_range(row_count);
        format!("Showing {first} to {last} of {} items", self.total_count)
    }

    /// The "Page X of Y" indicator text.
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page_number.max(1), self.total_pages.max(1))
    }

    /// True when first/previous should be disabled.
    pub fn at_first(&self) -> bool {
        self.page_number <= 1
    }

    /// True when next/last should be disabled.
    pub fn at_last(&self) -> bool {
        self.total_pages == 0 || self.page_number.max(1) == self.total_pages
    }
}

/// Page transition requested by one of the pager buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    /// Jump to page 1.
    First,
    /// Step back one page.
    Previous,
    /// Step forward one page.
    Next,
    /// Jump to the last page.
    Last,
}

impl PageRequest {
    /// All pager buttons, in rendered order.
    pub const ALL: [Self; 4] = [Self::First, Self::Previous, Self::Next, Self::Last];

    /// The page number this request emits. Not clamped beyond what the
    /// control itself implies; out-of-range requests are the caller's
    /// contract.
    pub fn target(self, p: &Pagination) -> u32 {
        let page = p.page_number.max(1);
        match self {
            Self::First => 1,
            Self::Previous => page.saturating_sub(1),
            Self::Next => page + 1,
            Self::Last => p.total_pages.max(1),
        }
    }

    /// Whether the button is disabled for the current state. All controls
    /// are disabled while a data load is in flight.
    pub fn disabled(self, p: &Pagination, loading: bool) -> bool {
        if loading {
            return true;
        }
        match self {
            Self::First | Self::Previous => p.at_first(),
            Self::Next | Self::Last => p.at_last(),
        }
    }

    /// Glyph used by the DOM renderer.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::First => "\u{00ab}",    // «
            Self::Previous => "\u{2039}", // ‹
            Self::Next => "\u{203a}",     // ›
            Self::Last => "\u{00bb}",     // »
        }
    }

    /// Accessible label for the button.
    pub fn label(self) -> &'static str {
        match self {
            Self::First => "First page",
            Self::Previous => "Previous page",
            Self::Next => "Next page",
            Self::Last => "Last page",
        }
    }
}
