//! Column descriptors for the data grid.
//!
//! A [`Column`] describes one rendered column over an arbitrary row type:
//! a unique key, a header, a pure cell renderer, and layout hints. The
//! actions role (row-level controls, always pinned first) is an explicit
//! [`ColumnRole`] flag; matching by the well-known keys or by header text is
//! kept as a fallback so column lists composed from multiple sources still
//! collapse to a single actions column.

use std::rc::Rc;

/// Well-known key for the actions column.
pub const ACTIONS_KEY: &str = "actions";

/// Legacy alias some callers use for the actions column.
pub const ACTION_KEY: &str = "action";

/// Fixed width of the actions column in pixels.
pub const ACTIONS_COL_WIDTH: f64 = 60.0;

/// Horizontal alignment for a column's header and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Left-aligned (default)
    #[default]
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
}

impl Align {
    /// CSS `text-align` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Renderable content for a header or body cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellContent {
    /// Plain text, rendered through the wrap/ellipsis wrapper.
    Text(String),
    /// Raw markup injected as-is (actions buttons, badges).
    Html(String),
    /// Nothing.
    #[default]
    Empty,
}

impl CellContent {
    /// Plain text content.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Raw markup content.
    pub fn html(s: impl Into<String>) -> Self {
        Self::Html(s.into())
    }

    /// The text form, if this content is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for CellContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for CellContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// Role of a column within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnRole {
    /// Ordinary data column (default)
    #[default]
    Data,
    /// Row-level controls; implicitly pinned first and never duplicated
    Actions,
}

/// One column over row type `T`.
///
/// `cell` is a pure function of the row; the engine never inspects row data
/// beyond calling it.
pub struct Column<T> {
    /// Unique identifier within one visible column set.
    pub key: String,
    /// Header label.
    pub header: CellContent,
    /// Pure cell renderer.
    pub cell: Rc<dyn Fn(&T) -> CellContent>,
    /// Whether clicking the header emits a sort request.
    pub sortable: bool,
    /// Nominal width in pixels, used when no measured/committed width exists.
    pub width: Option<f64>,
    /// Header and cell alignment.
    pub align: Align,
    /// Data or actions role.
    pub role: ColumnRole,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            cell: Rc::clone(&self.cell),
            sortable: self.sortable,
            width: self.width,
            align: self.align,
            role: self.role,
        }
    }
}

impl<T> Column<T> {
    /// Create a data column.
    pub fn new(
        key: impl Into<String>,
        header: impl Into<CellContent>,
        cell: impl Fn(&T) -> CellContent + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            cell: Rc::new(cell),
            sortable: false,
            width: None,
            align: Align::Left,
            role: ColumnRole::Data,
        }
    }

    /// Create an actions column under the well-known key.
    pub fn actions(cell: impl Fn(&T) -> CellContent + 'static) -> Self {
        let mut col = Self::new(ACTIONS_KEY, "Actions", cell);
        col.role = ColumnRole::Actions;
        col
    }

    /// Mark the column sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Set the nominal width in pixels.
    pub fn width(mut self, px: f64) -> Self {
        self.width = Some(px);
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Header text, if the header is plain text.
    pub fn header_text(&self) -> Option<&str> {
        self.header.as_text()
    }

    /// Whether this column carries the actions role.
    ///
    /// True for an explicit [`ColumnRole::Actions`], either well-known key,
    /// or a case-insensitive "actions" header text (compat fallback).
    pub fn is_actions(&self) -> bool {
        self.role == ColumnRole::Actions
            || self.key == ACTIONS_KEY
            || self.key == ACTION_KEY
            || self
                .header_text()
                .is_some_and(|t| t.eq_ignore_ascii_case(ACTIONS_KEY))
    }
}
