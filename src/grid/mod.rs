//! The grid view: props, shared state, and render orchestration.
//!
//! [`GridProps`] is the full consumer-facing contract; everything the engine
//! shows is a pure function of it plus the transient resize state. The
//! engine holds no data of record: sort, pagination, committed widths, and
//! the rows themselves are owned by the consumer and re-supplied on change.
//!
//! [`DataGrid`] (wasm only) renders the props into an HTML `<table>` inside
//! a consumer-supplied container. Rendering is a full rebuild; the sticky
//! positioning pass runs as a post-render side effect and the resize drag
//! updates widths imperatively between renders.
//!
//! Event handling is delegated: a fixed set of listeners is registered on
//! the container when the grid is created and resolves targets through data
//! attributes, so rebuilding the table never tears down a listener that
//! might currently be dispatching.

#[cfg(target_arch = "wasm32")]
mod dialog;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;

use std::collections::HashMap;
use std::rc::Rc;

use crate::column::{CellContent, Column};
use crate::pagination::{Pagination, DEFAULT_PAGE_SIZE_OPTIONS};
use crate::resolve::resolve_columns;
use crate::sort::SortState;

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Document, Element, Event, HtmlElement, MouseEvent};

#[cfg(target_arch = "wasm32")]
use crate::error::{GridError, Result};
#[cfg(target_arch = "wasm32")]
use crate::resize::ResizeController;

/// Default scrollable viewport height when the consumer sets none.
pub const DEFAULT_MAX_HEIGHT: &str = "calc(100vh - 350px)";

/// Default minimum height of the table body.
pub const DEFAULT_MIN_HEIGHT: &str = "100px";

/// Pagination state plus the callbacks the pager controls emit through.
pub struct PaginationProps {
    /// Consumer-owned page state.
    pub state: Pagination,
    /// Invoked with the requested page number.
    pub on_page_change: Rc<dyn Fn(u32)>,
    /// Invoked with the requested page size.
    pub on_page_size_change: Rc<dyn Fn(u32)>,
}

/// Everything a consuming page supplies to the grid.
///
/// All fields are owned here so a props value can be built up, handed to the
/// grid, and replaced wholesale on the next consumer render.
pub struct GridProps<T> {
    /// Current page of rows.
    pub data: Rc<Vec<T>>,
    /// Raw column list; the resolver computes the rendered order.
    pub columns: Vec<Column<T>>,
    /// External row identity, used for DOM reconciliation keys only.
    pub key_extractor: Rc<dyn Fn(&T) -> String>,
    /// Key of the active sort column.
    pub sort_by: Option<String>,
    /// Direction of the active sort.
    pub ascending: bool,
    /// Sort request callback; headers are inert without it.
    pub on_sort: Option<Rc<dyn Fn(&str)>>,
    /// Data load in flight. With no rows this replaces the table with a
    /// loading notice; otherwise it only disables the pager.
    pub loading: bool,
    /// Rendered in place of rows when `data` is empty.
    pub empty_state: Option<CellContent>,
    /// Pager state and callbacks; the pager bar is omitted without it.
    pub pagination: Option<PaginationProps>,
    /// Options offered by the page-size selector.
    pub page_size_options: Vec<u32>,
    /// Per-key visibility; a key absent from the map is visible.
    pub column_visibility: Option<HashMap<String, bool>>,
    /// Keys that ignore the visibility map.
    pub always_visible_columns: Vec<String>,
    /// Scrollable viewport max height (CSS length).
    pub max_height: Option<String>,
    /// Table body min height (CSS length).
    pub min_height: String,
    /// Wrap cell text instead of ellipsizing it.
    pub is_text_wrapped: bool,
    /// Keys kept fixed at the left edge during horizontal scroll.
    pub pinned_columns: Vec<String>,
    /// Committed column widths (the durable, consumer-owned layer).
    pub column_widths: HashMap<String, f64>,
    /// Persistence callback. When present, a finished drag asks for
    /// confirmation before handing over the working widths; when absent,
    /// drags commit locally without a dialog.
    pub on_column_widths_change: Option<Rc<dyn Fn(&HashMap<String, f64>)>>,
    /// Row click callback. Clicks on interactive elements inside the row
    /// never trigger it.
    pub on_row_click: Option<Rc<dyn Fn(&T)>>,
}

impl<T> GridProps<T> {
    /// Props with the documented defaults.
    pub fn new(
        data: Vec<T>,
        columns: Vec<Column<T>>,
        key_extractor: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self {
            data: Rc::new(data),
            columns,
            key_extractor: Rc::new(key_extractor),
            sort_by: None,
            ascending: true,
            on_sort: None,
            loading: false,
            empty_state: None,
            pagination: None,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            column_visibility: None,
            always_visible_columns: vec![crate::column::ACTIONS_KEY.to_string()],
            max_height: None,
            min_height: DEFAULT_MIN_HEIGHT.to_string(),
            is_text_wrapped: false,
            pinned_columns: Vec::new(),
            column_widths: HashMap::new(),
            on_column_widths_change: None,
            on_row_click: None,
        }
    }

    /// The active sort as a [`SortState`].
    pub fn sort_state(&self) -> SortState {
        SortState {
            column: self.sort_by.clone(),
            ascending: self.ascending,
        }
    }

    /// Final rendered column order for the current props.
    pub fn ordered_columns(&self) -> Vec<&Column<T>> {
        resolve_columns(
            &self.columns,
            self.column_visibility.as_ref(),
            &self.always_visible_columns,
            &self.pinned_columns,
        )
    }

    /// Resolved scrollable viewport max height.
    pub fn resolved_max_height(&self) -> &str {
        self.max_height.as_deref().unwrap_or(DEFAULT_MAX_HEIGHT)
    }

    /// Look up a column by key.
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// Whether the column with `key` is pinned under the current props.
    pub fn is_pinned(&self, key: &str) -> bool {
        self.column(key)
            .is_some_and(|c| crate::sticky::is_pinned(c, &self.pinned_columns))
    }
}

/// One pinned column in the current render, for the scroll repaint nudge.
#[cfg(target_arch = "wasm32")]
#[derive(Clone)]
pub(crate) struct StickyEntry {
    pub(crate) key: String,
    pub(crate) left: f64,
}

/// Shared state accessed by event handlers.
#[cfg(target_arch = "wasm32")]
pub(crate) struct GridInner<T> {
    pub(crate) document: Document,
    pub(crate) container: HtmlElement,
    pub(crate) props: GridProps<T>,
    pub(crate) resize: ResizeController,
    /// Root `<table>` of the current render.
    pub(crate) table: Option<Element>,
    /// Scroll container of the current render.
    pub(crate) scroll_area: Option<HtmlElement>,
    /// Save/cancel dialog, mounted on `document.body` across renders.
    pub(crate) dialog: Option<dialog::ConfirmDialog>,
    /// Applied sticky offsets, consumed by the scroll repaint nudge.
    pub(crate) sticky: Vec<StickyEntry>,
    /// Delegated listeners, registered once on the container.
    pub(crate) click_listener: Option<Closure<dyn FnMut(MouseEvent)>>,
    pub(crate) mousedown_listener: Option<Closure<dyn FnMut(MouseEvent)>>,
    pub(crate) change_listener: Option<Closure<dyn FnMut(Event)>>,
    /// Re-attached to the fresh scroll container on every render.
    pub(crate) scroll_listener: Option<Closure<dyn FnMut(Event)>>,
    /// Document-level drag listeners, created once, attached only while the
    /// drag is in progress.
    pub(crate) drag_move: Option<Closure<dyn FnMut(MouseEvent)>>,
    pub(crate) drag_up: Option<Closure<dyn FnMut(MouseEvent)>>,
    /// Body cursor/selection override, alive only while dragging.
    pub(crate) cursor: Option<events::CursorOverride>,
    /// Reusable animation-frame callback that reverts the scroll nudge.
    pub(crate) nudge_revert: Option<Closure<dyn FnMut()>>,
}

#[cfg(target_arch = "wasm32")]
impl<T> Drop for GridInner<T> {
    fn drop(&mut self) {
        // Listeners must not outlive their closures.
        if let Some(c) = &self.click_listener {
            let _ = self
                .container
                .remove_event_listener_with_callback("click", c.as_ref().unchecked_ref());
        }
        if let Some(c) = &self.mousedown_listener {
            let _ = self
                .container
                .remove_event_listener_with_callback("mousedown", c.as_ref().unchecked_ref());
        }
        if let Some(c) = &self.change_listener {
            let _ = self
                .container
                .remove_event_listener_with_callback("change", c.as_ref().unchecked_ref());
        }
        if let (Some(scroll), Some(c)) = (&self.scroll_area, &self.scroll_listener) {
            let _ =
                scroll.remove_event_listener_with_callback("scroll", c.as_ref().unchecked_ref());
        }
        if let Some(c) = &self.drag_move {
            let _ = self
                .document
                .remove_event_listener_with_callback("mousemove", c.as_ref().unchecked_ref());
        }
        if let Some(c) = &self.drag_up {
            let _ = self
                .document
                .remove_event_listener_with_callback("mouseup", c.as_ref().unchecked_ref());
        }
    }
}

/// The data grid widget: renders [`GridProps`] into a container element.
#[cfg(target_arch = "wasm32")]
pub struct DataGrid<T> {
    inner: Rc<RefCell<GridInner<T>>>,
}

#[cfg(target_arch = "wasm32")]
impl<T: 'static> DataGrid<T> {
    /// Mount a grid in `container` and perform the initial render.
    pub fn new(container: HtmlElement, props: GridProps<T>) -> Result<Self> {
        console_error_panic_hook::set_once();
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| GridError::Dom("no document".to_string()))?;
        let resize = ResizeController::new(props.column_widths.clone());
        let inner = Rc::new(RefCell::new(GridInner {
            document,
            container,
            props,
            resize,
            table: None,
            scroll_area: None,
            dialog: None,
            sticky: Vec::new(),
            click_listener: None,
            mousedown_listener: None,
            change_listener: None,
            scroll_listener: None,
            drag_move: None,
            drag_up: None,
            cursor: None,
            nudge_revert: None,
        }));
        events::install(&inner);
        let grid = Self { inner };
        grid.render()?;
        Ok(grid)
    }

    /// Mutate props in place. The committed width map is re-synced into the
    /// resize controller (working widths are preserved while a drag is in
    /// flight). Call [`DataGrid::render`] afterwards to show the change.
    pub fn update_props(&self, f: impl FnOnce(&mut GridProps<T>)) {
        let mut s = self.inner.borrow_mut();
        f(&mut s.props);
        let widths = s.props.column_widths.clone();
        s.resize.sync_committed(widths);
    }

    /// Read props through a closure.
    pub fn with_props<R>(&self, f: impl FnOnce(&GridProps<T>) -> R) -> R {
        f(&self.inner.borrow().props)
    }

    /// Rebuild the DOM from the current props, then run the sticky
    /// positioning pass.
    pub fn render(&self) -> Result<()> {
        dom::render(&self.inner)
    }
}
