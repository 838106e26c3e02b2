//! gridview - generic data-grid engine for the web
//!
//! Renders tabular data as an HTML table in the browser via WebAssembly:
//! - Column pinning with sticky offsets computed from live DOM measurements
//! - Drag-resize with an optional save-confirmation flow
//! - Callback-driven sort and pagination (the engine owns no data state)
//! - Visibility/ordering resolution over an arbitrary generic row type
//!
//! The engine is a pure presentation controller: rows, sort state, page
//! state, and persisted widths are owned by the consumer and supplied as
//! props; the grid signals every transition through callbacks and never
//! fetches, caches, or mutates data itself.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { GridView } from 'gridview';
//! await init();
//! const grid = new GridView(container);
//! grid.set_columns([{ key: "name", sortable: true }, { key: "actions", actions: true, html: true }]);
//! grid.set_data(rows);
//! grid.render();
//! ```

// Pure engine modules (compile and test natively)
pub mod column;
pub mod error;
pub mod pagination;
pub mod resize;
pub mod resolve;
pub mod sort;
pub mod sticky;

// Rendering modules (DOM)
pub mod grid;
pub mod js_api;

use wasm_bindgen::prelude::*;

pub use column::{
    Align, CellContent, Column, ColumnRole, ACTIONS_COL_WIDTH, ACTIONS_KEY, ACTION_KEY,
};
pub use error::{GridError, Result};
#[cfg(target_arch = "wasm32")]
pub use grid::DataGrid;
pub use grid::{GridProps, PaginationProps, DEFAULT_MAX_HEIGHT, DEFAULT_MIN_HEIGHT};
#[cfg(target_arch = "wasm32")]
pub use js_api::GridView;
pub use pagination::{PageRequest, Pagination, DEFAULT_PAGE_SIZE_OPTIONS};
pub use resize::{DragOutcome, ResizeController, ResizePhase, MIN_COL_WIDTH};
pub use resolve::resolve_columns;
pub use sort::{SortIndicator, SortState};

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
