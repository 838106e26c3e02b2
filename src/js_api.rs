//! JavaScript facade: [`GridView`] drives the grid over `serde_json` rows.
//!
//! The Rust API ([`crate::grid::DataGrid`]) is generic over the row type;
//! this module binds it for JavaScript consumers with rows as plain JSON
//! objects and columns described by [`ColumnConfig`]. Setters stage props;
//! `render()` rebuilds the DOM, mirroring the load-then-render flow of the
//! underlying engine.
//!
//! The configuration half of this module is plain data and compiles
//! natively; only the `GridView` export itself is wasm-gated.

use serde::Deserialize;
use serde_json::Value;

use crate::column::{Align, CellContent, Column, ColumnRole};
use crate::error::{GridError, Result};

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::collections::HashMap;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use js_sys::Function;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

#[cfg(target_arch = "wasm32")]
use crate::grid::{DataGrid, GridProps, PaginationProps};
#[cfg(target_arch = "wasm32")]
use crate::pagination::Pagination;

/// Column description accepted from JavaScript.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnConfig {
    /// Unique column key.
    pub key: String,
    /// Header label; defaults to the key.
    #[serde(default)]
    pub header: Option<String>,
    /// Row field rendered in cells; defaults to the key.
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub sortable: bool,
    /// Nominal width in pixels.
    #[serde(default)]
    pub width: Option<f64>,
    /// "left" (default), "center", or "right".
    #[serde(default)]
    pub align: Option<String>,
    /// Marks the actions column explicitly.
    #[serde(default)]
    pub actions: bool,
    /// Treat the field value as prebuilt markup instead of text.
    #[serde(default)]
    pub html: bool,
}

/// Pagination state accepted from JavaScript.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

/// Build a [`Column`] over JSON rows from its JS description.
///
/// # Errors
/// Returns an error for an unknown `align` value.
pub fn column_from_config(config: ColumnConfig) -> Result<Column<Value>> {
    let align = match config.align.as_deref() {
        None | Some("left") => Align::Left,
        Some("center") => Align::Center,
        Some("right") => Align::Right,
        Some(other) => {
            return Err(GridError::Config(format!(
                "unknown align {other:?} for column {:?}",
                config.key
            )))
        }
    };
    let field = config.field.clone().unwrap_or_else(|| config.key.clone());
    let html = config.html;
    let cell = move |row: &Value| -> CellContent {
        match row.get(&field) {
            None | Some(Value::Null) => CellContent::Empty,
            Some(Value::String(s)) => {
                if html {
                    CellContent::Html(s.clone())
                } else {
                    CellContent::Text(s.clone())
                }
            }
            Some(other) => CellContent::Text(other.to_string()),
        }
    };
    let header = config.header.unwrap_or_else(|| config.key.clone());
    let mut column = Column::new(config.key, header, cell);
    column.sortable = config.sortable;
    column.width = config.width;
    column.align = align;
    if config.actions {
        column.role = ColumnRole::Actions;
    }
    Ok(column)
}

/// Row-identity extractor reading the given field, falling back to the
/// row's JSON text when the field is missing or not a scalar.
pub fn key_extractor_for(field: &str) -> impl Fn(&Value) -> String + 'static {
    let field = field.to_string();
    move |row: &Value| match row.get(&field) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => row.to_string(),
    }
}

/// Default row-identity field.
pub const DEFAULT_ROW_KEY: &str = "id";

/// Callbacks registered from JavaScript, read at dispatch time so they can
/// be swapped without rebuilding the pagination props.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
struct JsCallbacks {
    on_page_change: RefCell<Option<Function>>,
    on_page_size_change: RefCell<Option<Function>>,
}

/// The grid widget as seen from JavaScript.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct GridView {
    grid: DataGrid<Value>,
    callbacks: Rc<JsCallbacks>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GridView {
    /// Mount an empty grid in `container`.
    ///
    /// # Errors
    /// Returns an error if the document is unavailable.
    #[wasm_bindgen(constructor)]
    pub fn new(container: HtmlElement) -> std::result::Result<GridView, JsValue> {
        console_error_panic_hook::set_once();
        let props = GridProps::new(
            Vec::new(),
            Vec::new(),
            key_extractor_for(DEFAULT_ROW_KEY),
        );
        let grid = DataGrid::new(container, props)?;
        Ok(Self {
            grid,
            callbacks: Rc::new(JsCallbacks::default()),
        })
    }

    /// Replace the column list.
    ///
    /// # Errors
    /// Returns an error if the config cannot be deserialized.
    pub fn set_columns(&self, columns: JsValue) -> std::result::Result<(), JsValue> {
        let configs: Vec<ColumnConfig> = serde_wasm_bindgen::from_value(columns)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        let columns = configs
            .into_iter()
            .map(column_from_config)
            .collect::<Result<Vec<_>>>()?;
        self.grid.update_props(|p| p.columns = columns);
        Ok(())
    }

    /// Replace the row data.
    ///
    /// # Errors
    /// Returns an error if the rows cannot be deserialized.
    pub fn set_data(&self, rows: JsValue) -> std::result::Result<(), JsValue> {
        let rows: Vec<Value> = serde_wasm_bindgen::from_value(rows)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        self.grid.update_props(|p| p.data = Rc::new(rows));
        Ok(())
    }

    /// Field used for row identity (default "id").
    pub fn set_row_key(&self, field: String) {
        self.grid
            .update_props(|p| p.key_extractor = Rc::new(key_extractor_for(&field)));
    }

    /// Active sort column and direction.
    pub fn set_sort(&self, column: Option<String>, ascending: bool) {
        self.grid.update_props(|p| {
            p.sort_by = column;
            p.ascending = ascending;
        });
    }

    /// Sort request callback; pass `null` to make headers inert.
    pub fn on_sort(&self, callback: Option<Function>) {
        self.grid.update_props(|p| {
            p.on_sort = callback.map(|f| {
                Rc::new(move |key: &str| {
                    let _ = f.call1(&JsValue::NULL, &JsValue::from_str(key));
                }) as Rc<dyn Fn(&str)>
            });
        });
    }

    /// Data-load flag.
    pub fn set_loading(&self, loading: bool) {
        self.grid.update_props(|p| p.loading = loading);
    }

    /// Markup shown when there are no rows; pass `null` for the default.
    pub fn set_empty_state(&self, html: Option<String>) {
        self.grid
            .update_props(|p| p.empty_state = html.map(CellContent::Html));
    }

    /// Pagination state. Callbacks registered via `on_page_change` /
    /// `on_page_size_change` are consulted at click time.
    ///
    /// # Errors
    /// Returns an error if the state cannot be deserialized.
    pub fn set_pagination(&self, state: JsValue) -> std::result::Result<(), JsValue> {
        let config: PageConfig = serde_wasm_bindgen::from_value(state)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        let state = Pagination::new(
            config.page_number,
            config.page_size,
            config.total_count,
            config.total_pages,
        );
        let page_callbacks = Rc::clone(&self.callbacks);
        let size_callbacks = Rc::clone(&self.callbacks);
        self.grid.update_props(|p| {
            p.pagination = Some(PaginationProps {
                state,
                on_page_change: Rc::new(move |page| {
                    if let Some(f) = page_callbacks.on_page_change.borrow().as_ref() {
                        let _ = f.call1(&JsValue::NULL, &JsValue::from(page));
                    }
                }),
                on_page_size_change: Rc::new(move |size| {
                    if let Some(f) = size_callbacks.on_page_size_change.borrow().as_ref() {
                        let _ = f.call1(&JsValue::NULL, &JsValue::from(size));
                    }
                }),
            });
        });
        Ok(())
    }

    /// Remove the pager bar.
    pub fn clear_pagination(&self) {
        self.grid.update_props(|p| p.pagination = None);
    }

    /// Page-change callback.
    pub fn on_page_change(&self, callback: Option<Function>) {
        *self.callbacks.on_page_change.borrow_mut() = callback;
    }

    /// Page-size-change callback.
    pub fn on_page_size_change(&self, callback: Option<Function>) {
        *self.callbacks.on_page_size_change.borrow_mut() = callback;
    }

    /// Options offered by the page-size selector.
    pub fn set_page_size_options(&self, options: Vec<u32>) {
        self.grid.update_props(|p| p.page_size_options = options);
    }

    /// Per-key visibility map; pass `null` to show all columns.
    ///
    /// # Errors
    /// Returns an error if the map cannot be deserialized.
    pub fn set_column_visibility(&self, map: JsValue) -> std::result::Result<(), JsValue> {
        let visibility: Option<HashMap<String, bool>> = serde_wasm_bindgen::from_value(map)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        self.grid.update_props(|p| p.column_visibility = visibility);
        Ok(())
    }

    /// Keys that ignore the visibility map.
    pub fn set_always_visible_columns(&self, keys: Vec<String>) {
        self.grid.update_props(|p| p.always_visible_columns = keys);
    }

    /// Keys pinned to the left edge during horizontal scroll.
    pub fn set_pinned_columns(&self, keys: Vec<String>) {
        self.grid.update_props(|p| p.pinned_columns = keys);
    }

    /// Committed column widths.
    ///
    /// # Errors
    /// Returns an error if the map cannot be deserialized.
    pub fn set_column_widths(&self, map: JsValue) -> std::result::Result<(), JsValue> {
        let widths: HashMap<String, f64> = serde_wasm_bindgen::from_value(map)
            .map_err(|e| GridError::Serde(e.to_string()))?;
        self.grid.update_props(|p| p.column_widths = widths);
        Ok(())
    }

    /// Width persistence callback. Registering it makes finished drags ask
    /// for confirmation; pass `null` for local-only widths.
    pub fn on_column_widths_change(&self, callback: Option<Function>) {
        self.grid.update_props(|p| {
            p.on_column_widths_change = callback.map(|f| {
                Rc::new(move |widths: &HashMap<String, f64>| {
                    if let Ok(value) = serde_wasm_bindgen::to_value(widths) {
                        let _ = f.call1(&JsValue::NULL, &value);
                    }
                }) as Rc<dyn Fn(&HashMap<String, f64>)>
            });
        });
    }

    /// Row click callback; clicks on interactive elements never trigger it.
    pub fn on_row_click(&self, callback: Option<Function>) {
        self.grid.update_props(|p| {
            p.on_row_click = callback.map(|f| {
                Rc::new(move |row: &Value| {
                    if let Ok(value) = serde_wasm_bindgen::to_value(row) {
                        let _ = f.call1(&JsValue::NULL, &value);
                    }
                }) as Rc<dyn Fn(&Value)>
            });
        });
    }

    /// Wrap cell text instead of ellipsizing it.
    pub fn set_text_wrapped(&self, wrapped: bool) {
        self.grid.update_props(|p| p.is_text_wrapped = wrapped);
    }

    /// Scrollable viewport max height (CSS length); `null` restores the
    /// default.
    pub fn set_max_height(&self, value: Option<String>) {
        self.grid.update_props(|p| p.max_height = value);
    }

    /// Table body min height (CSS length).
    pub fn set_min_height(&self, value: String) {
        self.grid.update_props(|p| p.min_height = value);
    }

    /// Rebuild the DOM from the staged props.
    ///
    /// # Errors
    /// Returns an error if DOM construction fails.
    pub fn render(&self) -> std::result::Result<(), JsValue> {
        self.grid.render()?;
        Ok(())
    }
}
