//! Tests for the JS-facing column configuration and the JSON cell renderers
//! built from it, plus props-level resolution defaults.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use serde_json::{json, Value};

use gridview::column::{Align, CellContent};
use gridview::grid::{GridProps, DEFAULT_MAX_HEIGHT};
use gridview::js_api::{column_from_config, key_extractor_for, ColumnConfig, DEFAULT_ROW_KEY};

// ============================================================================
// Test Helpers
// ============================================================================

fn config(value: Value) -> ColumnConfig {
    serde_json::from_value(value).expect("valid column config")
}

// ============================================================================
// CONFIG PARSING
// ============================================================================

#[test]
fn test_minimal_config_defaults() {
    let col = column_from_config(config(json!({ "key": "name" }))).unwrap();
    assert_eq!(col.key, "name");
    assert_eq!(col.header_text(), Some("name"));
    assert!(!col.sortable);
    assert_eq!(col.width, None);
    assert_eq!(col.align, Align::Left);
    assert!(!col.is_actions());
}

#[test]
fn test_full_config() {
    let col = column_from_config(config(json!({
        "key": "amount",
        "header": "Amount",
        "field": "total_amount",
        "sortable": true,
        "width": 140.0,
        "align": "right"
    })))
    .unwrap();
    assert_eq!(col.header_text(), Some("Amount"));
    assert!(col.sortable);
    assert_eq!(col.width, Some(140.0));
    assert_eq!(col.align, Align::Right);
}

#[test]
fn test_unknown_align_rejected() {
    let result = column_from_config(config(json!({ "key": "a", "align": "middle" })));
    assert!(result.is_err());
}

#[test]
fn test_actions_flag_marks_role() {
    let col = column_from_config(config(json!({ "key": "ops", "actions": true }))).unwrap();
    assert!(col.is_actions());
}

// ============================================================================
// CELL RENDERING OVER JSON ROWS
// ============================================================================

#[test]
fn test_string_field_renders_as_text() {
    let col = column_from_config(config(json!({ "key": "name" }))).unwrap();
    let row = json!({ "name": "Acme Corp" });
    assert_eq!((col.cell)(&row), CellContent::Text("Acme Corp".to_string()));
}

#[test]
fn test_field_overrides_key_lookup() {
    let col =
        column_from_config(config(json!({ "key": "name", "field": "display_name" }))).unwrap();
    let row = json!({ "name": "wrong", "display_name": "right" });
    assert_eq!((col.cell)(&row), CellContent::Text("right".to_string()));
}

#[test]
fn test_number_and_bool_stringified() {
    let amount = column_from_config(config(json!({ "key": "amount" }))).unwrap();
    let active = column_from_config(config(json!({ "key": "active" }))).unwrap();
    let row = json!({ "amount": 42.5, "active": true });
    assert_eq!((amount.cell)(&row), CellContent::Text("42.5".to_string()));
    assert_eq!((active.cell)(&row), CellContent::Text("true".to_string()));
}

#[test]
fn test_missing_or_null_field_is_empty() {
    let col = column_from_config(config(json!({ "key": "name" }))).unwrap();
    assert_eq!((col.cell)(&json!({})), CellContent::Empty);
    assert_eq!((col.cell)(&json!({ "name": null })), CellContent::Empty);
}

#[test]
fn test_html_flag_switches_to_markup() {
    let col = column_from_config(config(json!({ "key": "ops", "html": true }))).unwrap();
    let row = json!({ "ops": "<button>Edit</button>" });
    assert_eq!(
        (col.cell)(&row),
        CellContent::Html("<button>Edit</button>".to_string())
    );
}

// ============================================================================
// ROW IDENTITY
// ============================================================================

#[test]
fn test_key_extractor_reads_scalars() {
    let extract = key_extractor_for(DEFAULT_ROW_KEY);
    assert_eq!(extract(&json!({ "id": "abc-1" })), "abc-1");
    assert_eq!(extract(&json!({ "id": 42 })), "42");
}

#[test]
fn test_key_extractor_falls_back_to_row_json() {
    let extract = key_extractor_for("id");
    let row = json!({ "name": "no id here" });
    assert_eq!(extract(&row), row.to_string());
}

// ============================================================================
// PROPS-LEVEL RESOLUTION
// ============================================================================

#[test]
fn test_props_defaults() {
    let props: GridProps<Value> = GridProps::new(Vec::new(), Vec::new(), |_| String::new());
    assert!(!props.loading);
    assert!(!props.is_text_wrapped);
    assert!(props.ascending);
    assert_eq!(props.min_height, "100px");
    assert_eq!(props.resolved_max_height(), DEFAULT_MAX_HEIGHT);
    assert_eq!(props.page_size_options, vec![5, 10, 20, 50]);
    assert_eq!(props.always_visible_columns, vec!["actions".to_string()]);
}

#[test]
fn test_props_ordered_columns_dedups_composed_actions() {
    // Two actions columns arriving from composed JS config render once.
    let columns = vec![
        column_from_config(config(json!({ "key": "name" }))).unwrap(),
        column_from_config(config(json!({ "key": "actions", "header": "Actions" }))).unwrap(),
        column_from_config(config(json!({ "key": "ops", "header": "Actions" }))).unwrap(),
    ];
    let props = GridProps::new(Vec::new(), columns, key_extractor_for("id"));
    let ordered = props.ordered_columns();
    let keys: Vec<&str> = ordered.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["actions", "name"]);
}

#[test]
fn test_props_is_pinned_tracks_pin_list_and_actions() {
    let columns = vec![
        column_from_config(config(json!({ "key": "name" }))).unwrap(),
        column_from_config(config(json!({ "key": "actions", "actions": true }))).unwrap(),
    ];
    let mut props = GridProps::new(Vec::new(), columns, key_extractor_for("id"));
    assert!(props.is_pinned("actions"));
    assert!(!props.is_pinned("name"));
    props.pinned_columns = vec!["name".to_string()];
    assert!(props.is_pinned("name"));
}

#[test]
fn test_props_sort_state_roundtrip() {
    let mut props: GridProps<Value> = GridProps::new(Vec::new(), Vec::new(), |_| String::new());
    props.sort_by = Some("name".to_string());
    props.ascending = false;
    let sort = props.sort_state();
    assert_eq!(sort.column.as_deref(), Some("name"));
    assert!(!sort.ascending);
}
