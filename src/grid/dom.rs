//! Thin DOM adapter: table construction, sticky layout application, and
//! live measurement.
//!
//! Everything here is a mechanical translation between the pure modules
//! (`resolve`, `sticky`, `resize`, `pagination`) and the rendered `<table>`.
//! No layout decision is made in this file; failures degrade silently (a
//! cell that cannot be styled is skipped, a column that cannot be measured
//! contributes a zero offset).
//!
//! Interactive elements carry data attributes (`data-sort-key`,
//! `data-page-target`, `data-row-key`) that the delegated listeners in
//! `events` resolve at dispatch time; no listener is registered on the
//! rebuilt nodes themselves.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, NodeList};

use crate::column::{CellContent, Column, ACTIONS_COL_WIDTH};
use crate::error::{GridError, Result};
use crate::pagination::PageRequest;
use crate::resize::{ResizeController, MIN_COL_WIDTH};
use crate::sticky::{
    left_offsets, pinned_ranks, z_index, AFTER_PINNED_CLASS, PINNED_CLASS, PINNED_GUTTER_PX,
};

use super::{dialog, events, GridInner, GridProps, StickyEntry};

// Theme hooks: consumers override via CSS custom properties.
const HEADER_BG: &str = "var(--table-header-bg, #f8fafc)";
const ROW_BG: &str = "var(--table-row-bg, #ffffff)";
const BORDER_COLOR: &str = "var(--table-border, #e5e7eb)";
const MUTED_TEXT: &str = "var(--table-muted, #6b7280)";

/// Base left padding of header and body cells; the pinned gutter overrides
/// it and the clear pass restores it.
const CELL_PADDING_LEFT: &str = "12px";

const WIDTH_TRANSITION: &str = "width 0.15s ease-out";

/// Rebuild the grid DOM from the current props, then run the sticky pass.
pub(crate) fn render<T: 'static>(inner: &Rc<RefCell<GridInner<T>>>) -> Result<()> {
    let mut table_el: Option<Element> = None;
    let mut scroll_el: Option<HtmlElement> = None;

    // Carry the scroll position across the rebuild.
    let prev_scroll = {
        let s = inner.borrow();
        s.scroll_area
            .as_ref()
            .map(|el| (el.scroll_left(), el.scroll_top()))
    };

    {
        let s = inner.borrow();
        let document = s.document.clone();
        s.container.set_inner_html("");

        let card = create(&document, "div")?;
        card.set_class_name("gridview-card");
        set_style(&card, "position", "relative");
        set_style(&card, "overflow", "hidden");

        if s.props.loading && s.props.data.is_empty() {
            let notice = create(&document, "div")?;
            notice.set_class_name("gridview-loading");
            set_style(&notice, "text-align", "center");
            set_style(&notice, "padding", "32px 0");
            notice.set_text_content(Some("Loading data..."));
            card.append_child(&notice)?;
        } else {
            let (scroll, table) = build_scroll_area(&document, &s.props, &s.resize)?;
            card.append_child(&scroll)?;
            table_el = Some(table);
            scroll_el = Some(scroll);
        }

        if s.props.pagination.is_some() {
            let bar = build_pagination_bar(&document, &s.props)?;
            card.append_child(&bar)?;
        }

        s.container.append_child(&card)?;
    }

    {
        let mut s = inner.borrow_mut();
        s.table = table_el;
        s.scroll_area = scroll_el.clone();
        s.sticky = Vec::new();
        if s.dialog.is_none() {
            s.dialog = dialog::ConfirmDialog::build(&s.document, Rc::downgrade(inner)).ok();
        }
    }

    if let Some(scroll) = scroll_el {
        // Restore after insertion; a detached element ignores scroll writes.
        if let Some((left, top)) = prev_scroll {
            scroll.set_scroll_left(left);
            scroll.set_scroll_top(top);
        }
        events::attach_scroll_listener(inner, &scroll);
    }
    apply_sticky(inner)
}

/// Build the scroll container and the table inside it.
fn build_scroll_area<T>(
    document: &Document,
    props: &GridProps<T>,
    resize: &ResizeController,
) -> Result<(HtmlElement, Element)> {
    let scroll = create(document, "div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GridError::Dom("scroll container cast".to_string()))?;
    scroll.set_class_name("gridview-scroll");
    let style = scroll.style();
    let _ = style.set_property("width", "100%");
    let _ = style.set_property("overflow", "auto");
    let _ = style.set_property("max-height", props.resolved_max_height());
    let _ = style.set_property("min-height", &props.min_height);
    let _ = style.set_property("scrollbar-gutter", "stable");

    let table = create(document, "table")?;
    table.set_class_name("gridview-table");
    set_style(&table, "border-collapse", "collapse");
    set_style(&table, "border-spacing", "0");
    set_style(&table, "width", "max-content");
    set_style(&table, "min-width", "100%");

    let ordered = props.ordered_columns();

    // Sticky header row.
    let thead = create(document, "thead")?;
    set_style(&thead, "position", "sticky");
    set_style(&thead, "top", "0");
    set_style(&thead, "z-index", "10");
    set_style(&thead, "background", HEADER_BG);
    set_style(&thead, "box-shadow", "0 2px 4px rgba(0, 0, 0, 0.05)");
    let header_row = create(document, "tr")?;
    for col in &ordered {
        let th = build_header_cell(document, col, props, resize)?;
        header_row.append_child(&th)?;
    }
    thead.append_child(&header_row)?;
    table.append_child(&thead)?;

    let tbody = build_body(document, props, &ordered)?;
    table.append_child(&tbody)?;

    scroll.append_child(&table)?;
    Ok((scroll, table))
}

/// One header cell: label, sort affordance, resize handle.
fn build_header_cell<T>(
    document: &Document,
    col: &Column<T>,
    props: &GridProps<T>,
    resize: &ResizeController,
) -> Result<Element> {
    let th = create(document, "th")?;
    th.set_attribute("data-column-key", &col.key)?;
    set_style(&th, "padding-top", "8px");
    set_style(&th, "padding-bottom", "8px");
    set_style(&th, "padding-left", CELL_PADDING_LEFT);
    set_style(&th, "padding-right", "12px");
    set_style(&th, "font-weight", "500");
    set_style(&th, "color", MUTED_TEXT);
    set_style(&th, "vertical-align", "middle");
    set_style(&th, "position", "relative");
    set_style(&th, "background", HEADER_BG);
    set_style(&th, "text-align", col.align.css());
    set_style(&th, "transition", WIDTH_TRANSITION);

    if col.is_actions() {
        let w = px(ACTIONS_COL_WIDTH);
        set_style(&th, "width", &w);
        set_style(&th, "min-width", &w);
        set_style(&th, "overflow", "visible");
    } else {
        set_style(&th, "min-width", &px(MIN_COL_WIDTH));
        set_style(&th, "overflow", "hidden");
        set_style(&th, "text-overflow", "ellipsis");
        if let Some(w) = resize.width_for(&col.key).or(col.width) {
            let w = px(w);
            set_style(&th, "width", &w);
            set_style(&th, "min-width", &w);
            set_style(&th, "max-width", &w);
        }
    }

    // Label with optional sort affordance.
    let label = create(document, "div")?;
    set_style(&label, "display", "flex");
    set_style(&label, "align-items", "center");
    set_style(&label, "gap", "4px");
    set_style(&label, "width", "100%");
    set_style(&label, "justify-content", justify(col));
    let text = create(document, "span")?;
    fill_content(&text, &col.header);
    label.append_child(&text)?;

    if col.sortable && props.on_sort.is_some() {
        let indicator = props.sort_state().indicator(&col.key);
        let icon = create(document, "span")?;
        icon.set_class_name("sort-indicator");
        icon.set_text_content(Some(indicator.glyph()));
        if indicator.dimmed() {
            set_style(&icon, "opacity", "0.5");
        }
        label.append_child(&icon)?;
        set_style(&label, "cursor", "pointer");
        label.set_attribute("data-sort-key", &col.key)?;
    }
    th.append_child(&label)?;

    // Resize handle strip on the right edge; the delegated mousedown
    // listener picks it up by class.
    let handle = create(document, "div")?;
    handle.set_class_name("resize-handle");
    set_style(&handle, "position", "absolute");
    set_style(&handle, "right", "0");
    set_style(&handle, "top", "0");
    set_style(&handle, "height", "100%");
    set_style(&handle, "width", "3.5px");
    set_style(&handle, "cursor", "col-resize");
    th.append_child(&handle)?;

    Ok(th)
}

/// Table body: data rows, or the spanning empty-state row.
fn build_body<T>(
    document: &Document,
    props: &GridProps<T>,
    ordered: &[&Column<T>],
) -> Result<Element> {
    let tbody = create(document, "tbody")?;

    if props.data.is_empty() {
        let tr = create(document, "tr")?;
        set_style(&tr, "background", ROW_BG);
        let td = create(document, "td")?;
        td.set_attribute("colspan", &ordered.len().to_string())?;
        set_style(&td, "text-align", "center");
        set_style(&td, "height", "128px");
        set_style(&td, "color", MUTED_TEXT);
        set_style(&td, "background", "inherit");
        match &props.empty_state {
            Some(content) => fill_content(&td, content),
            None => td.set_text_content(Some("No data found.")),
        }
        tr.append_child(&td)?;
        tbody.append_child(&tr)?;
        return Ok(tbody);
    }

    for item in props.data.iter() {
        let row_key = (props.key_extractor)(item);
        let tr = create(document, "tr")?;
        tr.set_attribute("data-row-key", &row_key)?;
        set_style(&tr, "background", ROW_BG);
        if props.on_row_click.is_some() {
            set_style(&tr, "cursor", "pointer");
        }

        for col in ordered {
            let td = create(document, "td")?;
            td.set_attribute("data-column-key", &col.key)?;
            set_style(&td, "padding-top", "8px");
            set_style(&td, "padding-bottom", "8px");
            set_style(&td, "padding-left", CELL_PADDING_LEFT);
            set_style(&td, "padding-right", "12px");
            set_style(&td, "vertical-align", "middle");
            set_style(&td, "background", "inherit");
            set_style(&td, "text-align", col.align.css());

            if col.is_actions() {
                let w = px(ACTIONS_COL_WIDTH);
                set_style(&td, "width", &w);
                set_style(&td, "min-width", &w);
                set_style(&td, "overflow", "visible");
                fill_content(&td, &(col.cell)(item));
            } else {
                set_style(&td, "min-width", &px(col.width.unwrap_or(MIN_COL_WIDTH)));
                if let Some(w) = col.width {
                    set_style(&td, "width", &px(w));
                    set_style(&td, "max-width", &px(w));
                }
                let wrapper = create(document, "div")?;
                set_style(&wrapper, "display", "block");
                set_style(&wrapper, "max-width", "100%");
                if props.is_text_wrapped {
                    set_style(&wrapper, "white-space", "normal");
                    set_style(&wrapper, "overflow-wrap", "break-word");
                } else {
                    set_style(&wrapper, "white-space", "nowrap");
                    set_style(&wrapper, "overflow", "hidden");
                    set_style(&wrapper, "text-overflow", "ellipsis");
                }
                fill_content(&wrapper, &(col.cell)(item));
                td.append_child(&wrapper)?;
            }
            tr.append_child(&td)?;
        }
        tbody.append_child(&tr)?;
    }

    Ok(tbody)
}

/// Pager bar: page-size selector, showing label, page controls.
fn build_pagination_bar<T>(document: &Document, props: &GridProps<T>) -> Result<Element> {
    let Some(p) = &props.pagination else {
        return Err(GridError::Dom("pagination props missing".to_string()));
    };

    let bar = create(document, "div")?;
    bar.set_class_name("gridview-pagination");
    set_style(&bar, "display", "flex");
    set_style(&bar, "align-items", "center");
    set_style(&bar, "justify-content", "space-between");
    set_style(&bar, "padding", "12px 16px");
    set_style(&bar, "border-top", &format!("1px solid {BORDER_COLOR}"));

    // Items per page.
    let size_group = create(document, "div")?;
    set_style(&size_group, "display", "flex");
    set_style(&size_group, "align-items", "center");
    set_style(&size_group, "gap", "8px");
    let size_label = create(document, "span")?;
    size_label.set_text_content(Some("Items per page:"));
    set_style(&size_label, "white-space", "nowrap");
    size_group.append_child(&size_label)?;

    let select = create(document, "select")?
        .dyn_into::<HtmlSelectElement>()
        .map_err(|_| GridError::Dom("select cast".to_string()))?;
    select.set_class_name("gridview-page-size");
    for size in &props.page_size_options {
        let option = create(document, "option")?;
        option.set_attribute("value", &size.to_string())?;
        option.set_text_content(Some(&size.to_string()));
        if *size == p.state.page_size {
            option.set_attribute("selected", "")?;
        }
        select.append_child(&option)?;
    }
    size_group.append_child(&select)?;
    bar.append_child(&size_group)?;

    // Showing A to B of C items.
    let showing = create(document, "span")?;
    showing.set_class_name("gridview-showing");
    set_style(&showing, "color", MUTED_TEXT);
    set_style(&showing, "font-size", "14px");
    showing.set_text_content(Some(&p.state.showing_label(props.data.len())));
    bar.append_child(&showing)?;

    // First / previous / indicator / next / last.
    let controls = create(document, "div")?;
    set_style(&controls, "display", "flex");
    set_style(&controls, "align-items", "center");
    set_style(&controls, "gap", "4px");
    for req in [PageRequest::First, PageRequest::Previous] {
        let button = build_page_button(document, props, req)?;
        controls.append_child(&button)?;
    }
    let indicator = create(document, "span")?;
    indicator.set_text_content(Some(&p.state.page_label()));
    set_style(&indicator, "font-size", "14px");
    set_style(&indicator, "white-space", "nowrap");
    set_style(&indicator, "margin", "0 6px");
    controls.append_child(&indicator)?;
    for req in [PageRequest::Next, PageRequest::Last] {
        let button = build_page_button(document, props, req)?;
        controls.append_child(&button)?;
    }
    bar.append_child(&controls)?;

    Ok(bar)
}

fn build_page_button<T>(
    document: &Document,
    props: &GridProps<T>,
    req: PageRequest,
) -> Result<Element> {
    let Some(p) = &props.pagination else {
        return Err(GridError::Dom("pagination props missing".to_string()));
    };
    let disabled = req.disabled(&p.state, props.loading);

    let button = create(document, "button")?;
    button.set_attribute("type", "button")?;
    button.set_attribute("aria-label", req.label())?;
    button.set_text_content(Some(req.glyph()));
    set_style(&button, "height", "32px");
    set_style(&button, "width", "32px");
    set_style(&button, "border", &format!("1px solid {BORDER_COLOR}"));
    set_style(&button, "border-radius", "4px");
    set_style(&button, "background", "transparent");
    if disabled {
        button.set_attribute("disabled", "")?;
        set_style(&button, "opacity", "0.5");
    } else {
        set_style(&button, "cursor", "pointer");
        button.set_attribute("data-page-target", &req.target(&p.state).to_string())?;
    }
    Ok(button)
}

// ============================================================================
// Sticky layout pass
// ============================================================================

/// Recompute and apply pinned-column offsets from live measurements.
///
/// Runs after every render, after a drag that touched a pinned column, and
/// on drag end. Purely cosmetic: measurement failures degrade to an offset
/// of 0 and are corrected on the next pass.
pub(crate) fn apply_sticky<T: 'static>(inner: &Rc<RefCell<GridInner<T>>>) -> Result<()> {
    let (table, cols) = {
        let s = inner.borrow();
        let Some(table) = s.table.clone() else {
            return Ok(());
        };
        let ordered = s.props.ordered_columns();
        let ranks = pinned_ranks(&ordered, &s.props.pinned_columns);
        let cols: Vec<(String, Option<usize>)> = ordered
            .iter()
            .zip(ranks.iter())
            .map(|(col, rank)| (col.key.clone(), *rank))
            .collect();
        (table, cols)
    };

    // 1. Clear previously applied sticky styles and markers everywhere.
    if let Ok(cells) = table.query_selector_all("th, td") {
        for_each_element(&cells, |el| {
            let classes = el.class_list();
            let _ = classes.remove_1(PINNED_CLASS);
            let _ = classes.remove_1(AFTER_PINNED_CLASS);
            clear_style(el, "left");
            clear_style(el, "z-index");
            set_style(el, "padding-left", CELL_PADDING_LEFT);
            // Header cells stay positioned for their resize handles.
            if el.tag_name().eq_ignore_ascii_case("th") {
                set_style(el, "position", "relative");
            } else {
                clear_style(el, "position");
            }
        });
    }

    // 2. Measure pinned widths in visual rank order.
    let mut pinned: Vec<(String, usize)> = cols
        .iter()
        .filter_map(|(key, rank)| rank.map(|r| (key.clone(), r)))
        .collect();
    pinned.sort_by_key(|(_, rank)| *rank);
    let measured: Vec<Option<f64>> = pinned
        .iter()
        .map(|(key, _)| {
            table
                .query_selector(&cell_selector("th", key))
                .ok()
                .flatten()
                .map(|el| el.get_bounding_client_rect().width())
        })
        .collect();
    let offsets = left_offsets(&measured);

    // 3. Apply offsets, stacking order, and markers.
    let mut applied: Vec<StickyEntry> = Vec::with_capacity(pinned.len());
    for ((key, rank), left) in pinned.iter().zip(offsets.iter()) {
        let selector = format!(
            "{}, {}",
            cell_selector("th", key),
            cell_selector("td", key)
        );
        if let Ok(cells) = table.query_selector_all(&selector) {
            for_each_element(&cells, |el| {
                set_style(el, "position", "sticky");
                set_style(el, "left", &px(*left));
                set_style(el, "z-index", &z_index(*rank).to_string());
                let _ = el.class_list().add_1(PINNED_CLASS);
            });
        }
        applied.push(StickyEntry {
            key: key.clone(),
            left: *left,
        });
    }

    // 4. Gutter after the pinned block: first keyed, non-pinned cell per row.
    if !pinned.is_empty() {
        let pinned_keys: HashSet<&str> = pinned.iter().map(|(key, _)| key.as_str()).collect();
        if let Ok(rows) = table.query_selector_all("tr") {
            for i in 0..rows.length() {
                let Some(row) = rows.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let Ok(cells) = row.query_selector_all("th, td") else {
                    continue;
                };
                for j in 0..cells.length() {
                    let Some(cell) = cells.get(j).and_then(|n| n.dyn_into::<Element>().ok())
                    else {
                        continue;
                    };
                    // Cells without a column key (e.g. the empty-state cell)
                    // are skipped entirely.
                    let Some(key) = cell.get_attribute("data-column-key") else {
                        continue;
                    };
                    if pinned_keys.contains(key.as_str()) {
                        continue;
                    }
                    set_style(&cell, "padding-left", &px(PINNED_GUTTER_PX));
                    let _ = cell.class_list().add_1(AFTER_PINNED_CLASS);
                    break;
                }
            }
        }
    }

    inner.borrow_mut().sticky = applied;
    Ok(())
}

/// Imperative width update for the column being dragged.
pub(crate) fn set_column_width(table: &Element, key: &str, width: f64) {
    if let Ok(Some(th)) = table.query_selector(&cell_selector("th", key)) {
        let w = px(width);
        set_style(&th, "width", &w);
        set_style(&th, "min-width", &w);
        set_style(&th, "max-width", &w);
    }
}

/// Disable the width transition while a column is being dragged so frames
/// track the pointer exactly.
pub(crate) fn suppress_width_transition(table: &Element, key: &str, suppressed: bool) {
    if let Ok(Some(th)) = table.query_selector(&cell_selector("th", key)) {
        let value = if suppressed { "none" } else { WIDTH_TRANSITION };
        set_style(&th, "transition", value);
    }
}

/// Set the sticky `left` of every cell in a pinned column (scroll nudge).
pub(crate) fn set_cells_left(table: &Element, key: &str, left: f64) {
    let selector = format!("{}, {}", cell_selector("th", key), cell_selector("td", key));
    if let Ok(cells) = table.query_selector_all(&selector) {
        for_each_element(&cells, |el| {
            set_style(el, "left", &px(left));
        });
    }
}

// ============================================================================
// Small DOM helpers
// ============================================================================

fn create(document: &Document, tag: &str) -> Result<Element> {
    document
        .create_element(tag)
        .map_err(|_| GridError::Dom(format!("failed to create <{tag}>")))
}

fn set_style(el: &Element, prop: &str, value: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property(prop, value);
    }
}

fn clear_style(el: &Element, prop: &str) {
    if let Some(html) = el.dyn_ref::<HtmlElement>() {
        let _ = html.style().remove_property(prop);
    }
}

fn fill_content(el: &Element, content: &CellContent) {
    match content {
        CellContent::Text(text) => el.set_text_content(Some(text)),
        CellContent::Html(html) => el.set_inner_html(html),
        CellContent::Empty => {}
    }
}

fn for_each_element(list: &NodeList, mut f: impl FnMut(&Element)) {
    for i in 0..list.length() {
        if let Some(el) = list.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
            f(&el);
        }
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

fn justify<T>(col: &Column<T>) -> &'static str {
    match col.align {
        crate::column::Align::Left => "flex-start",
        crate::column::Align::Center => "center",
        crate::column::Align::Right => "flex-end",
    }
}

/// Attribute selector for every cell of a column, with quotes escaped.
fn cell_selector(tag: &str, key: &str) -> String {
    let escaped = key.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{tag}[data-column-key=\"{escaped}\"]")
}
