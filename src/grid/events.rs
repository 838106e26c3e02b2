//! Delegated event wiring: sort/pager/row clicks, the resize drag, and the
//! scroll repaint nudge.
//!
//! A fixed set of listeners is registered on the container once, when the
//! grid is created; they resolve the actual target at dispatch time through
//! data attributes, so DOM rebuilds never tear down a listener that might
//! currently be dispatching.
//!
//! The drag follows a scoped acquisition/release discipline: the
//! document-level mousemove/mouseup listeners and the body cursor override
//! exist only while the `Dragging` phase is active. The cursor override is
//! an owned value whose `Drop` restores the previous style, so an abnormal
//! end of the drag still releases it.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, HtmlSelectElement, MouseEvent,
};

use crate::resize::DragOutcome;
use crate::sticky::SCROLL_NUDGE_PX;

use super::{dom, GridInner};

/// Elements inside a row that swallow row clicks.
const INTERACTIVE_SELECTOR: &str =
    "button, a, input, select, textarea, [role=\"button\"], [role=\"checkbox\"]";

/// Scoped override of the document body's cursor and text selection for the
/// duration of a drag. Dropping it restores the previous inline values.
pub(crate) struct CursorOverride {
    body: HtmlElement,
    prev_cursor: String,
    prev_user_select: String,
}

impl CursorOverride {
    fn acquire(document: &Document) -> Option<Self> {
        let body = document.body()?;
        let style = body.style();
        let prev_cursor = style.get_property_value("cursor").unwrap_or_default();
        let prev_user_select = style.get_property_value("user-select").unwrap_or_default();
        let _ = style.set_property("cursor", "col-resize");
        let _ = style.set_property("user-select", "none");
        Some(Self {
            body,
            prev_cursor,
            prev_user_select,
        })
    }
}

impl Drop for CursorOverride {
    fn drop(&mut self) {
        let style = self.body.style();
        if self.prev_cursor.is_empty() {
            let _ = style.remove_property("cursor");
        } else {
            let _ = style.set_property("cursor", &self.prev_cursor);
        }
        if self.prev_user_select.is_empty() {
            let _ = style.remove_property("user-select");
        } else {
            let _ = style.set_property("user-select", &self.prev_user_select);
        }
    }
}

/// Register the delegated container listeners. Called once per grid.
pub(crate) fn install<T: 'static>(inner: &Rc<RefCell<GridInner<T>>>) {
    let container = inner.borrow().container.clone();

    let click_weak = Rc::downgrade(inner);
    let click = Closure::wrap(Box::new(move |e: MouseEvent| {
        container_click(&click_weak, &e);
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ = container.add_event_listener_with_callback("click", click.as_ref().unchecked_ref());

    let down_weak = Rc::downgrade(inner);
    let mousedown = Closure::wrap(Box::new(move |e: MouseEvent| {
        container_mousedown(&down_weak, &e);
    }) as Box<dyn FnMut(MouseEvent)>);
    let _ =
        container.add_event_listener_with_callback("mousedown", mousedown.as_ref().unchecked_ref());

    let change_weak = Rc::downgrade(inner);
    let change = Closure::wrap(Box::new(move |e: Event| {
        container_change(&change_weak, &e);
    }) as Box<dyn FnMut(Event)>);
    let _ = container.add_event_listener_with_callback("change", change.as_ref().unchecked_ref());

    let mut s = inner.borrow_mut();
    s.click_listener = Some(click);
    s.mousedown_listener = Some(mousedown);
    s.change_listener = Some(change);
}

fn container_click<T: 'static>(weak: &Weak<RefCell<GridInner<T>>>, event: &MouseEvent) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };

    // Sortable header label.
    if let Ok(Some(label)) = target.closest("[data-sort-key]") {
        if let Some(key) = label.get_attribute("data-sort-key") {
            let callback = inner.borrow().props.on_sort.clone();
            if let Some(callback) = callback {
                callback(&key);
            }
            return;
        }
    }

    // Pager button.
    if let Ok(Some(button)) = target.closest("[data-page-target]") {
        if button.has_attribute("disabled") {
            return;
        }
        let page = button
            .get_attribute("data-page-target")
            .and_then(|v| v.parse::<u32>().ok());
        if let Some(page) = page {
            let callback = {
                let s = inner.borrow();
                s.props
                    .pagination
                    .as_ref()
                    .map(|p| Rc::clone(&p.on_page_change))
            };
            if let Some(callback) = callback {
                callback(page);
            }
            return;
        }
    }

    // Row click, unless the click landed on an interactive element.
    if target
        .closest(INTERACTIVE_SELECTOR)
        .ok()
        .flatten()
        .is_some()
    {
        return;
    }
    if let Ok(Some(row)) = target.closest("tr[data-row-key]") {
        if let Some(key) = row.get_attribute("data-row-key") {
            row_click(&inner, &key);
        }
    }
}

fn row_click<T: 'static>(inner: &Rc<RefCell<GridInner<T>>>, row_key: &str) {
    let (data, callback, index) = {
        let s = inner.borrow();
        let Some(callback) = s.props.on_row_click.clone() else {
            return;
        };
        let index = s
            .props
            .data
            .iter()
            .position(|item| (s.props.key_extractor)(item) == row_key);
        (Rc::clone(&s.props.data), callback, index)
    };
    // Dispatch outside the borrow; the consumer may re-enter the grid.
    if let Some(item) = index.and_then(|i| data.get(i)) {
        callback(item);
    }
}

fn container_change<T: 'static>(weak: &Weak<RefCell<GridInner<T>>>, event: &Event) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let Some(select) = event
        .target()
        .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
    else {
        return;
    };
    if !select.class_list().contains("gridview-page-size") {
        return;
    }
    let Ok(size) = select.value().parse::<u32>() else {
        return;
    };
    let callback = {
        let s = inner.borrow();
        s.props
            .pagination
            .as_ref()
            .map(|p| Rc::clone(&p.on_page_size_change))
    };
    if let Some(callback) = callback {
        callback(size);
    }
}

// ============================================================================
// Resize drag
// ============================================================================

fn container_mousedown<T: 'static>(weak: &Weak<RefCell<GridInner<T>>>, event: &MouseEvent) {
    let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return;
    };
    let Ok(Some(handle)) = target.closest(".resize-handle") else {
        return;
    };
    event.prevent_default();
    let Ok(Some(th)) = handle.closest("th") else {
        return;
    };
    let Some(key) = th.get_attribute("data-column-key") else {
        return;
    };
    let width = th.get_bounding_client_rect().width();
    let Some(inner) = weak.upgrade() else {
        return;
    };
    start_drag(&inner, &key, f64::from(event.client_x()), width);
}

/// Enter the `Dragging` phase for `key` and attach the document listeners.
fn start_drag<T: 'static>(
    inner: &Rc<RefCell<GridInner<T>>>,
    key: &str,
    client_x: f64,
    start_width: f64,
) {
    {
        let mut s = inner.borrow_mut();
        s.resize.begin(key, client_x, start_width);
        if !s.resize.is_dragging() {
            return;
        }
        s.cursor = CursorOverride::acquire(&s.document);
        if let Some(table) = &s.table {
            dom::suppress_width_transition(table, key, true);
        }
    }
    ensure_drag_closures(inner);

    let s = inner.borrow();
    if let Some(c) = &s.drag_move {
        let _ = s
            .document
            .add_event_listener_with_callback("mousemove", c.as_ref().unchecked_ref());
    }
    if let Some(c) = &s.drag_up {
        let _ = s
            .document
            .add_event_listener_with_callback("mouseup", c.as_ref().unchecked_ref());
    }
}

/// Create the document-level drag closures on first use. The closures are
/// permanent; only their registration is scoped to the drag.
fn ensure_drag_closures<T: 'static>(inner: &Rc<RefCell<GridInner<T>>>) {
    if inner.borrow().drag_move.is_some() {
        return;
    }
    let move_weak = Rc::downgrade(inner);
    let on_move = Closure::wrap(Box::new(move |e: MouseEvent| {
        drag_move(&move_weak, f64::from(e.client_x()));
    }) as Box<dyn FnMut(MouseEvent)>);
    let up_weak = Rc::downgrade(inner);
    let on_up = Closure::wrap(Box::new(move |_e: MouseEvent| {
        drag_end(&up_weak);
    }) as Box<dyn FnMut(MouseEvent)>);
    let mut s = inner.borrow_mut();
    s.drag_move = Some(on_move);
    s.drag_up = Some(on_up);
}

fn drag_move<T: 'static>(weak: &Weak<RefCell<GridInner<T>>>, client_x: f64) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (table, key, width, pinned) = {
        let mut s = inner.borrow_mut();
        let Some(width) = s.resize.update(client_x) else {
            return;
        };
        let Some(key) = s.resize.dragging_column().map(str::to_string) else {
            return;
        };
        let pinned = s.props.is_pinned(&key);
        (s.table.clone(), key, width, pinned)
    };
    if let Some(table) = &table {
        dom::set_column_width(table, &key, width);
    }
    // A pinned column changing width shifts every offset to its right.
    if pinned {
        let _ = dom::apply_sticky(&inner);
    }
}

fn drag_end<T: 'static>(weak: &Weak<RefCell<GridInner<T>>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let outcome = {
        let mut s = inner.borrow_mut();
        // Release drag-scoped resources unconditionally.
        if let Some(c) = &s.drag_move {
            let _ = s
                .document
                .remove_event_listener_with_callback("mousemove", c.as_ref().unchecked_ref());
        }
        if let Some(c) = &s.drag_up {
            let _ = s
                .document
                .remove_event_listener_with_callback("mouseup", c.as_ref().unchecked_ref());
        }
        drop(s.cursor.take());
        if let (Some(table), Some(key)) = (
            s.table.clone(),
            s.resize.dragging_column().map(str::to_string),
        ) {
            dom::suppress_width_transition(&table, &key, false);
        }
        let has_persist = s.props.on_column_widths_change.is_some();
        s.resize.finish(has_persist)
    };
    if outcome == DragOutcome::Confirm {
        let s = inner.borrow();
        if let Some(dialog) = &s.dialog {
            dialog.open();
        }
    }
    let _ = dom::apply_sticky(&inner);
}

// ============================================================================
// Scroll repaint nudge
// ============================================================================

/// Attach the horizontal-scroll repaint correction to the (fresh) scroll
/// container. The closure is created once and re-attached on every render.
///
/// Some browsers fail to repaint `position: sticky` cells on horizontal
/// scroll inside an `overflow: auto` container; every scroll event shifts
/// each pinned cell's `left` by a sub-pixel delta and reverts it on the next
/// animation frame, forcing a layout recalculation without visible flicker.
pub(crate) fn attach_scroll_listener<T: 'static>(
    inner: &Rc<RefCell<GridInner<T>>>,
    scroll: &HtmlElement,
) {
    if inner.borrow().scroll_listener.is_none() {
        let weak = Rc::downgrade(inner);
        let closure = Closure::wrap(Box::new(move |_e: Event| {
            nudge_pinned(&weak);
        }) as Box<dyn FnMut(Event)>);
        inner.borrow_mut().scroll_listener = Some(closure);
    }
    let s = inner.borrow();
    if let Some(c) = &s.scroll_listener {
        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        let _ = scroll.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            c.as_ref().unchecked_ref(),
            &options,
        );
    }
}

fn nudge_pinned<T: 'static>(weak: &Weak<RefCell<GridInner<T>>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };
    let (table, plan) = {
        let s = inner.borrow();
        (s.table.clone(), s.sticky.clone())
    };
    let Some(table) = table else {
        return;
    };
    if plan.is_empty() {
        return;
    }
    for entry in &plan {
        dom::set_cells_left(&table, &entry.key, entry.left + SCROLL_NUDGE_PX);
    }

    ensure_nudge_revert(&inner);
    let callback: Option<Function> = inner
        .borrow()
        .nudge_revert
        .as_ref()
        .map(|c| c.as_ref().unchecked_ref::<Function>().clone());
    if let (Some(window), Some(callback)) = (web_sys::window(), callback) {
        let _ = window.request_animation_frame(&callback);
    }
}

fn ensure_nudge_revert<T: 'static>(inner: &Rc<RefCell<GridInner<T>>>) {
    if inner.borrow().nudge_revert.is_some() {
        return;
    }
    let weak = Rc::downgrade(inner);
    let closure = Closure::wrap(Box::new(move || {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let (table, plan) = {
            let s = inner.borrow();
            (s.table.clone(), s.sticky.clone())
        };
        let Some(table) = table else {
            return;
        };
        for entry in &plan {
            dom::set_cells_left(&table, &entry.key, entry.left);
        }
    }) as Box<dyn FnMut()>);
    inner.borrow_mut().nudge_revert = Some(closure);
}
