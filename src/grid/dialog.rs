//! Confirmation dialog for persisting column-width changes.
//!
//! Mounted once on `document.body` and reused across renders; the grid only
//! toggles its visibility. "Save Changes" hands the full working-width map
//! to the consumer's persistence callback; "Cancel" reverts the working map
//! to the last committed widths and re-renders.

use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use crate::error::{GridError, Result};

use super::{dom, GridInner};

pub(crate) struct ConfirmDialog {
    overlay: HtmlElement,
    _on_save: Closure<dyn FnMut(MouseEvent)>,
    _on_cancel: Closure<dyn FnMut(MouseEvent)>,
}

impl ConfirmDialog {
    /// Build the hidden dialog and mount it on `document.body`.
    pub(crate) fn build<T: 'static>(
        document: &Document,
        weak: Weak<RefCell<GridInner<T>>>,
    ) -> Result<Self> {
        let body = document
            .body()
            .ok_or_else(|| GridError::Dom("no body".to_string()))?;

        let overlay = create(document, "div")?
            .dyn_into::<HtmlElement>()
            .map_err(|_| GridError::Dom("overlay cast".to_string()))?;
        overlay.set_class_name("gridview-dialog-overlay");
        let style = overlay.style();
        let _ = style.set_property("display", "none");
        let _ = style.set_property("position", "fixed");
        let _ = style.set_property("inset", "0");
        let _ = style.set_property("background", "rgba(15, 23, 42, 0.4)");
        let _ = style.set_property("align-items", "center");
        let _ = style.set_property("justify-content", "center");
        let _ = style.set_property("z-index", "50");

        let panel = create(document, "div")?;
        panel.set_class_name("gridview-dialog");
        set_style(&panel, "background", "#ffffff");
        set_style(&panel, "border-radius", "8px");
        set_style(&panel, "box-shadow", "0 10px 25px rgba(0, 0, 0, 0.15)");
        set_style(&panel, "padding", "24px");
        set_style(&panel, "width", "100%");
        set_style(&panel, "max-width", "28rem");

        let title = create(document, "div")?;
        title.set_text_content(Some("Save Column Width Changes?"));
        set_style(&title, "font-weight", "600");
        set_style(&title, "font-size", "16px");
        set_style(&title, "margin-bottom", "8px");
        panel.append_child(&title)?;

        let description = create(document, "div")?;
        description.set_text_content(Some(
            "Do you want to save the column width changes you just made?",
        ));
        set_style(&description, "color", "#6b7280");
        set_style(&description, "font-size", "14px");
        set_style(&description, "margin-bottom", "16px");
        panel.append_child(&description)?;

        let footer = create(document, "div")?;
        set_style(&footer, "display", "flex");
        set_style(&footer, "justify-content", "flex-end");
        set_style(&footer, "gap", "8px");

        let cancel = create(document, "button")?;
        cancel.set_attribute("type", "button")?;
        cancel.set_text_content(Some("Cancel"));
        set_style(&cancel, "padding", "8px 16px");
        set_style(&cancel, "border-radius", "6px");
        set_style(&cancel, "border", "1px solid #e5e7eb");
        set_style(&cancel, "background", "transparent");
        set_style(&cancel, "cursor", "pointer");

        let save = create(document, "button")?;
        save.set_attribute("type", "button")?;
        save.set_text_content(Some("Save Changes"));
        set_style(&save, "padding", "8px 16px");
        set_style(&save, "border-radius", "6px");
        set_style(&save, "border", "none");
        set_style(&save, "background", "#0f172a");
        set_style(&save, "color", "#ffffff");
        set_style(&save, "cursor", "pointer");

        footer.append_child(&cancel)?;
        footer.append_child(&save)?;
        panel.append_child(&footer)?;
        overlay.append_child(&panel)?;
        body.append_child(&overlay)?;

        let save_weak = weak.clone();
        let on_save = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let Some(inner) = save_weak.upgrade() else {
                return;
            };
            let (callback, widths) = {
                let mut s = inner.borrow_mut();
                let widths = s.resize.save();
                if let Some(dialog) = &s.dialog {
                    dialog.close();
                }
                (s.props.on_column_widths_change.clone(), widths)
            };
            // Dispatch outside the borrow; the consumer may re-enter the
            // grid synchronously.
            if let (Some(callback), Some(widths)) = (callback, widths) {
                callback(&widths);
            }
        }) as Box<dyn FnMut(MouseEvent)>);
        save.add_event_listener_with_callback("click", on_save.as_ref().unchecked_ref())?;

        let cancel_weak = weak;
        let on_cancel = Closure::wrap(Box::new(move |_e: MouseEvent| {
            let Some(inner) = cancel_weak.upgrade() else {
                return;
            };
            {
                let mut s = inner.borrow_mut();
                s.resize.cancel();
                if let Some(dialog) = &s.dialog {
                    dialog.close();
                }
            }
            // Reverted widths must reach the screen.
            let _ = dom::render(&inner);
        }) as Box<dyn FnMut(MouseEvent)>);
        cancel.add_event_listener_with_callback("click", on_cancel.as_ref().unchecked_ref())?;

        Ok(Self {
            overlay,
            _on_save: on_save,
            _on_cancel: on_cancel,
        })
    }

    pub(crate) fn open(&self) {
        let _ = self.overlay.style().set_property("display", "flex");
    }

    pub(crate) fn close(&self) {
        let _ = self.overlay.style().set_property("display", "none");
    }
}

impl Drop for ConfirmDialog {
    fn drop(&mut self) {
        self.overlay.remove();
    }
}

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
