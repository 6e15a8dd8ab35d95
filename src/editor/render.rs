//! Re-render scheduling for the editor form.
//!
//! The form reads its own `render_doc` signal rather than the session
//! store directly: keystrokes refresh it on a short debounce so typing
//! stays smooth, while structural edits (add/delete/reorder) refresh it
//! immediately. Every refresh runs under a focus capture/restore pair so
//! a rebuilt list cannot strand the caret.

use crate::models::Document;
use crate::util::{clear_timeout, set_timeout};
use leptos::prelude::*;
use std::sync::{Arc, Mutex};
use wasm_bindgen::JsCast;

pub(crate) const TYPING_RENDER_DEBOUNCE_MS: i32 = 300;
pub(crate) const EDITOR_PANE_ID: &str = "editor-pane";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenderCause {
    /// Text typed into a bound field; coalesced.
    Typing,
    /// List membership or ordering changed; applied immediately.
    Structural,
}

/// Snapshot of where the user's attention was before a refresh.
#[derive(Debug, Clone)]
pub(crate) struct FocusState {
    element_id: String,
    selection: Option<(u32, u32)>,
    pane_scroll_top: i32,
}

impl FocusState {
    /// Capture the active element (by id) plus its text selection and the
    /// editor pane's scroll offset. `None` when nothing focusable with an
    /// id holds focus.
    pub fn capture() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let active = document.active_element()?;
        let element_id = active.id();
        if element_id.is_empty() {
            return None;
        }

        let selection = if let Some(input) = active.dyn_ref::<web_sys::HtmlInputElement>() {
            match (input.selection_start(), input.selection_end()) {
                (Ok(Some(start)), Ok(Some(end))) => Some((start, end)),
                _ => None,
            }
        } else if let Some(area) = active.dyn_ref::<web_sys::HtmlTextAreaElement>() {
            match (area.selection_start(), area.selection_end()) {
                (Ok(Some(start)), Ok(Some(end))) => Some((start, end)),
                _ => None,
            }
        } else {
            None
        };

        let pane_scroll_top = document
            .get_element_by_id(EDITOR_PANE_ID)
            .map(|pane| pane.scroll_top())
            .unwrap_or(0);

        Some(Self {
            element_id,
            selection,
            pane_scroll_top,
        })
    }

    /// Re-focus the captured element once the refreshed DOM is in place.
    pub fn restore(self) {
        set_timeout(0, move || {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(element) = document.get_element_by_id(&self.element_id) {
                if let Some(html) = element.dyn_ref::<web_sys::HtmlElement>() {
                    let _ = html.focus();
                }
                if let Some((start, end)) = self.selection {
                    if let Some(input) = element.dyn_ref::<web_sys::HtmlInputElement>() {
                        let _ = input.set_selection_range(start, end);
                    } else if let Some(area) = element.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                        let _ = area.set_selection_range(start, end);
                    }
                }
            }
            if let Some(pane) = document.get_element_by_id(EDITOR_PANE_ID) {
                pane.set_scroll_top(self.pane_scroll_top);
            }
        });
    }
}

#[derive(Clone)]
pub(crate) struct RenderScheduler {
    render_doc: RwSignal<Document>,
    timer: Arc<Mutex<Option<i32>>>,
}

impl RenderScheduler {
    pub fn new(initial: Document) -> Self {
        Self {
            render_doc: RwSignal::new(initial),
            timer: Arc::new(Mutex::new(None)),
        }
    }

    /// The signal the form renders from.
    pub fn doc(&self) -> RwSignal<Document> {
        self.render_doc
    }

    pub fn request(&self, doc: Document, cause: RenderCause) {
        match cause {
            RenderCause::Typing => {
                if let Ok(mut timer) = self.timer.lock() {
                    if let Some(handle) = timer.take() {
                        clear_timeout(handle);
                    }
                    let s2 = self.clone();
                    *timer = Some(set_timeout(TYPING_RENDER_DEBOUNCE_MS, move || {
                        s2.apply(doc);
                    }));
                }
            }
            RenderCause::Structural => {
                // A pending typing refresh is superseded by this one.
                if let Ok(mut timer) = self.timer.lock() {
                    if let Some(handle) = timer.take() {
                        clear_timeout(handle);
                    }
                }
                self.apply(doc);
            }
        }
    }

    /// Seed after the initial load; nothing has focus yet.
    pub fn reset(&self, doc: Document) {
        self.render_doc.set(doc);
    }

    fn apply(&self, doc: Document) {
        let focus = FocusState::capture();
        self.render_doc.set(doc);
        if let Some(focus) = focus {
            focus.restore();
        }
    }
}
