//! Two-way bridge to the live preview iframe.
//!
//! Outbound: every committed document is pushed into the frame as a
//! `{"type":"update","payload":...}` message so the preview re-renders
//! without a reload. Inbound: the frame reports right-clicks on items and
//! drag-reorder gestures; both carry composite item tokens, and inbound
//! coordinates are frame-local until translated.

use crate::models::Document;
use leptos::ev;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsCast;

pub(crate) const PREVIEW_FRAME_ID: &str = "preview-frame";

#[derive(Debug, Serialize)]
struct UpdateEnvelope<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    payload: &'a Document,
}

/// Messages the preview frame posts back to the editor window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub(crate) enum PreviewMessage {
    #[serde(rename_all = "camelCase")]
    ShowContextMenu { id: String, x: f64, y: f64 },
    #[serde(rename_all = "camelCase")]
    Reorder {
        dragged_id: String,
        target_id: Option<String>,
    },
}

/// Decode an inbound frame message; anything unrecognized is dropped.
pub(crate) fn parse_preview_message(raw: &str) -> Option<PreviewMessage> {
    serde_json::from_str(raw).ok()
}

#[derive(Clone, Copy)]
pub(crate) struct PreviewChannel;

impl PreviewChannel {
    pub fn new() -> Self {
        Self
    }

    fn frame(&self) -> Option<web_sys::HtmlIFrameElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(PREVIEW_FRAME_ID)?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .ok()
    }

    /// Push the current document into the frame. Silently a no-op while
    /// the frame is not mounted or not yet loaded.
    pub fn post_update(&self, doc: &Document) {
        let Some(frame_window) = self.frame().and_then(|f| f.content_window()) else {
            return;
        };
        let Ok(json) = serde_json::to_string(&UpdateEnvelope {
            kind: "update",
            payload: doc,
        }) else {
            return;
        };
        let Ok(value) = js_sys::JSON::parse(&json) else {
            return;
        };
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_else(|| "*".to_string());
        let _ = frame_window.post_message(&value, &origin);
    }

    /// Frame-local coordinates -> editor-page coordinates.
    pub fn to_page_coords(&self, x: f64, y: f64) -> (f64, f64) {
        match self.frame() {
            Some(frame) => {
                let rect = frame.get_bounding_client_rect();
                (x + rect.left(), y + rect.top())
            }
            None => (x, y),
        }
    }

    /// Listen for messages posted by the frame. Cross-origin messages are
    /// ignored.
    pub fn start(&self, on_message: impl Fn(PreviewMessage) + 'static) -> WindowListenerHandle {
        window_event_listener(ev::message, move |ev: web_sys::MessageEvent| {
            let own_origin = web_sys::window().and_then(|w| w.location().origin().ok());
            if own_origin.is_some_and(|origin| origin != ev.origin()) {
                return;
            }
            let data = ev.data();
            let raw = match data.as_string() {
                Some(s) => s,
                None => match js_sys::JSON::stringify(&data).ok().and_then(|s| s.as_string()) {
                    Some(s) => s,
                    None => return,
                },
            };
            if let Some(message) = parse_preview_message(&raw) {
                on_message(message);
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_menu_message() {
        let raw = r#"{"type":"showContextMenu","payload":{"id":"links.1724400000001","x":40.5,"y":120.0}}"#;
        assert_eq!(
            parse_preview_message(raw),
            Some(PreviewMessage::ShowContextMenu {
                id: "links.1724400000001".to_string(),
                x: 40.5,
                y: 120.0,
            })
        );
    }

    #[test]
    fn test_parse_reorder_message_with_and_without_target() {
        let raw = r#"{"type":"reorder","payload":{"draggedId":"links.3","targetId":"links.7"}}"#;
        assert_eq!(
            parse_preview_message(raw),
            Some(PreviewMessage::Reorder {
                dragged_id: "links.3".to_string(),
                target_id: Some("links.7".to_string()),
            })
        );

        // Dropping past the end of the list comes through with no target.
        let raw = r#"{"type":"reorder","payload":{"draggedId":"songs.track-9","targetId":null}}"#;
        assert_eq!(
            parse_preview_message(raw),
            Some(PreviewMessage::Reorder {
                dragged_id: "songs.track-9".to_string(),
                target_id: None,
            })
        );
    }

    #[test]
    fn test_unknown_message_is_dropped() {
        assert_eq!(parse_preview_message(r#"{"type":"ping"}"#), None);
        assert_eq!(parse_preview_message("not json"), None);
    }

    #[test]
    fn test_update_envelope_carries_the_committed_document() {
        let mut doc = Document::default();
        doc.profile.title = "Léa".to_string();

        let json = serde_json::to_string(&UpdateEnvelope {
            kind: "update",
            payload: &doc,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "update");
        // The payload is the document, byte-for-byte the save wire format.
        assert_eq!(value["payload"], serde_json::to_value(&doc).unwrap());
    }
}
