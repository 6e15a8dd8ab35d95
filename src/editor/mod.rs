//! Central mutation dispatcher.
//!
//! Every edit flows through [`EditorController::commit`]: clone the session
//! document, apply one change, then fan the new value out to the store, the
//! local snapshot, the preview frame, the render scheduler and the debounced
//! saver. Handlers never mutate state directly.

pub(crate) mod render;

use crate::api::ImageHostClient;
use crate::cache::save_document_snapshot;
use crate::models::fields::{set_item_field, Field, ItemField};
use crate::models::{
    reorder_by_key, CompositeToken, Document, ItemKey, LinkItem, ListKind, Section, SocialItem,
    SongItem,
};
use crate::preview::{PreviewChannel, PreviewMessage};
use crate::state::doc_sync::SaveController;
use crate::state::{AppContext, ConfirmRequest, ContextMenuState, SessionPhase};
use crate::util::{now_ms, set_timeout};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::WindowListenerHandle;
use render::{RenderCause, RenderScheduler};
use std::sync::{Arc, Mutex};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub(crate) const HIGHLIGHT_MS: i32 = 1500;

/// Monotonic item-id source. Seeded from the wall clock so ids minted in a
/// new session never collide with ids already persisted, but strictly
/// increasing afterwards even when two items are created in the same
/// millisecond.
#[derive(Clone)]
pub(crate) struct IdMinter {
    next: Arc<Mutex<i64>>,
}

impl IdMinter {
    pub fn new() -> Self {
        Self::seeded(now_ms())
    }

    pub fn seeded(start: i64) -> Self {
        Self {
            next: Arc::new(Mutex::new(start)),
        }
    }

    pub fn mint(&self) -> i64 {
        match self.next.lock() {
            Ok(mut n) => {
                let id = *n;
                *n += 1;
                id
            }
            Err(_) => 0,
        }
    }
}

/// Where an uploaded image lands once hosted.
#[derive(Clone, Debug)]
pub(crate) enum ImageTarget {
    Field(Field),
    Item(ListKind, ItemKey, ItemField),
}

#[derive(Clone)]
pub(crate) struct EditorController {
    app: AppContext,
    saver: SaveController,
    preview: PreviewChannel,
    render: RenderScheduler,
    ids: IdMinter,
    _message_handle: StoredValue<Option<WindowListenerHandle>>,
}

impl EditorController {
    pub fn new(app: AppContext) -> Self {
        Self {
            saver: SaveController::new(app.clone()),
            preview: PreviewChannel::new(),
            render: RenderScheduler::new(app.0.store.get()),
            ids: IdMinter::new(),
            _message_handle: StoredValue::new(None),
            app,
        }
    }

    /// The signal the editor form renders from.
    pub fn render_doc(&self) -> RwSignal<Document> {
        self.render.doc()
    }

    pub fn preview(&self) -> PreviewChannel {
        self.preview
    }

    /// Seed everything after the initial load succeeded.
    pub fn session_loaded(&self, doc: Document) {
        self.app.0.store.commit(doc.clone());
        save_document_snapshot(&doc);
        self.render.reset(doc.clone());
        self.preview.post_update(&doc);
    }

    pub fn start_preview_listener(&self) {
        let s2 = self.clone();
        let handle = self.preview.start(move |message| s2.on_preview_message(message));
        self._message_handle.set_value(Some(handle));
    }

    fn commit(&self, doc: Document, cause: RenderCause) {
        let version = self.app.0.store.commit(doc.clone());
        save_document_snapshot(&doc);
        self.preview.post_update(&doc);
        self.render.request(doc.clone(), cause);
        self.saver.schedule(version, doc);
    }

    // ----- scalar fields -----

    pub fn edit_field(&self, field: Field, raw: &str) {
        let mut doc = self.app.0.store.get();
        field.set(&mut doc, raw);
        let cause = match field {
            // Select/slider/color changes are discrete, not keystrokes.
            Field::BackgroundType | Field::FontFamily | Field::PictureLayout | Field::Style(_, _) => {
                RenderCause::Structural
            }
            _ => RenderCause::Typing,
        };
        self.commit(doc, cause);
    }

    pub fn edit_item_field(&self, list: ListKind, key: &ItemKey, field: ItemField, raw: &str) {
        let mut doc = self.app.0.store.get();
        if set_item_field(&mut doc, list, key, field, raw) {
            self.commit(doc, RenderCause::Typing);
        }
    }

    // ----- rich text -----

    /// `document.execCommand` on the focused contenteditable region.
    pub fn exec_rich_text(&self, command: &str) {
        let Some(html_doc) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        else {
            return;
        };
        let _ = html_doc.exec_command(command);
    }

    /// Capture a contenteditable region's HTML back into the document. The
    /// region advertises its destination through a `data-field` attribute.
    pub fn capture_rich_text(&self, element: &web_sys::Element) {
        let Some(field) = element
            .get_attribute("data-field")
            .as_deref()
            .and_then(Field::parse)
        else {
            return;
        };
        self.edit_field(field, &element.inner_html());
    }

    // ----- list membership -----

    pub fn add_link(&self) {
        let mut doc = self.app.0.store.get();
        let order = doc.links.len() as i64;
        doc.links.push(LinkItem::new_link(self.ids.mint(), order));
        self.commit(doc, RenderCause::Structural);
    }

    pub fn add_header(&self) {
        let mut doc = self.app.0.store.get();
        let order = doc.links.len() as i64;
        doc.links.push(LinkItem::new_header(self.ids.mint(), order));
        self.commit(doc, RenderCause::Structural);
    }

    pub fn add_social(&self) {
        let mut doc = self.app.0.store.get();
        let order = doc.socials.len() as i64;
        doc.socials.push(SocialItem::new(self.ids.mint(), order));
        self.commit(doc, RenderCause::Structural);
    }

    pub fn add_song(&self) {
        let mut doc = self.app.0.store.get();
        doc.songs.push(SongItem {
            song_id: self.ids.mint().to_string(),
            order: doc.songs.len() as i64,
            ..SongItem::default()
        });
        self.commit(doc, RenderCause::Structural);
    }

    /// Ask before deleting. The deletion itself re-reads the session
    /// document at confirmation time: if the item vanished in between (a
    /// concurrent reorder, a remote refresh) the confirm is a silent no-op
    /// instead of deleting a neighbour.
    pub fn request_delete(&self, token: CompositeToken) {
        let s2 = self.clone();
        let request = ConfirmRequest::question(
            "Êtes-vous sûr(e) ?",
            "Cette action est irréversible.",
            Callback::new(move |_| s2.delete_now(&token)),
        );
        self.app.0.context_menu.set(None);
        self.app.0.confirm.set(Some(request));
    }

    fn delete_now(&self, token: &CompositeToken) {
        let mut doc = self.app.0.store.get();
        if !doc.contains_key(token.list, &token.key) {
            return;
        }
        match (token.list, &token.key) {
            (ListKind::Links, ItemKey::Id(id)) => doc.links.retain(|l| l.id != *id),
            (ListKind::Socials, ItemKey::Id(id)) => doc.socials.retain(|s| s.id != *id),
            (ListKind::Songs, ItemKey::Track(t)) => doc.songs.retain(|s| &s.song_id != t),
            _ => return,
        }
        self.commit(doc, RenderCause::Structural);
    }

    // ----- ordering -----

    /// Move the dragged item in front of the target (same list only); no
    /// target means "dropped past the end".
    pub fn reorder(&self, dragged: &CompositeToken, target: Option<&CompositeToken>) {
        if let Some(target) = target {
            if target.list != dragged.list {
                return;
            }
        }
        let target_key = target.map(|t| &t.key);

        let mut doc = self.app.0.store.get();
        match dragged.list {
            ListKind::Links => {
                doc.links = reorder_by_key(doc.links, &dragged.key, target_key, |l| {
                    ItemKey::Id(l.id)
                });
                for (i, item) in doc.links.iter_mut().enumerate() {
                    item.order = i as i64;
                }
            }
            ListKind::Socials => {
                doc.socials = reorder_by_key(doc.socials, &dragged.key, target_key, |s| {
                    ItemKey::Id(s.id)
                });
                for (i, item) in doc.socials.iter_mut().enumerate() {
                    item.order = i as i64;
                }
            }
            ListKind::Songs => {
                doc.songs = reorder_by_key(doc.songs, &dragged.key, target_key, |s| {
                    ItemKey::Track(s.song_id.clone())
                });
                for (i, item) in doc.songs.iter_mut().enumerate() {
                    item.order = i as i64;
                }
            }
        }
        self.commit(doc, RenderCause::Structural);
    }

    /// Swap a section with its neighbour in the page ordering.
    pub fn move_section(&self, section: Section, up: bool) {
        let mut doc = self.app.0.store.get();
        let Some(index) = doc.section_order.iter().position(|s| *s == section) else {
            return;
        };
        let swap_with = if up {
            index.checked_sub(1)
        } else if index + 1 < doc.section_order.len() {
            Some(index + 1)
        } else {
            None
        };
        let Some(swap_with) = swap_with else { return };
        doc.section_order.swap(index, swap_with);
        self.commit(doc, RenderCause::Structural);
    }

    // ----- preview messages -----

    fn on_preview_message(&self, message: PreviewMessage) {
        // Messages can arrive while the remote load is still in flight;
        // acting on them would edit the placeholder document and mirror it
        // to storage.
        if self.app.0.phase.get_untracked() != SessionPhase::Ready {
            return;
        }
        match message {
            PreviewMessage::ShowContextMenu { id, x, y } => {
                let Some(token) = CompositeToken::parse(&id) else {
                    return;
                };
                let (x, y) = self.preview.to_page_coords(x, y);
                self.app.0.context_menu.set(Some(ContextMenuState { token, x, y }));
            }
            PreviewMessage::Reorder {
                dragged_id,
                target_id,
            } => {
                let Some(dragged) = CompositeToken::parse(&dragged_id) else {
                    return;
                };
                let target = target_id.as_deref().and_then(CompositeToken::parse);
                self.reorder(&dragged, target.as_ref());
            }
        }
    }

    /// Scroll the editor row for `token` into view and flash it.
    pub fn jump_to_item(&self, token: &CompositeToken) {
        self.app.0.context_menu.set(None);

        let row_id = token.to_string();
        if let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&row_id))
        {
            element.scroll_into_view();
        }

        self.app.0.highlight.set(Some(row_id.clone()));
        let highlight = self.app.0.highlight;
        set_timeout(HIGHLIGHT_MS, move || {
            if highlight.get_untracked().as_deref() == Some(row_id.as_str()) {
                highlight.set(None);
            }
        });
    }

    // ----- images -----

    /// Read the picked file as a base64 data URL, push it through the image
    /// host when one is configured (inline data URL otherwise), and write
    /// the resulting URL into `target`. A failed read or upload leaves the
    /// previous image untouched and raises an alert.
    pub fn upload_image(&self, file: web_sys::File, target: ImageTarget) {
        let s2 = self.clone();
        read_as_data_url(file, move |data_url| {
            let Some(data_url) = data_url else {
                s2.app.0.confirm.set(Some(read_failure_alert()));
                return;
            };
            match ImageHostClient::from_config(&s2.app.0.api_client.config) {
                Some(host) => {
                    let s3 = s2.clone();
                    spawn_local(async move {
                        match host.upload(&data_url).await {
                            Ok(url) => s3.apply_image(&target, &url),
                            Err(e) => s3.app.0.confirm.set(Some(ConfirmRequest::alert(
                                "Téléversement impossible",
                                &e.to_string(),
                            ))),
                        }
                    });
                }
                None => s2.apply_image(&target, &data_url),
            }
        });
    }

    fn apply_image(&self, target: &ImageTarget, url: &str) {
        match target {
            ImageTarget::Field(field) => self.edit_field(*field, url),
            ImageTarget::Item(list, key, field) => {
                let mut doc = self.app.0.store.get();
                if set_item_field(&mut doc, *list, key, *field, url) {
                    self.commit(doc, RenderCause::Structural);
                }
            }
        }
    }
}

fn read_failure_alert() -> ConfirmRequest {
    ConfirmRequest::alert("Erreur", "Le fichier n'a pas pu être lu.")
}

/// `onloadend` fires after success and failure alike; on failure the
/// reader's result is null and the callback sees `None`.
fn read_as_data_url(file: web_sys::File, on_done: impl FnOnce(Option<String>) + 'static) {
    let Ok(reader) = web_sys::FileReader::new() else {
        on_done(None);
        return;
    };
    let r2 = reader.clone();
    let cb = Closure::once(move |_ev: web_sys::ProgressEvent| {
        on_done(r2.result().ok().and_then(|v| v.as_string()));
    });
    reader.set_onloadend(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
    let _ = reader.read_as_data_url(&file);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_minter_is_strictly_increasing() {
        let minter = IdMinter::seeded(1_724_400_000_000);
        let a = minter.mint();
        let b = minter.mint();
        let c = minter.mint();
        assert_eq!(a, 1_724_400_000_000);
        assert!(a < b && b < c);
    }

    #[test]
    fn test_id_minter_clones_share_the_sequence() {
        let minter = IdMinter::seeded(10);
        let clone = minter.clone();
        assert_eq!(minter.mint(), 10);
        assert_eq!(clone.mint(), 11);
        assert_eq!(minter.mint(), 12);
    }

    #[test]
    fn test_read_failure_raises_a_blocking_alert() {
        let alert = read_failure_alert();
        assert_eq!(alert.title, "Erreur");
        assert_eq!(alert.text, "Le fichier n'a pas pu être lu.");
        assert!(!alert.with_cancel);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::models::LinkItem;
    use crate::state::AppState;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_preview_messages_are_ignored_until_the_session_is_ready() {
        let app = AppContext(AppState::new());
        let controller = EditorController::new(app.clone());

        let mut doc = Document::default();
        doc.links.push(LinkItem::new_link(1, 0));
        doc.links.push(LinkItem::new_link(2, 1));
        app.0.store.commit(doc);

        // Still loading: the reorder must not touch the document.
        controller.on_preview_message(PreviewMessage::Reorder {
            dragged_id: "links.2".to_string(),
            target_id: Some("links.1".to_string()),
        });
        assert_eq!(app.0.store.get().links[0].id, 1);

        app.0.phase.set(SessionPhase::Ready);
        controller.on_preview_message(PreviewMessage::Reorder {
            dragged_id: "links.2".to_string(),
            target_id: Some("links.1".to_string()),
        });
        assert_eq!(app.0.store.get().links[0].id, 2);
    }
}
