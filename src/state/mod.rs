pub(crate) mod doc_sync;

use crate::api::ApiClient;
use crate::models::{CompositeToken, Document};
use leptos::prelude::*;

/// Initialization outcome. A load failure is fatal to the session: the
/// form never mounts and no mutation handlers attach.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SessionPhase {
    Loading,
    Ready,
    Failed(String),
}

/// The single status line above the editor pane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum SaveStatus {
    Loading,
    Ready,
    Saving,
    Saved,
    Error(String),
}

impl SaveStatus {
    pub fn label(&self) -> String {
        match self {
            Self::Loading => "Chargement...".to_string(),
            Self::Ready => "Prêt".to_string(),
            Self::Saving => "Sauvegarde...".to_string(),
            Self::Saved => "Modifications enregistrées".to_string(),
            Self::Error(msg) => format!("Erreur: {msg}"),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Loading | Self::Saving => "text-muted-foreground",
            Self::Ready | Self::Saved => "text-success",
            Self::Error(_) => "text-destructive",
        }
    }
}

/// The session's shared Document, copy-on-write. Every commit replaces the
/// whole value and bumps a monotonic version; consumers (render, preview,
/// save) only ever observe complete documents.
#[derive(Clone, Copy)]
pub(crate) struct DocStore {
    doc: RwSignal<Document>,
    version: RwSignal<u64>,
}

impl DocStore {
    pub fn new() -> Self {
        Self {
            doc: RwSignal::new(Document::default()),
            version: RwSignal::new(0),
        }
    }

    /// Untracked snapshot, the base for the next mutation's clone.
    pub fn get(&self) -> Document {
        self.doc.get_untracked()
    }

    /// Tracked read for reactive consumers.
    pub fn subscribe(&self) -> Document {
        self.doc.get()
    }

    pub fn version(&self) -> u64 {
        self.version.get_untracked()
    }

    /// Replace the shared document and return the new version.
    pub fn commit(&self, doc: Document) -> u64 {
        let next = self.version.get_untracked() + 1;
        self.version.set(next);
        self.doc.set(doc);
        next
    }
}

/// A context menu requested from inside the preview surface, already
/// translated into host-page coordinates.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ContextMenuState {
    pub token: CompositeToken,
    pub x: f64,
    pub y: f64,
}

/// A blocking question for the user. `on_confirm` runs only on explicit
/// confirmation; dismissal runs nothing.
#[derive(Clone)]
pub(crate) struct ConfirmRequest {
    pub title: String,
    pub text: String,
    pub confirm_label: &'static str,
    /// When false the dialog is a plain alert (single button).
    pub with_cancel: bool,
    pub on_confirm: Callback<()>,
}

impl ConfirmRequest {
    pub fn question(title: &str, text: &str, on_confirm: Callback<()>) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            confirm_label: "Confirmer",
            with_cancel: true,
            on_confirm,
        }
    }

    pub fn alert(title: &str, text: &str) -> Self {
        Self {
            title: title.to_string(),
            text: text.to_string(),
            confirm_label: "OK",
            with_cancel: false,
            on_confirm: Callback::new(|_| {}),
        }
    }
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub api_client: ApiClient,
    pub store: DocStore,
    pub phase: RwSignal<SessionPhase>,
    pub save_status: RwSignal<SaveStatus>,
    pub context_menu: RwSignal<Option<ContextMenuState>>,
    pub confirm: RwSignal<Option<ConfirmRequest>>,
    /// Element id currently carrying the transient jump highlight.
    pub highlight: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: ApiClient::from_env(),
            store: DocStore::new(),
            phase: RwSignal::new(SessionPhase::Loading),
            save_status: RwSignal::new(SaveStatus::Loading),
            context_menu: RwSignal::new(None),
            confirm: RwSignal::new(None),
            highlight: RwSignal::new(None),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_status_labels_are_french() {
        assert_eq!(SaveStatus::Loading.label(), "Chargement...");
        assert_eq!(SaveStatus::Ready.label(), "Prêt");
        assert_eq!(SaveStatus::Saving.label(), "Sauvegarde...");
        assert_eq!(SaveStatus::Saved.label(), "Modifications enregistrées");
        assert_eq!(
            SaveStatus::Error("boom".to_string()).label(),
            "Erreur: boom"
        );
    }

    #[test]
    fn test_alert_request_has_no_cancel_button() {
        let alert = ConfirmRequest::alert("Oups", "raté");
        assert!(!alert.with_cancel);
        assert_eq!(alert.confirm_label, "OK");

        let question = ConfirmRequest::question("Supprimer", "Sûr ?", Callback::new(|_| {}));
        assert!(question.with_cancel);
        assert_eq!(question.confirm_label, "Confirmer");
    }
}
