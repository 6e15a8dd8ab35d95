//! Last-known Document snapshot in localStorage.
//!
//! Write-through only: every commit mirrors the document here so a preview
//! tab or a later session has something to show before the remote load
//! answers. It is never authoritative once a remote load succeeds.

use crate::models::Document;
use crate::storage::{load_json_from_storage, save_json_to_storage, DOCUMENT_SNAPSHOT_KEY};
use crate::util::now_ms;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DocumentSnapshot {
    pub saved_ms: i64,
    pub document: Document,
}

pub(crate) fn save_document_snapshot(document: &Document) {
    let snap = DocumentSnapshot {
        saved_ms: now_ms(),
        document: document.clone(),
    };
    save_json_to_storage(DOCUMENT_SNAPSHOT_KEY, &snap);
}

pub(crate) fn load_document_snapshot() -> Option<DocumentSnapshot> {
    load_json_from_storage::<DocumentSnapshot>(DOCUMENT_SNAPSHOT_KEY)
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` +
// wasm-bindgen-test-runner).
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::storage::remove_from_storage;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_document_snapshot_roundtrip() {
        remove_from_storage(DOCUMENT_SNAPSHOT_KEY);
        assert!(load_document_snapshot().is_none());

        let mut doc = Document::default();
        doc.seo.title = "roundtrip".to_string();
        save_document_snapshot(&doc);

        let snap = load_document_snapshot().expect("snapshot should load back");
        assert_eq!(snap.document.seo.title, "roundtrip");
        assert!(snap.saved_ms > 0);

        remove_from_storage(DOCUMENT_SNAPSHOT_KEY);
    }
}
