use crate::pages::EditorPage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    // Leptos CSR requires the `csr` feature on `leptos`; the editor is a
    // single route but keeps the router so the public page can live next
    // to it later.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("") view=EditorPage />
            </Routes>
        </Router>
    }
}
