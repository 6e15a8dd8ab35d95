use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Native `<select>` over `(value, label)` pairs, controlled like
/// [`super::Input`]. The app's selects (fonts, background type, networks,
/// shadows) are all closed small sets, so the platform widget is enough.
#[component]
pub fn NativeSelect(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] id: String,
    options: Vec<(String, String)>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input flex h-9 w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs outline-none md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let on_change_ev = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(select) = target.dyn_ref::<web_sys::HtmlSelectElement>() {
                on_change.run(select.value());
            }
        }
    };

    view! {
        <select
            data-name="NativeSelect"
            class=merged_class
            id=id
            prop:value=move || value.get()
            on:change=on_change_ev
        >
            {options
                .into_iter()
                .map(|(option_value, label)| {
                    let v = option_value.clone();
                    view! {
                        <option value=option_value selected=move || value.get() == v>
                            {label}
                        </option>
                    }
                })
                .collect_view()}
        </select>
    }
    .into_any()
}
