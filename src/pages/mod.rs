use crate::components::ui::{
    Alert, AlertDescription, AlertTitle, Button, ButtonSize, ButtonVariant, Card, CardAction,
    CardContent, CardDescription, CardHeader, CardTitle, Input, Label, NativeSelect, Spinner,
    Textarea,
};
use crate::editor::render::EDITOR_PANE_ID;
use crate::editor::{EditorController, ImageTarget};
use crate::models::fields::{Field, ItemField, StyleField, StyleTarget};
use crate::cache::load_document_snapshot;
use crate::models::{
    merge_defaults, BackgroundKind, CompositeToken, ItemKey, LinkKind, ListKind, PictureLayout,
    Section, ShadowType, SocialNetwork, FONT_OPTIONS,
};
use crate::preview::PREVIEW_FRAME_ID;
use crate::state::{AppContext, SaveStatus, SessionPhase};
use icons::{ChevronDown, ChevronUp, X};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

const PREVIEW_SRC: &str = "/index.html";

#[component]
pub fn EditorPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let controller = EditorController::new(app_state.clone());
    controller.start_preview_listener();

    // Initial load. A failure here is fatal: the form never mounts, so no
    // edit can ever overwrite the remote document with an empty one.
    {
        let app_state = app_state.clone();
        let controller = controller.clone();
        spawn_local(async move {
            match app_state.0.api_client.fetch_document().await {
                Ok(value) => {
                    let doc = merge_defaults(Some(value));
                    // Seed the document before the form mounts.
                    controller.session_loaded(doc);
                    app_state.0.phase.set(SessionPhase::Ready);
                    app_state.0.save_status.set(SaveStatus::Ready);
                }
                Err(e) => {
                    app_state.0.phase.set(SessionPhase::Failed(e.to_string()));
                    app_state.0.save_status.set(SaveStatus::Error(e.to_string()));
                }
            }
        });
    }

    let phase = app_state.0.phase;
    let save_status = app_state.0.save_status;

    let on_frame_load = {
        let app_state = app_state.clone();
        let controller = controller.clone();
        move |_| {
            if app_state.0.phase.get_untracked() == SessionPhase::Ready {
                controller.preview().post_update(&app_state.0.store.get());
            } else if let Some(snap) = load_document_snapshot() {
                // Last-known page while the remote load is in flight.
                controller.preview().post_update(&snap.document);
            }
        }
    };

    let c = controller.clone();
    view! {
        <div class="flex h-screen flex-col bg-background text-foreground">
            <header class="flex items-center justify-between border-b px-6 py-3">
                <h1 class="text-lg font-semibold">"Biopage Studio"</h1>
                <span
                    class=move || format!("text-sm {}", save_status.get().css_class())
                    data-name="SaveStatus"
                >
                    {move || save_status.get().label()}
                </span>
            </header>

            <div class="flex min-h-0 flex-1">
                <main id=EDITOR_PANE_ID class="w-full max-w-xl overflow-y-auto border-r p-4">
                    {move || match phase.get() {
                        SessionPhase::Loading => {
                            view! {
                                <div class="flex items-center gap-2 px-2 py-8 text-sm text-muted-foreground">
                                    <Spinner />
                                    "Chargement..."
                                </div>
                            }
                                .into_any()
                        }
                        SessionPhase::Failed(message) => {
                            view! {
                                <Alert class="border-destructive text-destructive">
                                    <AlertTitle>"Impossible de charger la configuration."</AlertTitle>
                                    <AlertDescription>{message}</AlertDescription>
                                </Alert>
                            }
                                .into_any()
                        }
                        SessionPhase::Ready => {
                            let c = c.clone();
                            view! { <EditorForm controller=c /> }.into_any()
                        }
                    }}
                </main>

                <aside class="hidden flex-1 bg-muted/30 p-6 lg:flex lg:items-center lg:justify-center">
                    <div class="h-[640px] w-[320px] overflow-hidden rounded-[2rem] border-8 border-foreground/80 shadow-xl">
                        <iframe
                            id=PREVIEW_FRAME_ID
                            src=PREVIEW_SRC
                            title="Aperçu"
                            class="h-full w-full border-0 bg-white"
                            on:load=on_frame_load
                        ></iframe>
                    </div>
                </aside>
            </div>

            <ContextMenuOverlay controller=controller.clone() />
            <ConfirmDialog />
        </div>
    }
}

#[component]
fn EditorForm(controller: EditorController) -> impl IntoView {
    let doc = controller.render_doc();

    let ordered_sections = move || doc.get().section_order;

    let c_sections = controller.clone();
    view! {
        <div class="flex flex-col gap-4 pb-16">
            <ProfileCard controller=controller.clone() />
            <AppearanceCard controller=controller.clone() />
            {move || {
                let c = c_sections.clone();
                ordered_sections()
                    .into_iter()
                    .map(|section| match section {
                        Section::Socials => {
                            view! { <SocialsCard controller=c.clone() /> }.into_any()
                        }
                        Section::Songs => view! { <SongsCard controller=c.clone() /> }.into_any(),
                        Section::Links => view! { <LinksCard controller=c.clone() /> }.into_any(),
                    })
                    .collect_view()
            }}
            <SeoCard controller=controller.clone() />
        </div>
    }
}

// ----- generic field rows -----

#[component]
fn TextField(
    label: &'static str,
    #[prop(into)] id: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5">
            <Label html_for=id.clone()>{label}</Label>
            <Input id=id value=value on_change=on_change />
        </div>
    }
}

#[component]
fn ColorField(
    label: &'static str,
    #[prop(into)] id: String,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between gap-4">
            <Label html_for=id.clone()>{label}</Label>
            <Input r#type="color" id=id class="h-9 w-16 p-1" value=value on_change=on_change />
        </div>
    }
}

#[component]
fn RangeField(
    label: &'static str,
    #[prop(into)] id: String,
    min: &'static str,
    max: &'static str,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col gap-1.5">
            <div class="flex items-center justify-between">
                <Label html_for=id.clone()>{label}</Label>
                <span class="text-xs text-muted-foreground">{move || value.get()}</span>
            </div>
            <Input
                r#type="range"
                id=id
                min=min.to_string()
                max=max.to_string()
                class="h-4 p-0"
                value=value
                on_change=on_change
            />
        </div>
    }
}

/// `<input type="file">` that hands the picked image to the controller.
#[component]
fn ImagePicker(
    controller: EditorController,
    target: ImageTarget,
    #[prop(into)] id: String,
) -> impl IntoView {
    let on_pick = move |ev: web_sys::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            controller.upload_image(file, target.clone());
        }
        // Allow re-picking the same file.
        input.set_value("");
    };

    view! {
        <input
            type="file"
            accept="image/*"
            id=id
            class="text-sm file:mr-3 file:rounded-md file:border-0 file:bg-secondary file:px-3 file:py-1.5 file:text-sm hover:file:bg-secondary/80"
            on:change=on_pick
        />
    }
}

fn field_signal(doc: RwSignal<crate::models::Document>, field: Field) -> Signal<String> {
    Signal::derive(move || field.get(&doc.get()))
}

fn field_callback(controller: &EditorController, field: Field) -> Callback<String> {
    let c = controller.clone();
    Callback::new(move |value: String| c.edit_field(field, &value))
}

// ----- profile -----

#[component]
fn ProfileCard(controller: EditorController) -> impl IntoView {
    let doc = controller.render_doc();

    let picture = Signal::derive(move || doc.get().profile.picture_url);
    let initial_description = doc.get_untracked().profile.description;
    let layout_options: Vec<(String, String)> = [PictureLayout::Circle, PictureLayout::Full]
        .iter()
        .map(|l| (l.to_string(), l.label().to_string()))
        .collect();

    let c_bold = controller.clone();
    let c_italic = controller.clone();
    let c_underline = controller.clone();
    let c_capture = controller.clone();
    let on_description_input = move |ev: web_sys::Event| {
        if let Some(element) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            c_capture.capture_rich_text(&element);
        }
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Profil"</CardTitle>
            </CardHeader>
            <CardContent>
                <div class="flex items-center gap-4">
                    <Show when=move || !picture.get().is_empty()>
                        <img
                            src=move || picture.get()
                            alt="Photo de profil"
                            class="size-16 rounded-full object-cover"
                        />
                    </Show>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="profile-picture">"Photo de profil"</Label>
                        <ImagePicker
                            controller=controller.clone()
                            target=ImageTarget::Field(Field::ProfilePictureUrl)
                            id="profile-picture"
                        />
                    </div>
                </div>

                <div class="flex flex-col gap-1.5">
                    <Label html_for="picture-layout">"Mise en page de la photo"</Label>
                    <NativeSelect
                        id="picture-layout"
                        options=layout_options
                        value=field_signal(doc, Field::PictureLayout)
                        on_change=field_callback(&controller, Field::PictureLayout)
                    />
                </div>

                <TextField
                    label="Titre"
                    id="profile-title"
                    value=field_signal(doc, Field::ProfileTitle)
                    on_change=field_callback(&controller, Field::ProfileTitle)
                />

                <div class="flex flex-col gap-1.5">
                    <Label html_for="profile-description">"Description"</Label>
                    <div class="flex gap-1">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:mousedown=|ev| ev.prevent_default()
                            on:click=move |_| c_bold.exec_rich_text("bold")
                        >
                            <b>"G"</b>
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:mousedown=|ev| ev.prevent_default()
                            on:click=move |_| c_italic.exec_rich_text("italic")
                        >
                            <i>"I"</i>
                        </Button>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:mousedown=|ev| ev.prevent_default()
                            on:click=move |_| c_underline.exec_rich_text("underline")
                        >
                            <u>"S"</u>
                        </Button>
                    </div>
                    // Uncontrolled on purpose: re-rendering a contenteditable
                    // region would drop the caret. Edits flow out through
                    // data-field capture.
                    <div
                        id="profile-description"
                        contenteditable="true"
                        data-field="profile.description"
                        class="min-h-20 rounded-md border border-input px-3 py-2 text-sm outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50"
                        inner_html=initial_description
                        on:input=on_description_input
                    ></div>
                </div>
            </CardContent>
        </Card>
    }
}

// ----- appearance -----

#[component]
fn AppearanceCard(controller: EditorController) -> impl IntoView {
    let doc = controller.render_doc();

    // Option value is the CSS stack stored in the document; the label is
    // the human name.
    let font_options: Vec<(String, String)> = FONT_OPTIONS
        .iter()
        .map(|(label, stack)| (stack.to_string(), label.to_string()))
        .collect();
    let background_options: Vec<(String, String)> = vec![
        ("solid".to_string(), "Couleur unie".to_string()),
        ("gradient".to_string(), "Dégradé".to_string()),
        ("image".to_string(), "Image".to_string()),
    ];

    let c_bg = controller.clone();
    let background_editor = move || {
        let c = c_bg.clone();
        match doc.get().appearance.background.kind {
            BackgroundKind::Solid => view! {
                <ColorField
                    label="Couleur de fond"
                    id="background-value"
                    value=field_signal(doc, Field::BackgroundValue)
                    on_change=field_callback(&c, Field::BackgroundValue)
                />
            }
            .into_any(),
            BackgroundKind::Gradient => view! {
                <ColorField
                    label="Première couleur"
                    id="background-stop-0"
                    value=field_signal(doc, Field::BackgroundStop(0))
                    on_change=field_callback(&c, Field::BackgroundStop(0))
                />
                <ColorField
                    label="Seconde couleur"
                    id="background-stop-1"
                    value=field_signal(doc, Field::BackgroundStop(1))
                    on_change=field_callback(&c, Field::BackgroundStop(1))
                />
            }
            .into_any(),
            BackgroundKind::Image => view! {
                <TextField
                    label="URL de l'image de fond"
                    id="background-value"
                    value=field_signal(doc, Field::BackgroundValue)
                    on_change=field_callback(&c, Field::BackgroundValue)
                />
            }
            .into_any(),
        }
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Apparence"</CardTitle>
            </CardHeader>
            <CardContent>
                <div class="flex flex-col gap-1.5">
                    <Label html_for="font-family">"Police"</Label>
                    <NativeSelect
                        id="font-family"
                        options=font_options
                        value=field_signal(doc, Field::FontFamily)
                        on_change=field_callback(&controller, Field::FontFamily)
                    />
                </div>

                <ColorField
                    label="Couleur du texte"
                    id="text-color"
                    value=field_signal(doc, Field::TextColor)
                    on_change=field_callback(&controller, Field::TextColor)
                />
                <ColorField
                    label="Couleur du titre"
                    id="title-color"
                    value=field_signal(doc, Field::TitleColor)
                    on_change=field_callback(&controller, Field::TitleColor)
                />
                <ColorField
                    label="Couleur de la description"
                    id="description-color"
                    value=field_signal(doc, Field::DescriptionColor)
                    on_change=field_callback(&controller, Field::DescriptionColor)
                />
                <ColorField
                    label="Couleur des icônes sociales"
                    id="social-icons-color"
                    value=field_signal(doc, Field::SocialIconsColor)
                    on_change=field_callback(&controller, Field::SocialIconsColor)
                />

                <div class="flex flex-col gap-1.5">
                    <Label html_for="background-type">"Type de fond"</Label>
                    <NativeSelect
                        id="background-type"
                        options=background_options
                        value=field_signal(doc, Field::BackgroundType)
                        on_change=field_callback(&controller, Field::BackgroundType)
                    />
                </div>
                {background_editor}

                <StyleSection
                    controller=controller.clone()
                    target=StyleTarget::Link
                    title="Style des liens"
                />
                <StyleSection
                    controller=controller.clone()
                    target=StyleTarget::Header
                    title="Style des en-têtes"
                />
            </CardContent>
        </Card>
    }
}

#[component]
fn StyleSection(
    controller: EditorController,
    target: StyleTarget,
    title: &'static str,
) -> impl IntoView {
    let doc = controller.render_doc();
    let prefix = match target {
        StyleTarget::Link => "link",
        StyleTarget::Header => "header",
    };

    let style = |field: StyleField| Field::Style(target, field);
    let shadow_options: Vec<(String, String)> = [ShadowType::None, ShadowType::Soft, ShadowType::Strong]
        .iter()
        .map(|t| (t.to_string(), t.label().to_string()))
        .collect();

    view! {
        <div class="flex flex-col gap-4 rounded-lg border p-4">
            <h3 class="text-sm font-semibold">{title}</h3>

            <ColorField
                label="Couleur de fond"
                id=format!("{prefix}-background-color")
                value=field_signal(doc, style(StyleField::BackgroundColor))
                on_change=field_callback(&controller, style(StyleField::BackgroundColor))
            />
            <ColorField
                label="Couleur du texte"
                id=format!("{prefix}-text-color")
                value=field_signal(doc, style(StyleField::TextColor))
                on_change=field_callback(&controller, style(StyleField::TextColor))
            />
            <RangeField
                label="Arrondi des coins"
                id=format!("{prefix}-border-radius")
                min="0"
                max="40"
                value=field_signal(doc, style(StyleField::BorderRadius))
                on_change=field_callback(&controller, style(StyleField::BorderRadius))
            />
            <RangeField
                label="Épaisseur de la bordure"
                id=format!("{prefix}-border-width")
                min="0"
                max="10"
                value=field_signal(doc, style(StyleField::BorderWidth))
                on_change=field_callback(&controller, style(StyleField::BorderWidth))
            />
            <ColorField
                label="Couleur de la bordure"
                id=format!("{prefix}-border-color")
                value=field_signal(doc, style(StyleField::BorderColor))
                on_change=field_callback(&controller, style(StyleField::BorderColor))
            />
            <div class="flex flex-col gap-1.5">
                <Label html_for=format!("{prefix}-shadow-type")>"Ombre"</Label>
                <NativeSelect
                    id=format!("{prefix}-shadow-type")
                    options=shadow_options
                    value=field_signal(doc, style(StyleField::ShadowType))
                    on_change=field_callback(&controller, style(StyleField::ShadowType))
                />
            </div>
            <RangeField
                label="Intensité de l'ombre"
                id=format!("{prefix}-shadow-intensity")
                min="0"
                max="100"
                value=field_signal(doc, style(StyleField::ShadowIntensity))
                on_change=field_callback(&controller, style(StyleField::ShadowIntensity))
            />
            <ColorField
                label="Couleur de l'ombre"
                id=format!("{prefix}-shadow-color")
                value=field_signal(doc, style(StyleField::ShadowColor))
                on_change=field_callback(&controller, style(StyleField::ShadowColor))
            />
        </div>
    }
}

// ----- list rows -----

fn row_class(app_state: &AppContext, row_id: &str) -> String {
    let base = "flex flex-col gap-3 rounded-lg border p-3 transition-shadow";
    if app_state.0.highlight.get().as_deref() == Some(row_id) {
        format!("{base} ring-2 ring-primary")
    } else {
        base.to_string()
    }
}

#[component]
fn RowHeader(
    controller: EditorController,
    token: CompositeToken,
    #[prop(into)] label: String,
) -> impl IntoView {
    let c_delete = controller.clone();
    let token_delete = token.clone();
    let token_drag = token.to_string();

    let on_dragstart = move |ev: web_sys::DragEvent| {
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &token_drag);
        }
    };

    view! {
        <div class="flex items-center justify-between">
            <div class="flex items-center gap-2">
                <span
                    class="cursor-grab select-none text-muted-foreground"
                    draggable="true"
                    on:dragstart=on_dragstart
                >
                    "☰"
                </span>
                <span class="text-sm font-medium">{label}</span>
            </div>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                on:click=move |_| c_delete.request_delete(token_delete.clone())
            >
                <X class="size-4" />
            </Button>
        </div>
    }
}

/// Shared drop handling: rows accept a drop and reorder the dragged token
/// in front of themselves.
fn drop_handlers(
    controller: &EditorController,
    target: CompositeToken,
) -> (
    impl Fn(web_sys::DragEvent) + Clone,
    impl Fn(web_sys::DragEvent) + Clone,
) {
    let on_dragover = |ev: web_sys::DragEvent| ev.prevent_default();
    let c = controller.clone();
    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let Some(raw) = ev
            .data_transfer()
            .and_then(|dt| dt.get_data("text/plain").ok())
        else {
            return;
        };
        if let Some(dragged) = CompositeToken::parse(&raw) {
            c.reorder(&dragged, Some(&target));
        }
    };
    (on_dragover, on_drop)
}

#[component]
fn SocialsCard(controller: EditorController) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let doc = controller.render_doc();

    let network_options: Vec<(String, String)> = SocialNetwork::ALL
        .iter()
        .map(|n| (n.to_string(), n.label().to_string()))
        .collect();

    let c_rows = controller.clone();
    let c_add = controller.clone();
    let c_up = controller.clone();
    let c_down = controller.clone();

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Réseaux sociaux"</CardTitle>
                <CardAction>
                    <SectionMoveButtons
                        up=Callback::new(move |_| c_up.move_section(Section::Socials, true))
                        down=Callback::new(move |_| c_down.move_section(Section::Socials, false))
                    />
                </CardAction>
            </CardHeader>
            <CardContent>
                {move || {
                    let c = c_rows.clone();
                    let app_state = app_state.clone();
                    let network_options = network_options.clone();
                    doc.get()
                        .socials
                        .into_iter()
                        .map(|item| {
                            let token = CompositeToken {
                                list: ListKind::Socials,
                                key: ItemKey::Id(item.id),
                            };
                            let row_id = token.to_string();
                            let (on_dragover, on_drop) = drop_handlers(&c, token.clone());

                            let c_url = c.clone();
                            let c_network = c.clone();
                            let key_url = token.key.clone();
                            let key_network = token.key.clone();
                            let url = item.url.clone();
                            let app_row = app_state.clone();
                            let row_id_class = row_id.clone();

                            view! {
                                <div
                                    id=row_id
                                    class=move || row_class(&app_row, &row_id_class)
                                    on:dragover=on_dragover
                                    on:drop=on_drop
                                >
                                    <RowHeader
                                        controller=c.clone()
                                        token=token.clone()
                                        label=item.network.label()
                                    />
                                    <NativeSelect
                                        options=network_options.clone()
                                        value=Signal::derive({
                                            let network = item.network;
                                            move || network.to_string()
                                        })
                                        on_change=Callback::new(move |value: String| {
                                            c_network
                                                .edit_item_field(
                                                    ListKind::Socials,
                                                    &key_network,
                                                    ItemField::Network,
                                                    &value,
                                                )
                                        })
                                    />
                                    <Input
                                        placeholder="https://"
                                        value=Signal::derive(move || url.clone())
                                        on_change=Callback::new(move |value: String| {
                                            c_url
                                                .edit_item_field(
                                                    ListKind::Socials,
                                                    &key_url,
                                                    ItemField::Url,
                                                    &value,
                                                )
                                        })
                                    />
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <Button variant=ButtonVariant::Outline on:click=move |_| c_add.add_social()>
                    "+ Ajouter un réseau"
                </Button>
            </CardContent>
        </Card>
    }
}

#[component]
fn SongsCard(controller: EditorController) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let doc = controller.render_doc();

    let c_rows = controller.clone();
    let c_add = controller.clone();
    let c_up = controller.clone();
    let c_down = controller.clone();

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Musique"</CardTitle>
                <CardAction>
                    <SectionMoveButtons
                        up=Callback::new(move |_| c_up.move_section(Section::Songs, true))
                        down=Callback::new(move |_| c_down.move_section(Section::Songs, false))
                    />
                </CardAction>
            </CardHeader>
            <CardContent>
                {move || {
                    let c = c_rows.clone();
                    let app_state = app_state.clone();
                    doc.get()
                        .songs
                        .into_iter()
                        .map(|item| {
                            let token = CompositeToken {
                                list: ListKind::Songs,
                                key: ItemKey::Track(item.song_id.clone()),
                            };
                            let row_id = token.to_string();
                            let (on_dragover, on_drop) = drop_handlers(&c, token.clone());

                            let label = if item.title.is_empty() {
                                "Nouveau titre".to_string()
                            } else {
                                item.title.clone()
                            };
                            let c_title = c.clone();
                            let c_artist = c.clone();
                            let key_title = token.key.clone();
                            let key_artist = token.key.clone();
                            let title = item.title.clone();
                            let artist = item.artist.clone();
                            let album_art = item.album_art_url.clone();
                            let app_row = app_state.clone();
                            let row_id_class = row_id.clone();

                            view! {
                                <div
                                    id=row_id
                                    class=move || row_class(&app_row, &row_id_class)
                                    on:dragover=on_dragover
                                    on:drop=on_drop
                                >
                                    <RowHeader controller=c.clone() token=token.clone() label=label />
                                    <div class="flex items-center gap-3">
                                        <Show when={
                                            let album_art = album_art.clone();
                                            move || !album_art.is_empty()
                                        }>
                                            <img
                                                src=album_art.clone()
                                                alt="Pochette"
                                                class="size-12 rounded object-cover"
                                            />
                                        </Show>
                                        <ImagePicker
                                            controller=c.clone()
                                            target=ImageTarget::Item(
                                                ListKind::Songs,
                                                token.key.clone(),
                                                ItemField::AlbumArtUrl,
                                            )
                                            id=format!("song-art-{}", item.song_id)
                                        />
                                    </div>
                                    <Input
                                        placeholder="Titre"
                                        value=Signal::derive(move || title.clone())
                                        on_change=Callback::new(move |value: String| {
                                            c_title
                                                .edit_item_field(
                                                    ListKind::Songs,
                                                    &key_title,
                                                    ItemField::Title,
                                                    &value,
                                                )
                                        })
                                    />
                                    <Input
                                        placeholder="Artiste"
                                        value=Signal::derive(move || artist.clone())
                                        on_change=Callback::new(move |value: String| {
                                            c_artist
                                                .edit_item_field(
                                                    ListKind::Songs,
                                                    &key_artist,
                                                    ItemField::Artist,
                                                    &value,
                                                )
                                        })
                                    />
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <Button variant=ButtonVariant::Outline on:click=move |_| c_add.add_song()>
                    "+ Ajouter un titre"
                </Button>
            </CardContent>
        </Card>
    }
}

#[component]
fn LinksCard(controller: EditorController) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let doc = controller.render_doc();

    let c_rows = controller.clone();
    let c_add_link = controller.clone();
    let c_add_header = controller.clone();
    let c_up = controller.clone();
    let c_down = controller.clone();

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Liens"</CardTitle>
                <CardAction>
                    <SectionMoveButtons
                        up=Callback::new(move |_| c_up.move_section(Section::Links, true))
                        down=Callback::new(move |_| c_down.move_section(Section::Links, false))
                    />
                </CardAction>
            </CardHeader>
            <CardContent>
                {move || {
                    let c = c_rows.clone();
                    let app_state = app_state.clone();
                    doc.get()
                        .links
                        .into_iter()
                        .map(|item| {
                            let token = CompositeToken {
                                list: ListKind::Links,
                                key: ItemKey::Id(item.id),
                            };
                            let row_id = token.to_string();
                            let (on_dragover, on_drop) = drop_handlers(&c, token.clone());

                            let kind_label = match item.kind {
                                LinkKind::Link => "Lien",
                                LinkKind::Header => "En-tête",
                            };
                            let c_title = c.clone();
                            let c_url = c.clone();
                            let c_img = c.clone();
                            let key_title = token.key.clone();
                            let key_url = token.key.clone();
                            let title = item.title.clone();
                            let url = item.url.clone();
                            let is_link = item.kind == LinkKind::Link;
                            let app_row = app_state.clone();
                            let row_id_class = row_id.clone();

                            view! {
                                <div
                                    id=row_id
                                    class=move || row_class(&app_row, &row_id_class)
                                    on:dragover=on_dragover
                                    on:drop=on_drop
                                >
                                    <RowHeader controller=c.clone() token=token.clone() label=kind_label />
                                    <Input
                                        placeholder="Titre"
                                        value=Signal::derive(move || title.clone())
                                        on_change=Callback::new(move |value: String| {
                                            c_title
                                                .edit_item_field(
                                                    ListKind::Links,
                                                    &key_title,
                                                    ItemField::Title,
                                                    &value,
                                                )
                                        })
                                    />
                                    <Show when=move || is_link>
                                        <Input
                                            placeholder="https://"
                                            value=Signal::derive({
                                                let url = url.clone();
                                                move || url.clone()
                                            })
                                            on_change=Callback::new({
                                                let c_url = c_url.clone();
                                                let key_url = key_url.clone();
                                                move |value: String| {
                                                    c_url
                                                        .edit_item_field(
                                                            ListKind::Links,
                                                            &key_url,
                                                            ItemField::Url,
                                                            &value,
                                                        )
                                                }
                                            })
                                        />
                                        <ImagePicker
                                            controller=c_img.clone()
                                            target=ImageTarget::Item(
                                                ListKind::Links,
                                                token.key.clone(),
                                                ItemField::ThumbnailUrl,
                                            )
                                            id=format!("link-thumbnail-{}", item.id)
                                        />
                                    </Show>
                                </div>
                            }
                        })
                        .collect_view()
                }}
                <div class="flex gap-2">
                    <Button variant=ButtonVariant::Outline on:click=move |_| c_add_link.add_link()>
                        "+ Ajouter un lien"
                    </Button>
                    <Button
                        variant=ButtonVariant::Outline
                        on:click=move |_| c_add_header.add_header()
                    >
                        "+ Ajouter un en-tête"
                    </Button>
                </div>
            </CardContent>
        </Card>
    }
}

#[component]
fn SectionMoveButtons(up: Callback<()>, down: Callback<()>) -> impl IntoView {
    view! {
        <Button
            variant=ButtonVariant::Ghost
            size=ButtonSize::Icon
            on:click=move |_| up.run(())
        >
            <ChevronUp class="size-4" />
        </Button>
        <Button
            variant=ButtonVariant::Ghost
            size=ButtonSize::Icon
            on:click=move |_| down.run(())
        >
            <ChevronDown class="size-4" />
        </Button>
    }
}

// ----- seo -----

#[component]
fn SeoCard(controller: EditorController) -> impl IntoView {
    let doc = controller.render_doc();

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Référencement"</CardTitle>
                <CardDescription>"Titre et description de la page publique."</CardDescription>
            </CardHeader>
            <CardContent>
                <TextField
                    label="Titre de la page"
                    id="seo-title"
                    value=field_signal(doc, Field::SeoTitle)
                    on_change=field_callback(&controller, Field::SeoTitle)
                />
                <div class="flex flex-col gap-1.5">
                    <Label html_for="seo-description">"Description"</Label>
                    <Textarea
                        id="seo-description"
                        value=field_signal(doc, Field::SeoDescription)
                        on_change=field_callback(&controller, Field::SeoDescription)
                    />
                </div>
                <div class="flex flex-col gap-1.5">
                    <Label html_for="seo-favicon">"Favicon"</Label>
                    <ImagePicker
                        controller=controller.clone()
                        target=ImageTarget::Field(Field::SeoFaviconUrl)
                        id="seo-favicon"
                    />
                </div>
            </CardContent>
        </Card>
    }
}

// ----- overlays -----

#[component]
fn ContextMenuOverlay(controller: EditorController) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let menu = app_state.0.context_menu;

    view! {
        {move || {
            menu.get()
                .map(|state| {
                    let c_jump = controller.clone();
                    let c_delete = controller.clone();
                    let token_jump = state.token.clone();
                    let token_delete = state.token.clone();
                    view! {
                        <div class="fixed inset-0 z-40" on:click=move |_| menu.set(None)></div>
                        <div
                            class="fixed z-50 flex min-w-40 flex-col rounded-md border bg-card py-1 text-sm shadow-md"
                            style=format!("left:{}px;top:{}px", state.x, state.y)
                        >
                            <button
                                class="px-3 py-1.5 text-left hover:bg-accent"
                                on:click=move |_| c_jump.jump_to_item(&token_jump)
                            >
                                "Aller à l'élément"
                            </button>
                            <button
                                class="px-3 py-1.5 text-left text-destructive hover:bg-accent"
                                on:click=move |_| c_delete.request_delete(token_delete.clone())
                            >
                                "Supprimer"
                            </button>
                        </div>
                    }
                })
        }}
    }
}

#[component]
pub fn ConfirmDialog() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let confirm = app_state.0.confirm;

    view! {
        {move || {
            confirm
                .get()
                .map(|request| {
                    let on_confirm = request.on_confirm;
                    let with_cancel = request.with_cancel;
                    let confirm_label = request.confirm_label;
                    view! {
                        <div class="fixed inset-0 z-50 flex items-center justify-center bg-black/50">
                            <Card class="w-full max-w-sm">
                                <CardHeader>
                                    <CardTitle>{request.title.clone()}</CardTitle>
                                </CardHeader>
                                <CardContent>
                                    <p class="text-sm text-muted-foreground">
                                        {request.text.clone()}
                                    </p>
                                    <div class="flex justify-end gap-2">
                                        <Show when=move || with_cancel>
                                            <Button
                                                variant=ButtonVariant::Outline
                                                on:click=move |_| confirm.set(None)
                                            >
                                                "Annuler"
                                            </Button>
                                        </Show>
                                        <Button
                                            variant=ButtonVariant::Destructive
                                            on:click=move |_| {
                                                on_confirm.run(());
                                                confirm.set(None);
                                            }
                                        >
                                            {confirm_label}
                                        </Button>
                                    </div>
                                </CardContent>
                            </Card>
                        </div>
                    }
                })
        }}
    }
}
