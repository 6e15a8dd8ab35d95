pub(crate) mod fields;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use strum::{Display, EnumString};

/// Font choices exposed by the appearance editor. Label -> CSS stack.
pub(crate) const FONT_OPTIONS: &[(&str, &str)] = &[
    ("Inter", "'Inter', sans-serif"),
    ("Roboto", "'Roboto', sans-serif"),
    ("Montserrat", "'Montserrat', sans-serif"),
    ("Lato", "'Lato', sans-serif"),
    ("Playfair Display", "'Playfair Display', serif"),
];

pub(crate) const DEFAULT_SOLID_COLOR: &str = "#fafafa";
pub(crate) const DEFAULT_GRADIENT: [&str; 2] = ["#a8c0ff", "#3f2b96"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Profile {
    pub picture_url: String,
    /// Rich-text HTML captured from the contenteditable title field.
    pub title: String,
    pub description: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            picture_url: String::new(),
            title: String::new(),
            description: String::new(),
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum BackgroundKind {
    #[default]
    Solid,
    Gradient,
    Image,
}

/// `background.value` is shape-dependent on `background.type`: a single
/// color or URL string, or a 2-element color pair for gradients.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub(crate) enum BackgroundValue {
    Color(String),
    Pair(Vec<String>),
}

impl BackgroundValue {
    pub fn as_color(&self) -> Option<&str> {
        match self {
            Self::Color(c) => Some(c),
            Self::Pair(_) => None,
        }
    }

    pub fn as_pair(&self) -> Option<(&str, &str)> {
        match self {
            Self::Pair(p) if p.len() == 2 => Some((&p[0], &p[1])),
            _ => None,
        }
    }
}

impl BackgroundKind {
    /// Type-appropriate default value, applied whenever the kind changes.
    pub fn default_value(&self) -> BackgroundValue {
        match self {
            Self::Solid => BackgroundValue::Color(DEFAULT_SOLID_COLOR.to_string()),
            Self::Gradient => {
                BackgroundValue::Pair(DEFAULT_GRADIENT.iter().map(|c| c.to_string()).collect())
            }
            Self::Image => BackgroundValue::Color(String::new()),
        }
    }

    fn value_matches(&self, value: &BackgroundValue) -> bool {
        match self {
            Self::Gradient => matches!(value, BackgroundValue::Pair(p) if p.len() == 2),
            Self::Solid | Self::Image => matches!(value, BackgroundValue::Color(_)),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Background {
    #[serde(rename = "type")]
    pub kind: BackgroundKind,
    pub value: BackgroundValue,
}

impl Default for Background {
    fn default() -> Self {
        let kind = BackgroundKind::Solid;
        let value = kind.default_value();
        Self { kind, value }
    }
}

/// How the public page frames the profile picture.
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum PictureLayout {
    #[default]
    Circle,
    Full,
}

impl PictureLayout {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Circle => "Cercle",
            Self::Full => "Pleine largeur",
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ShadowType {
    None,
    #[default]
    Soft,
    Strong,
}

impl ShadowType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "Aucune",
            Self::Soft => "Légère",
            Self::Strong => "Marquée",
        }
    }
}

/// Shared style settings for the link buttons and the header blocks.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct StyleBlock {
    pub background_color: String,
    pub text_color: String,
    pub border_radius: u32,
    pub border_width: u32,
    pub border_color: String,
    pub shadow_type: ShadowType,
    pub shadow_intensity: u32,
    pub shadow_color: String,
}

impl Default for StyleBlock {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            text_color: "#121212".to_string(),
            border_radius: 8,
            border_width: 0,
            border_color: "#121212".to_string(),
            shadow_type: ShadowType::Soft,
            shadow_intensity: 10,
            shadow_color: "#000000".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Appearance {
    pub font_family: String,
    pub text_color: String,
    pub title_color: String,
    pub description_color: String,
    pub social_icons_color: String,
    pub picture_layout: PictureLayout,
    pub background: Background,
    pub link: StyleBlock,
    pub header: StyleBlock,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            font_family: "'Inter', sans-serif".to_string(),
            text_color: "#121212".to_string(),
            title_color: "#121212".to_string(),
            description_color: "#121212".to_string(),
            social_icons_color: "#121212".to_string(),
            picture_layout: PictureLayout::Circle,
            background: Background::default(),
            link: StyleBlock::default(),
            header: StyleBlock {
                shadow_type: ShadowType::None,
                ..StyleBlock::default()
            },
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LinkKind {
    #[default]
    Link,
    Header,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct LinkItem {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    pub order: i64,
}

impl Default for LinkItem {
    fn default() -> Self {
        Self {
            id: 0,
            kind: LinkKind::Link,
            title: String::new(),
            url: String::new(),
            thumbnail_url: String::new(),
            order: 0,
        }
    }
}

impl LinkItem {
    pub fn new_link(id: i64, order: i64) -> Self {
        Self {
            id,
            kind: LinkKind::Link,
            title: "Nouveau Lien".to_string(),
            url: "https://".to_string(),
            order,
            ..Self::default()
        }
    }

    pub fn new_header(id: i64, order: i64) -> Self {
        Self {
            id,
            kind: LinkKind::Header,
            title: "Nouvel En-tête".to_string(),
            order,
            ..Self::default()
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum SocialNetwork {
    Twitter,
    Instagram,
    Facebook,
    Linkedin,
    Github,
    Youtube,
    Tiktok,
    #[default]
    Website,
}

impl SocialNetwork {
    pub const ALL: [SocialNetwork; 8] = [
        Self::Twitter,
        Self::Instagram,
        Self::Facebook,
        Self::Linkedin,
        Self::Github,
        Self::Youtube,
        Self::Tiktok,
        Self::Website,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Twitter => "Twitter",
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::Linkedin => "LinkedIn",
            Self::Github => "GitHub",
            Self::Youtube => "YouTube",
            Self::Tiktok => "TikTok",
            Self::Website => "Site Web",
        }
    }
}

/// Guess the network from the URL hostname; falls back to `Website`.
pub(crate) fn detect_social_network(url: &str) -> SocialNetwork {
    let lowered = url.trim().to_lowercase();
    let rest = lowered
        .split_once("//")
        .map(|(_, r)| r)
        .unwrap_or(lowered.as_str());
    let host = rest.split('/').next().unwrap_or_default();

    for network in SocialNetwork::ALL {
        if network == SocialNetwork::Website {
            continue;
        }
        if host.contains(&network.to_string()) {
            return network;
        }
    }
    SocialNetwork::Website
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SocialItem {
    pub id: i64,
    pub network: SocialNetwork,
    pub url: String,
    pub order: i64,
}

impl Default for SocialItem {
    fn default() -> Self {
        Self {
            id: 0,
            network: SocialNetwork::Website,
            url: String::new(),
            order: 0,
        }
    }
}

impl SocialItem {
    pub fn new(id: i64, order: i64) -> Self {
        Self {
            id,
            url: "https://".to_string(),
            order,
            ..Self::default()
        }
    }
}

/// Songs identify by an external track id (`songId`), not the numeric `id`
/// used by links and socials. The irregularity is part of the saved wire
/// format and is kept for compatibility (see DESIGN.md).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct SongItem {
    pub song_id: String,
    pub title: String,
    pub artist: String,
    pub album_art_url: String,
    pub order: i64,
}

impl Default for SongItem {
    fn default() -> Self {
        Self {
            song_id: String::new(),
            title: String::new(),
            artist: String::new(),
            album_art_url: String::new(),
            order: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Seo {
    pub title: String,
    pub description: String,
    pub favicon_url: String,
}

impl Default for Seo {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            favicon_url: String::new(),
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Section {
    Socials,
    Songs,
    Links,
}

impl Section {
    pub const ALL: [Section; 3] = [Self::Socials, Self::Songs, Self::Links];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Socials => "Icônes sociales",
            Self::Songs => "Musique",
            Self::Links => "Liens & En-têtes",
        }
    }
}

/// The complete in-memory page description. Always fully defaulted: a
/// loaded document passes through [`merge_defaults`] before it becomes the
/// session state, so no field is ever absent when read.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct Document {
    pub profile: Profile,
    pub appearance: Appearance,
    pub links: Vec<LinkItem>,
    pub socials: Vec<SocialItem>,
    pub songs: Vec<SongItem>,
    pub seo: Seo,
    pub section_order: Vec<Section>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            appearance: Appearance::default(),
            links: vec![],
            socials: vec![],
            songs: vec![],
            seo: Seo::default(),
            section_order: Section::ALL.to_vec(),
        }
    }
}

/// Which top-level list an item belongs to, together with its identity key
/// (`songId` for songs, numeric `id` otherwise).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ListKind {
    Links,
    Socials,
    Songs,
}

impl ListKind {
    /// Tolerant token parse: the preview occasionally addresses lists by
    /// their singular name ("link.123").
    pub fn parse_token(token: &str) -> Option<Self> {
        let t = token.trim().to_lowercase();
        Self::from_str(&t)
            .or_else(|_| Self::from_str(&format!("{t}s")))
            .ok()
    }
}

/// Identity of one list item across the preview message boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ItemKey {
    Id(i64),
    Track(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Track(t) => write!(f, "{t}"),
        }
    }
}

/// `"<listName>.<itemKey>"` is the addressing scheme used across the
/// preview message boundary and on editor DOM nodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CompositeToken {
    pub list: ListKind,
    pub key: ItemKey,
}

impl CompositeToken {
    pub fn parse(token: &str) -> Option<Self> {
        let (list, rest) = token.split_once('.')?;
        let list = ListKind::parse_token(list)?;
        let rest = rest.trim();
        if rest.is_empty() {
            return None;
        }

        let key = match list {
            ListKind::Songs => ItemKey::Track(rest.to_string()),
            ListKind::Links | ListKind::Socials => ItemKey::Id(rest.parse().ok()?),
        };
        Some(Self { list, key })
    }
}

impl fmt::Display for CompositeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.list, self.key)
    }
}

impl Document {
    pub fn contains_key(&self, list: ListKind, key: &ItemKey) -> bool {
        match (list, key) {
            (ListKind::Links, ItemKey::Id(id)) => self.links.iter().any(|l| l.id == *id),
            (ListKind::Socials, ItemKey::Id(id)) => self.socials.iter().any(|s| s.id == *id),
            (ListKind::Songs, ItemKey::Track(t)) => self.songs.iter().any(|s| &s.song_id == t),
            _ => false,
        }
    }
}

fn merge_json(base: &mut Value, loaded: &Value) {
    if let (Value::Object(b), Value::Object(l)) = (base, loaded) {
        for (key, loaded_val) in l {
            match b.get_mut(key) {
                // Nested records merge; everything else (scalars, arrays,
                // nulls) leaf-replaces. An empty loaded list must win over
                // any template list.
                Some(base_val) if base_val.is_object() && loaded_val.is_object() => {
                    merge_json(base_val, loaded_val);
                }
                _ => {
                    b.insert(key.clone(), loaded_val.clone());
                }
            }
        }
    }
}

/// Merge a loaded (possibly partial, possibly absent) document onto a fresh
/// default template. The result is always complete; loaded scalars and
/// arrays overwrite the template, nested records merge recursively.
pub(crate) fn merge_defaults(loaded: Option<Value>) -> Document {
    let mut base =
        serde_json::to_value(Document::default()).unwrap_or(Value::Object(Map::new()));

    let loaded = match loaded {
        Some(v @ Value::Object(_)) => v,
        _ => Value::Object(Map::new()),
    };

    merge_json(&mut base, &loaded);

    serde_json::from_value::<Document>(base)
        .unwrap_or_default()
        .normalized()
}

impl Document {
    /// Post-merge migration: re-align `background.value` with its type and
    /// backfill `sectionOrder` so every section appears exactly once.
    pub(crate) fn normalized(mut self) -> Self {
        let bg = &mut self.appearance.background;
        if !bg.kind.value_matches(&bg.value) {
            bg.value = bg.kind.default_value();
        }

        let mut order: Vec<Section> = vec![];
        for s in self.section_order.iter().chain(Section::ALL.iter()) {
            if !order.contains(s) {
                order.push(*s);
            }
        }
        self.section_order = order;

        self
    }
}

/// Final-drop-position reorder: remove the dragged element and reinsert it
/// immediately before the target. A missing target (or `None`, "dropped at
/// end") appends; a missing dragged element leaves the list untouched.
pub(crate) fn reorder_by_key<T, K: PartialEq>(
    mut list: Vec<T>,
    dragged: &K,
    target: Option<&K>,
    key: impl Fn(&T) -> K,
) -> Vec<T> {
    let Some(from) = list.iter().position(|x| &key(x) == dragged) else {
        return list;
    };

    let item = list.remove(from);
    match target.and_then(|t| list.iter().position(|x| &key(x) == t)) {
        Some(to) => list.insert(to, item),
        None => list.push(item),
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(id: i64, title: &str) -> LinkItem {
        LinkItem {
            id,
            title: title.to_string(),
            ..LinkItem::default()
        }
    }

    #[test]
    fn test_merge_empty_object_yields_complete_default() {
        let doc = merge_defaults(Some(json!({})));
        assert_eq!(doc, Document::default());
        assert_eq!(doc.appearance.font_family, "'Inter', sans-serif");
        assert_eq!(doc.section_order, Section::ALL.to_vec());
    }

    #[test]
    fn test_merge_none_and_non_object_fall_back_to_defaults() {
        assert_eq!(merge_defaults(None), Document::default());
        assert_eq!(merge_defaults(Some(json!(null))), Document::default());
        assert_eq!(merge_defaults(Some(json!("garbage"))), Document::default());
    }

    #[test]
    fn test_merge_partial_keeps_sibling_defaults() {
        let doc = merge_defaults(Some(json!({
            "profile": { "title": "<b>Léa</b>" },
            "appearance": { "textColor": "#222222" }
        })));

        assert_eq!(doc.profile.title, "<b>Léa</b>");
        assert_eq!(doc.profile.picture_url, "");
        assert_eq!(doc.appearance.text_color, "#222222");
        // Untouched nested records keep their template values.
        assert_eq!(doc.appearance.background, Background::default());
        assert_eq!(doc.appearance.link.border_radius, 8);
    }

    #[test]
    fn test_merge_lists_are_leaf_replaced_not_merged() {
        let doc = merge_defaults(Some(json!({ "links": [] })));
        assert!(doc.links.is_empty());

        let doc = merge_defaults(Some(json!({
            "links": [{ "id": 7, "type": "link", "title": "Blog", "url": "https://x" }]
        })));
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.links[0].id, 7);
        assert_eq!(doc.links[0].title, "Blog");
        // Absent per-item fields are defaulted, not invalid.
        assert_eq!(doc.links[0].thumbnail_url, "");
    }

    #[test]
    fn test_merge_is_idempotent() {
        let loaded = json!({
            "profile": { "title": "t", "pictureUrl": "p" },
            "appearance": { "background": { "type": "gradient", "value": ["#111111", "#222222"] } },
            "links": [{ "id": 1, "type": "header", "title": "H" }],
            "songs": [{ "songId": "track-9", "title": "S", "artist": "A" }]
        });

        let once = merge_defaults(Some(loaded));
        let twice = merge_defaults(Some(
            serde_json::to_value(&once).expect("document serializes"),
        ));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mismatched_background_shape_is_reset_on_merge() {
        // Gradient type with a leftover solid string: value gets the
        // gradient default pair instead of the incoherent string.
        let doc = merge_defaults(Some(json!({
            "appearance": { "background": { "type": "gradient" } }
        })));
        assert_eq!(doc.appearance.background.kind, BackgroundKind::Gradient);
        let (a, b) = doc.appearance.background.value.as_pair().expect("pair");
        assert_eq!((a, b), (DEFAULT_GRADIENT[0], DEFAULT_GRADIENT[1]));

        // Solid type with an array value resets to the solid default.
        let doc = merge_defaults(Some(json!({
            "appearance": { "background": { "type": "solid", "value": ["#111111", "#222222"] } }
        })));
        assert_eq!(
            doc.appearance.background.value.as_color(),
            Some(DEFAULT_SOLID_COLOR)
        );
    }

    #[test]
    fn test_merge_keeps_picture_layout_and_social_icons_color() {
        let doc = merge_defaults(Some(json!({
            "appearance": { "pictureLayout": "full", "socialIconsColor": "#ff00ff" }
        })));
        assert_eq!(doc.appearance.picture_layout, PictureLayout::Full);
        assert_eq!(doc.appearance.social_icons_color, "#ff00ff");

        // The load-save round trip must not strip the keys.
        let v = serde_json::to_value(&doc).expect("serializes");
        assert_eq!(v["appearance"]["pictureLayout"], "full");
        assert_eq!(v["appearance"]["socialIconsColor"], "#ff00ff");

        let doc = merge_defaults(Some(json!({})));
        assert_eq!(doc.appearance.picture_layout, PictureLayout::Circle);
        assert_eq!(doc.appearance.social_icons_color, "#121212");
    }

    #[test]
    fn test_section_order_backfilled_and_deduped() {
        let doc = merge_defaults(Some(json!({ "sectionOrder": ["links", "links"] })));
        assert_eq!(
            doc.section_order,
            vec![Section::Links, Section::Socials, Section::Songs]
        );
    }

    #[test]
    fn test_document_wire_format_is_camel_case() {
        let mut doc = Document::default();
        doc.links.push(link(3, "Blog"));
        doc.songs.push(SongItem {
            song_id: "track-1".to_string(),
            ..SongItem::default()
        });

        let v = serde_json::to_value(&doc).expect("serializes");
        assert!(v["profile"]["pictureUrl"].is_string());
        assert_eq!(v["appearance"]["background"]["type"], "solid");
        assert_eq!(v["appearance"]["pictureLayout"], "circle");
        assert!(v["appearance"]["socialIconsColor"].is_string());
        assert_eq!(v["links"][0]["type"], "link");
        assert!(v["links"][0]["thumbnailUrl"].is_string());
        assert_eq!(v["songs"][0]["songId"], "track-1");
        assert_eq!(v["sectionOrder"][0], "socials");
    }

    #[test]
    fn test_reorder_before_target() {
        let list = vec![link(1, "A"), link(2, "B"), link(3, "C")];
        let out = reorder_by_key(list, &1, Some(&3), |l| l.id);
        let titles: Vec<_> = out.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_reorder_to_end_when_target_absent() {
        let list = vec![link(1, "A"), link(2, "B"), link(3, "C")];
        let out = reorder_by_key(list, &1, None, |l| l.id);
        let titles: Vec<_> = out.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);

        let list = vec![link(1, "A"), link(2, "B"), link(3, "C")];
        let out = reorder_by_key(list, &1, Some(&99), |l| l.id);
        let titles: Vec<_> = out.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
    }

    #[test]
    fn test_reorder_unknown_dragged_id_is_noop() {
        let list = vec![link(1, "A"), link(2, "B"), link(3, "C")];
        let out = reorder_by_key(list.clone(), &99, Some(&2), |l| l.id);
        assert_eq!(out, list);
    }

    #[test]
    fn test_reorder_songs_by_track_id() {
        let song = |id: &str| SongItem {
            song_id: id.to_string(),
            ..SongItem::default()
        };
        let list = vec![song("x"), song("y"), song("z")];
        let out = reorder_by_key(list, &"z".to_string(), Some(&"x".to_string()), |s| {
            s.song_id.clone()
        });
        let ids: Vec<_> = out.iter().map(|s| s.song_id.as_str()).collect();
        assert_eq!(ids, vec!["z", "x", "y"]);
    }

    #[test]
    fn test_list_kind_parse_tolerates_singular() {
        assert_eq!(ListKind::parse_token("links"), Some(ListKind::Links));
        assert_eq!(ListKind::parse_token("link"), Some(ListKind::Links));
        assert_eq!(ListKind::parse_token("Social"), Some(ListKind::Socials));
        assert_eq!(ListKind::parse_token("songs"), Some(ListKind::Songs));
        assert_eq!(ListKind::parse_token("profile"), None);
    }

    #[test]
    fn test_composite_token_parse_and_display() {
        let t = CompositeToken::parse("links.42").expect("parses");
        assert_eq!(t.list, ListKind::Links);
        assert_eq!(t.key, ItemKey::Id(42));
        assert_eq!(t.to_string(), "links.42");

        // Songs address by track id, which is not numeric.
        let t = CompositeToken::parse("songs.track-ab12").expect("parses");
        assert_eq!(t.key, ItemKey::Track("track-ab12".to_string()));

        // Singular list segment is tolerated.
        let t = CompositeToken::parse("social.7").expect("parses");
        assert_eq!(t.list, ListKind::Socials);

        assert!(CompositeToken::parse("links.").is_none());
        assert!(CompositeToken::parse("links.xyz").is_none());
        assert!(CompositeToken::parse("nolist.1").is_none());
        assert!(CompositeToken::parse("links").is_none());
    }

    #[test]
    fn test_new_link_then_delete_restores_the_list() {
        let mut doc = Document::default();
        let order = doc.links.len() as i64;
        doc.links.push(LinkItem::new_link(101, order));

        assert_eq!(doc.links[0].title, "Nouveau Lien");
        assert_eq!(doc.links[0].url, "https://");
        assert_eq!(doc.links[0].kind, LinkKind::Link);
        assert!(doc.contains_key(ListKind::Links, &ItemKey::Id(101)));

        doc.links.retain(|l| l.id != 101);
        assert!(doc.links.is_empty());
        assert!(!doc.contains_key(ListKind::Links, &ItemKey::Id(101)));
    }

    #[test]
    fn test_new_header_and_social_defaults() {
        let header = LinkItem::new_header(5, 2);
        assert_eq!(header.title, "Nouvel En-tête");
        assert_eq!(header.kind, LinkKind::Header);
        assert_eq!(header.url, "");
        assert_eq!(header.order, 2);

        let social = SocialItem::new(6, 0);
        assert_eq!(social.network, SocialNetwork::Website);
        assert_eq!(social.url, "https://");
    }

    #[test]
    fn test_detect_social_network_from_hostname() {
        assert_eq!(
            detect_social_network("https://github.com/someone"),
            SocialNetwork::Github
        );
        assert_eq!(
            detect_social_network("https://www.youtube.com/@chan"),
            SocialNetwork::Youtube
        );
        assert_eq!(
            detect_social_network("https://example.com/github"),
            SocialNetwork::Website
        );
        assert_eq!(detect_social_network("not a url"), SocialNetwork::Website);
    }
}
