//! Typed descriptors for the editable document fields.
//!
//! The form markup addresses fields with dotted `data-key` tokens
//! ("appearance.background.type"). Instead of traversing a generic object
//! by string path, every token parses into one of these variants, so the
//! setter match is exhaustive and a typo in a key is a `None` at the parse
//! boundary rather than a silent lost write.

use super::{
    detect_social_network, BackgroundKind, BackgroundValue, Document, ItemKey, ListKind,
    PictureLayout, SocialNetwork,
};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StyleTarget {
    Link,
    Header,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StyleField {
    BackgroundColor,
    TextColor,
    BorderRadius,
    BorderWidth,
    BorderColor,
    ShadowType,
    ShadowIntensity,
    ShadowColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Field {
    ProfilePictureUrl,
    ProfileTitle,
    ProfileDescription,
    PictureLayout,
    FontFamily,
    TextColor,
    TitleColor,
    DescriptionColor,
    SocialIconsColor,
    BackgroundType,
    BackgroundValue,
    /// One stop of a gradient pair (0 or 1).
    BackgroundStop(usize),
    Style(StyleTarget, StyleField),
    SeoTitle,
    SeoDescription,
    SeoFaviconUrl,
}

impl Field {
    pub fn parse(key: &str) -> Option<Self> {
        let field = match key {
            "profile.pictureUrl" => Self::ProfilePictureUrl,
            "profile.title" => Self::ProfileTitle,
            "profile.description" => Self::ProfileDescription,
            "appearance.pictureLayout" => Self::PictureLayout,
            "appearance.fontFamily" => Self::FontFamily,
            "appearance.textColor" => Self::TextColor,
            "appearance.titleColor" => Self::TitleColor,
            "appearance.descriptionColor" => Self::DescriptionColor,
            "appearance.socialIconsColor" => Self::SocialIconsColor,
            "appearance.background.type" => Self::BackgroundType,
            "appearance.background.value" => Self::BackgroundValue,
            "appearance.background.value.0" => Self::BackgroundStop(0),
            "appearance.background.value.1" => Self::BackgroundStop(1),
            "seo.title" => Self::SeoTitle,
            "seo.description" => Self::SeoDescription,
            "seo.faviconUrl" => Self::SeoFaviconUrl,
            _ => {
                let rest = key.strip_prefix("appearance.")?;
                let (target, field) = rest.split_once('.')?;
                let target = match target {
                    "link" => StyleTarget::Link,
                    "header" => StyleTarget::Header,
                    _ => return None,
                };
                let field = match field {
                    "backgroundColor" => StyleField::BackgroundColor,
                    "textColor" => StyleField::TextColor,
                    "borderRadius" => StyleField::BorderRadius,
                    "borderWidth" => StyleField::BorderWidth,
                    "borderColor" => StyleField::BorderColor,
                    "shadowType" => StyleField::ShadowType,
                    "shadowIntensity" => StyleField::ShadowIntensity,
                    "shadowColor" => StyleField::ShadowColor,
                    _ => return None,
                };
                Self::Style(target, field)
            }
        };
        Some(field)
    }

    /// Apply a raw form value to the document. Numeric slider values
    /// coerce leniently: anything unparsable becomes 0.
    pub fn set(&self, doc: &mut Document, raw: &str) {
        let value = raw.to_string();
        match self {
            Self::ProfilePictureUrl => doc.profile.picture_url = value,
            Self::ProfileTitle => doc.profile.title = value,
            Self::ProfileDescription => doc.profile.description = value,
            Self::PictureLayout => {
                if let Ok(layout) = PictureLayout::from_str(raw) {
                    doc.appearance.picture_layout = layout;
                }
            }
            Self::FontFamily => doc.appearance.font_family = value,
            Self::TextColor => doc.appearance.text_color = value,
            Self::TitleColor => doc.appearance.title_color = value,
            Self::DescriptionColor => doc.appearance.description_color = value,
            Self::SocialIconsColor => doc.appearance.social_icons_color = value,
            Self::BackgroundType => {
                let Ok(kind) = BackgroundKind::from_str(raw) else {
                    return;
                };
                let bg = &mut doc.appearance.background;
                if bg.kind != kind {
                    bg.kind = kind;
                    bg.value = kind.default_value();
                }
            }
            Self::BackgroundValue => {
                doc.appearance.background.value = BackgroundValue::Color(value);
            }
            Self::BackgroundStop(idx) => {
                if let BackgroundValue::Pair(pair) = &mut doc.appearance.background.value {
                    if let Some(stop) = pair.get_mut(*idx) {
                        *stop = value;
                    }
                }
            }
            Self::Style(target, field) => {
                let block = match target {
                    StyleTarget::Link => &mut doc.appearance.link,
                    StyleTarget::Header => &mut doc.appearance.header,
                };
                match field {
                    StyleField::BackgroundColor => block.background_color = value,
                    StyleField::TextColor => block.text_color = value,
                    StyleField::BorderColor => block.border_color = value,
                    StyleField::ShadowColor => block.shadow_color = value,
                    StyleField::BorderRadius => {
                        block.border_radius = raw.parse().unwrap_or(0);
                    }
                    StyleField::BorderWidth => {
                        block.border_width = raw.parse().unwrap_or(0);
                    }
                    StyleField::ShadowIntensity => {
                        block.shadow_intensity = raw.parse().unwrap_or(0);
                    }
                    StyleField::ShadowType => {
                        if let Ok(t) = raw.parse() {
                            block.shadow_type = t;
                        }
                    }
                }
            }
            Self::SeoTitle => doc.seo.title = value,
            Self::SeoDescription => doc.seo.description = value,
            Self::SeoFaviconUrl => doc.seo.favicon_url = value,
        }
    }

    pub fn get(&self, doc: &Document) -> String {
        match self {
            Self::ProfilePictureUrl => doc.profile.picture_url.clone(),
            Self::ProfileTitle => doc.profile.title.clone(),
            Self::ProfileDescription => doc.profile.description.clone(),
            Self::PictureLayout => doc.appearance.picture_layout.to_string(),
            Self::FontFamily => doc.appearance.font_family.clone(),
            Self::TextColor => doc.appearance.text_color.clone(),
            Self::TitleColor => doc.appearance.title_color.clone(),
            Self::DescriptionColor => doc.appearance.description_color.clone(),
            Self::SocialIconsColor => doc.appearance.social_icons_color.clone(),
            Self::BackgroundType => doc.appearance.background.kind.to_string(),
            Self::BackgroundValue => doc
                .appearance
                .background
                .value
                .as_color()
                .unwrap_or_default()
                .to_string(),
            Self::BackgroundStop(idx) => doc
                .appearance
                .background
                .value
                .as_pair()
                .map(|(a, b)| if *idx == 0 { a } else { b })
                .unwrap_or_default()
                .to_string(),
            Self::Style(target, field) => {
                let block = match target {
                    StyleTarget::Link => &doc.appearance.link,
                    StyleTarget::Header => &doc.appearance.header,
                };
                match field {
                    StyleField::BackgroundColor => block.background_color.clone(),
                    StyleField::TextColor => block.text_color.clone(),
                    StyleField::BorderColor => block.border_color.clone(),
                    StyleField::ShadowColor => block.shadow_color.clone(),
                    StyleField::BorderRadius => block.border_radius.to_string(),
                    StyleField::BorderWidth => block.border_width.to_string(),
                    StyleField::ShadowIntensity => block.shadow_intensity.to_string(),
                    StyleField::ShadowType => block.shadow_type.to_string(),
                }
            }
            Self::SeoTitle => doc.seo.title.clone(),
            Self::SeoDescription => doc.seo.description.clone(),
            Self::SeoFaviconUrl => doc.seo.favicon_url.clone(),
        }
    }
}

/// Per-item editable fields. Which of them apply depends on the list;
/// inapplicable combinations are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ItemField {
    Title,
    Url,
    ThumbnailUrl,
    Network,
    Artist,
    AlbumArtUrl,
    TrackId,
}

impl ItemField {
    pub fn parse(key: &str) -> Option<Self> {
        Some(match key {
            "title" => Self::Title,
            "url" => Self::Url,
            "thumbnailUrl" => Self::ThumbnailUrl,
            "network" => Self::Network,
            "artist" => Self::Artist,
            "albumArtUrl" => Self::AlbumArtUrl,
            "songId" => Self::TrackId,
            _ => return None,
        })
    }
}

/// Apply a per-item edit. Returns true when a field actually changed.
/// Editing a social URL re-detects the network from the new hostname.
pub(crate) fn set_item_field(
    doc: &mut Document,
    list: ListKind,
    key: &ItemKey,
    field: ItemField,
    raw: &str,
) -> bool {
    let value = raw.to_string();
    match (list, key) {
        (ListKind::Links, ItemKey::Id(id)) => {
            let Some(item) = doc.links.iter_mut().find(|l| l.id == *id) else {
                return false;
            };
            match field {
                ItemField::Title => item.title = value,
                ItemField::Url => item.url = value,
                ItemField::ThumbnailUrl => item.thumbnail_url = value,
                _ => return false,
            }
            true
        }
        (ListKind::Socials, ItemKey::Id(id)) => {
            let Some(item) = doc.socials.iter_mut().find(|s| s.id == *id) else {
                return false;
            };
            match field {
                ItemField::Url => {
                    item.network = detect_social_network(&value);
                    item.url = value;
                }
                ItemField::Network => {
                    let Ok(network) = SocialNetwork::from_str(raw) else {
                        return false;
                    };
                    item.network = network;
                }
                _ => return false,
            }
            true
        }
        (ListKind::Songs, ItemKey::Track(track)) => {
            let Some(item) = doc.songs.iter_mut().find(|s| &s.song_id == track) else {
                return false;
            };
            match field {
                ItemField::Title => item.title = value,
                ItemField::Artist => item.artist = value,
                ItemField::AlbumArtUrl => item.album_art_url = value,
                ItemField::TrackId => item.song_id = value,
                _ => return false,
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LinkItem, SocialItem, SongItem};

    #[test]
    fn test_parse_known_keys() {
        assert_eq!(Field::parse("profile.title"), Some(Field::ProfileTitle));
        assert_eq!(
            Field::parse("appearance.background.type"),
            Some(Field::BackgroundType)
        );
        assert_eq!(
            Field::parse("appearance.background.value.1"),
            Some(Field::BackgroundStop(1))
        );
        assert_eq!(
            Field::parse("appearance.link.borderRadius"),
            Some(Field::Style(StyleTarget::Link, StyleField::BorderRadius))
        );
        assert_eq!(
            Field::parse("appearance.header.shadowType"),
            Some(Field::Style(StyleTarget::Header, StyleField::ShadowType))
        );
        assert_eq!(
            Field::parse("appearance.pictureLayout"),
            Some(Field::PictureLayout)
        );
        assert_eq!(
            Field::parse("appearance.socialIconsColor"),
            Some(Field::SocialIconsColor)
        );
        assert_eq!(Field::parse("seo.faviconUrl"), Some(Field::SeoFaviconUrl));
        assert_eq!(Field::parse("appearance.button.textColor"), None);
        assert_eq!(Field::parse("nonsense"), None);
    }

    #[test]
    fn test_background_type_switch_resets_value_shape() {
        let mut doc = Document::default();
        assert!(doc.appearance.background.value.as_color().is_some());

        Field::BackgroundType.set(&mut doc, "gradient");
        assert_eq!(doc.appearance.background.kind, BackgroundKind::Gradient);
        assert!(doc.appearance.background.value.as_pair().is_some());

        // Same-type "switch" keeps the current value.
        Field::BackgroundStop(0).set(&mut doc, "#ff0000");
        Field::BackgroundType.set(&mut doc, "gradient");
        assert_eq!(
            doc.appearance.background.value.as_pair().map(|(a, _)| a),
            Some("#ff0000")
        );

        Field::BackgroundType.set(&mut doc, "solid");
        assert!(doc.appearance.background.value.as_color().is_some());
    }

    #[test]
    fn test_numeric_style_fields_coerce_like_parse_int() {
        let mut doc = Document::default();
        Field::Style(StyleTarget::Link, StyleField::BorderRadius).set(&mut doc, "24");
        assert_eq!(doc.appearance.link.border_radius, 24);

        Field::Style(StyleTarget::Link, StyleField::BorderWidth).set(&mut doc, "abc");
        assert_eq!(doc.appearance.link.border_width, 0);
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let mut doc = Document::default();
        Field::SeoTitle.set(&mut doc, "Ma page");
        assert_eq!(Field::SeoTitle.get(&doc), "Ma page");
        assert_eq!(Field::BackgroundType.get(&doc), "solid");

        Field::SocialIconsColor.set(&mut doc, "#ff00ff");
        assert_eq!(Field::SocialIconsColor.get(&doc), "#ff00ff");
    }

    #[test]
    fn test_picture_layout_accepts_known_values_only() {
        let mut doc = Document::default();
        assert_eq!(Field::PictureLayout.get(&doc), "circle");

        Field::PictureLayout.set(&mut doc, "full");
        assert_eq!(Field::PictureLayout.get(&doc), "full");

        Field::PictureLayout.set(&mut doc, "hexagon");
        assert_eq!(Field::PictureLayout.get(&doc), "full");
    }

    #[test]
    fn test_social_url_edit_redetects_network() {
        let mut doc = Document::default();
        doc.socials.push(SocialItem {
            id: 5,
            ..SocialItem::default()
        });

        let changed = set_item_field(
            &mut doc,
            ListKind::Socials,
            &ItemKey::Id(5),
            ItemField::Url,
            "https://github.com/lea",
        );
        assert!(changed);
        assert_eq!(doc.socials[0].network, SocialNetwork::Github);
    }

    #[test]
    fn test_item_edit_ignores_inapplicable_field_and_missing_item() {
        let mut doc = Document::default();
        doc.links.push(LinkItem {
            id: 1,
            ..LinkItem::default()
        });

        // Artist makes no sense on a link.
        assert!(!set_item_field(
            &mut doc,
            ListKind::Links,
            &ItemKey::Id(1),
            ItemField::Artist,
            "x"
        ));
        // Unknown id.
        assert!(!set_item_field(
            &mut doc,
            ListKind::Links,
            &ItemKey::Id(99),
            ItemField::Title,
            "x"
        ));
    }

    #[test]
    fn test_song_fields_address_by_track_id() {
        let mut doc = Document::default();
        doc.songs.push(SongItem {
            song_id: "track-7".to_string(),
            ..SongItem::default()
        });

        assert!(set_item_field(
            &mut doc,
            ListKind::Songs,
            &ItemKey::Track("track-7".to_string()),
            ItemField::Artist,
            "Mireille"
        ));
        assert_eq!(doc.songs[0].artist, "Mireille");

        // Numeric keys never address songs.
        assert!(!set_item_field(
            &mut doc,
            ListKind::Songs,
            &ItemKey::Id(7),
            ItemField::Artist,
            "x"
        ));
    }
}
