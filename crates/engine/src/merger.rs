//! Document merger: base markup plus optional overlays.
//!
//! Overlays are applied in a fixed order, each one confined to its own
//! top-level keys:
//!
//! 1. **Initial route**: replaces `routing.initial`
//! 2. **Theme**: replaces `theme` and `customThemes` wholesale
//! 3. **Localization**: replaces `i18n`, sets `lang`
//! 4. **Platform**: replaces `platform`
//!
//! Every other key of the base document passes through untouched. Merging
//! is pure: the base is not modified and the same inputs always produce the
//! same document.

use crate::platform::PlatformFragment;
use screenset_core::{MarkupDocument, keys};
use serde_json::{Map, Value};
use tracing::warn;

/// A theme overlay: the `theme` and `customThemes` sections.
///
/// A section the overlay lacks is removed from the merged document.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeOverlay {
    pub theme: Option<Value>,
    pub custom_themes: Option<Value>,
}

impl ThemeOverlay {
    /// Extract the theme sections of a style document. A document with
    /// neither section is no overlay at all.
    pub fn from_document(doc: MarkupDocument) -> Option<Self> {
        let mut map = doc.into_map();
        let theme = map.remove(keys::THEME);
        let custom_themes = map.remove(keys::CUSTOM_THEMES);
        if theme.is_none() && custom_themes.is_none() {
            return None;
        }
        Some(Self {
            theme,
            custom_themes,
        })
    }
}

/// A localization overlay and the language it was requested for.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalizationOverlay {
    pub resources: MarkupDocument,
    pub language: Option<String>,
}

/// Everything layered onto a base document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    pub initial_route: Option<String>,
    pub theme: Option<ThemeOverlay>,
    pub localization: Option<LocalizationOverlay>,
    pub platform: Option<PlatformFragment>,
}

/// Merge `overlays` onto a copy of `base`.
pub fn merge(base: &MarkupDocument, overlays: &Overlays) -> MarkupDocument {
    let mut doc = base.clone();

    if let Some(route) = &overlays.initial_route {
        apply_initial_route(&mut doc, route);
    }

    if let Some(theme) = &overlays.theme {
        replace_or_remove(&mut doc, keys::THEME, theme.theme.clone());
        replace_or_remove(&mut doc, keys::CUSTOM_THEMES, theme.custom_themes.clone());
    }

    if let Some(localization) = &overlays.localization {
        doc.insert(keys::I18N, localization.resources.clone().into_value());
        if let Some(language) = &localization.language {
            doc.insert(keys::LANG, language.clone());
        }
    }

    if let Some(platform) = &overlays.platform {
        doc.insert(keys::PLATFORM, platform.to_value());
    }

    doc
}

fn apply_initial_route(doc: &mut MarkupDocument, route: &str) {
    match doc.get_mut(keys::ROUTING) {
        Some(Value::Object(routing)) => {
            routing.insert(keys::INITIAL.into(), Value::String(route.into()));
        }
        Some(_) => {
            warn!(route, "Routing section is not an object, initial route override not applied");
        }
        None => {
            let mut routing = Map::new();
            routing.insert(keys::INITIAL.into(), Value::String(route.into()));
            doc.insert(keys::ROUTING, Value::Object(routing));
        }
    }
}

fn replace_or_remove(doc: &mut MarkupDocument, key: &str, value: Option<Value>) {
    match value {
        Some(v) => {
            doc.insert(key, v);
        }
        None => {
            doc.remove(key);
        }
    }
}
