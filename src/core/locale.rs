//! Presentation seams: localized text and per-element styling.
//!
//! The engine never owns strings for display. A rendering layer may inject
//! a `Localizer` and a `StyleTable`; when either is absent the engine falls
//! back to the raw template fields and never fails.

use rustc_hash::FxHashMap;

use super::types::Element;

/// Keyed text lookup.
pub trait Localizer {
    /// Resolve a key. `None` means "not translated".
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Per-element color and emoji lookup.
pub trait StyleTable {
    fn color(&self, element: Element) -> Option<&str>;
    fn emoji(&self, element: Element) -> Option<&str>;
}

/// In-memory localizer backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MapLocalizer {
    entries: FxHashMap<String, String>,
}

impl MapLocalizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry (builder pattern).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }
}

impl Localizer for MapLocalizer {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Resolve `key` through an optional localizer, falling back to `fallback`.
#[must_use]
pub fn localize(localizer: Option<&dyn Localizer>, key: &str, fallback: &str) -> String {
    localizer
        .and_then(|l| l.lookup(key))
        .unwrap_or_else(|| fallback.to_string())
}

/// Built-in element styling used when no table is injected.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStyle;

impl StyleTable for DefaultStyle {
    fn color(&self, element: Element) -> Option<&str> {
        Some(match element {
            Element::Fire => "#e4572e",
            Element::Water => "#2e86de",
            Element::Electric => "#f6c90e",
            Element::Poison => "#8e44ad",
            Element::Normal => "#95a5a6",
        })
    }

    fn emoji(&self, element: Element) -> Option<&str> {
        Some(match element {
            Element::Fire => "🔥",
            Element::Water => "💧",
            Element::Electric => "⚡",
            Element::Poison => "☠️",
            Element::Normal => "⭐",
        })
    }
}
