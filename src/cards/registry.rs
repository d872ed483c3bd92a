//! Card catalog for template lookup.
//!
//! The `CardCatalog` stores every card template known to a battle. It keeps
//! registration order (the "catalog order" used for stable sorting and
//! galleries) alongside an id index for fast lookup.

use std::path::Path;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::core::error::{CatalogError, ConfigError};
use crate::core::types::CardType;

use super::definition::{CardId, CardTemplate};
use super::instance::CardInstance;

/// Registry of card templates.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardCatalog, CardTemplate};
/// use card_duel::core::{CardType, Element};
/// use card_duel::effects::EffectKind;
///
/// let mut catalog = CardCatalog::new();
/// catalog
///     .register(CardTemplate::new("bash", "Bash", CardType::Attack, Element::Normal, EffectKind::Damage))
///     .unwrap();
///
/// assert!(catalog.create_instance("bash").is_some());
/// assert!(catalog.create_instance("missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Arc<CardTemplate>>,
    index: FxHashMap<CardId, usize>,
}

#[derive(Deserialize)]
struct CatalogFile {
    cards: Vec<CardTemplate>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Ids must be unique.
    pub fn register(&mut self, template: CardTemplate) -> Result<(), CatalogError> {
        template.validate()?;
        if self.index.contains_key(&template.id) {
            return Err(CatalogError::DuplicateId(template.id.to_string()));
        }
        self.index.insert(template.id.clone(), self.cards.len());
        self.cards.push(Arc::new(template));
        Ok(())
    }

    /// Build a catalog from `[[cards]]` entries in a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(ConfigError::from)?;
        let mut catalog = Self::new();
        for template in file.cards {
            catalog.register(template)?;
        }
        tracing::debug!(cards = catalog.len(), "loaded card catalog");
        Ok(catalog)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_toml_str(&content)
    }

    /// Get a template by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<CardTemplate>> {
        self.index.get(&CardId::new(id)).map(|&i| &self.cards[i])
    }

    /// Create a fresh instance of a registered card.
    #[must_use]
    pub fn create_instance(&self, id: &str) -> Option<CardInstance> {
        self.get(id).map(|t| CardInstance::new(Arc::clone(t)))
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(&CardId::new(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.cards.iter()
    }

    /// Templates in registration order, as a slice.
    #[must_use]
    pub fn templates(&self) -> &[Arc<CardTemplate>] {
        &self.cards
    }

    /// Find cards by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<CardTemplate>> {
        self.cards.iter().filter(move |c| c.card_type == card_type)
    }
}
