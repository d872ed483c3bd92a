//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable properties of a card. For example,
//! "Flame Strike" is a fire attack with 15 power and 85 accuracy - these
//! are part of the template.
//!
//! Per-battle data (activations used this turn, buffed power, the rolled
//! activation count) is stored separately in `CardInstance`. Templates are
//! shared between instances through `Arc` and never mutated.

use serde::{Deserialize, Serialize};

use crate::core::error::CatalogError;
use crate::core::locale::{localize, Localizer};
use crate::core::types::{CardType, Element};
use crate::effects::EffectKind;

/// Unique identifier for a card template (e.g. `"bash"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// How many times a card activates per turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationCount {
    /// Fixed count.
    Fixed(u32),
    /// Rolled uniformly in `min..=max` once per turn.
    Random { min: u32, max: u32 },
}

impl Default for ActivationCount {
    fn default() -> Self {
        ActivationCount::Fixed(1)
    }
}

impl ActivationCount {
    #[must_use]
    pub const fn is_random(self) -> bool {
        matches!(self, ActivationCount::Random { .. })
    }
}

fn default_accuracy() -> u32 {
    100
}

/// Static card template.
///
/// ## Example
///
/// ```
/// use card_duel::cards::{CardTemplate, ActivationCount};
/// use card_duel::core::{CardType, Element};
/// use card_duel::effects::EffectKind;
///
/// let flurry = CardTemplate::new("flurry", "Flurry", CardType::Attack, Element::Normal, EffectKind::Damage)
///     .with_power(5)
///     .with_accuracy(85)
///     .with_random_activations(2, 4);
///
/// assert_eq!(flurry.activation, ActivationCount::Random { min: 2, max: 4 });
/// assert_eq!(flurry.name_key(), "card.flurry.name");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: CardId,

    /// Raw display name, used when no localization is available.
    pub name: String,

    /// Raw description, used when no localization is available.
    #[serde(default)]
    pub description: String,

    pub card_type: CardType,
    pub element: Element,

    #[serde(default)]
    pub power: u32,

    /// Hit chance in percent (0-100).
    #[serde(default = "default_accuracy")]
    pub accuracy: u32,

    #[serde(default)]
    pub cost: u32,

    #[serde(default)]
    pub activation: ActivationCount,

    pub effect: EffectKind,

    /// Damage is rolled in `[power/2, power*3/2]` instead of using `power`.
    #[serde(default)]
    pub random_bash: bool,

    /// Using this card ends the user's turn.
    #[serde(default)]
    pub skip_turn: bool,

    /// Percent chance to stun the target on hit.
    #[serde(default)]
    pub stun_chance: u32,
}

impl CardTemplate {
    /// Create a template with accuracy 100, cost 0 and a single activation.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        card_type: CardType,
        element: Element,
        effect: EffectKind,
    ) -> Self {
        Self {
            id: CardId::new(id),
            name: name.into(),
            description: String::new(),
            card_type,
            element,
            power: 0,
            accuracy: default_accuracy(),
            cost: 0,
            activation: ActivationCount::default(),
            effect,
            random_bash: false,
            skip_turn: false,
            stun_chance: 0,
        }
    }

    #[must_use]
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_accuracy(mut self, accuracy: u32) -> Self {
        self.accuracy = accuracy;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_activations(mut self, count: u32) -> Self {
        self.activation = ActivationCount::Fixed(count);
        self
    }

    #[must_use]
    pub fn with_random_activations(mut self, min: u32, max: u32) -> Self {
        self.activation = ActivationCount::Random { min, max };
        self
    }

    #[must_use]
    pub fn random_bash(mut self) -> Self {
        self.random_bash = true;
        self
    }

    #[must_use]
    pub fn skips_turn(mut self) -> Self {
        self.skip_turn = true;
        self
    }

    #[must_use]
    pub fn with_stun_chance(mut self, percent: u32) -> Self {
        self.stun_chance = percent;
        self
    }

    /// Localization key for the name.
    #[must_use]
    pub fn name_key(&self) -> String {
        format!("card.{}.name", self.id)
    }

    /// Localization key for the description.
    #[must_use]
    pub fn description_key(&self) -> String {
        format!("card.{}.description", self.id)
    }

    #[must_use]
    pub fn display_name(&self, localizer: Option<&dyn Localizer>) -> String {
        localize(localizer, &self.name_key(), &self.name)
    }

    #[must_use]
    pub fn display_description(&self, localizer: Option<&dyn Localizer>) -> String {
        localize(localizer, &self.description_key(), &self.description)
    }

    /// Check the template's own invariants.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.accuracy > 100 {
            return Err(CatalogError::InvalidAccuracy {
                id: self.id.to_string(),
                accuracy: self.accuracy,
            });
        }
        if let ActivationCount::Random { min, max } = self.activation {
            if min > max || max == 0 {
                return Err(CatalogError::InvalidActivationRange {
                    id: self.id.to_string(),
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl AsRef<CardTemplate> for CardTemplate {
    fn as_ref(&self) -> &CardTemplate {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::locale::MapLocalizer;

    fn bash() -> CardTemplate {
        CardTemplate::new("bash", "Bash", CardType::Attack, Element::Normal, EffectKind::Damage)
            .with_power(10)
            .with_accuracy(90)
    }

    #[test]
    fn test_card_id() {
        let id = CardId::new("bash");
        assert_eq!(id.as_str(), "bash");
        assert_eq!(format!("{}", id), "bash");
    }

    #[test]
    fn test_template_builder() {
        let card = bash().with_cost(2).with_activations(2);

        assert_eq!(card.power, 10);
        assert_eq!(card.accuracy, 90);
        assert_eq!(card.cost, 2);
        assert_eq!(card.activation, ActivationCount::Fixed(2));
        assert!(!card.random_bash);
        assert!(!card.activation.is_random());
    }

    #[test]
    fn test_display_name_fallback() {
        let card = bash().with_description("Hit something.");
        let localizer = MapLocalizer::new().with("card.bash.name", "Coup");

        assert_eq!(card.display_name(Some(&localizer)), "Coup");
        assert_eq!(card.display_name(None), "Bash");
        assert_eq!(card.display_description(Some(&localizer)), "Hit something.");
    }

    #[test]
    fn test_validate() {
        assert!(bash().validate().is_ok());
        assert!(matches!(
            bash().with_accuracy(120).validate(),
            Err(CatalogError::InvalidAccuracy { .. })
        ));
        assert!(matches!(
            bash().with_random_activations(4, 2).validate(),
            Err(CatalogError::InvalidActivationRange { .. })
        ));
    }

    #[test]
    fn test_template_serialization() {
        let card = bash().with_random_activations(2, 4).random_bash();

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardTemplate = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
