//! Read-only card projections for a rendering layer.

use serde::{Deserialize, Serialize};

use crate::combatant::{BuffSet, StatusEffects};
use crate::core::config::BattleRules;
use crate::core::locale::{DefaultStyle, StyleTable};
use crate::core::types::{CardType, Element};

use super::definition::{ActivationCount, CardId, CardTemplate};

static DEFAULT_STYLE: DefaultStyle = DefaultStyle;

/// Which projection to compute.
#[derive(Clone, Copy)]
pub enum DisplayContext<'a> {
    /// Catalog values, for galleries and card pickers.
    Base,
    /// Values as they stand in battle for the holder.
    Runtime {
        statuses: &'a StatusEffects,
        buffs: &'a BuffSet,
        rules: &'a BattleRules,
    },
}

/// Activation count as shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationDisplay {
    Fixed(u32),
    Range { min: u32, max: u32 },
}

impl std::fmt::Display for ActivationDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivationDisplay::Fixed(n) => write!(f, "x{}", n),
            ActivationDisplay::Range { min, max } => write!(f, "x{}-{}", min, max),
        }
    }
}

/// Card numbers for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayStats {
    pub id: CardId,
    pub card_type: CardType,
    pub element: Element,
    pub power: u32,
    pub accuracy: u32,
    pub cost: u32,
    pub activations: ActivationDisplay,
    /// Activations used this turn (always 0 for `Base`).
    pub used: u32,
}

impl DisplayStats {
    /// Catalog projection of a template.
    #[must_use]
    pub fn base(template: &CardTemplate) -> Self {
        let activations = match template.activation {
            ActivationCount::Fixed(n) => ActivationDisplay::Fixed(n),
            ActivationCount::Random { min, max } => ActivationDisplay::Range { min, max },
        };
        Self {
            id: template.id.clone(),
            card_type: template.card_type,
            element: template.element,
            power: template.power,
            accuracy: template.accuracy,
            cost: template.cost,
            activations,
            used: 0,
        }
    }
}

/// Element color from an injected table, falling back to the built-in one.
#[must_use]
pub fn element_color<'a>(element: Element, style: Option<&'a dyn StyleTable>) -> &'a str {
    style
        .and_then(|s| s.color(element))
        .or_else(|| DEFAULT_STYLE.color(element))
        .unwrap_or("#ffffff")
}

/// Element emoji from an injected table, falling back to the built-in one.
#[must_use]
pub fn element_emoji<'a>(element: Element, style: Option<&'a dyn StyleTable>) -> &'a str {
    style
        .and_then(|s| s.emoji(element))
        .or_else(|| DEFAULT_STYLE.emoji(element))
        .unwrap_or("")
}
