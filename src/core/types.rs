//! Shared vocabulary: elements, card types, status and buff kinds.
//!
//! These enums are the keys of every rule table in `BattleRules`. They
//! serialize in `snake_case` so TOML tables read naturally
//! (`element = "fire"`, `kind = "burn"`).

use serde::{Deserialize, Serialize};

/// Elemental affinity of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Element {
    Fire,
    Water,
    Electric,
    Poison,
    Normal,
}

impl Element {
    /// All elements in declaration order.
    pub const ALL: [Element; 5] = [
        Element::Fire,
        Element::Water,
        Element::Electric,
        Element::Poison,
        Element::Normal,
    ];

    /// Stable lowercase key, used for localization and style lookups.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Element::Fire => "fire",
            Element::Water => "water",
            Element::Electric => "electric",
            Element::Poison => "poison",
            Element::Normal => "normal",
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Functional category of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Attack,
    Defense,
    Status,
    Buff,
    Debuff,
    Special,
}

impl CardType {
    /// All card types in declaration order.
    pub const ALL: [CardType; 6] = [
        CardType::Attack,
        CardType::Defense,
        CardType::Status,
        CardType::Buff,
        CardType::Debuff,
        CardType::Special,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            CardType::Attack => "attack",
            CardType::Defense => "defense",
            CardType::Status => "status",
            CardType::Buff => "buff",
            CardType::Debuff => "debuff",
            CardType::Special => "special",
        }
    }
}

impl std::fmt::Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Status conditions that can be attached to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    /// No cards can be activated.
    Stun,
    /// Only attack cards can be activated.
    Taunt,
    /// Percentage of max HP lost at turn start.
    Burn,
    /// Percentage of max HP lost at turn end.
    Poison,
    /// Accuracy penalty on offensive cards.
    Confusion,
    /// Accuracy penalty on every card.
    Paralysis,
}

impl StatusKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            StatusKind::Stun => "stun",
            StatusKind::Taunt => "taunt",
            StatusKind::Burn => "burn",
            StatusKind::Poison => "poison",
            StatusKind::Confusion => "confusion",
            StatusKind::Paralysis => "paralysis",
        }
    }
}

impl std::fmt::Display for StatusKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Self-applied buffs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuffKind {
    /// Accuracy bonus for gated cards.
    Focus,
    /// Gated cards always hit.
    Breath,
    /// Power bonus for gated cards.
    Strength,
    /// Extra activations for gated cards.
    Frenzy,
}

impl BuffKind {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            BuffKind::Focus => "focus",
            BuffKind::Breath => "breath",
            BuffKind::Strength => "strength",
            BuffKind::Frenzy => "frenzy",
        }
    }
}

impl std::fmt::Display for BuffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Remaining lifetime of a status effect or buff.
///
/// In rule tables this is written as an integer where `-1` means permanent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Lifetime {
    Turns(u32),
    Permanent,
}

impl Lifetime {
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        matches!(self, Lifetime::Permanent)
    }

    /// Count down one turn. Returns `true` while the effect is still alive.
    pub fn tick(&mut self) -> bool {
        match self {
            Lifetime::Permanent => true,
            Lifetime::Turns(n) => {
                *n = n.saturating_sub(1);
                *n > 0
            }
        }
    }
}

impl From<i32> for Lifetime {
    fn from(raw: i32) -> Self {
        if raw < 0 {
            Lifetime::Permanent
        } else {
            Lifetime::Turns(raw as u32)
        }
    }
}

impl From<Lifetime> for i32 {
    fn from(lifetime: Lifetime) -> Self {
        match lifetime {
            Lifetime::Permanent => -1,
            Lifetime::Turns(n) => i32::try_from(n).unwrap_or(i32::MAX),
        }
    }
}
