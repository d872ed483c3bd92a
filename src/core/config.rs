//! Battle rule tables.
//!
//! Everything the engine treats as data lives here instead of being
//! hardcoded in logic:
//! - `StatusRule`: default power/duration, accuracy reach and tick trigger
//! - `BuffRule`: which `(type, element)` cards a buff touches and how
//! - `Immunity`: defense elements that ignore a status
//! - `Matchup`: elemental type-effectiveness multipliers
//! - `element_order` / `type_order`: tie-breaks and sort keys
//! - `PlayerRules` / `EnemyScaling`: combatant sizing
//!
//! Rules are built in via `BattleRules::default()` or loaded from TOML.
//! Table rows use `[[statuses]]`-style arrays; omitted sections fall back to
//! the defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::types::{BuffKind, CardType, Element, Lifetime, StatusKind};

/// When a status effect deals periodic damage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTrigger {
    /// No periodic effect.
    #[default]
    None,
    /// `power`% of max HP lost when the holder starts a turn.
    TurnStartDamage,
    /// `power`% of max HP lost when the holder ends a turn.
    TurnEndDamage,
}

/// Rule row for one status kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatusRule {
    pub kind: StatusKind,
    /// Percentage used when the applying card does not specify one.
    pub default_power: u32,
    /// Turns the effect lasts; `-1` in TOML for permanent.
    pub default_duration: Lifetime,
    /// Card types whose accuracy this status reduces by `power`%.
    #[serde(default)]
    pub affects: Vec<CardType>,
    #[serde(default)]
    pub trigger: StatusTrigger,
}

impl StatusRule {
    #[must_use]
    pub fn affects_type(&self, card_type: CardType) -> bool {
        self.affects.contains(&card_type)
    }
}

/// What a buff does to the cards it gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BuffEffect {
    /// `accuracy *= 1 + bonus/100`, floored.
    Accuracy { bonus: u32 },
    /// Card always hits; the accuracy draw is skipped.
    ForceHit,
    /// `power *= 1 + bonus/100`, floored.
    Power { bonus: u32 },
    /// Extra activations per turn.
    Activations { bonus: u32 },
}

/// Rule row for one buff kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuffRule {
    pub kind: BuffKind,
    /// Card types the buff touches. Empty means every type.
    #[serde(default)]
    pub types: Vec<CardType>,
    /// Elements the buff touches. Empty means every element.
    #[serde(default)]
    pub elements: Vec<Element>,
    pub effect: BuffEffect,
    pub duration: Lifetime,
}

impl BuffRule {
    /// Check the `(type, element)` gate.
    #[must_use]
    pub fn applies_to(&self, card_type: CardType, element: Element) -> bool {
        (self.types.is_empty() || self.types.contains(&card_type))
            && (self.elements.is_empty() || self.elements.contains(&element))
    }
}

/// A defense element that cannot receive a status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Immunity {
    pub element: Element,
    pub status: StatusKind,
}

/// Damage multiplier (percent) for an attacker element against a defense
/// element. Pairs not listed are neutral (100).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matchup {
    pub attacker: Element,
    pub defender: Element,
    pub multiplier: u32,
}

/// Player sizing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerRules {
    pub max_hp: u32,
    pub hand_capacity: usize,
}

impl Default for PlayerRules {
    fn default() -> Self {
        Self {
            max_hp: 100,
            hand_capacity: 8,
        }
    }
}

/// Enemy sizing by stage (stages start at 1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyScaling {
    pub base_hp: u32,
    pub hp_per_stage: u32,
    pub base_hand_size: usize,
    /// One extra card every this many stages.
    pub stages_per_extra_card: u32,
    pub max_hand_size: usize,
    /// Name by stage; stages past the end reuse the last entry.
    pub names: Vec<String>,
    /// Resistance applies only for stages strictly above this one.
    pub resist_start_stage: u32,
    pub resist_per_stage: f64,
    pub resist_cap: f64,
}

impl Default for EnemyScaling {
    fn default() -> Self {
        Self {
            base_hp: 60,
            hp_per_stage: 15,
            base_hand_size: 3,
            stages_per_extra_card: 2,
            max_hand_size: 8,
            names: [
                "Slime", "Goblin", "Wolf", "Orc", "Golem", "Wyvern", "Lich", "Dragon",
            ]
            .iter()
            .map(|s| (*s).to_string())
            .collect(),
            resist_start_stage: 3,
            resist_per_stage: 0.1,
            resist_cap: 0.3,
        }
    }
}

impl EnemyScaling {
    #[must_use]
    pub fn max_hp(&self, stage: u32) -> u32 {
        let stage = stage.max(1);
        self.base_hp
            .saturating_add(self.hp_per_stage.saturating_mul(stage - 1))
    }

    #[must_use]
    pub fn hand_size(&self, stage: u32) -> usize {
        let stage = stage.max(1);
        let extra = (stage - 1) / self.stages_per_extra_card.max(1);
        self.base_hand_size
            .saturating_add(extra as usize)
            .min(self.max_hand_size)
    }

    /// Name for a stage, clamped to the last table entry.
    #[must_use]
    pub fn name(&self, stage: u32) -> &str {
        let idx = (stage.max(1) - 1) as usize;
        self.names
            .get(idx)
            .or_else(|| self.names.last())
            .map_or("Enemy", String::as_str)
    }

    /// Chance to reject a new status: `min(cap, (stage - start) * per_stage)`.
    #[must_use]
    pub fn resist_chance(&self, stage: u32) -> f64 {
        if stage <= self.resist_start_stage {
            return 0.0;
        }
        let raw = f64::from(stage - self.resist_start_stage) * self.resist_per_stage;
        raw.min(self.resist_cap)
    }
}

/// Complete rule set injected into combatants and the hand manager.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleRules {
    /// Tie-break order for defense elements and primary sort key.
    pub element_order: Vec<Element>,
    /// Secondary sort key.
    pub type_order: Vec<CardType>,
    pub player: PlayerRules,
    pub enemy: EnemyScaling,
    pub statuses: Vec<StatusRule>,
    pub buffs: Vec<BuffRule>,
    pub immunities: Vec<Immunity>,
    pub matchups: Vec<Matchup>,
}

impl Default for BattleRules {
    fn default() -> Self {
        use CardType::*;

        let statuses = vec![
            StatusRule {
                kind: StatusKind::Stun,
                default_power: 0,
                default_duration: Lifetime::Turns(1),
                affects: Vec::new(),
                trigger: StatusTrigger::None,
            },
            StatusRule {
                kind: StatusKind::Taunt,
                default_power: 0,
                default_duration: Lifetime::Turns(2),
                affects: Vec::new(),
                trigger: StatusTrigger::None,
            },
            StatusRule {
                kind: StatusKind::Burn,
                default_power: 5,
                default_duration: Lifetime::Turns(3),
                affects: Vec::new(),
                trigger: StatusTrigger::TurnStartDamage,
            },
            StatusRule {
                kind: StatusKind::Poison,
                default_power: 8,
                default_duration: Lifetime::Turns(3),
                affects: Vec::new(),
                trigger: StatusTrigger::TurnEndDamage,
            },
            StatusRule {
                kind: StatusKind::Confusion,
                default_power: 30,
                default_duration: Lifetime::Turns(2),
                affects: vec![Attack, Status, Debuff],
                trigger: StatusTrigger::None,
            },
            StatusRule {
                kind: StatusKind::Paralysis,
                default_power: 20,
                default_duration: Lifetime::Turns(2),
                affects: CardType::ALL.to_vec(),
                trigger: StatusTrigger::None,
            },
        ];

        let buffs = vec![
            BuffRule {
                kind: BuffKind::Focus,
                types: vec![Attack],
                elements: vec![Element::Normal],
                effect: BuffEffect::Accuracy { bonus: 30 },
                duration: Lifetime::Turns(2),
            },
            BuffRule {
                kind: BuffKind::Breath,
                types: vec![Buff],
                elements: vec![Element::Fire],
                effect: BuffEffect::ForceHit,
                duration: Lifetime::Turns(3),
            },
            BuffRule {
                kind: BuffKind::Strength,
                types: vec![Attack],
                elements: Vec::new(),
                effect: BuffEffect::Power { bonus: 25 },
                duration: Lifetime::Turns(3),
            },
            BuffRule {
                kind: BuffKind::Frenzy,
                types: vec![Attack],
                elements: Vec::new(),
                effect: BuffEffect::Activations { bonus: 1 },
                duration: Lifetime::Turns(2),
            },
        ];

        let immunities = vec![
            Immunity { element: Element::Fire, status: StatusKind::Burn },
            Immunity { element: Element::Poison, status: StatusKind::Poison },
            Immunity { element: Element::Electric, status: StatusKind::Paralysis },
        ];

        // Fire > Poison > Electric > Water > Fire
        let cycle = [
            (Element::Fire, Element::Poison),
            (Element::Poison, Element::Electric),
            (Element::Electric, Element::Water),
            (Element::Water, Element::Fire),
        ];
        let mut matchups = Vec::with_capacity(cycle.len() * 2);
        for (strong, weak) in cycle {
            matchups.push(Matchup { attacker: strong, defender: weak, multiplier: 150 });
            matchups.push(Matchup { attacker: weak, defender: strong, multiplier: 50 });
        }

        Self {
            element_order: Element::ALL.to_vec(),
            type_order: CardType::ALL.to_vec(),
            player: PlayerRules::default(),
            enemy: EnemyScaling::default(),
            statuses,
            buffs,
            immunities,
            matchups,
        }
    }
}

impl BattleRules {
    /// Load rules from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse rules from a TOML string and validate them.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let rules: BattleRules = toml::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Reject tables that would make lookups ambiguous.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (i, rule) in self.statuses.iter().enumerate() {
            if self.statuses[..i].iter().any(|r| r.kind == rule.kind) {
                return Err(ConfigError::ValidationError(format!(
                    "status `{}` defined twice",
                    rule.kind
                )));
            }
            if rule.default_power > 100 && !rule.affects.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "status `{}` reduces accuracy by more than 100%",
                    rule.kind
                )));
            }
        }
        for (i, rule) in self.buffs.iter().enumerate() {
            if self.buffs[..i].iter().any(|r| r.kind == rule.kind) {
                return Err(ConfigError::ValidationError(format!(
                    "buff `{}` defined twice",
                    rule.kind
                )));
            }
        }
        for (i, m) in self.matchups.iter().enumerate() {
            if self.matchups[..i]
                .iter()
                .any(|o| o.attacker == m.attacker && o.defender == m.defender)
            {
                return Err(ConfigError::ValidationError(format!(
                    "matchup {} vs {} defined twice",
                    m.attacker, m.defender
                )));
            }
        }
        if self.player.hand_capacity == 0 {
            return Err(ConfigError::ValidationError(
                "player hand capacity must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Position of an element in `element_order`; unknown elements rank last.
    #[must_use]
    pub fn element_rank(&self, element: Element) -> usize {
        self.element_order
            .iter()
            .position(|e| *e == element)
            .unwrap_or(self.element_order.len())
    }

    /// Position of a type in `type_order`; unknown types rank last.
    #[must_use]
    pub fn type_rank(&self, card_type: CardType) -> usize {
        self.type_order
            .iter()
            .position(|t| *t == card_type)
            .unwrap_or(self.type_order.len())
    }

    #[must_use]
    pub fn status_rule(&self, kind: StatusKind) -> Option<&StatusRule> {
        self.statuses.iter().find(|r| r.kind == kind)
    }

    #[must_use]
    pub fn buff_rule(&self, kind: BuffKind) -> Option<&BuffRule> {
        self.buffs.iter().find(|r| r.kind == kind)
    }

    #[must_use]
    pub fn is_immune(&self, defense_element: Element, status: StatusKind) -> bool {
        self.immunities
            .iter()
            .any(|i| i.element == defense_element && i.status == status)
    }

    /// Damage multiplier in percent (100 = neutral).
    #[must_use]
    pub fn effectiveness(&self, attacker: Element, defender: Element) -> u32 {
        self.matchups
            .iter()
            .find(|m| m.attacker == attacker && m.defender == defender)
            .map_or(100, |m| m.multiplier)
    }
}
