//! Hit-chance pipeline.
//!
//! The order of steps is part of the rules and changes results because
//! every step floors:
//!
//! 1. Status penalties on the user that reach this card type, in rule-table
//!    order, first instance per kind: `acc = acc * (100 - power) / 100`.
//! 2. Gated buffs in application order: accuracy buffs
//!    `acc = acc * (100 + bonus) / 100`; a force-hit buff guarantees a hit.
//! 3. Clamp to `[0, 100]`.
//! 4. `100` is a guaranteed hit; otherwise a `[0, 100)` draw must be
//!    strictly below the accuracy.

use serde::{Deserialize, Serialize};

use crate::combatant::{BuffSet, StatusEffects};
use crate::core::config::{BattleRules, BuffEffect};
use crate::core::rng::BattleRng;

use super::definition::CardTemplate;

/// Result of running the pipeline for one card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccuracyCheck {
    /// Final accuracy in `0..=100`.
    pub value: u32,
    /// No draw is made; the card hits.
    pub guaranteed: bool,
}

impl AccuracyCheck {
    /// Resolve the hit roll. Guaranteed checks never consume randomness.
    pub fn roll(self, rng: &mut dyn BattleRng) -> bool {
        if self.guaranteed {
            return true;
        }
        let draw = rng.next_unit() * 100.0;
        tracing::trace!(draw, accuracy = self.value, "accuracy roll");
        draw < f64::from(self.value)
    }
}

/// `acc * (100 - reduction) / 100`, floored. Reductions above 100% zero it.
#[must_use]
pub fn apply_reduction(accuracy: u32, reduction: u32) -> u32 {
    let factor = 100u64.saturating_sub(u64::from(reduction));
    (u64::from(accuracy) * factor / 100) as u32
}

/// `acc * (100 + bonus) / 100`, floored.
#[must_use]
pub fn apply_bonus(accuracy: u32, bonus: u32) -> u32 {
    let scaled = u64::from(accuracy) * (100 + u64::from(bonus)) / 100;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// Steps 1 and 2 on raw numbers, before the clamp.
#[must_use]
pub fn compose(base: u32, reductions: &[u32], bonuses: &[u32]) -> u32 {
    let reduced = reductions.iter().fold(base, |acc, r| apply_reduction(acc, *r));
    bonuses.iter().fold(reduced, |acc, b| apply_bonus(acc, *b))
}

/// Run the full pipeline for a card held by a user with the given statuses
/// and buffs.
#[must_use]
pub fn effective_accuracy(
    template: &CardTemplate,
    statuses: &StatusEffects,
    buffs: &BuffSet,
    rules: &BattleRules,
) -> AccuracyCheck {
    let mut accuracy = template.accuracy;

    for rule in rules.statuses.iter().filter(|r| r.affects_type(template.card_type)) {
        if let Some(status) = statuses.get(rule.kind) {
            accuracy = apply_reduction(accuracy, status.power);
        }
    }

    let mut forced = false;
    for rule in buffs.gated(rules, template.card_type, template.element) {
        match rule.effect {
            BuffEffect::Accuracy { bonus } => accuracy = apply_bonus(accuracy, bonus),
            BuffEffect::ForceHit => forced = true,
            BuffEffect::Power { .. } | BuffEffect::Activations { .. } => {}
        }
    }

    let value = if forced { 100 } else { accuracy.min(100) };
    AccuracyCheck {
        value,
        guaranteed: value >= 100,
    }
}
