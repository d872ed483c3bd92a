//! Card instances - per-battle card state.
//!
//! `CardInstance` pairs a shared, immutable `CardTemplate` with a small
//! `CardRuntimeState` owned by exactly one hand. The runtime state tracks
//! activations used this turn, buff projections and the lazily rolled
//! activation count of random cards.
//!
//! ## Random activation counts
//!
//! Cards with `ActivationCount::Random` start each turn `Unresolved`. The
//! first `can_activate` query rolls `min..=max`, adds the buff bonus queued
//! at that moment and moves to `Resolved(n)`. Nothing re-rolls until
//! `reset`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combatant::{BuffSet, StatusEffects};
use crate::core::config::BattleRules;
use crate::core::rng::BattleRng;
use crate::core::types::{CardType, Element};
use crate::effects::EffectCard;

use super::accuracy::{self, apply_bonus};
use super::definition::{ActivationCount, CardId, CardTemplate};
use super::display::{ActivationDisplay, DisplayContext, DisplayStats};

/// Activation count state for random cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolvedCount {
    #[default]
    Unresolved,
    Resolved(u32),
}

/// Mutable per-battle card state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRuntimeState {
    /// Activations used this turn, hits and misses alike.
    pub current_activations: u32,
    pub is_active: bool,
    /// Power after buffs, if any buff touches it.
    pub buffed_power: Option<u32>,
    /// Accuracy computed for the last roll.
    pub modified_accuracy: Option<u32>,
    /// Extra activations from buffs. A bonus, never an absolute count.
    pub activation_bonus: u32,
    pub resolved: ResolvedCount,
}

impl Default for CardRuntimeState {
    fn default() -> Self {
        Self {
            current_activations: 0,
            is_active: true,
            buffed_power: None,
            modified_accuracy: None,
            activation_bonus: 0,
            resolved: ResolvedCount::Unresolved,
        }
    }
}

/// Result of the card-side half of an activation.
#[derive(Clone, Debug)]
pub enum ActivationRoll {
    /// The card hit; run its effect with this snapshot.
    Hit(EffectCard),
    Miss,
    /// The card had no activations left; nothing was consumed.
    Exhausted,
}

/// A card in a combatant's hand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    template: Arc<CardTemplate>,
    state: CardRuntimeState,
}

impl CardInstance {
    /// Create a fresh instance of a template.
    #[must_use]
    pub fn new(template: Arc<CardTemplate>) -> Self {
        Self {
            template,
            state: CardRuntimeState::default(),
        }
    }

    #[must_use]
    pub fn template(&self) -> &Arc<CardTemplate> {
        &self.template
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.template.id
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.template.card_type
    }

    #[must_use]
    pub fn element(&self) -> Element {
        self.template.element
    }

    #[must_use]
    pub fn state(&self) -> &CardRuntimeState {
        &self.state
    }

    pub fn set_active(&mut self, active: bool) {
        self.state.is_active = active;
    }

    /// Prepare for a new turn: zero the counter and forget a rolled count.
    pub fn reset(&mut self) {
        self.state.current_activations = 0;
        self.state.resolved = ResolvedCount::Unresolved;
    }

    /// Power after buffs.
    #[must_use]
    pub fn power(&self) -> u32 {
        self.state.buffed_power.unwrap_or(self.template.power)
    }

    /// Project buff totals onto this card.
    ///
    /// A random count that is already resolved keeps its value; the new
    /// bonus only shows up in the display range until the next roll.
    pub fn apply_modifiers(&mut self, power_bonus: u32, activation_bonus: u32) {
        self.state.buffed_power = if power_bonus > 0 {
            Some(apply_bonus(self.template.power, power_bonus))
        } else {
            None
        };
        self.state.activation_bonus = activation_bonus;
    }

    /// Activation limit for this turn, if known without rolling.
    #[must_use]
    pub fn effective_activation_count(&self) -> Option<u32> {
        match self.template.activation {
            ActivationCount::Fixed(n) => Some(n + self.state.activation_bonus),
            ActivationCount::Random { .. } => match self.state.resolved {
                ResolvedCount::Resolved(n) => Some(n),
                ResolvedCount::Unresolved => None,
            },
        }
    }

    /// Resolve the activation limit, rolling a random count at most once
    /// per turn.
    pub fn resolve_activation_count(&mut self, rng: &mut dyn BattleRng) -> u32 {
        if let Some(count) = self.effective_activation_count() {
            return count;
        }
        let (min, max) = match self.template.activation {
            ActivationCount::Random { min, max } => (min, max),
            ActivationCount::Fixed(n) => (n, n),
        };
        let rolled = rng.roll_inclusive(min, max);
        let count = rolled + self.state.activation_bonus;
        self.state.resolved = ResolvedCount::Resolved(count);
        tracing::debug!(
            card = %self.template.id,
            rolled,
            bonus = self.state.activation_bonus,
            count,
            "resolved random activation count"
        );
        count
    }

    /// Whether another activation is allowed this turn.
    pub fn can_activate(&mut self, rng: &mut dyn BattleRng) -> bool {
        if !self.state.is_active {
            return false;
        }
        let limit = self.resolve_activation_count(rng);
        self.state.current_activations < limit
    }

    /// Activations left this turn, if the count is known.
    #[must_use]
    pub fn remaining_activations(&self) -> Option<u32> {
        self.effective_activation_count()
            .map(|limit| limit.saturating_sub(self.state.current_activations))
    }

    /// Run the accuracy pipeline for this card and roll it.
    pub fn check_accuracy(
        &mut self,
        statuses: &StatusEffects,
        buffs: &BuffSet,
        rules: &BattleRules,
        rng: &mut dyn BattleRng,
    ) -> bool {
        let check = accuracy::effective_accuracy(&self.template, statuses, buffs, rules);
        self.state.modified_accuracy = Some(check.value);
        check.roll(rng)
    }

    /// Card-side half of an activation.
    ///
    /// Consumes one activation before rolling, so a miss still counts as a
    /// use. On a hit, returns the snapshot the effect runs against.
    pub fn roll_activation(
        &mut self,
        statuses: &StatusEffects,
        buffs: &BuffSet,
        rules: &BattleRules,
        rng: &mut dyn BattleRng,
    ) -> ActivationRoll {
        if !self.can_activate(rng) {
            return ActivationRoll::Exhausted;
        }
        self.state.current_activations += 1;

        if self.check_accuracy(statuses, buffs, rules, rng) {
            ActivationRoll::Hit(EffectCard {
                template: Arc::clone(&self.template),
                power: self.power(),
            })
        } else {
            ActivationRoll::Miss
        }
    }

    /// Stats for galleries (`Base`) or battle (`Runtime`).
    #[must_use]
    pub fn display_stats(&self, context: DisplayContext<'_>) -> DisplayStats {
        let template = &self.template;
        match context {
            DisplayContext::Base => DisplayStats::base(template),
            DisplayContext::Runtime { statuses, buffs, rules } => {
                let bonus = self.state.activation_bonus;
                let activations = match template.activation {
                    ActivationCount::Fixed(n) => ActivationDisplay::Fixed(n + bonus),
                    // Range stays visible after the roll.
                    ActivationCount::Random { min, max } => ActivationDisplay::Range {
                        min: min + bonus,
                        max: max + bonus,
                    },
                };
                let check = accuracy::effective_accuracy(template, statuses, buffs, rules);
                DisplayStats {
                    id: template.id.clone(),
                    card_type: template.card_type,
                    element: template.element,
                    power: self.power(),
                    accuracy: check.value,
                    cost: template.cost,
                    activations,
                    used: self.state.current_activations,
                }
            }
        }
    }
}

impl AsRef<CardTemplate> for CardInstance {
    fn as_ref(&self) -> &CardTemplate {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::ScriptedRng;
    use crate::effects::EffectKind;

    fn fixed() -> CardInstance {
        CardInstance::new(Arc::new(
            CardTemplate::new("bash", "Bash", CardType::Attack, Element::Normal, EffectKind::Damage)
                .with_power(10)
                .with_accuracy(80)
                .with_activations(2),
        ))
    }

    fn flurry() -> CardInstance {
        CardInstance::new(Arc::new(
            CardTemplate::new("flurry", "Flurry", CardType::Attack, Element::Normal, EffectKind::Damage)
                .with_power(5)
                .with_accuracy(100)
                .with_random_activations(3, 6),
        ))
    }

    #[test]
    fn test_fixed_count_with_bonus() {
        let mut card = fixed();
        assert_eq!(card.effective_activation_count(), Some(2));

        card.apply_modifiers(0, 1);
        assert_eq!(card.effective_activation_count(), Some(3));
    }

    #[test]
    fn test_random_count_resolves_once() {
        let mut card = flurry();
        let mut rng = ScriptedRng::new(vec![0.0, 0.99, 0.99]);

        assert_eq!(card.effective_activation_count(), None);
        assert!(card.can_activate(&mut rng));
        assert_eq!(card.state().resolved, ResolvedCount::Resolved(3));

        // Further queries never touch the RNG
        for _ in 0..5 {
            card.can_activate(&mut rng);
        }
        assert_eq!(rng.consumed(), 1);
        assert_eq!(card.effective_activation_count(), Some(3));
    }

    #[test]
    fn test_reset_rerolls_next_turn() {
        let mut card = flurry();
        let mut rng = ScriptedRng::new(vec![0.0, 0.99]);

        card.can_activate(&mut rng);
        assert_eq!(card.effective_activation_count(), Some(3));

        card.reset();
        assert_eq!(card.state().resolved, ResolvedCount::Unresolved);
        assert_eq!(card.state().current_activations, 0);

        card.can_activate(&mut rng);
        assert_eq!(card.effective_activation_count(), Some(6));
    }

    #[test]
    fn test_bonus_added_once_at_roll() {
        let mut card = flurry();
        card.apply_modifiers(0, 2);
        let mut rng = ScriptedRng::new(vec![0.0]);

        card.can_activate(&mut rng);
        assert_eq!(card.effective_activation_count(), Some(5));

        // A later bonus change does not move the resolved count
        card.apply_modifiers(0, 4);
        assert_eq!(card.effective_activation_count(), Some(5));
    }

    #[test]
    fn test_miss_counts_as_use() {
        let rules = BattleRules::default();
        let mut card = fixed();
        let mut rng = ScriptedRng::new(vec![0.95, 0.95, 0.1]);
        let statuses = StatusEffects::new();
        let buffs = BuffSet::new();
        assert_eq!(card.remaining_activations(), Some(2));

        assert!(matches!(
            card.roll_activation(&statuses, &buffs, &rules, &mut rng),
            ActivationRoll::Miss
        ));
        assert!(matches!(
            card.roll_activation(&statuses, &buffs, &rules, &mut rng),
            ActivationRoll::Miss
        ));
        assert_eq!(card.state().current_activations, 2);
        assert_eq!(card.remaining_activations(), Some(0));
        assert!(matches!(
            card.roll_activation(&statuses, &buffs, &rules, &mut rng),
            ActivationRoll::Exhausted
        ));
        assert_eq!(card.state().modified_accuracy, Some(80));
    }

    #[test]
    fn test_inactive_card_cannot_activate() {
        let mut card = fixed();
        let mut rng = ScriptedRng::new(vec![]);
        card.set_active(false);
        assert!(!card.can_activate(&mut rng));
    }

    #[test]
    fn test_power_modifiers() {
        let mut card = fixed();
        card.apply_modifiers(25, 0);
        assert_eq!(card.power(), 12);
        card.apply_modifiers(0, 0);
        assert_eq!(card.power(), 10);
    }

    #[test]
    fn test_runtime_display_keeps_range_after_roll() {
        let rules = BattleRules::default();
        let statuses = StatusEffects::new();
        let buffs = BuffSet::new();
        let mut card = flurry();
        card.apply_modifiers(0, 1);

        let runtime = DisplayContext::Runtime { statuses: &statuses, buffs: &buffs, rules: &rules };
        assert_eq!(
            card.display_stats(runtime).activations,
            ActivationDisplay::Range { min: 4, max: 7 }
        );

        assert_eq!(card.remaining_activations(), None);

        // 0.5 over 3..=6 rolls 5, plus the bonus
        let mut rng = ScriptedRng::new(vec![0.5]);
        card.can_activate(&mut rng);
        assert_eq!(card.remaining_activations(), Some(6));
        let runtime = DisplayContext::Runtime { statuses: &statuses, buffs: &buffs, rules: &rules };
        assert_eq!(
            card.display_stats(runtime).activations,
            ActivationDisplay::Range { min: 4, max: 7 }
        );

        assert_eq!(
            card.display_stats(DisplayContext::Base).activations,
            ActivationDisplay::Range { min: 3, max: 6 }
        );
    }
}
