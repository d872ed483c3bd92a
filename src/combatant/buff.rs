//! Timed self-buffs.
//!
//! A buff entry only records its kind and remaining lifetime. What it does
//! (accuracy bonus, forced hit, power bonus, extra activations) and which
//! cards it gates come from the `BuffRule` for that kind.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::config::{BattleRules, BuffEffect, BuffRule};
use crate::core::types::{BuffKind, CardType, Element, Lifetime};

/// An active buff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveBuff {
    pub kind: BuffKind,
    pub lifetime: Lifetime,
}

/// Active buffs, unique by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffSet {
    buffs: SmallVec<[ActiveBuff; 4]>,
}

impl BuffSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or refresh a buff.
    pub fn apply(&mut self, buff: ActiveBuff) {
        self.buffs.retain(|b| b.kind != buff.kind);
        self.buffs.push(buff);
    }

    pub fn remove(&mut self, kind: BuffKind) -> bool {
        let before = self.buffs.len();
        self.buffs.retain(|b| b.kind != kind);
        self.buffs.len() != before
    }

    #[must_use]
    pub fn has(&self, kind: BuffKind) -> bool {
        self.buffs.iter().any(|b| b.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveBuff> {
        self.buffs.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffs.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffs.clear();
    }

    /// Count down one turn; returns the kinds that expired.
    pub fn decay(&mut self) -> SmallVec<[BuffKind; 4]> {
        let mut expired = SmallVec::new();
        self.buffs.retain(|b| {
            let alive = b.lifetime.tick();
            if !alive {
                expired.push(b.kind);
            }
            alive
        });
        expired
    }

    /// Rules of active buffs that gate a `(type, element)` card, in
    /// application order. Buffs without a rule are skipped.
    pub fn gated<'r>(
        &'r self,
        rules: &'r BattleRules,
        card_type: CardType,
        element: Element,
    ) -> impl Iterator<Item = &'r BuffRule> + 'r {
        self.buffs
            .iter()
            .filter_map(move |b| rules.buff_rule(b.kind))
            .filter(move |r| r.applies_to(card_type, element))
    }

    /// Summed power bonus (percent) for a card.
    #[must_use]
    pub fn power_bonus(&self, rules: &BattleRules, card_type: CardType, element: Element) -> u32 {
        self.gated(rules, card_type, element)
            .map(|r| match r.effect {
                BuffEffect::Power { bonus } => bonus,
                _ => 0,
            })
            .sum()
    }

    /// Summed extra activations for a card.
    #[must_use]
    pub fn activation_bonus(
        &self,
        rules: &BattleRules,
        card_type: CardType,
        element: Element,
    ) -> u32 {
        self.gated(rules, card_type, element)
            .map(|r| match r.effect {
                BuffEffect::Activations { bonus } => bonus,
                _ => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_refreshes() {
        let mut buffs = BuffSet::new();
        buffs.apply(ActiveBuff { kind: BuffKind::Focus, lifetime: Lifetime::Turns(1) });
        buffs.apply(ActiveBuff { kind: BuffKind::Focus, lifetime: Lifetime::Turns(3) });

        assert_eq!(buffs.iter().count(), 1);
        assert_eq!(buffs.iter().next().unwrap().lifetime, Lifetime::Turns(3));
    }

    #[test]
    fn test_gated_bonuses() {
        let rules = BattleRules::default();
        let mut buffs = BuffSet::new();
        buffs.apply(ActiveBuff { kind: BuffKind::Strength, lifetime: Lifetime::Turns(3) });
        buffs.apply(ActiveBuff { kind: BuffKind::Frenzy, lifetime: Lifetime::Turns(2) });

        assert_eq!(buffs.power_bonus(&rules, CardType::Attack, Element::Fire), 25);
        assert_eq!(buffs.power_bonus(&rules, CardType::Defense, Element::Fire), 0);
        assert_eq!(buffs.activation_bonus(&rules, CardType::Attack, Element::Water), 1);
        assert_eq!(buffs.activation_bonus(&rules, CardType::Buff, Element::Water), 0);
    }

    #[test]
    fn test_decay() {
        let mut buffs = BuffSet::new();
        buffs.apply(ActiveBuff { kind: BuffKind::Frenzy, lifetime: Lifetime::Turns(1) });
        buffs.apply(ActiveBuff { kind: BuffKind::Breath, lifetime: Lifetime::Permanent });

        assert_eq!(buffs.decay().as_slice(), &[BuffKind::Frenzy]);
        assert!(buffs.has(BuffKind::Breath));
        assert!(!buffs.has(BuffKind::Frenzy));
    }
}
