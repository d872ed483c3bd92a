//! Effect kinds and activation results.
//!
//! Card templates carry an `EffectKind` tag instead of executable code.
//! The resolver maps each tag to a plain function, so adding a kind is a
//! compile error until every match handles it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::{CardId, CardTemplate};
use crate::combatant::StatusOutcome;
use crate::core::types::{BuffKind, StatusKind};

/// What a card does when it hits.
///
/// ## Offensive
///
/// - `Damage`: `power` damage scaled by type effectiveness
/// - `Counter`: `power`% of the damage the user last took
/// - `Drain`: damage, then heal the user for half of what landed
/// - `ApplyStatus`: attach a status to the target
///
/// ## Self-targeted
///
/// - `Shield`: gain `power` defense points
/// - `Heal`: restore `power` HP
/// - `Buff`: attach a buff to the user
/// - `Cleanse`: remove every status from the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Damage,
    Counter,
    Drain,
    ApplyStatus(StatusKind),
    Shield,
    Heal,
    Buff(BuffKind),
    Cleanse,
}

/// The card data an effect needs, detached from the hand that owns it.
#[derive(Clone, Debug)]
pub struct EffectCard {
    pub template: Arc<CardTemplate>,
    /// Power after buffs.
    pub power: u32,
}

/// Outcome of one activation, consumed by the driver and the log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivationResult {
    pub card_id: CardId,
    /// The effect ran to completion.
    pub success: bool,
    /// The accuracy roll succeeded.
    pub hit: bool,
    /// HP actually removed from the target.
    pub damage: u32,
    /// Target defense points consumed before HP.
    pub absorbed: u32,
    /// HP actually restored to the user.
    pub healing: u32,
    pub defense_gained: u32,
    pub status: Option<(StatusKind, StatusOutcome)>,
    pub buff: Option<BuffKind>,
    /// Type-effectiveness multiplier in percent (100 = neutral).
    pub effectiveness: u32,
    /// The user's turn ends after this activation.
    pub skip_turn: bool,
    pub message_key: &'static str,
}

impl ActivationResult {
    fn blank(card_id: CardId, success: bool, hit: bool, message_key: &'static str) -> Self {
        Self {
            card_id,
            success,
            hit,
            damage: 0,
            absorbed: 0,
            healing: 0,
            defense_gained: 0,
            status: None,
            buff: None,
            effectiveness: 100,
            skip_turn: false,
            message_key,
        }
    }

    /// The accuracy roll failed.
    #[must_use]
    pub fn miss(card_id: CardId) -> Self {
        Self::blank(card_id, false, false, "battle.miss")
    }

    /// The card hit but its effect faulted.
    #[must_use]
    pub fn failed(card_id: CardId) -> Self {
        Self::blank(card_id, false, true, "battle.effect_failed")
    }

    /// A successful hit, to be filled in by the effect.
    #[must_use]
    pub fn hit(card_id: CardId, message_key: &'static str) -> Self {
        Self::blank(card_id, true, true, message_key)
    }

    #[must_use]
    pub fn is_super_effective(&self) -> bool {
        self.effectiveness > 100
    }

    #[must_use]
    pub fn is_resisted(&self) -> bool {
        self.effectiveness < 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_kind_serde() {
        let json = serde_json::to_string(&EffectKind::ApplyStatus(StatusKind::Burn)).unwrap();
        assert_eq!(json, r#"{"apply_status":"burn"}"#);

        let kind: EffectKind = serde_json::from_str("\"shield\"").unwrap();
        assert_eq!(kind, EffectKind::Shield);
    }

    #[test]
    fn test_result_constructors() {
        let miss = ActivationResult::miss(CardId::new("bash"));
        assert!(!miss.success);
        assert!(!miss.hit);
        assert_eq!(miss.damage, 0);

        let failed = ActivationResult::failed(CardId::new("bash"));
        assert!(!failed.success);
        assert!(failed.hit);
        assert_eq!(failed.message_key, "battle.effect_failed");
    }
}
