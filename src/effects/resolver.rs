//! Effect resolution - running a hit card against the two combatants.
//!
//! `resolve` dispatches on the template's `EffectKind` to one plain
//! function per kind. Card flags layered on top of the kind:
//!
//! - `random_bash`: damage is rolled in `power/2 ..= power*3/2`
//! - `stun_chance`: after damage lands, roll to stun the target
//! - `skip_turn`: the user's turn ends after this activation

use crate::combatant::{Combatant, StatusOutcome};
use crate::core::error::EffectError;
use crate::core::rng::BattleRng;
use crate::core::types::{BuffKind, StatusKind};

use super::effect::{ActivationResult, EffectCard, EffectKind};

/// Run the effect of a card that hit.
pub fn resolve(
    card: &EffectCard,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut dyn BattleRng,
) -> Result<ActivationResult, EffectError> {
    let mut result = match card.template.effect {
        EffectKind::Damage => damage(card, target, rng),
        EffectKind::Counter => counter(card, user, target, rng),
        EffectKind::Drain => drain(card, user, target, rng),
        EffectKind::ApplyStatus(kind) => apply_status(card, kind, target, rng)?,
        EffectKind::Shield => shield(card, user),
        EffectKind::Heal => heal(card, user),
        EffectKind::Buff(kind) => buff(card, kind, user)?,
        EffectKind::Cleanse => cleanse(card, user),
    };

    if card.template.skip_turn {
        user.request_skip_turn();
        result.skip_turn = true;
    }
    Ok(result)
}

/// Scale by type effectiveness, spend the target's shield, then hit HP.
fn strike(
    card: &EffectCard,
    base: u32,
    target: &mut Combatant,
    rng: &mut dyn BattleRng,
    result: &mut ActivationResult,
) {
    let effectiveness = target
        .rules()
        .effectiveness(card.template.element, target.defense_element());
    let amount = scale_percent(base, effectiveness);
    let (absorbed, remaining) = target.absorb_with_defense(amount);

    result.effectiveness = effectiveness;
    result.absorbed = absorbed;
    result.damage = target.take_damage(remaining);

    let stun_chance = card.template.stun_chance;
    if stun_chance > 0 && !target.is_dead() && rng.chance(f64::from(stun_chance) / 100.0) {
        let outcome = target.add_status_effect(StatusKind::Stun, None, None, rng);
        result.status = Some((StatusKind::Stun, outcome));
    }
}

/// `value * percent / 100`, floored and capped at `u32::MAX`.
fn scale_percent(value: u32, percent: u32) -> u32 {
    u32::try_from(u64::from(value) * u64::from(percent) / 100).unwrap_or(u32::MAX)
}

fn base_damage(card: &EffectCard, rng: &mut dyn BattleRng) -> u32 {
    if card.template.random_bash {
        let power = card.power;
        rng.roll_inclusive(power / 2, power.saturating_add(power / 2))
    } else {
        card.power
    }
}

fn damage(card: &EffectCard, target: &mut Combatant, rng: &mut dyn BattleRng) -> ActivationResult {
    let mut result = ActivationResult::hit(card.template.id.clone(), "battle.damage");
    let base = base_damage(card, rng);
    strike(card, base, target, rng, &mut result);
    result
}

fn counter(
    card: &EffectCard,
    user: &Combatant,
    target: &mut Combatant,
    rng: &mut dyn BattleRng,
) -> ActivationResult {
    let mut result = ActivationResult::hit(card.template.id.clone(), "battle.counter");
    let base = scale_percent(user.last_damage_taken(), card.power);
    strike(card, base, target, rng, &mut result);
    result
}

fn drain(
    card: &EffectCard,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut dyn BattleRng,
) -> ActivationResult {
    let mut result = ActivationResult::hit(card.template.id.clone(), "battle.drain");
    let base = base_damage(card, rng);
    strike(card, base, target, rng, &mut result);
    result.healing = user.heal(result.damage / 2);
    result
}

fn apply_status(
    card: &EffectCard,
    kind: StatusKind,
    target: &mut Combatant,
    rng: &mut dyn BattleRng,
) -> Result<ActivationResult, EffectError> {
    if target.rules().status_rule(kind).is_none() {
        return Err(EffectError::MissingStatusRule(kind));
    }
    let power = (card.power > 0).then_some(card.power);
    let outcome = target.add_status_effect(kind, power, None, rng);

    let key = match outcome {
        StatusOutcome::Applied => "battle.status",
        StatusOutcome::Immune => "battle.status_immune",
        StatusOutcome::Resisted => "battle.status_resisted",
    };
    let mut result = ActivationResult::hit(card.template.id.clone(), key);
    result.status = Some((kind, outcome));
    Ok(result)
}

fn shield(card: &EffectCard, user: &mut Combatant) -> ActivationResult {
    let mut result = ActivationResult::hit(card.template.id.clone(), "battle.shield");
    user.add_defense(card.power);
    result.defense_gained = card.power;
    result
}

fn heal(card: &EffectCard, user: &mut Combatant) -> ActivationResult {
    let mut result = ActivationResult::hit(card.template.id.clone(), "battle.heal");
    result.healing = user.heal(card.power);
    result
}

fn buff(
    card: &EffectCard,
    kind: BuffKind,
    user: &mut Combatant,
) -> Result<ActivationResult, EffectError> {
    if !user.add_buff(kind) {
        return Err(EffectError::MissingBuffRule(kind));
    }
    let mut result = ActivationResult::hit(card.template.id.clone(), "battle.buff");
    result.buff = Some(kind);
    Ok(result)
}

fn cleanse(card: &EffectCard, user: &mut Combatant) -> ActivationResult {
    user.clear_all_status_effects();
    ActivationResult::hit(card.template.id.clone(), "battle.cleanse")
}
