//! Combatant integration tests.
//!
//! These tests exercise combatants the way the battle driver does:
//! - Turn start/end processing with status ticks and decay
//! - Stun and taunt filtering through `activate_card`
//! - Random activation counts that stay fixed for a turn
//! - Skip-turn cards and HP bounds under repeated effects

use std::sync::Arc;

use card_duel::cards::{CardInstance, CardTemplate};
use card_duel::combatant::{Combatant, StatusOutcome, TurnPhase};
use card_duel::core::{BattleRules, BuffKind, CardType, Element, Lifetime, ScriptedRng, StatusKind};
use card_duel::effects::EffectKind;

fn rules() -> Arc<BattleRules> {
    Arc::new(BattleRules::default())
}

fn template(id: &str, card_type: CardType, element: Element, effect: EffectKind) -> CardTemplate {
    CardTemplate::new(id, id, card_type, element, effect).with_power(10)
}

fn instance(template: CardTemplate) -> CardInstance {
    CardInstance::new(Arc::new(template))
}

// ============================================================================
// Filters
// ============================================================================

/// A stunned combatant cannot activate anything.
#[test]
fn test_stunned_combatant_does_nothing() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(template("jab", CardType::Attack, Element::Normal, EffectKind::Damage)));
    let mut dummy = Combatant::player("Dummy", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);

    hero.add_status_effect(StatusKind::Stun, None, None, &mut rng);
    hero.start_turn();
    assert!(hero.is_turn_complete());
    assert!(hero.activate_card(0, &mut dummy, &mut rng).is_none());
    assert_eq!(dummy.hp(), 100);

    // Stun lasts one turn
    hero.end_turn();
    hero.start_turn();
    assert!(hero.activate_card(0, &mut dummy, &mut rng).is_some());
}

/// Taunt restricts activation to attack cards.
#[test]
fn test_taunt_allows_attacks_only() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(template("wall", CardType::Defense, Element::Normal, EffectKind::Shield)));
    hero.add_card(instance(template("jab", CardType::Attack, Element::Normal, EffectKind::Damage)));
    let mut dummy = Combatant::player("Dummy", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);

    hero.add_status_effect(StatusKind::Taunt, None, None, &mut rng);
    hero.start_turn();
    assert_eq!(hero.activatable_cards(), vec![1]);
    assert!(hero.activate_card(0, &mut dummy, &mut rng).is_none());
    assert_eq!(hero.defense(), 0);
    assert!(hero.activate_card(1, &mut dummy, &mut rng).is_some());
}

// ============================================================================
// Activation counts
// ============================================================================

/// A random-count card rolls once and then holds its count for the turn.
#[test]
fn test_random_count_stable_within_turn() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(
        template("flurry", CardType::Attack, Element::Normal, EffectKind::Damage)
            .with_power(1)
            .with_random_activations(2, 4),
    ));
    let mut dummy = Combatant::player("Dummy", Arc::clone(&rules));

    // First draw rolls the count (2 + floor(0.5 * 3) = 3)
    let mut rng = ScriptedRng::new(vec![0.5]);
    hero.start_turn();

    let mut uses = 0;
    while hero.activate_card(0, &mut dummy, &mut rng).is_some() {
        uses += 1;
    }
    assert_eq!(uses, 3);
    assert_eq!(rng.consumed(), 1);
    assert_eq!(hero.card(0).unwrap().effective_activation_count(), Some(3));

    // A new turn re-rolls
    let mut rng = ScriptedRng::new(vec![0.99]);
    hero.end_turn();
    hero.start_turn();
    let mut uses = 0;
    while hero.activate_card(0, &mut dummy, &mut rng).is_some() {
        uses += 1;
    }
    assert_eq!(uses, 4);
}

/// Frenzy adds one activation to attack cards on top of their base count.
#[test]
fn test_frenzy_adds_activation() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(template("jab", CardType::Attack, Element::Normal, EffectKind::Damage)));
    let mut dummy = Combatant::player("Dummy", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);

    hero.add_buff(BuffKind::Frenzy);
    hero.start_turn();
    let mut uses = 0;
    while hero.activate_card(0, &mut dummy, &mut rng).is_some() {
        uses += 1;
    }
    assert_eq!(uses, 2);
    assert_eq!(dummy.hp(), 80);
}

// ============================================================================
// Turn flow
// ============================================================================

/// A skip-turn card ends the turn after it resolves.
#[test]
fn test_skip_turn_card() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(
        template("fortress", CardType::Defense, Element::Normal, EffectKind::Shield)
            .with_power(30)
            .skips_turn(),
    ));
    hero.add_card(instance(template("jab", CardType::Attack, Element::Normal, EffectKind::Damage)));
    let mut dummy = Combatant::player("Dummy", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);

    hero.start_turn();
    let result = hero.activate_card(0, &mut dummy, &mut rng).unwrap();
    assert!(result.skip_turn);
    assert!(hero.is_turn_complete());
    assert!(hero.take_skip_turn());
    assert_eq!(hero.defense(), 30);

    // The flag does not leak into the next turn
    hero.end_turn();
    hero.start_turn();
    assert!(!hero.is_turn_complete());
    assert_eq!(hero.defense(), 0);
}

/// Poison ticks at turn end, decays, and never takes HP below zero.
#[test]
fn test_poison_until_death() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);
    hero.take_damage(90);

    hero.add_status_effect(StatusKind::Poison, Some(8), Some(Lifetime::Turns(3)), &mut rng);
    hero.start_turn();
    assert_eq!(hero.end_turn().total_damage(), 8);
    hero.start_turn();
    assert_eq!(hero.end_turn().total_damage(), 2);
    assert_eq!(hero.hp(), 0);
    assert!(hero.is_dead());
    assert_eq!(hero.phase(), TurnPhase::Idle);
}

/// A permanent status survives any number of turns.
#[test]
fn test_permanent_status() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);
    hero.add_status_effect(StatusKind::Confusion, None, Some(Lifetime::Permanent), &mut rng);

    for _ in 0..10 {
        hero.start_turn();
        hero.end_turn();
    }
    assert!(hero.has_status_effect(StatusKind::Confusion));
}

/// Healing never exceeds max HP, damage never goes below zero.
#[test]
fn test_hp_bounds_hold() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(template("mend", CardType::Special, Element::Normal, EffectKind::Heal).with_power(25)));
    let mut dummy = Combatant::player("Dummy", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);

    hero.take_damage(10);
    hero.start_turn();
    let result = hero.activate_card(0, &mut dummy, &mut rng).unwrap();
    assert_eq!(result.healing, 10);
    assert_eq!(hero.hp(), hero.max_hp());

    for _ in 0..20 {
        dummy.take_damage(17);
        assert!(dummy.hp() <= dummy.max_hp());
    }
    assert_eq!(dummy.hp(), 0);
}

// ============================================================================
// Immunity and resistance
// ============================================================================

/// Immunity follows the defense element as the hand changes.
#[test]
fn test_immunity_tracks_hand() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    let mut rng = ScriptedRng::new(vec![]);
    hero.add_card(instance(template("static", CardType::Attack, Element::Electric, EffectKind::Damage)));

    assert_eq!(
        hero.add_status_effect(StatusKind::Paralysis, None, None, &mut rng),
        StatusOutcome::Immune
    );

    hero.replace_card(0, instance(template("jet", CardType::Attack, Element::Water, EffectKind::Damage)));
    assert_eq!(
        hero.add_status_effect(StatusKind::Paralysis, None, None, &mut rng),
        StatusOutcome::Applied
    );
    assert_eq!(hero.statuses().len(), 1);
}

/// Late-stage enemies shrug off some statuses.
#[test]
fn test_enemy_resistance_through_card() {
    let rules = rules();
    let mut hero = Combatant::player("Hero", Arc::clone(&rules));
    hero.add_card(instance(template(
        "venom",
        CardType::Status,
        Element::Normal,
        EffectKind::ApplyStatus(StatusKind::Poison),
    )));
    let mut boss = Combatant::enemy(8, Arc::clone(&rules));

    // accuracy 100, so the only draw is the resistance roll
    let mut rng = ScriptedRng::new(vec![0.05]);
    hero.start_turn();
    let result = hero.activate_card(0, &mut boss, &mut rng).unwrap();
    assert_eq!(result.status, Some((StatusKind::Poison, StatusOutcome::Resisted)));
    assert_eq!(result.message_key, "battle.status_resisted");
    assert!(!boss.has_status_effect(StatusKind::Poison));
}
