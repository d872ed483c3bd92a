//! Hand manager integration tests.
//!
//! These tests verify catalog-backed hand management:
//! - Distinct random draws over the bundled catalog
//! - Defense element re-derivation on every edit
//! - Stable, config-driven sorting

use std::sync::Arc;

use card_duel::cards::{default_catalog, CardCatalog, CardTemplate};
use card_duel::combatant::Combatant;
use card_duel::core::{BattleRules, CardType, Element, GameRng};
use card_duel::effects::EffectKind;
use card_duel::hand::DeckManager;

fn bundled() -> DeckManager {
    DeckManager::new(Arc::new(default_catalog()), Arc::new(BattleRules::default()))
}

/// Draws never repeat a card and follow the seed.
#[test]
fn test_random_draws_are_distinct_and_seeded() {
    let deck = bundled();
    let mut a = GameRng::new(99);
    let mut b = GameRng::new(99);

    let first = deck.random_cards(8, &mut a);
    let second = deck.random_cards(8, &mut b);
    let ids = |cards: &[Arc<CardTemplate>]| cards.iter().map(|t| t.id.clone()).collect::<Vec<_>>();
    assert_eq!(ids(&first), ids(&second));

    let mut unique = ids(&first);
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 8);
}

/// Every hand edit leaves the defense element consistent with the hand.
#[test]
fn test_defense_element_follows_edits() {
    let deck = bundled();
    let mut hero = Combatant::player("Hero", Arc::clone(deck.rules()));

    assert_eq!(hero.defense_element(), Element::Normal);
    assert!(deck.add_card_to_player(&mut hero, "flame_strike"));
    assert_eq!(hero.defense_element(), Element::Fire);
    assert!(deck.add_card_to_player(&mut hero, "water_jet"));
    assert_eq!(hero.defense_element(), Element::Fire);
    assert!(deck.add_card_to_player(&mut hero, "steam_veil"));
    assert_eq!(hero.defense_element(), Element::Water);

    assert!(deck.replace_player_card(&mut hero, 1, "thunder_bolt"));
    assert_eq!(hero.defense_element(), Element::Fire);

    assert!(deck.remove_card_from_player(&mut hero, 0));
    assert!(deck.remove_card_from_player(&mut hero, 0));
    assert_eq!(hero.defense_element(), Element::Water);
}

/// A full hand rejects new cards without changing.
#[test]
fn test_full_hand_unchanged() {
    let deck = bundled();
    let mut hero = Combatant::player("Hero", Arc::clone(deck.rules()));
    let mut rng = GameRng::new(4);

    assert_eq!(deck.deal_hand(&mut hero, 20, &mut rng), 8);
    let before: Vec<_> = hero.hand().iter().map(|c| c.id().clone()).collect();
    assert!(!deck.add_card_to_player(&mut hero, "bash"));
    let after: Vec<_> = hero.hand().iter().map(|c| c.id().clone()).collect();
    assert_eq!(before, after);
}

/// Sorting follows the configured orders, puts unlisted values last and
/// breaks ties by id.
#[test]
fn test_sort_with_custom_orders() {
    let mut catalog = CardCatalog::new();
    let cards = [
        ("b_poison", CardType::Attack, Element::Poison),
        ("a_normal", CardType::Defense, Element::Normal),
        ("c_water_def", CardType::Defense, Element::Water),
        ("b_water_atk", CardType::Attack, Element::Water),
        ("a_water_atk", CardType::Attack, Element::Water),
        ("z_fire", CardType::Special, Element::Fire),
    ];
    for (id, card_type, element) in cards {
        catalog
            .register(CardTemplate::new(id, id, card_type, element, EffectKind::Damage))
            .unwrap();
    }

    let rules = BattleRules {
        element_order: vec![Element::Water, Element::Poison],
        type_order: vec![CardType::Attack, CardType::Defense],
        ..BattleRules::default()
    };
    let deck = DeckManager::new(Arc::new(catalog), Arc::new(rules));

    let sorted: Vec<_> = deck
        .sorted_catalog()
        .iter()
        .map(|t| t.id.as_str().to_string())
        .collect();
    assert_eq!(
        sorted,
        vec!["a_water_atk", "b_water_atk", "c_water_def", "b_poison", "a_normal", "z_fire"]
    );
}

/// Sorting works on hand instances as well as templates.
#[test]
fn test_sort_hand_instances() {
    let deck = bundled();
    let mut hand: Vec<_> = ["mend", "bash", "ignite", "water_jet"]
        .iter()
        .filter_map(|id| deck.catalog().create_instance(id))
        .collect();

    deck.sort_cards(&mut hand);
    let ids: Vec<_> = hand.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, vec!["ignite", "water_jet", "mend", "bash"]);
}
