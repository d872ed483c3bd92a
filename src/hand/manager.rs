//! Deck manager: random draws, hand edits and display ordering.
//!
//! The manager owns no cards. It holds the shared catalog and rules and
//! performs catalog lookups on behalf of a combatant, which keeps its own
//! hand and defense element in sync.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::cards::{CardCatalog, CardInstance, CardTemplate};
use crate::combatant::Combatant;
use crate::core::config::BattleRules;
use crate::core::rng::BattleRng;

/// Catalog-backed hand operations.
#[derive(Clone, Debug)]
pub struct DeckManager {
    catalog: Arc<CardCatalog>,
    rules: Arc<BattleRules>,
}

impl DeckManager {
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, rules: Arc<BattleRules>) -> Self {
        Self { catalog, rules }
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn rules(&self) -> &Arc<BattleRules> {
        &self.rules
    }

    /// Draw `count` distinct templates from the whole catalog.
    ///
    /// Asking for more than the catalog holds returns every card once.
    pub fn random_cards(&self, count: usize, rng: &mut dyn BattleRng) -> Vec<Arc<CardTemplate>> {
        let templates = self.catalog.templates();
        let count = count.min(templates.len());
        let mut pool: Vec<usize> = (0..templates.len()).collect();

        // Partial Fisher-Yates: the first `count` slots end up drawn
        for i in 0..count {
            let j = i + rng.pick_index(pool.len() - i);
            pool.swap(i, j);
        }
        pool[..count]
            .iter()
            .map(|&i| Arc::clone(&templates[i]))
            .collect()
    }

    /// Add a catalog card to a hand. Unknown id or full hand → `false`.
    pub fn add_card_to_player(&self, combatant: &mut Combatant, id: &str) -> bool {
        match self.catalog.create_instance(id) {
            Some(card) => combatant.add_card(card),
            None => {
                tracing::debug!(card = id, "unknown card id");
                false
            }
        }
    }

    /// Replace the card at `index` with a catalog card.
    pub fn replace_player_card(&self, combatant: &mut Combatant, index: usize, id: &str) -> bool {
        if index >= combatant.hand().len() {
            return false;
        }
        match self.catalog.create_instance(id) {
            Some(card) => combatant.replace_card(index, card).is_some(),
            None => false,
        }
    }

    pub fn remove_card_from_player(&self, combatant: &mut Combatant, index: usize) -> bool {
        combatant.remove_card(index).is_some()
    }

    /// Fill a hand with up to `count` random distinct cards.
    ///
    /// Returns how many cards were added.
    pub fn deal_hand(&self, combatant: &mut Combatant, count: usize, rng: &mut dyn BattleRng) -> usize {
        let room = combatant.hand_capacity().saturating_sub(combatant.hand().len());
        let drawn = self.random_cards(count.min(room), rng);
        let mut added = 0;
        for template in drawn {
            if combatant.add_card(CardInstance::new(template)) {
                added += 1;
            }
        }
        added
    }

    /// Build the enemy for `stage` with a full random hand.
    pub fn spawn_enemy(&self, stage: u32, rng: &mut dyn BattleRng) -> Combatant {
        let mut enemy = Combatant::enemy(stage, Arc::clone(&self.rules));
        let capacity = enemy.hand_capacity();
        self.deal_hand(&mut enemy, capacity, rng);
        enemy
    }

    /// Stable sort: element order, then type order, then id.
    ///
    /// Elements and types missing from the configured orders sort last.
    pub fn sort_cards<T: AsRef<CardTemplate>>(&self, cards: &mut [T]) {
        cards.sort_by(|a, b| compare_cards(&self.rules, a.as_ref(), b.as_ref()));
    }

    /// Every catalog template in display order.
    #[must_use]
    pub fn sorted_catalog(&self) -> Vec<Arc<CardTemplate>> {
        let mut cards = self.catalog.templates().to_vec();
        self.sort_cards(&mut cards);
        cards
    }
}

fn compare_cards(rules: &BattleRules, a: &CardTemplate, b: &CardTemplate) -> Ordering {
    rules
        .element_rank(a.element)
        .cmp(&rules.element_rank(b.element))
        .then_with(|| rules.type_rank(a.card_type).cmp(&rules.type_rank(b.card_type)))
        .then_with(|| a.id.cmp(&b.id))
}
