//! Combatant state: health, hand, status effects and the turn machine.
//!
//! A combatant owns its hand exclusively. Every hand mutation recomputes
//! the defense element (plurality element of the hand, ties broken by
//! `BattleRules::element_order`) and re-projects buffs onto the cards.
//!
//! ## Turn machine
//!
//! `Idle -> TurnStart -> CardLoop -> TurnEnd -> Idle`
//!
//! - `start_turn`: turn counter, cursor reset, card reset, shield cleared,
//!   turn-start statuses (burn)
//! - card loop: `next_card` / `activate_card` / `advance_card_index`
//! - `end_turn`: turn-end statuses (poison), then status and buff decay

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{ActivationRoll, CardInstance, DisplayContext, DisplayStats};
use crate::core::config::{BattleRules, StatusTrigger};
use crate::core::rng::BattleRng;
use crate::core::types::{BuffKind, CardType, Element, Lifetime, StatusKind};
use crate::effects::{resolver, ActivationResult};

use super::buff::{ActiveBuff, BuffSet};
use super::status::{StatusEffect, StatusEffects, StatusOutcome};

/// Which side a combatant fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Enemy { stage: u32 },
}

/// Where a combatant is in its turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    #[default]
    Idle,
    TurnStart,
    CardLoop,
    TurnEnd,
}

/// Periodic effects processed at a turn boundary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// Damage dealt by each ticking status.
    pub status_damage: SmallVec<[(StatusKind, u32); 2]>,
    pub expired_statuses: SmallVec<[StatusKind; 4]>,
    pub expired_buffs: SmallVec<[BuffKind; 4]>,
}

impl TurnReport {
    #[must_use]
    pub fn total_damage(&self) -> u32 {
        self.status_damage.iter().map(|(_, d)| d).sum()
    }
}

/// Plurality element of a hand; ties go to the earliest element in
/// `element_order`. An empty hand is `Normal`.
#[must_use]
pub fn plurality_element(hand: &[CardInstance], rules: &BattleRules) -> Element {
    let mut candidates = Element::ALL;
    candidates.sort_by_key(|e| rules.element_rank(*e));

    let mut best: Option<(Element, usize)> = None;
    for element in candidates {
        let count = hand.iter().filter(|c| c.element() == element).count();
        if count > 0 && best.map_or(true, |(_, top)| count > top) {
            best = Some((element, count));
        }
    }
    best.map_or(Element::Normal, |(element, _)| element)
}

/// A player or enemy in battle.
#[derive(Clone, Debug)]
pub struct Combatant {
    name: String,
    role: Role,
    rules: Arc<BattleRules>,

    hp: u32,
    max_hp: u32,
    /// Shield points consumed before HP. Cleared at turn start.
    defense: u32,
    last_damage_taken: u32,

    hand: Vec<CardInstance>,
    hand_capacity: usize,
    defense_element: Element,

    statuses: StatusEffects,
    buffs: BuffSet,
    /// Chance to reject a new status before immunity is checked.
    status_resist_chance: f64,

    turn: u32,
    current_card_index: usize,
    phase: TurnPhase,
    skip_turn: bool,
}

impl Combatant {
    /// Create a combatant with explicit sizing.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        role: Role,
        max_hp: u32,
        hand_capacity: usize,
        rules: Arc<BattleRules>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            rules,
            hp: max_hp,
            max_hp,
            defense: 0,
            last_damage_taken: 0,
            hand: Vec::with_capacity(hand_capacity),
            hand_capacity,
            defense_element: Element::Normal,
            statuses: StatusEffects::new(),
            buffs: BuffSet::new(),
            status_resist_chance: 0.0,
            turn: 0,
            current_card_index: 0,
            phase: TurnPhase::Idle,
            skip_turn: false,
        }
    }

    /// Create a player sized by `rules.player`.
    #[must_use]
    pub fn player(name: impl Into<String>, rules: Arc<BattleRules>) -> Self {
        let max_hp = rules.player.max_hp;
        let capacity = rules.player.hand_capacity;
        Self::new(name, Role::Player, max_hp, capacity, rules)
    }

    pub(crate) fn set_status_resist_chance(&mut self, chance: f64) {
        self.status_resist_chance = chance.clamp(0.0, 1.0);
    }

    // === Accessors ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub fn rules(&self) -> &Arc<BattleRules> {
        &self.rules
    }

    #[must_use]
    pub fn hp(&self) -> u32 {
        self.hp
    }

    #[must_use]
    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    #[must_use]
    pub fn defense(&self) -> u32 {
        self.defense
    }

    #[must_use]
    pub fn last_damage_taken(&self) -> u32 {
        self.last_damage_taken
    }

    #[must_use]
    pub fn hand(&self) -> &[CardInstance] {
        &self.hand
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&CardInstance> {
        self.hand.get(index)
    }

    #[must_use]
    pub fn hand_capacity(&self) -> usize {
        self.hand_capacity
    }

    #[must_use]
    pub fn is_hand_full(&self) -> bool {
        self.hand.len() >= self.hand_capacity
    }

    #[must_use]
    pub fn defense_element(&self) -> Element {
        self.defense_element
    }

    #[must_use]
    pub fn statuses(&self) -> &StatusEffects {
        &self.statuses
    }

    #[must_use]
    pub fn buffs(&self) -> &BuffSet {
        &self.buffs
    }

    #[must_use]
    pub fn status_resist_chance(&self) -> f64 {
        self.status_resist_chance
    }

    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    #[must_use]
    pub fn current_card_index(&self) -> usize {
        self.current_card_index
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    // === Health ===

    /// Remove HP, never below zero. Returns the HP actually lost.
    ///
    /// The loss is remembered as the last hit taken, which counters read.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let actual = self.lose_hp(amount);
        self.last_damage_taken = actual;
        actual
    }

    fn lose_hp(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.hp);
        self.hp -= actual;
        actual
    }

    /// Restore HP, never above max. Returns the HP actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.max_hp - self.hp);
        self.hp += actual;
        actual
    }

    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.hp == 0
    }

    pub fn add_defense(&mut self, amount: u32) {
        self.defense = self.defense.saturating_add(amount);
    }

    /// Spend shield points against incoming damage.
    ///
    /// Returns `(absorbed, remaining)`.
    pub fn absorb_with_defense(&mut self, amount: u32) -> (u32, u32) {
        let absorbed = amount.min(self.defense);
        self.defense -= absorbed;
        (absorbed, amount - absorbed)
    }

    // === Hand ===

    /// Append a card. Fails without mutation when the hand is full.
    pub fn add_card(&mut self, card: CardInstance) -> bool {
        if self.is_hand_full() {
            return false;
        }
        self.hand.push(card);
        self.on_hand_changed();
        true
    }

    /// Remove the card at `index`.
    pub fn remove_card(&mut self, index: usize) -> Option<CardInstance> {
        if index >= self.hand.len() {
            return None;
        }
        let removed = self.hand.remove(index);
        if self.current_card_index > index {
            self.current_card_index -= 1;
        }
        self.on_hand_changed();
        Some(removed)
    }

    /// Swap the card at `index` for a new one; returns the old card.
    pub fn replace_card(&mut self, index: usize, card: CardInstance) -> Option<CardInstance> {
        let slot = self.hand.get_mut(index)?;
        let old = std::mem::replace(slot, card);
        self.on_hand_changed();
        Some(old)
    }

    /// Remove every card.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
        self.current_card_index = 0;
        self.on_hand_changed();
    }

    /// Recompute the defense element from the current hand.
    pub fn update_defense_element(&mut self) {
        let element = plurality_element(&self.hand, &self.rules);
        if element != self.defense_element {
            tracing::trace!(combatant = %self.name, from = %self.defense_element, to = %element, "defense element changed");
        }
        self.defense_element = element;
    }

    fn on_hand_changed(&mut self) {
        self.update_defense_element();
        self.refresh_card_modifiers();
    }

    /// Project active buffs onto every card in hand.
    pub fn refresh_card_modifiers(&mut self) {
        let rules = &self.rules;
        let buffs = &self.buffs;
        for card in &mut self.hand {
            let power = buffs.power_bonus(rules, card.card_type(), card.element());
            let activations = buffs.activation_bonus(rules, card.card_type(), card.element());
            card.apply_modifiers(power, activations);
        }
    }

    // === Status effects ===

    /// Attach a status effect.
    ///
    /// Order: resistance roll (enemies past the resistance stage), then the
    /// immunity table for the current defense element, then
    /// replace-and-push with rule defaults for missing `power`/`duration`.
    pub fn add_status_effect(
        &mut self,
        kind: StatusKind,
        power: Option<u32>,
        duration: Option<Lifetime>,
        rng: &mut dyn BattleRng,
    ) -> StatusOutcome {
        if self.status_resist_chance > 0.0 && rng.chance(self.status_resist_chance) {
            tracing::debug!(combatant = %self.name, status = %kind, "status resisted");
            return StatusOutcome::Resisted;
        }
        if self.rules.is_immune(self.defense_element, kind) {
            tracing::debug!(
                combatant = %self.name,
                status = %kind,
                element = %self.defense_element,
                "status blocked by immunity"
            );
            return StatusOutcome::Immune;
        }

        let rule = self.rules.status_rule(kind);
        let power = power.or(rule.map(|r| r.default_power)).unwrap_or(0);
        let lifetime = duration
            .or(rule.map(|r| r.default_duration))
            .unwrap_or(Lifetime::Turns(1));

        self.statuses.apply(StatusEffect::new(kind, power, lifetime));
        tracing::debug!(combatant = %self.name, status = %kind, power, ?lifetime, "status applied");
        StatusOutcome::Applied
    }

    pub fn remove_status_effect(&mut self, kind: StatusKind) -> bool {
        self.statuses.remove(kind)
    }

    #[must_use]
    pub fn has_status_effect(&self, kind: StatusKind) -> bool {
        self.statuses.has(kind)
    }

    pub fn clear_all_status_effects(&mut self) {
        self.statuses.clear();
    }

    // === Buffs ===

    /// Attach a buff using its rule's duration. Fails if no rule exists.
    pub fn add_buff(&mut self, kind: BuffKind) -> bool {
        let Some(rule) = self.rules.buff_rule(kind) else {
            return false;
        };
        let lifetime = rule.duration;
        self.buffs.apply(ActiveBuff { kind, lifetime });
        self.refresh_card_modifiers();
        tracing::debug!(combatant = %self.name, buff = %kind, ?lifetime, "buff applied");
        true
    }

    pub fn remove_buff(&mut self, kind: BuffKind) -> bool {
        let removed = self.buffs.remove(kind);
        if removed {
            self.refresh_card_modifiers();
        }
        removed
    }

    #[must_use]
    pub fn has_buff(&self, kind: BuffKind) -> bool {
        self.buffs.has(kind)
    }

    // === Turn machine ===

    /// Begin a turn and process turn-start statuses.
    pub fn start_turn(&mut self) -> TurnReport {
        if self.phase != TurnPhase::Idle {
            tracing::warn!(combatant = %self.name, phase = ?self.phase, "start_turn outside Idle");
        }
        self.phase = TurnPhase::TurnStart;
        self.turn += 1;
        self.current_card_index = 0;
        self.skip_turn = false;
        self.defense = 0;
        for card in &mut self.hand {
            card.reset();
        }

        let report = TurnReport {
            status_damage: self.tick_statuses(StatusTrigger::TurnStartDamage),
            ..TurnReport::default()
        };
        self.phase = TurnPhase::CardLoop;
        tracing::debug!(combatant = %self.name, turn = self.turn, hp = self.hp, "turn started");
        report
    }

    /// End the turn: turn-end statuses, then status and buff decay.
    pub fn end_turn(&mut self) -> TurnReport {
        self.phase = TurnPhase::TurnEnd;
        let status_damage = self.tick_statuses(StatusTrigger::TurnEndDamage);
        let expired_statuses = self.statuses.decay();
        let expired_buffs = self.buffs.decay();
        if !expired_buffs.is_empty() {
            self.refresh_card_modifiers();
        }
        self.phase = TurnPhase::Idle;
        tracing::debug!(combatant = %self.name, turn = self.turn, hp = self.hp, "turn ended");
        TurnReport {
            status_damage,
            expired_statuses,
            expired_buffs,
        }
    }

    fn tick_statuses(&mut self, trigger: StatusTrigger) -> SmallVec<[(StatusKind, u32); 2]> {
        let ticking: SmallVec<[StatusEffect; 2]> = self
            .rules
            .statuses
            .iter()
            .filter(|r| r.trigger == trigger)
            .filter_map(|r| self.statuses.get(r.kind).copied())
            .collect();

        let mut dealt = SmallVec::new();
        for status in ticking {
            if status.power == 0 {
                continue;
            }
            let amount = u32::try_from(u64::from(self.max_hp) * u64::from(status.power) / 100)
                .unwrap_or(u32::MAX)
                .max(1);
            // Ticks leave `last_damage_taken` alone.
            let actual = self.lose_hp(amount);
            tracing::debug!(combatant = %self.name, status = %status.kind, damage = actual, "status tick");
            dealt.push((status.kind, actual));
        }
        dealt
    }

    /// Whether the card at `index` passes the stun/taunt filter.
    #[must_use]
    pub fn is_card_activatable(&self, index: usize) -> bool {
        let Some(card) = self.hand.get(index) else {
            return false;
        };
        if self.statuses.has(StatusKind::Stun) {
            return false;
        }
        if self.statuses.has(StatusKind::Taunt) {
            return card.card_type() == CardType::Attack;
        }
        true
    }

    /// Indices of cards that may be used right now. Never cached.
    #[must_use]
    pub fn activatable_cards(&self) -> Vec<usize> {
        (0..self.hand.len())
            .filter(|&i| self.is_card_activatable(i))
            .collect()
    }

    /// The next usable card at or after the cursor.
    #[must_use]
    pub fn next_card(&self) -> Option<usize> {
        (self.current_card_index..self.hand.len()).find(|&i| self.is_card_activatable(i))
    }

    /// Move the cursor past the current card.
    pub fn advance_card_index(&mut self) {
        self.current_card_index = match self.next_card() {
            Some(index) => index + 1,
            None => self.hand.len(),
        };
    }

    /// No usable cards remain, or a skip-turn card was used.
    #[must_use]
    pub fn is_turn_complete(&self) -> bool {
        self.skip_turn || self.next_card().is_none()
    }

    /// Raise the one-shot skip-turn flag.
    pub fn request_skip_turn(&mut self) {
        self.skip_turn = true;
    }

    /// Consume the skip-turn flag.
    pub fn take_skip_turn(&mut self) -> bool {
        std::mem::take(&mut self.skip_turn)
    }

    // === Activation ===

    /// Activate the card at `index` against `target`.
    ///
    /// Returns `None` when nothing was consumed: bad index, filtered out by
    /// stun/taunt, or no activations left. Effect faults come back as a
    /// failed result.
    pub fn activate_card(
        &mut self,
        index: usize,
        target: &mut Combatant,
        rng: &mut dyn BattleRng,
    ) -> Option<ActivationResult> {
        if !self.is_card_activatable(index) {
            return None;
        }
        let rules = Arc::clone(&self.rules);
        let card = self.hand.get_mut(index)?;
        let card_id = card.id().clone();

        match card.roll_activation(&self.statuses, &self.buffs, &rules, rng) {
            ActivationRoll::Exhausted => None,
            ActivationRoll::Miss => {
                tracing::debug!(user = %self.name, card = %card_id, "missed");
                Some(ActivationResult::miss(card_id))
            }
            ActivationRoll::Hit(effect_card) => {
                let result = match resolver::resolve(&effect_card, self, target, rng) {
                    Ok(result) => result,
                    Err(err) => {
                        tracing::warn!(user = %self.name, card = %card_id, %err, "card effect failed");
                        ActivationResult::failed(card_id)
                    }
                };
                tracing::debug!(
                    user = %self.name,
                    opponent = %target.name,
                    card = %result.card_id,
                    damage = result.damage,
                    healing = result.healing,
                    "activated"
                );
                Some(result)
            }
        }
    }

    /// Runtime stats of a card in hand.
    #[must_use]
    pub fn display_stats(&self, index: usize) -> Option<DisplayStats> {
        let card = self.hand.get(index)?;
        Some(card.display_stats(DisplayContext::Runtime {
            statuses: &self.statuses,
            buffs: &self.buffs,
            rules: &self.rules,
        }))
    }
}
