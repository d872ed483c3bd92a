//! Turn-by-turn battle execution.

use im::Vector;

use crate::combatant::{Combatant, TurnReport};
use crate::core::rng::{BattleRng, GameRng};

use super::event::{BattleEvent, BattleOutcome, Side};

/// A battle between the player and one enemy.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use card_duel::battle::{Battle, BattleOutcome};
/// use card_duel::cards::default_catalog;
/// use card_duel::combatant::Combatant;
/// use card_duel::core::{BattleRules, GameRng};
/// use card_duel::hand::DeckManager;
///
/// let rules = Arc::new(BattleRules::default());
/// let deck = DeckManager::new(Arc::new(default_catalog()), Arc::clone(&rules));
/// let mut rng = GameRng::new(7);
///
/// let mut player = Combatant::player("Hero", Arc::clone(&rules));
/// deck.deal_hand(&mut player, 5, &mut rng);
/// let enemy = deck.spawn_enemy(1, &mut rng);
///
/// let mut battle = Battle::new(player, enemy, rng);
/// let outcome = battle.run(200);
/// assert!(matches!(outcome, BattleOutcome::PlayerWon | BattleOutcome::EnemyWon | BattleOutcome::Draw));
/// ```
#[derive(Clone, Debug)]
pub struct Battle<R: BattleRng = GameRng> {
    player: Combatant,
    enemy: Combatant,
    rng: R,
    active: Side,
    turns_played: u32,
    log: Vector<BattleEvent>,
    outcome: Option<BattleOutcome>,
}

impl<R: BattleRng> Battle<R> {
    /// Set up a battle. The player acts first.
    pub fn new(player: Combatant, enemy: Combatant, rng: R) -> Self {
        Self {
            player,
            enemy,
            rng,
            active: Side::Player,
            turns_played: 0,
            log: Vector::new(),
            outcome: None,
        }
    }

    #[must_use]
    pub fn player(&self) -> &Combatant {
        &self.player
    }

    #[must_use]
    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    /// Mutable access between turns, e.g. for hand edits.
    pub fn player_mut(&mut self) -> &mut Combatant {
        &mut self.player
    }

    pub fn enemy_mut(&mut self) -> &mut Combatant {
        &mut self.enemy
    }

    #[must_use]
    pub fn active_side(&self) -> Side {
        self.active
    }

    #[must_use]
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Everything that has happened so far. Cheap to clone.
    #[must_use]
    pub fn log(&self) -> &Vector<BattleEvent> {
        &self.log
    }

    /// Play the active side's whole turn, then hand over to the other side.
    ///
    /// Returns the outcome once the battle is decided.
    pub fn run_turn(&mut self) -> Option<BattleOutcome> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        let side = self.active;
        let Self { player, enemy, rng, log, .. } = self;
        let (user, target) = match side {
            Side::Player => (player, enemy),
            Side::Enemy => (enemy, player),
        };
        play_turn(side, user, target, rng, log);

        self.turns_played += 1;
        self.active = side.opponent();
        self.check_outcome()
    }

    /// Run until one side falls or `max_turns` turns have been played.
    /// A battle that is already decided keeps its outcome.
    pub fn run(&mut self, max_turns: u32) -> BattleOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        while self.turns_played < max_turns {
            if let Some(outcome) = self.run_turn() {
                return outcome;
            }
        }
        tracing::info!(turns = self.turns_played, "battle hit the turn limit");
        self.finish(BattleOutcome::Draw)
    }

    fn check_outcome(&mut self) -> Option<BattleOutcome> {
        let outcome = match (self.player.is_dead(), self.enemy.is_dead()) {
            (false, false) => return None,
            (true, true) => BattleOutcome::Draw,
            (false, true) => BattleOutcome::PlayerWon,
            (true, false) => BattleOutcome::EnemyWon,
        };
        if self.player.is_dead() {
            self.log.push_back(BattleEvent::Defeated { side: Side::Player });
        }
        if self.enemy.is_dead() {
            self.log.push_back(BattleEvent::Defeated { side: Side::Enemy });
        }
        Some(self.finish(outcome))
    }

    fn finish(&mut self, outcome: BattleOutcome) -> BattleOutcome {
        self.outcome = Some(outcome);
        self.log.push_back(BattleEvent::Finished { outcome });
        tracing::info!(?outcome, turns = self.turns_played, "battle finished");
        outcome
    }
}

fn play_turn(
    side: Side,
    user: &mut Combatant,
    target: &mut Combatant,
    rng: &mut dyn BattleRng,
    log: &mut Vector<BattleEvent>,
) {
    let report = user.start_turn();
    log.push_back(BattleEvent::TurnStarted { side, turn: user.turn() });
    log_report(side, &report, log);

    'cards: while !user.is_dead() {
        let Some(index) = user.next_card() else {
            break;
        };
        while let Some(result) = user.activate_card(index, target, rng) {
            log.push_back(BattleEvent::Activation { side, result });
            if target.is_dead() || user.is_dead() {
                break 'cards;
            }
            if user.take_skip_turn() {
                log.push_back(BattleEvent::TurnSkipped { side });
                break 'cards;
            }
        }
        user.advance_card_index();
    }

    let report = user.end_turn();
    log_report(side, &report, log);
    log.push_back(BattleEvent::TurnEnded { side, turn: user.turn() });
}

fn log_report(side: Side, report: &TurnReport, log: &mut Vector<BattleEvent>) {
    for &(status, damage) in &report.status_damage {
        log.push_back(BattleEvent::StatusDamage { side, status, damage });
    }
    for &status in &report.expired_statuses {
        log.push_back(BattleEvent::StatusExpired { side, status });
    }
    for &buff in &report.expired_buffs {
        log.push_back(BattleEvent::BuffExpired { side, buff });
    }
}
