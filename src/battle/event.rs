//! Battle log entries and outcomes.

use serde::{Deserialize, Serialize};

use crate::core::types::{BuffKind, StatusKind};
use crate::effects::ActivationResult;

/// One side of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// How a battle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    PlayerWon,
    EnemyWon,
    /// Both sides fell together, or the turn limit ran out.
    Draw,
}

/// Something that happened during a battle, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    TurnStarted { side: Side, turn: u32 },
    StatusDamage { side: Side, status: StatusKind, damage: u32 },
    Activation { side: Side, result: ActivationResult },
    /// A skip-turn card cut the rest of the turn.
    TurnSkipped { side: Side },
    StatusExpired { side: Side, status: StatusKind },
    BuffExpired { side: Side, buff: BuffKind },
    TurnEnded { side: Side, turn: u32 },
    Defeated { side: Side },
    Finished { outcome: BattleOutcome },
}
