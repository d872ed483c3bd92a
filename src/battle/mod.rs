//! Battle driver.
//!
//! Alternates whole turns between the player and an enemy. A turn walks
//! the hand in order and activates each usable card until it runs out of
//! activations, stopping early on a skip-turn card or a death.
//!
//! ## Key Types
//!
//! - `Battle`: both combatants, the RNG and an append-only event log
//! - `BattleEvent`: log entries (turns, activations, status ticks)
//! - `BattleOutcome`: `PlayerWon | EnemyWon | Draw`

pub mod driver;
pub mod event;

pub use driver::Battle;
pub use event::{BattleEvent, BattleOutcome, Side};
