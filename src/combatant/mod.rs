//! Combatants: the player and stage-scaled enemies.
//!
//! ## Key Types
//!
//! - `Combatant`: health, shield, hand, statuses, buffs and turn state
//! - `StatusEffects`: at most one active effect per `StatusKind`
//! - `BuffSet`: timed self-buffs projected onto gated cards

pub mod buff;
pub mod enemy;
pub mod fighter;
pub mod status;

pub use buff::{ActiveBuff, BuffSet};
pub use fighter::{plurality_element, Combatant, Role, TurnPhase, TurnReport};
pub use status::{StatusEffect, StatusEffects, StatusOutcome};
