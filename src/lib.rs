//! # card-duel
//!
//! An auto-battle card engine: a player and a stage-scaled enemy each hold
//! a hand of elemental cards that fire in order every turn.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Cards, status rules, buffs, immunities and the
//!    type-effectiveness table are plain data, loadable from TOML.
//!
//! 2. **Injected Randomness**: Every random decision goes through a
//!    `BattleRng`, so a seed (or a scripted sequence) replays a battle.
//!
//! 3. **Integer Math**: Accuracy and damage use integer percentages with
//!    floor division at each step.
//!
//! ## Modules
//!
//! - `core`: Vocabulary enums, rule tables, RNG, errors, localization seams
//! - `cards`: Templates, catalog, per-battle instances, accuracy, display
//! - `effects`: Effect kinds and their resolution
//! - `combatant`: Player/enemy state, statuses, buffs, turn machine
//! - `hand`: Catalog-backed hand management and sorting
//! - `battle`: Turn-by-turn driver with an event log

pub mod core;
pub mod cards;
pub mod effects;
pub mod combatant;
pub mod hand;
pub mod battle;

// Re-export commonly used types
pub use crate::core::{
    BattleRng, BattleRules, BuffKind, CardType, Element, GameRng, GameRngState, Lifetime,
    ScriptedRng, StatusKind,
};

pub use crate::cards::{
    default_catalog, CardCatalog, CardId, CardInstance, CardTemplate, DisplayContext, DisplayStats,
};

pub use crate::effects::{ActivationResult, EffectKind};

pub use crate::combatant::{Combatant, StatusOutcome, TurnPhase};

pub use crate::hand::DeckManager;

pub use crate::battle::{Battle, BattleEvent, BattleOutcome, Side};
