//! Core engine types: vocabulary enums, rule tables, RNG, errors and
//! presentation seams.
//!
//! Nothing here knows about hands or combatants. Rules and RNG are passed
//! into the higher layers explicitly instead of living in globals.

pub mod config;
pub mod error;
pub mod locale;
pub mod rng;
pub mod types;

pub use config::{
    BattleRules, BuffEffect, BuffRule, EnemyScaling, Immunity, Matchup, PlayerRules, StatusRule,
    StatusTrigger,
};
pub use error::{CatalogError, ConfigError, EffectError};
pub use locale::{localize, DefaultStyle, Localizer, MapLocalizer, StyleTable};
pub use rng::{BattleRng, GameRng, GameRngState, ScriptedRng};
pub use types::{BuffKind, CardType, Element, Lifetime, StatusKind};
