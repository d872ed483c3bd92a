//! Error types.
//!
//! Nothing inside a battle is fatal: invalid references surface as
//! `Option`/`bool`, and effect faults are folded into a failed
//! `ActivationResult` at the activation boundary. These enums cover the
//! loader side (rule tables and catalogs) and the effect fault channel.

use thiserror::Error;

use super::types::{BuffKind, StatusKind};

/// Rule/catalog file loading error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Card catalog registration error.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("card `{0}` is already registered")]
    DuplicateId(String),
    #[error("card `{id}` has an invalid activation range {min}..={max}")]
    InvalidActivationRange { id: String, min: u32, max: u32 },
    #[error("card `{id}` has accuracy {accuracy} outside 0..=100")]
    InvalidAccuracy { id: String, accuracy: u32 },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Fault raised while executing a card effect.
///
/// Never escapes `Combatant::activate_card`; converted into a failed result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EffectError {
    #[error("no rule configured for status `{0}`")]
    MissingStatusRule(StatusKind),
    #[error("no rule configured for buff `{0}`")]
    MissingBuffRule(BuffKind),
}
