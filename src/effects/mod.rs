//! Card effects.
//!
//! - `EffectKind`: what a card does when it hits
//! - `EffectCard`: the card snapshot an effect runs against
//! - `ActivationResult`: what happened, for the driver and the battle log
//! - `resolve`: dispatch from kind to effect function

mod effect;
pub mod resolver;

pub use effect::{ActivationResult, EffectCard, EffectKind};
pub use resolver::resolve;
