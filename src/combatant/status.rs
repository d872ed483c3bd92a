//! Status effects attached to a combatant.
//!
//! At most one effect per `StatusKind` is active at a time; applying a kind
//! that is already present replaces the old entry. Durations count down at
//! the holder's turn end and permanent effects never expire.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::types::{Lifetime, StatusKind};

/// A single active status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Percentage magnitude (accuracy reduction or % of max HP).
    pub power: u32,
    pub lifetime: Lifetime,
}

impl StatusEffect {
    #[must_use]
    pub fn new(kind: StatusKind, power: u32, lifetime: Lifetime) -> Self {
        Self { kind, power, lifetime }
    }
}

/// Outcome of trying to attach a status effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusOutcome {
    /// The effect is now active (possibly replacing an older one).
    Applied,
    /// The holder's defense element is immune to this kind.
    Immune,
    /// The holder's resistance roll rejected it.
    Resisted,
}

/// Ordered set of active status effects, unique by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: SmallVec<[StatusEffect; 4]>,
}

impl StatusEffects {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an effect, replacing any existing one of the same kind.
    ///
    /// The replacement is appended, so iteration order reflects the most
    /// recent application last.
    pub fn apply(&mut self, effect: StatusEffect) {
        self.effects.retain(|e| e.kind != effect.kind);
        self.effects.push(effect);
    }

    /// Remove an effect. Returns whether one was present.
    pub fn remove(&mut self, kind: StatusKind) -> bool {
        let before = self.effects.len();
        self.effects.retain(|e| e.kind != kind);
        self.effects.len() != before
    }

    #[must_use]
    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// First active instance of a kind.
    #[must_use]
    pub fn get(&self, kind: StatusKind) -> Option<&StatusEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Count every effect down one turn and prune the expired ones.
    ///
    /// Returns the kinds that expired.
    pub fn decay(&mut self) -> SmallVec<[StatusKind; 4]> {
        let mut expired = SmallVec::new();
        self.effects.retain(|e| {
            let alive = e.lifetime.tick();
            if !alive {
                expired.push(e.kind);
            }
            alive
        });
        expired
    }
}
