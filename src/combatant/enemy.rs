//! Stage-scaled enemies.
//!
//! An enemy is a `Combatant` with `Role::Enemy`. Everything stage-dependent
//! comes from `BattleRules::enemy`:
//!
//! - max HP: `base_hp + hp_per_stage * (stage - 1)`
//! - hand capacity: one extra card every `stages_per_extra_card` stages
//! - name: stage-indexed table, clamped to its last entry
//! - status resistance: `min(cap, (stage - start) * per_stage)` past `start`

use std::sync::Arc;

use crate::core::config::BattleRules;

use super::fighter::{Combatant, Role};

impl Combatant {
    /// Build the enemy for `stage` (1-based; 0 is treated as 1).
    #[must_use]
    pub fn enemy(stage: u32, rules: Arc<BattleRules>) -> Self {
        let stage = stage.max(1);
        let scaling = &rules.enemy;
        let name = scaling.name(stage).to_string();
        let max_hp = scaling.max_hp(stage);
        let capacity = scaling.hand_size(stage);
        let resist = scaling.resist_chance(stage);

        let mut enemy = Self::new(name, Role::Enemy { stage }, max_hp, capacity, rules);
        enemy.set_status_resist_chance(resist);
        tracing::debug!(name = %enemy.name(), stage, max_hp, capacity, resist, "enemy spawned");
        enemy
    }

    /// Stage of an enemy; `None` for the player.
    #[must_use]
    pub fn stage(&self) -> Option<u32> {
        match self.role() {
            Role::Enemy { stage } => Some(stage),
            Role::Player => None,
        }
    }

    #[must_use]
    pub fn is_enemy(&self) -> bool {
        matches!(self.role(), Role::Enemy { .. })
    }
}
