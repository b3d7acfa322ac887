//! Actor resources: health and mana with regeneration.

use serde::{Deserialize, Serialize};

/// Health and mana pools.
///
/// Invariant: `0 <= hp <= max_hp` and `0 <= mana <= max_mana`. Every setter
/// clamps, so the invariant holds for all reachable states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBag {
    hp: i64,
    max_hp: i64,
    mana: i64,
    max_mana: i64,
    /// Health restored at the start of each of the actor's turns.
    pub hp_regen_per_turn: i64,
    /// Mana restored at the start of each of the actor's turns.
    pub mana_regen_per_turn: i64,
}

impl ResourceBag {
    /// Create full pools with the given maxima and regeneration rates.
    ///
    /// Negative maxima are kept as given so battle validation can reject
    /// them; current values clamp to zero.
    #[must_use]
    pub fn new(max_hp: i64, max_mana: i64, hp_regen_per_turn: i64, mana_regen_per_turn: i64) -> Self {
        Self {
            hp: max_hp.max(0),
            max_hp,
            mana: max_mana.max(0),
            max_mana,
            hp_regen_per_turn,
            mana_regen_per_turn,
        }
    }

    /// Start with a specific current health (builder pattern).
    #[must_use]
    pub fn with_hp(mut self, hp: i64) -> Self {
        self.set_hp(hp);
        self
    }

    /// Start with a specific current mana (builder pattern).
    #[must_use]
    pub fn with_mana(mut self, mana: i64) -> Self {
        self.set_mana(mana);
        self
    }

    /// Current health.
    #[must_use]
    pub const fn hp(&self) -> i64 {
        self.hp
    }

    /// Maximum health.
    #[must_use]
    pub const fn max_hp(&self) -> i64 {
        self.max_hp
    }

    /// Current mana.
    #[must_use]
    pub const fn mana(&self) -> i64 {
        self.mana
    }

    /// Maximum mana.
    #[must_use]
    pub const fn max_mana(&self) -> i64 {
        self.max_mana
    }

    /// Check if the maxima are usable.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.max_hp >= 0 && self.max_mana >= 0
    }

    /// Alive iff health is above zero.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Health as a percentage of maximum (0-100). Zero-max pools read as 0.
    #[must_use]
    pub fn hp_percent(&self) -> i64 {
        if self.max_hp <= 0 {
            0
        } else {
            self.hp * 100 / self.max_hp
        }
    }

    /// Set health, clamped to `[0, max_hp]`.
    pub fn set_hp(&mut self, hp: i64) {
        self.hp = hp.clamp(0, self.max_hp.max(0));
    }

    /// Set mana, clamped to `[0, max_mana]`.
    pub fn set_mana(&mut self, mana: i64) {
        self.mana = mana.clamp(0, self.max_mana.max(0));
    }

    /// Add (or subtract) health. Returns the actual change after clamping.
    pub fn adjust_hp(&mut self, delta: i64) -> i64 {
        let before = self.hp;
        self.set_hp(before.saturating_add(delta));
        self.hp - before
    }

    /// Add (or subtract) mana. Returns the actual change after clamping.
    pub fn adjust_mana(&mut self, delta: i64) -> i64 {
        let before = self.mana;
        self.set_mana(before.saturating_add(delta));
        self.mana - before
    }
}
