//! Combatants.
//!
//! An `Actor` carries its identity, resources, decision policy (tactics),
//! damage modifiers, stats and active temporal effects. Actors are plain
//! data: cloning one yields a fully independent copy, which is how battles
//! keep the caller's templates untouched.
//!
//! ## Stats
//!
//! `base_stats` are the template values. `stats` is derived from the base
//! plus active buffs by the buff processor at the start of every turn the
//! actor takes; nothing else writes it.

use im::OrdMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::resources::ResourceBag;
use super::team::TeamId;
use crate::buffs::{BuffId, TemporalEffect};
use crate::skills::{Amplifier, DamageCategory, Tactic};

/// A combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Unique display name. Keys snapshots and deltas.
    pub name: String,

    /// Class label (content-defined, opaque to the engine).
    pub class: String,

    /// Side this actor fights on. Stamped by `Team::new`.
    pub team: TeamId,

    /// Health and mana.
    pub resources: ResourceBag,

    /// Decision policy, highest priority first.
    pub tactics: Vec<Tactic>,

    /// Outgoing damage modifiers per damage category.
    #[serde(default)]
    pub amplifiers: OrdMap<DamageCategory, Amplifier>,

    /// Incoming damage resistances per category (content data; the damage
    /// pipeline reads `protection` instead).
    #[serde(default)]
    pub resistances: OrdMap<DamageCategory, i64>,

    /// Template stat values.
    #[serde(default)]
    pub base_stats: OrdMap<String, i64>,

    /// Current stats, derived from `base_stats` and active buffs.
    #[serde(default)]
    pub(crate) stats: OrdMap<String, i64>,

    /// Active temporal effect instances, in application order.
    #[serde(default)]
    pub effects: Vec<TemporalEffect>,

    /// Remaining cooldown per skill name.
    #[serde(default)]
    pub(crate) cooldowns: FxHashMap<String, u32>,
}

impl Actor {
    /// Create an actor with no tactics, stats or effects.
    pub fn new(name: impl Into<String>, class: impl Into<String>, resources: ResourceBag) -> Self {
        Self {
            name: name.into(),
            class: class.into(),
            team: TeamId::A,
            resources,
            tactics: Vec::new(),
            amplifiers: OrdMap::new(),
            resistances: OrdMap::new(),
            base_stats: OrdMap::new(),
            stats: OrdMap::new(),
            effects: Vec::new(),
            cooldowns: FxHashMap::default(),
        }
    }

    /// Set a base stat (builder pattern). Also seeds the current value.
    #[must_use]
    pub fn with_stat(mut self, key: impl Into<String>, value: i64) -> Self {
        let key = key.into();
        self.base_stats.insert(key.clone(), value);
        self.stats.insert(key, value);
        self
    }

    /// Append a tactic at the lowest priority (builder pattern).
    #[must_use]
    pub fn with_tactic(mut self, tactic: Tactic) -> Self {
        self.tactics.push(tactic);
        self
    }

    /// Set the amplifier for a damage category (builder pattern).
    #[must_use]
    pub fn with_amplifier(mut self, category: DamageCategory, amplifier: Amplifier) -> Self {
        self.amplifiers.insert(category, amplifier);
        self
    }

    /// Set the resistance for a damage category (builder pattern).
    #[must_use]
    pub fn with_resistance(mut self, category: DamageCategory, value: i64) -> Self {
        self.resistances.insert(category, value);
        self
    }

    /// Start the battle with an active effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: TemporalEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Alive iff health is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.resources.is_alive()
    }

    /// Get a current stat, defaulting to zero.
    #[must_use]
    pub fn stat(&self, key: &str) -> i64 {
        self.stats.get(key).copied().unwrap_or(0)
    }

    /// Current stat map.
    #[must_use]
    pub fn stats(&self) -> &OrdMap<String, i64> {
        &self.stats
    }

    /// Amplifier for a damage category (neutral if unset).
    #[must_use]
    pub fn amplifier(&self, category: DamageCategory) -> Amplifier {
        self.amplifiers.get(&category).copied().unwrap_or_default()
    }

    /// Check if at least one instance of a buff is active.
    #[must_use]
    pub fn has_buff(&self, buff: &BuffId) -> bool {
        self.effects.iter().any(|e| &e.buff_id == buff)
    }

    /// Remaining cooldown for a skill (zero when ready).
    #[must_use]
    pub fn cooldown(&self, skill: &str) -> u32 {
        self.cooldowns.get(skill).copied().unwrap_or(0)
    }

    /// Put a skill on cooldown.
    pub fn set_cooldown(&mut self, skill: impl Into<String>, turns: u32) {
        self.cooldowns.insert(skill.into(), turns);
    }

    /// Add a new effect instance. Never merges with existing instances.
    pub fn add_effect(&mut self, effect: TemporalEffect) {
        self.effects.push(effect);
    }

    /// Remove every instance of a buff. Returns how many were removed.
    pub fn remove_effects(&mut self, buff: &BuffId) -> usize {
        let before = self.effects.len();
        self.effects.retain(|e| &e.buff_id != buff);
        before - self.effects.len()
    }
}
