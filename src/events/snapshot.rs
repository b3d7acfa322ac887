//! Point-in-time views of actor state.
//!
//! Snapshots are independent values: they share no mutable state with the
//! actors they were captured from, so later mutation never leaks into an
//! earlier event. Maps are `im` persistent maps, which makes capturing a
//! snapshot per event cheap.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::buffs::{Aggregation, BuffId, BuffRegistry, EffectGroup};
use crate::core::{Actor, Roster, TeamId};

/// Externally visible state of one actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    /// Actor name (unique within a battle).
    pub name: String,
    /// Side the actor fights on.
    pub team: TeamId,
    /// Current health.
    pub hp: i64,
    /// Maximum health.
    pub max_hp: i64,
    /// Current mana.
    pub mana: i64,
    /// Maximum mana.
    pub max_mana: i64,
    /// Current stat values.
    pub stats: OrdMap<String, i64>,
    /// Active additive stat buffs, merged per buff.
    pub stat_buffs: OrdMap<BuffId, EffectGroup>,
    /// Active resource ticks, merged per buff.
    pub resource_ticks: OrdMap<BuffId, EffectGroup>,
    /// Active stat overrides, merged per buff.
    pub stat_overrides: OrdMap<BuffId, EffectGroup>,
}

impl ActorSnapshot {
    /// Capture an actor's current state.
    #[must_use]
    pub fn capture(actor: &Actor, registry: &BuffRegistry) -> Self {
        let aggregation = Aggregation::of(&actor.effects, registry);
        Self {
            name: actor.name.clone(),
            team: actor.team,
            hp: actor.resources.hp(),
            max_hp: actor.resources.max_hp(),
            mana: actor.resources.mana(),
            max_mana: actor.resources.max_mana(),
            stats: actor.stats().clone(),
            stat_buffs: aggregation.stat_buffs,
            resource_ticks: aggregation.resource_ticks,
            stat_overrides: aggregation.stat_overrides,
        }
    }

    /// Alive iff health is above zero.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }
}

/// Snapshot of every actor in a battle, in roster order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    /// Actor snapshots, team A first.
    pub actors: Vec<ActorSnapshot>,
}

impl BattleSnapshot {
    /// Capture the whole roster.
    #[must_use]
    pub fn capture(roster: &Roster, registry: &BuffRegistry) -> Self {
        Self {
            actors: roster
                .actors()
                .map(|actor| ActorSnapshot::capture(actor, registry))
                .collect(),
        }
    }

    /// Find an actor by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ActorSnapshot> {
        self.actors.iter().find(|a| a.name == name)
    }

    /// Find an actor by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut ActorSnapshot> {
        self.actors.iter_mut().find(|a| a.name == name)
    }

    /// Number of actors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Check if the snapshot holds no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
