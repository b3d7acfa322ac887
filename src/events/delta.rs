//! Deltas between snapshots.
//!
//! An `ActorDelta` mirrors `ActorSnapshot` with every field except the name
//! optional. A field is present only when it changed relative to the
//! reference snapshot (or when the delta is a full introduction).
//!
//! Presence is checked field by field; there is no generic "any field set"
//! machinery.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::snapshot::{ActorSnapshot, BattleSnapshot};
use crate::buffs::{BuffId, EffectGroup};
use crate::core::TeamId;

/// Changed fields of one actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorDelta {
    /// Actor name. Always present.
    pub name: String,
    /// Side, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<TeamId>,
    /// Current health, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i64>,
    /// Maximum health, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<i64>,
    /// Current mana, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana: Option<i64>,
    /// Maximum mana, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_mana: Option<i64>,
    /// Whole stat map, if any stat changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<OrdMap<String, i64>>,
    /// Stat buff summary, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_buffs: Option<OrdMap<BuffId, EffectGroup>>,
    /// Resource tick summary, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ticks: Option<OrdMap<BuffId, EffectGroup>>,
    /// Stat override summary, if changed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_overrides: Option<OrdMap<BuffId, EffectGroup>>,
}

/// Keep `next` only if it differs from `prev`.
fn changed<T: PartialEq + Clone>(prev: &T, next: &T) -> Option<T> {
    (prev != next).then(|| next.clone())
}

impl ActorDelta {
    /// A delta with only the name set.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            team: None,
            hp: None,
            max_hp: None,
            mana: None,
            max_mana: None,
            stats: None,
            stat_buffs: None,
            resource_ticks: None,
            stat_overrides: None,
        }
    }

    /// A delta carrying every field of a snapshot.
    #[must_use]
    pub fn full(snapshot: &ActorSnapshot) -> Self {
        Self {
            name: snapshot.name.clone(),
            team: Some(snapshot.team),
            hp: Some(snapshot.hp),
            max_hp: Some(snapshot.max_hp),
            mana: Some(snapshot.mana),
            max_mana: Some(snapshot.max_mana),
            stats: Some(snapshot.stats.clone()),
            stat_buffs: Some(snapshot.stat_buffs.clone()),
            resource_ticks: Some(snapshot.resource_ticks.clone()),
            stat_overrides: Some(snapshot.stat_overrides.clone()),
        }
    }

    /// Fields of `next` that differ from `prev`, by value.
    #[must_use]
    pub fn diff(prev: &ActorSnapshot, next: &ActorSnapshot) -> Self {
        Self {
            name: next.name.clone(),
            team: changed(&prev.team, &next.team),
            hp: changed(&prev.hp, &next.hp),
            max_hp: changed(&prev.max_hp, &next.max_hp),
            mana: changed(&prev.mana, &next.mana),
            max_mana: changed(&prev.max_mana, &next.max_mana),
            stats: changed(&prev.stats, &next.stats),
            stat_buffs: changed(&prev.stat_buffs, &next.stat_buffs),
            resource_ticks: changed(&prev.resource_ticks, &next.resource_ticks),
            stat_overrides: changed(&prev.stat_overrides, &next.stat_overrides),
        }
    }

    /// Check if no field besides the name is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.team.is_none()
            && self.hp.is_none()
            && self.max_hp.is_none()
            && self.mana.is_none()
            && self.max_mana.is_none()
            && self.stats.is_none()
            && self.stat_buffs.is_none()
            && self.resource_ticks.is_none()
            && self.stat_overrides.is_none()
    }

    /// Convert a full delta into a snapshot.
    ///
    /// Returns `None` if any field is absent.
    #[must_use]
    pub fn to_snapshot(&self) -> Option<ActorSnapshot> {
        Some(ActorSnapshot {
            name: self.name.clone(),
            team: self.team?,
            hp: self.hp?,
            max_hp: self.max_hp?,
            mana: self.mana?,
            max_mana: self.max_mana?,
            stats: self.stats.clone()?,
            stat_buffs: self.stat_buffs.clone()?,
            resource_ticks: self.resource_ticks.clone()?,
            stat_overrides: self.stat_overrides.clone()?,
        })
    }

    /// Overwrite the present fields onto a snapshot.
    pub fn apply_to(&self, snapshot: &mut ActorSnapshot) {
        if let Some(team) = self.team {
            snapshot.team = team;
        }
        if let Some(hp) = self.hp {
            snapshot.hp = hp;
        }
        if let Some(max_hp) = self.max_hp {
            snapshot.max_hp = max_hp;
        }
        if let Some(mana) = self.mana {
            snapshot.mana = mana;
        }
        if let Some(max_mana) = self.max_mana {
            snapshot.max_mana = max_mana;
        }
        if let Some(stats) = &self.stats {
            snapshot.stats = stats.clone();
        }
        if let Some(stat_buffs) = &self.stat_buffs {
            snapshot.stat_buffs = stat_buffs.clone();
        }
        if let Some(resource_ticks) = &self.resource_ticks {
            snapshot.resource_ticks = resource_ticks.clone();
        }
        if let Some(stat_overrides) = &self.stat_overrides {
            snapshot.stat_overrides = stat_overrides.clone();
        }
    }
}

/// Changed actors of one event. Actors without changes are omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleDelta {
    /// Non-empty actor deltas, in snapshot order.
    pub actors: Vec<ActorDelta>,
}

impl BattleDelta {
    /// Full delta: every field of every actor.
    #[must_use]
    pub fn full(snapshot: &BattleSnapshot) -> Self {
        Self {
            actors: snapshot.actors.iter().map(ActorDelta::full).collect(),
        }
    }

    /// Diff `next` against `prev`.
    ///
    /// Actors new in `next` are introduced in full; actors present in both
    /// contribute only changed fields, or nothing when unchanged.
    #[must_use]
    pub fn diff(prev: &BattleSnapshot, next: &BattleSnapshot) -> Self {
        let actors = next
            .actors
            .iter()
            .filter_map(|actor| {
                let delta = match prev.get(&actor.name) {
                    Some(before) => ActorDelta::diff(before, actor),
                    None => ActorDelta::full(actor),
                };
                (!delta.is_empty()).then_some(delta)
            })
            .collect();

        Self { actors }
    }

    /// Check if no actor changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }
}
