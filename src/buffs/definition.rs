//! Buff definitions - static buff data.
//!
//! A `BuffDefinition` describes what an active instance of a buff does.
//! Instance data (remaining duration, stacks) lives in `TemporalEffect`.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use crate::core::stats;

/// Identifier of a buff or debuff definition.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BuffId(pub String);

impl BuffId {
    /// Create a new buff ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BuffId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BuffId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Static buff definition.
///
/// A buff may combine any of the following components:
///
/// - **Stat buffs**: additive, scaled by stack count
/// - **Stat overrides**: written directly, not scaled, applied after buffs
/// - **Resource ticks**: per-turn resource change, scaled by stack count
/// - **Damage over time**: per-turn health loss, scaled by stack count
///
/// ## Example
///
/// ```
/// use battle_sim::buffs::{BuffDefinition, BuffId};
///
/// let rage = BuffDefinition::new("rage")
///     .with_stat_buff("amplify", 10)
///     .with_resource_tick("mana", 2);
///
/// assert_eq!(rage.id, BuffId::new("rage"));
/// assert!(rage.has_stat_buffs());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuffDefinition {
    /// Unique identifier.
    pub id: BuffId,

    /// Additive stat changes per stack.
    #[serde(default)]
    pub stat_buffs: OrdMap<String, i64>,

    /// Stat values forced while active.
    #[serde(default)]
    pub stat_overrides: OrdMap<String, i64>,

    /// Resource change per turn per stack (`hp`, `mana`, ...).
    #[serde(default)]
    pub resource_ticks: OrdMap<String, i64>,

    /// Health lost per turn per stack.
    #[serde(default)]
    pub damage_over_time: Option<i64>,
}

impl BuffDefinition {
    /// Create a definition with no components.
    pub fn new(id: impl Into<BuffId>) -> Self {
        Self {
            id: id.into(),
            stat_buffs: OrdMap::new(),
            stat_overrides: OrdMap::new(),
            resource_ticks: OrdMap::new(),
            damage_over_time: None,
        }
    }

    /// Add a stat buff component (builder pattern).
    #[must_use]
    pub fn with_stat_buff(mut self, stat: impl Into<String>, value: i64) -> Self {
        self.stat_buffs.insert(stat.into(), value);
        self
    }

    /// Add a stat override component (builder pattern).
    #[must_use]
    pub fn with_stat_override(mut self, stat: impl Into<String>, value: i64) -> Self {
        self.stat_overrides.insert(stat.into(), value);
        self
    }

    /// Add a resource tick component (builder pattern).
    #[must_use]
    pub fn with_resource_tick(mut self, resource: impl Into<String>, value: i64) -> Self {
        self.resource_ticks.insert(resource.into(), value);
        self
    }

    /// Add a damage-over-time component (builder pattern).
    #[must_use]
    pub fn with_damage_over_time(mut self, amount: i64) -> Self {
        self.damage_over_time = Some(amount);
        self
    }

    /// Check for a stat buff component.
    #[must_use]
    pub fn has_stat_buffs(&self) -> bool {
        !self.stat_buffs.is_empty()
    }

    /// Check for a stat override component.
    #[must_use]
    pub fn has_stat_overrides(&self) -> bool {
        !self.stat_overrides.is_empty()
    }

    /// Check for a resource tick component (damage over time included).
    #[must_use]
    pub fn has_resource_ticks(&self) -> bool {
        !self.resource_ticks.is_empty() || self.damage_over_time.is_some()
    }

    /// Per-stack resource ticks with damage over time folded into `hp`.
    #[must_use]
    pub fn resource_ticks_per_stack(&self) -> OrdMap<String, i64> {
        let mut ticks = self.resource_ticks.clone();
        if let Some(dot) = self.damage_over_time {
            *ticks.entry(stats::HP.to_string()).or_insert(0) -= dot;
        }
        ticks
    }
}
