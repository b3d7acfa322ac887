//! Aggregation of stacked temporal effects.
//!
//! Instances that share a buff id are merged into one `EffectGroup` per
//! component kind. Additive components sum `value * stacks` across the
//! group; the group's duration is the longest remaining among its members.
//! The same aggregation feeds both the buff processor and actor snapshots,
//! so what a client sees is exactly what the engine applied.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::definition::BuffId;
use super::effect::TemporalEffect;
use super::registry::BuffRegistry;

/// Merged view of every active instance of one buff.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectGroup {
    /// Longest remaining duration among merged instances.
    pub remaining: u32,
    /// Total stacks among merged instances.
    pub stacks: u32,
    /// Merged values per stat or resource key.
    pub values: OrdMap<String, i64>,
}

impl EffectGroup {
    fn absorb(&mut self, effect: &TemporalEffect) {
        self.remaining = self.remaining.max(effect.remaining);
        self.stacks = self.stacks.saturating_add(effect.stacks);
    }
}

/// Aggregated components of an actor's active effects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Additive stat changes, grouped by buff.
    pub stat_buffs: OrdMap<BuffId, EffectGroup>,
    /// Per-turn resource changes, grouped by buff.
    pub resource_ticks: OrdMap<BuffId, EffectGroup>,
    /// Stat overrides, grouped by buff (values are not scaled by stacks).
    pub stat_overrides: OrdMap<BuffId, EffectGroup>,
    /// Final override per stat, last instance in application order winning.
    overrides: OrdMap<String, i64>,
}

impl Aggregation {
    /// Aggregate a list of effect instances.
    ///
    /// Instances whose buff is missing from the registry contribute nothing;
    /// battle construction rejects such rosters up front.
    #[must_use]
    pub fn of(effects: &[TemporalEffect], registry: &BuffRegistry) -> Self {
        let mut aggregation = Self::default();

        for effect in effects {
            let Some(def) = registry.get(&effect.buff_id) else {
                continue;
            };
            let stacks = effect.stack_multiplier();

            if def.has_stat_buffs() {
                let group = aggregation
                    .stat_buffs
                    .entry(effect.buff_id.clone())
                    .or_insert_with(EffectGroup::default);
                group.absorb(effect);
                for (stat, value) in &def.stat_buffs {
                    *group.values.entry(stat.clone()).or_insert(0) += value * stacks;
                }
            }

            if def.has_resource_ticks() {
                let group = aggregation
                    .resource_ticks
                    .entry(effect.buff_id.clone())
                    .or_insert_with(EffectGroup::default);
                group.absorb(effect);
                for (resource, value) in def.resource_ticks_per_stack() {
                    *group.values.entry(resource).or_insert(0) += value * stacks;
                }
            }

            if def.has_stat_overrides() {
                let group = aggregation
                    .stat_overrides
                    .entry(effect.buff_id.clone())
                    .or_insert_with(EffectGroup::default);
                group.absorb(effect);
                for (stat, value) in &def.stat_overrides {
                    group.values.insert(stat.clone(), *value);
                    aggregation.overrides.insert(stat.clone(), *value);
                }
            }
        }

        aggregation
    }

    /// Total additive change per stat across all buffs.
    #[must_use]
    pub fn stat_totals(&self) -> OrdMap<String, i64> {
        Self::sum_groups(&self.stat_buffs)
    }

    /// Total per-turn change per resource across all buffs.
    #[must_use]
    pub fn resource_totals(&self) -> OrdMap<String, i64> {
        Self::sum_groups(&self.resource_ticks)
    }

    /// Final override value per stat.
    #[must_use]
    pub fn overrides(&self) -> &OrdMap<String, i64> {
        &self.overrides
    }

    fn sum_groups(groups: &OrdMap<BuffId, EffectGroup>) -> OrdMap<String, i64> {
        let mut totals = OrdMap::new();
        for group in groups.values() {
            for (key, value) in &group.values {
                *totals.entry(key.clone()).or_insert(0) += value;
            }
        }
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::BuffDefinition;

    fn registry() -> BuffRegistry {
        [
            BuffDefinition::new("might").with_stat_buff("amplify", 10),
            BuffDefinition::new("poison").with_damage_over_time(3),
            BuffDefinition::new("stone").with_stat_override("protection", 100),
            BuffDefinition::new("glass").with_stat_override("protection", 0),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_stacking_instances_sum() {
        let effects = vec![
            TemporalEffect::new("might", 2, 1),
            TemporalEffect::new("might", 4, 1),
        ];
        let aggregation = Aggregation::of(&effects, &registry());

        assert_eq!(aggregation.stat_totals().get("amplify"), Some(&20));

        let group = aggregation.stat_buffs.get(&BuffId::new("might")).unwrap();
        assert_eq!(group.remaining, 4);
        assert_eq!(group.stacks, 2);
    }

    #[test]
    fn test_stack_count_scales_values() {
        let effects = vec![TemporalEffect::new("poison", 2, 3)];
        let aggregation = Aggregation::of(&effects, &registry());

        assert_eq!(aggregation.resource_totals().get("hp"), Some(&-9));
        assert!(aggregation.stat_buffs.is_empty());
    }

    #[test]
    fn test_overrides_last_instance_wins() {
        let effects = vec![
            TemporalEffect::new("stone", 2, 5),
            TemporalEffect::new("glass", 2, 1),
        ];
        let aggregation = Aggregation::of(&effects, &registry());

        assert_eq!(aggregation.overrides().get("protection"), Some(&0));
        // Overrides are not scaled by stacks
        let stone = aggregation.stat_overrides.get(&BuffId::new("stone")).unwrap();
        assert_eq!(stone.values.get("protection"), Some(&100));
    }

    #[test]
    fn test_unknown_buffs_contribute_nothing() {
        let effects = vec![TemporalEffect::new("mystery", 2, 1)];
        let aggregation = Aggregation::of(&effects, &registry());
        assert_eq!(aggregation, Aggregation::default());
    }
}
