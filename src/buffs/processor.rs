//! Per-turn buff processing.
//!
//! Runs once for an actor at the start of its slot in the turn order,
//! before it acts. Steps, in order:
//!
//! 1. Passive regeneration of health then mana
//! 2. Stat derivation: base stats plus additive buff totals, then overrides
//! 3. Aggregated resource ticks (`hp`, `mana`; other keys are ignored)
//! 4. Duration countdown and expiry
//! 5. Cooldown countdown
//!
//! Durations count down after aggregation, so an effect still contributes on
//! the pass in which it expires.

use tracing::trace;

use super::aggregate::Aggregation;
use crate::core::{stats, ActorRef, Roster};
use crate::events::{EventKind, EventLog};

/// Applies regeneration, buff aggregation, ticks and expiry to one actor.
pub struct BuffProcessor;

impl BuffProcessor {
    /// Run the full buff pass for `who`, emitting events into `log`.
    ///
    /// Dead actors neither regenerate nor tick, but their effects and
    /// cooldowns still count down.
    pub fn process(roster: &mut Roster, who: ActorRef, log: &mut EventLog) {
        Self::regenerate(roster, who, log);
        let aggregation = Self::derive_stats(roster, who, log);
        Self::apply_ticks(roster, who, &aggregation, log);
        Self::expire(roster, who);
        Self::cool_down(roster, who);
    }

    fn regenerate(roster: &mut Roster, who: ActorRef, log: &mut EventLog) {
        let (name, hp_rate, mana_rate) = {
            let actor = roster.actor(who);
            if !actor.is_alive() {
                return;
            }
            (
                actor.name.clone(),
                actor.resources.hp_regen_per_turn,
                actor.resources.mana_regen_per_turn,
            )
        };

        if hp_rate > 0 {
            let resources = &mut roster.actor_mut(who).resources;
            let gained = resources.adjust_hp(hp_rate);
            let resulting = resources.hp();
            if gained > 0 {
                log.emit(
                    roster,
                    EventKind::ResourceRegenerated {
                        actor: name.clone(),
                        resource: stats::HP.to_string(),
                        amount: gained,
                        resulting,
                    },
                );
            }
        }

        if mana_rate > 0 {
            let resources = &mut roster.actor_mut(who).resources;
            let gained = resources.adjust_mana(mana_rate);
            let resulting = resources.mana();
            if gained > 0 {
                log.emit(
                    roster,
                    EventKind::ResourceRegenerated {
                        actor: name,
                        resource: stats::MANA.to_string(),
                        amount: gained,
                        resulting,
                    },
                );
            }
        }
    }

    /// Recompute the stat map from scratch. Returns the aggregation so the
    /// tick step sees the same effect set.
    fn derive_stats(roster: &mut Roster, who: ActorRef, log: &EventLog) -> Aggregation {
        let actor = roster.actor_mut(who);
        let aggregation = Aggregation::of(&actor.effects, log.registry());

        let mut derived = actor.base_stats.clone();
        for (stat, total) in aggregation.stat_totals() {
            *derived.entry(stat).or_insert(0) += total;
        }
        for (stat, value) in aggregation.overrides() {
            derived.insert(stat.clone(), *value);
        }
        actor.stats = derived;

        aggregation
    }

    fn apply_ticks(roster: &mut Roster, who: ActorRef, aggregation: &Aggregation, log: &mut EventLog) {
        for (resource, amount) in aggregation.resource_totals() {
            if amount == 0 {
                continue;
            }

            let actor = roster.actor_mut(who);
            if !actor.is_alive() {
                return;
            }
            let resulting = match resource.as_str() {
                stats::HP => {
                    actor.resources.adjust_hp(amount);
                    actor.resources.hp()
                }
                stats::MANA => {
                    actor.resources.adjust_mana(amount);
                    actor.resources.mana()
                }
                other => {
                    trace!(actor = %actor.name, resource = other, "No handler for resource tick");
                    continue;
                }
            };

            let name = actor.name.clone();
            log.emit(
                roster,
                EventKind::ResourceDrained {
                    actor: name,
                    resource,
                    amount,
                    resulting,
                },
            );
        }
    }

    fn expire(roster: &mut Roster, who: ActorRef) {
        let actor = roster.actor_mut(who);
        let before = actor.effects.len();
        actor.effects.retain_mut(|effect| !effect.tick());

        let expired = before - actor.effects.len();
        if expired > 0 {
            trace!(actor = %actor.name, expired, "Effects expired");
        }
    }

    fn cool_down(roster: &mut Roster, who: ActorRef) {
        let actor = roster.actor_mut(who);
        for remaining in actor.cooldowns.values_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        actor.cooldowns.retain(|_, remaining| *remaining > 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::{BuffDefinition, BuffRegistry, TemporalEffect};
    use crate::core::{Actor, ResourceBag, Team, TeamId};
    use crate::events::CombatEvent;

    const HERO: ActorRef = ActorRef::new(TeamId::A, 0);

    fn registry() -> BuffRegistry {
        [
            BuffDefinition::new("might").with_stat_buff("attack", 10),
            BuffDefinition::new("stone").with_stat_override("protection", 100),
            BuffDefinition::new("poison").with_damage_over_time(3),
            BuffDefinition::new("focus").with_resource_tick("mana", 4),
            BuffDefinition::new("fatigue").with_resource_tick("stamina", -2),
        ]
        .into_iter()
        .collect()
    }

    fn roster(hero: Actor) -> Roster {
        Roster::new(
            Team::new(TeamId::A, [hero]),
            Team::new(TeamId::B, [Actor::new("Dummy", "Target", ResourceBag::new(10, 0, 0, 0))]),
        )
    }

    fn hero() -> Actor {
        Actor::new("Hero", "Knight", ResourceBag::new(50, 20, 0, 0)).with_stat("attack", 7)
    }

    fn run(roster: &mut Roster, registry: &BuffRegistry) -> Vec<CombatEvent> {
        let mut log = EventLog::new(registry);
        BuffProcessor::process(roster, HERO, &mut log);
        log.into_events()
    }

    #[test]
    fn test_stacking_instances_then_expiry() {
        let registry = registry();
        let mut roster = roster(
            hero()
                .with_effect(TemporalEffect::new("might", 1, 1))
                .with_effect(TemporalEffect::new("might", 2, 1)),
        );

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).stat("attack"), 27);

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).stat("attack"), 17);

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).stat("attack"), 7);
        assert!(roster.actor(HERO).effects.is_empty());
    }

    #[test]
    fn test_duration_one_contributes_once() {
        let registry = registry();
        let mut roster = roster(hero().with_effect(TemporalEffect::new("might", 1, 2)));

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).stat("attack"), 27);
        assert!(roster.actor(HERO).effects.is_empty());

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).stat("attack"), 7);
    }

    #[test]
    fn test_override_beats_buffs() {
        let registry = registry();
        let mut roster = roster(
            hero()
                .with_stat("protection", 20)
                .with_effect(TemporalEffect::new("stone", 2, 3)),
        );

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).stat("protection"), 100);
    }

    #[test]
    fn test_regen_emits_actual_gain() {
        let registry = registry();
        let resources = ResourceBag::new(50, 20, 10, 5).with_hp(45).with_mana(20);
        let mut roster = roster(Actor::new("Hero", "Knight", resources));

        let events = run(&mut roster, &registry);

        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].kind,
            EventKind::ResourceRegenerated {
                actor: "Hero".into(),
                resource: "hp".into(),
                amount: 5,
                resulting: 50,
            }
        );
        assert_eq!(events[0].snapshot.get("Hero").map(|a| a.hp), Some(50));
    }

    #[test]
    fn test_damage_over_time_and_mana_tick() {
        let registry = registry();
        let mut roster = roster(
            Actor::new("Hero", "Knight", ResourceBag::new(50, 20, 0, 0).with_mana(10))
                .with_effect(TemporalEffect::new("poison", 2, 2))
                .with_effect(TemporalEffect::new("focus", 2, 1)),
        );

        let events = run(&mut roster, &registry);

        let kinds: Vec<_> = events.iter().map(|e| e.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::ResourceDrained {
                    actor: "Hero".into(),
                    resource: "hp".into(),
                    amount: -6,
                    resulting: 44,
                },
                EventKind::ResourceDrained {
                    actor: "Hero".into(),
                    resource: "mana".into(),
                    amount: 4,
                    resulting: 14,
                },
            ]
        );
    }

    #[test]
    fn test_unhandled_resource_is_ignored() {
        let registry = registry();
        let mut roster = roster(hero().with_effect(TemporalEffect::new("fatigue", 3, 1)));

        let events = run(&mut roster, &registry);

        assert!(events.is_empty());
        assert_eq!(roster.actor(HERO).effects[0].remaining, 2);
    }

    #[test]
    fn test_dead_actor_does_not_regen_or_tick() {
        let registry = registry();
        let resources = ResourceBag::new(50, 20, 10, 10).with_hp(0).with_mana(0);
        let mut roster = roster(
            Actor::new("Hero", "Knight", resources).with_effect(TemporalEffect::new("focus", 1, 1)),
        );

        let events = run(&mut roster, &registry);

        assert!(events.is_empty());
        assert_eq!(roster.actor(HERO).resources.mana(), 0);
        assert!(roster.actor(HERO).effects.is_empty());
    }

    #[test]
    fn test_cooldowns_count_down() {
        let registry = registry();
        let mut actor = hero();
        actor.set_cooldown("Slash", 2);
        actor.set_cooldown("Bash", 1);
        let mut roster = roster(actor);

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).cooldown("Slash"), 1);
        assert_eq!(roster.actor(HERO).cooldown("Bash"), 0);

        run(&mut roster, &registry);
        assert_eq!(roster.actor(HERO).cooldown("Slash"), 0);
    }
}
