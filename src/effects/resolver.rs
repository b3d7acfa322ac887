//! Skill resolution - applying a skill's effects to the roster.
//!
//! Effects resolve in order with chained targeting: each effect's
//! `TargetRule` is resolved against the targets of the effect before it.
//! An effect that resolves to no targets is skipped without events and
//! leaves the chain's targets unchanged.

use tracing::trace;

use super::damage::{heal_amount, roll_damage};
use crate::buffs::TemporalEffect;
use crate::core::{ActorRef, GameRng, Roster};
use crate::events::{EventKind, EventLog};
use crate::skills::{Skill, SkillEffect, SkillEffectKind};

/// Applies skills.
pub struct EffectResolver;

impl EffectResolver {
    /// Use `skill` from `caster` on `initial_targets`.
    ///
    /// Deducts the mana cost, emits `SkillUsed`, resolves every effect and
    /// finally puts the skill on cooldown.
    pub fn apply_skill(
        roster: &mut Roster,
        caster: ActorRef,
        skill: &Skill,
        initial_targets: &[ActorRef],
        rng: &mut GameRng,
        log: &mut EventLog,
    ) {
        let caster_name = {
            let actor = roster.actor_mut(caster);
            actor.resources.adjust_mana(-skill.mana_cost);
            actor.name.clone()
        };
        let targets = initial_targets
            .iter()
            .map(|r| roster.actor(*r).name.clone())
            .collect();
        trace!(actor = %caster_name, skill = %skill.name, "Skill used");
        log.emit(
            roster,
            EventKind::SkillUsed {
                actor: caster_name,
                skill: skill.name.clone(),
                targets,
            },
        );

        let mut chain = initial_targets.to_vec();
        for (index, effect) in skill.effects.iter().enumerate() {
            let resolved = effect.targeting.resolve(roster, caster, &chain, rng);
            if resolved.is_empty() {
                trace!(skill = %skill.name, index, "Effect has no targets, skipped");
                continue;
            }
            for target in &resolved {
                Self::apply_effect(roster, caster, *target, effect, rng, log);
            }
            chain = resolved;
        }

        if skill.cooldown > 0 {
            roster.actor_mut(caster).set_cooldown(skill.name.clone(), skill.cooldown);
        }
    }

    /// Apply one effect to one target and emit its event.
    fn apply_effect(
        roster: &mut Roster,
        caster: ActorRef,
        target: ActorRef,
        effect: &SkillEffect,
        rng: &mut GameRng,
        log: &mut EventLog,
    ) {
        let source = roster.actor(caster).name.clone();
        let target_name = roster.actor(target).name.clone();

        let kind = match &effect.kind {
            SkillEffectKind::Damage { amount, category } => {
                let roll = roll_damage(
                    *amount,
                    *category,
                    roster.actor(caster),
                    roster.actor(target),
                    rng,
                );
                let resources = &mut roster.actor_mut(target).resources;
                resources.adjust_hp(-roll.amount);
                EventKind::DamageDealt {
                    source,
                    target: target_name,
                    amount: roll.amount,
                    modifiers: roll.modifiers,
                    remaining_hp: resources.hp(),
                }
            }

            SkillEffectKind::Heal { power } => {
                let amount = heal_amount(*power, roster.actor(caster));
                let resources = &mut roster.actor_mut(target).resources;
                resources.adjust_hp(amount);
                EventKind::Healed {
                    source,
                    target: target_name,
                    amount,
                    resulting_hp: resources.hp(),
                }
            }

            SkillEffectKind::ApplyBuff {
                buff,
                duration,
                stacks,
            } => {
                roster
                    .actor_mut(target)
                    .add_effect(TemporalEffect::new(buff.clone(), *duration, *stacks));
                EventKind::BuffApplied {
                    source,
                    target: target_name,
                    buff: buff.clone(),
                    duration: *duration,
                    stacks: *stacks,
                }
            }

            SkillEffectKind::RemoveEffect { buff } => {
                let instances = roster.actor_mut(target).remove_effects(buff);
                if instances == 0 {
                    return;
                }
                EventKind::BuffRemoved {
                    source,
                    target: target_name,
                    buff: buff.clone(),
                    instances,
                }
            }
        };

        log.emit(roster, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::{BuffId, BuffRegistry};
    use crate::core::{stats, Actor, ResourceBag, Team, TeamId};
    use crate::events::{CombatEvent, DamageModifier};
    use crate::skills::{DamageCategory, TargetRule};

    const MAGE: ActorRef = ActorRef::new(TeamId::A, 0);
    const CLERIC: ActorRef = ActorRef::new(TeamId::A, 1);
    const ORC: ActorRef = ActorRef::new(TeamId::B, 0);
    const GOBLIN: ActorRef = ActorRef::new(TeamId::B, 1);
    const TROLL: ActorRef = ActorRef::new(TeamId::B, 2);

    fn roster() -> Roster {
        Roster::new(
            Team::new(
                TeamId::A,
                [
                    Actor::new("Mage", "Caster", ResourceBag::new(30, 20, 0, 0))
                        .with_stat(stats::MATK, 4),
                    Actor::new("Cleric", "Healer", ResourceBag::new(40, 0, 0, 0).with_hp(10)),
                ],
            ),
            Team::new(
                TeamId::B,
                [
                    Actor::new("Orc", "Brute", ResourceBag::new(60, 0, 0, 0)),
                    Actor::new("Goblin", "Skirmisher", ResourceBag::new(5, 0, 0, 0))
                        .with_effect(TemporalEffect::new("shield", 2, 1))
                        .with_effect(TemporalEffect::new("shield", 4, 1)),
                    Actor::new("Troll", "Brute", ResourceBag::new(90, 0, 0, 0))
                        .with_stat(stats::PROTECTION, 100),
                ],
            ),
        )
    }

    fn apply(
        roster: &mut Roster,
        caster: ActorRef,
        skill: &Skill,
        targets: &[ActorRef],
    ) -> Vec<CombatEvent> {
        let registry = BuffRegistry::new();
        let mut log = EventLog::new(&registry);
        let mut rng = GameRng::new(7);
        EffectResolver::apply_skill(roster, caster, skill, targets, &mut rng, &mut log);
        log.into_events()
    }

    fn names(events: &[CombatEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.kind.name()).collect()
    }

    #[test]
    fn test_damage_then_chained_debuff() {
        let mut roster = roster();
        let skill = Skill::new("Frost Nova")
            .with_effect(SkillEffect::damage(8, DamageCategory::Magical))
            .with_effect(SkillEffect::apply_buff("chill", 2, 1))
            .with_max_targets(2);

        let events = apply(&mut roster, MAGE, &skill, &[ORC, TROLL]);

        assert_eq!(
            names(&events),
            vec!["SkillUsed", "DamageDealt", "DamageDealt", "BuffApplied", "BuffApplied"]
        );
        assert_eq!(roster.actor(ORC).resources.hp(), 52);
        // Full protection still takes the minimum
        assert_eq!(roster.actor(TROLL).resources.hp(), 89);
        assert!(roster.actor(ORC).has_buff(&BuffId::new("chill")));
        assert!(roster.actor(TROLL).has_buff(&BuffId::new("chill")));
        assert!(!roster.actor(GOBLIN).has_buff(&BuffId::new("chill")));
    }

    #[test]
    fn test_event_snapshots_follow_each_change() {
        let mut roster = roster();
        let skill = Skill::new("Bolt").with_effect(SkillEffect::damage(8, DamageCategory::Magical));

        let events = apply(&mut roster, MAGE, &skill, &[ORC]);

        assert_eq!(events[0].snapshot.get("Orc").map(|a| a.hp), Some(60));
        assert_eq!(events[1].snapshot.get("Orc").map(|a| a.hp), Some(52));
        match &events[1].kind {
            EventKind::DamageDealt {
                amount,
                remaining_hp,
                modifiers,
                ..
            } => {
                assert_eq!(*amount, 8);
                assert_eq!(*remaining_hp, 52);
                assert!(!modifiers.contains(&DamageModifier::Critical));
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_lethal_damage_clamps_to_zero() {
        let mut roster = roster();
        let skill = Skill::new("Smite").with_effect(SkillEffect::damage(50, DamageCategory::Physical));

        apply(&mut roster, MAGE, &skill, &[GOBLIN]);

        assert_eq!(roster.actor(GOBLIN).resources.hp(), 0);
        assert!(!roster.actor(GOBLIN).is_alive());
    }

    #[test]
    fn test_empty_effect_is_skipped_without_breaking_chain() {
        let mut roster = roster();
        roster.actor_mut(GOBLIN).resources.set_hp(0);
        let skill = Skill::new("Combo")
            .with_effect(SkillEffect::damage(3, DamageCategory::Physical))
            .with_effect(SkillEffect::heal(1).with_targeting(TargetRule::FirstOfPrevious(0)))
            .with_effect(SkillEffect::apply_buff("burn", 1, 1));

        // Goblin is dead: the first effect only hits the Orc
        let events = apply(&mut roster, MAGE, &skill, &[GOBLIN, ORC]);

        assert_eq!(names(&events), vec!["SkillUsed", "DamageDealt", "BuffApplied"]);
        assert!(roster.actor(ORC).has_buff(&BuffId::new("burn")));
    }

    #[test]
    fn test_heal_clamps_and_reports() {
        let mut roster = roster();
        let skill = Skill::new("Mend").with_effect(SkillEffect::heal(50));

        let events = apply(&mut roster, MAGE, &skill, &[CLERIC]);

        assert_eq!(roster.actor(CLERIC).resources.hp(), 40);
        assert_eq!(
            events[1].kind,
            EventKind::Healed {
                source: "Mage".into(),
                target: "Cleric".into(),
                amount: 54,
                resulting_hp: 40,
            }
        );
    }

    #[test]
    fn test_remove_effect_only_emits_when_removed() {
        let mut roster = roster();
        let skill = Skill::new("Dispel").with_effect(SkillEffect::remove_effect("shield"));

        let events = apply(&mut roster, MAGE, &skill, &[ORC, GOBLIN]);

        assert_eq!(names(&events), vec!["SkillUsed", "BuffRemoved"]);
        match &events[1].kind {
            EventKind::BuffRemoved { target, instances, .. } => {
                assert_eq!(target, "Goblin");
                assert_eq!(*instances, 2);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_mana_and_cooldown() {
        let mut roster = roster();
        let skill = Skill::new("Arcane Blast")
            .with_effect(SkillEffect::damage(1, DamageCategory::Magical))
            .with_mana_cost(6)
            .with_cooldown(2);

        let events = apply(&mut roster, MAGE, &skill, &[ORC]);

        assert_eq!(roster.actor(MAGE).resources.mana(), 14);
        assert_eq!(events[0].snapshot.get("Mage").map(|a| a.mana), Some(14));
        assert_eq!(roster.actor(MAGE).cooldown("Arcane Blast"), 2);
        assert_eq!(
            events[0].kind,
            EventKind::SkillUsed {
                actor: "Mage".into(),
                skill: "Arcane Blast".into(),
                targets: vec!["Orc".into()],
            }
        );
    }
}
