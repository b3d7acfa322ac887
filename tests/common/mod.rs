//! Shared fixtures for integration tests.

#![allow(dead_code)]

use battle_sim::core::stats;
use battle_sim::{
    Actor, BuffDefinition, BuffRegistry, Condition, DamageCategory, ResourceBag, Skill,
    SkillEffect, Tactic, TargetGroup, TargetPriority, TargetRule, Team, TeamId,
};

/// Buffs used by the skirmish teams.
pub fn registry() -> BuffRegistry {
    BuffRegistry::new()
        .with(BuffDefinition::new("might").with_stat_buff(stats::AMPLIFY, 25))
        .with(BuffDefinition::new("stoneskin").with_stat_override(stats::PROTECTION, 50))
        .with(BuffDefinition::new("poison").with_damage_over_time(3))
        .with(BuffDefinition::new("renew").with_resource_tick(stats::HP, 4))
        .with(BuffDefinition::new("focus").with_resource_tick(stats::MANA, 3))
}

/// A plain single-target attack.
pub fn strike(name: &str, amount: i64) -> Skill {
    Skill::new(name).with_effect(SkillEffect::damage(amount, DamageCategory::Physical))
}

/// Three heroes; `hp` sets their maximum health.
pub fn heroes(hp: [i64; 3]) -> Team {
    let knight = Actor::new("Knight", "Warrior", ResourceBag::new(hp[0], 0, 0, 0))
        .with_stat(stats::PROTECTION, 15)
        .with_tactic(
            Tactic::new(
                strike("Shield Bash", 14)
                    .with_effect(
                        SkillEffect::apply_buff("poison", 2, 1)
                            .with_targeting(TargetRule::FirstOfPrevious(1)),
                    )
                    .with_cooldown(2),
                TargetGroup::Enemies,
            )
            .with_priority(TargetPriority::LowestHp),
        )
        .with_tactic(Tactic::new(strike("Strike", 10), TargetGroup::Enemies));

    let cleric = Actor::new("Cleric", "Healer", ResourceBag::new(hp[1], 40, 0, 2))
        .with_stat(stats::MATK, 6)
        .with_tactic(
            Tactic::new(
                Skill::new("Mend")
                    .with_effect(SkillEffect::heal(12))
                    .with_effect(SkillEffect::apply_buff("renew", 2, 1))
                    .with_mana_cost(8),
                TargetGroup::Allies,
            )
            .with_condition(Condition::AllyHpBelow(60))
            .with_priority(TargetPriority::LowestHpRatio),
        )
        .with_tactic(
            Tactic::new(
                Skill::new("Bless")
                    .with_effect(SkillEffect::apply_buff("might", 2, 1))
                    .with_max_targets(3)
                    .with_mana_cost(5)
                    .with_cooldown(3),
                TargetGroup::Allies,
            )
            .with_condition(Condition::AllyLacksBuff("might".into()))
            .with_priority(TargetPriority::LacksBuff("might".into())),
        )
        .with_tactic(Tactic::new(
            Skill::new("Smite").with_effect(SkillEffect::damage(6, DamageCategory::Magical)),
            TargetGroup::Enemies,
        ));

    let ranger = Actor::new("Ranger", "Archer", ResourceBag::new(hp[2], 0, 0, 0))
        .with_stat(stats::CRIT_CHANCE, 30)
        .with_tactic(Tactic::new(
            strike("Volley", 7)
                .with_target_override(TargetRule::RandomEnemies(2))
                .with_cooldown(1),
            TargetGroup::Enemies,
        ))
        .with_tactic(
            Tactic::new(strike("Aimed Shot", 9), TargetGroup::Enemies)
                .with_priority(TargetPriority::Random),
        );

    Team::new(TeamId::A, [knight, cleric, ranger])
}

/// Three monsters; `hp` sets their maximum health.
pub fn monsters(hp: [i64; 3]) -> Team {
    let ogre = Actor::new("Ogre", "Brute", ResourceBag::new(hp[0], 0, 0, 0))
        .with_stat(stats::PROTECTION, 20)
        .with_tactic(
            Tactic::new(strike("Slam", 18).with_cooldown(1), TargetGroup::Enemies)
                .with_priority(TargetPriority::HighestHp),
        )
        .with_tactic(Tactic::new(strike("Punch", 8), TargetGroup::Enemies));

    let shaman = Actor::new("Shaman", "Caster", ResourceBag::new(hp[1], 30, 0, 3))
        .with_tactic(
            Tactic::new(
                Skill::new("Stoneskin")
                    .with_effect(SkillEffect::apply_buff("stoneskin", 2, 1))
                    .with_effect(
                        SkillEffect::apply_buff("focus", 3, 1).with_targeting(TargetRule::Caster),
                    )
                    .with_mana_cost(6)
                    .with_cooldown(2),
                TargetGroup::Allies,
            )
            .with_priority(TargetPriority::LacksBuff("stoneskin".into())),
        )
        .with_tactic(
            Tactic::new(
                Skill::new("Hex")
                    .with_effect(SkillEffect::apply_buff("poison", 3, 2))
                    .with_condition(Condition::EnemyLacksBuff("poison".into()))
                    .with_mana_cost(4),
                TargetGroup::Enemies,
            )
            .with_priority(TargetPriority::LacksBuff("poison".into())),
        )
        .with_tactic(Tactic::new(
            Skill::new("Zap").with_effect(SkillEffect::damage(6, DamageCategory::Magical)),
            TargetGroup::Enemies,
        ));

    let wolf = Actor::new("Wolf", "Beast", ResourceBag::new(hp[2], 0, 1, 0))
        .with_stat(stats::CRIT_CHANCE, 20)
        .with_tactic(
            Tactic::new(strike("Bite", 11), TargetGroup::Enemies)
                .with_priority(TargetPriority::LowestHp),
        );

    Team::new(TeamId::B, [ogre, shaman, wolf])
}
