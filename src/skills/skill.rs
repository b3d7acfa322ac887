//! Skills and their effects.
//!
//! A `Skill` is pure data: a list of `SkillEffect`s applied in order, plus
//! its costs and activation condition. Nothing here holds behavior; the
//! effect resolver interprets it.

use serde::{Deserialize, Serialize};

use super::condition::Condition;
use super::targeting::TargetRule;
use crate::buffs::BuffId;

/// Damage category, used to pick the caster's amplifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DamageCategory {
    /// Weapon and body damage.
    Physical,
    /// Spell damage.
    Magical,
}

/// Per-category outgoing damage modifier: `amount * percent / 100 + flat`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amplifier {
    /// Multiplier in percent (100 = unchanged).
    pub percent: i64,
    /// Added after the multiplier.
    pub flat: i64,
}

impl Amplifier {
    /// Create an amplifier.
    #[must_use]
    pub const fn new(percent: i64, flat: i64) -> Self {
        Self { percent, flat }
    }

    /// Apply to a base amount.
    #[must_use]
    pub fn apply(self, amount: i64) -> i64 {
        amount.saturating_mul(self.percent) / 100 + self.flat
    }
}

impl Default for Amplifier {
    fn default() -> Self {
        Self::new(100, 0)
    }
}

/// What a single skill effect does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillEffectKind {
    /// Deal damage through the damage pipeline.
    Damage {
        /// Base amount before modifiers.
        amount: i64,
        /// Category selecting the caster's amplifier.
        category: DamageCategory,
    },

    /// Restore health: `max(1, power + caster matk)`.
    Heal {
        /// Base heal amount.
        power: i64,
    },

    /// Attach a new temporal effect instance.
    ApplyBuff {
        /// Buff to attach.
        buff: BuffId,
        /// Turns it stays active.
        duration: u32,
        /// Stack count of the new instance.
        stacks: u32,
    },

    /// Strip every instance of a buff.
    RemoveEffect {
        /// Buff to strip.
        buff: BuffId,
    },
}

/// One step of a skill, with its target narrowing rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEffect {
    /// What the step does.
    pub kind: SkillEffectKind,
    /// Targets relative to the previous step's targets.
    #[serde(default)]
    pub targeting: TargetRule,
}

impl SkillEffect {
    /// Wrap an effect kind with inherited targeting.
    #[must_use]
    pub fn new(kind: SkillEffectKind) -> Self {
        Self {
            kind,
            targeting: TargetRule::Inherit,
        }
    }

    /// Damage effect.
    #[must_use]
    pub fn damage(amount: i64, category: DamageCategory) -> Self {
        Self::new(SkillEffectKind::Damage { amount, category })
    }

    /// Heal effect.
    #[must_use]
    pub fn heal(power: i64) -> Self {
        Self::new(SkillEffectKind::Heal { power })
    }

    /// Buff application effect.
    pub fn apply_buff(buff: impl Into<BuffId>, duration: u32, stacks: u32) -> Self {
        Self::new(SkillEffectKind::ApplyBuff {
            buff: buff.into(),
            duration,
            stacks,
        })
    }

    /// Buff removal effect.
    pub fn remove_effect(buff: impl Into<BuffId>) -> Self {
        Self::new(SkillEffectKind::RemoveEffect { buff: buff.into() })
    }

    /// Set the targeting rule (builder pattern).
    #[must_use]
    pub fn with_targeting(mut self, targeting: TargetRule) -> Self {
        self.targeting = targeting;
        self
    }

    /// Buff referenced by this step, if any.
    #[must_use]
    pub fn buff(&self) -> Option<&BuffId> {
        match &self.kind {
            SkillEffectKind::ApplyBuff { buff, .. } | SkillEffectKind::RemoveEffect { buff } => {
                Some(buff)
            }
            SkillEffectKind::Damage { .. } | SkillEffectKind::Heal { .. } => None,
        }
    }
}

/// A usable ability.
///
/// ## Example
///
/// ```
/// use battle_sim::skills::{DamageCategory, Skill, SkillEffect, TargetRule};
///
/// let cleave = Skill::new("Cleave")
///     .with_effect(SkillEffect::damage(12, DamageCategory::Physical))
///     .with_effect(
///         SkillEffect::apply_buff("bleed", 2, 1).with_targeting(TargetRule::FirstOfPrevious(1)),
///     )
///     .with_max_targets(2)
///     .with_cooldown(2);
///
/// assert_eq!(cleave.effects.len(), 2);
/// assert_eq!(cleave.referenced_buffs().count(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Name. Keys the caster's cooldown map.
    pub name: String,
    /// Steps, applied in order.
    pub effects: Vec<SkillEffect>,
    /// Cap on initial targets chosen from the tactic's group.
    pub max_targets: usize,
    /// Replaces the tactic's group and priority selection when set.
    #[serde(default)]
    pub target_override: Option<TargetRule>,
    /// Must hold for the skill to be chosen.
    #[serde(default)]
    pub condition: Condition,
    /// Turns before the skill can be used again.
    #[serde(default)]
    pub cooldown: u32,
    /// Mana spent on use.
    #[serde(default)]
    pub mana_cost: i64,
}

impl Skill {
    /// Create a single-target skill with no effects, cost or cooldown.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effects: Vec::new(),
            max_targets: 1,
            target_override: None,
            condition: Condition::Always,
            cooldown: 0,
            mana_cost: 0,
        }
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: SkillEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Set the initial target cap (builder pattern).
    #[must_use]
    pub fn with_max_targets(mut self, max_targets: usize) -> Self {
        self.max_targets = max_targets;
        self
    }

    /// Override target selection (builder pattern).
    #[must_use]
    pub fn with_target_override(mut self, rule: TargetRule) -> Self {
        self.target_override = Some(rule);
        self
    }

    /// Set the activation condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Set the cooldown (builder pattern).
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Set the mana cost (builder pattern).
    #[must_use]
    pub fn with_mana_cost(mut self, mana_cost: i64) -> Self {
        self.mana_cost = mana_cost;
        self
    }

    /// Every buff id this skill refers to, in effects and its condition.
    pub fn referenced_buffs(&self) -> impl Iterator<Item = &BuffId> {
        self.effects
            .iter()
            .filter_map(SkillEffect::buff)
            .chain(self.condition.referenced_buffs())
    }
}
