//! Damage and heal formulas.
//!
//! Damage pipeline, in order:
//!
//! 1. Caster amplifier for the damage category (`percent`, then `flat`)
//! 2. Critical check: a roll in `[0, 100)` below the caster's `crit_chance`
//!    doubles the amount
//! 3. Caster `amplify` as a percentage multiplier (`100 + amplify`)
//! 4. Target `protection`, clamped to `[0, 100]`, as a percentage reduction
//! 5. Floor of 1
//!
//! The crit roll is drawn for every hit, hit or miss, so the RNG stream
//! depends only on the number of hits.

use smallvec::SmallVec;

use crate::core::{stats, Actor, GameRng};
use crate::events::{DamageModifier, DamageModifiers};
use crate::skills::DamageCategory;

/// Final damage of one hit and what shaped it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageRoll {
    /// Damage to subtract from the target's health. Always at least 1.
    pub amount: i64,
    /// Modifiers applied along the way.
    pub modifiers: DamageModifiers,
}

/// Run the damage pipeline for one hit.
pub fn roll_damage(
    base: i64,
    category: DamageCategory,
    caster: &Actor,
    target: &Actor,
    rng: &mut GameRng,
) -> DamageRoll {
    let mut modifiers = SmallVec::new();
    let mut amount = caster.amplifier(category).apply(base);

    if rng.chance(caster.stat(stats::CRIT_CHANCE)) {
        amount = amount.saturating_mul(2);
        modifiers.push(DamageModifier::Critical);
    }

    amount = amount.saturating_mul(100 + caster.stat(stats::AMPLIFY)) / 100;

    let protection = target.stat(stats::PROTECTION).clamp(0, 100);
    amount = amount.saturating_mul(100 - protection) / 100;

    DamageRoll {
        amount: amount.max(1),
        modifiers,
    }
}

/// Heal amount: `max(1, power + caster matk)`.
#[must_use]
pub fn heal_amount(power: i64, caster: &Actor) -> i64 {
    power.saturating_add(caster.stat(stats::MATK)).max(1)
}
