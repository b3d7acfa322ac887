//! Skill effect resolution.
//!
//! `EffectResolver` turns a chosen skill into state changes and events:
//! damage, heals, buff application and buff removal, with chained
//! targeting between effects. The damage and heal formulas live in
//! `damage`.

pub mod damage;
pub mod resolver;

pub use damage::{heal_amount, roll_damage, DamageRoll};
pub use resolver::EffectResolver;
