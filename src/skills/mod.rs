//! Skills, targeting, conditions and tactics.
//!
//! Everything here is plain serializable data plus the small evaluators that
//! interpret it. Content layers author skills and tactics as values; the
//! engine never stores closures.
//!
//! ## Key Types
//!
//! - `Skill` / `SkillEffect`: What an ability does, step by step
//! - `TargetRule`: Per-effect target narrowing (chained targeting)
//! - `Condition`: Activation predicates
//! - `Tactic` / `TacticSelector`: An actor's decision policy

pub mod condition;
pub mod skill;
pub mod tactic;
pub mod targeting;

pub use condition::{Condition, ConditionContext, ConditionEvaluator};
pub use skill::{Amplifier, DamageCategory, Skill, SkillEffect, SkillEffectKind};
pub use tactic::{Tactic, TacticSelector};
pub use targeting::{TargetGroup, TargetPriority, TargetRule, TargetSelector};
