//! # battle-sim
//!
//! A deterministic turn-based battle simulator.
//!
//! Two teams of actors fight until one side is eliminated or a turn cap is
//! reached. Every state change is recorded as a combat event carrying a
//! full snapshot of all actors; the log can then be compacted into a stream
//! of deltas that a remote client replays losslessly.
//!
//! ## Design Principles
//!
//! 1. **Content as Data**: Skills, targeting rules, conditions and tactics
//!    are serializable values. The engine hardcodes no units or skills.
//!
//! 2. **Explicit Configuration**: The buff registry and engine configuration
//!    are passed in. There is no global state.
//!
//! 3. **Reproducible**: The only randomness (crit rolls, random targeting)
//!    comes from an injectable, seeded `GameRng`.
//!
//! ## Architecture
//!
//! - **Battle Loop**: Per turn, each living actor runs the buff processor,
//!   then the tactic selector and effect resolver.
//!
//! - **Persistent Data Structures**: Stat maps and effect summaries use
//!   `im-rs`, so a snapshot per event is cheap.
//!
//! - **Delta Encoding**: Each event is diffed field by field against the
//!   immediately preceding one.
//!
//! ## Modules
//!
//! - `core`: Teams, actors, resources, RNG, configuration
//! - `buffs`: Buff definitions, registry, aggregation and the buff processor
//! - `skills`: Skills, targeting, conditions and tactics
//! - `effects`: Skill resolution and the damage pipeline
//! - `events`: Combat events, snapshots, deltas and the encoder/decoder
//! - `battle`: The battle state machine and its log
//! - `error`: Error types

pub mod battle;
pub mod buffs;
pub mod core;
pub mod effects;
pub mod error;
pub mod events;
pub mod skills;

// Re-export commonly used types
pub use crate::core::{
    Actor, ActorRef, DeltaMode, EngineConfig, GameRng, GameRngState, ResourceBag, Roster, Team,
    TeamId,
};

pub use crate::buffs::{BuffDefinition, BuffId, BuffProcessor, BuffRegistry, TemporalEffect};

pub use crate::skills::{
    Amplifier, Condition, DamageCategory, Skill, SkillEffect, SkillEffectKind, Tactic,
    TacticSelector, TargetGroup, TargetPriority, TargetRule,
};

pub use crate::effects::EffectResolver;

pub use crate::events::{
    ActorDelta, ActorSnapshot, BattleDelta, BattleSnapshot, CombatEvent, CompactCombatEvent,
    DamageModifier, DeltaDecoder, DeltaEncoder, EventKind,
};

pub use crate::battle::{simulate, Battle, BattleLog, BattleOutcome, BattlePhase};

pub use crate::error::{BattleError, Result};
