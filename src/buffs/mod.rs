//! Buffs, debuffs and their per-turn processing.
//!
//! ## Key Types
//!
//! - `BuffDefinition`: Static description of what a buff does
//! - `BuffRegistry`: Immutable lookup of definitions, shared by battles
//! - `TemporalEffect`: An active instance on an actor
//! - `Aggregation`: Stacked instances merged per buff
//! - `BuffProcessor`: The start-of-turn pass (regen, stats, ticks, expiry)

pub mod aggregate;
pub mod definition;
pub mod effect;
pub mod processor;
pub mod registry;

pub use aggregate::{Aggregation, EffectGroup};
pub use definition::{BuffDefinition, BuffId};
pub use effect::TemporalEffect;
pub use processor::BuffProcessor;
pub use registry::BuffRegistry;
