//! Combat events and the compact event stream.
//!
//! A battle produces an append-only list of `CombatEvent`s, each carrying a
//! full `BattleSnapshot` taken at emission time. For remote playback the log
//! is compacted by `DeltaEncoder` into `CompactCombatEvent`s whose snapshots
//! are replaced by `BattleDelta`s; `DeltaDecoder` reverses this exactly.
//!
//! ## Key Types
//!
//! - `EventKind`: What happened, with event-specific fields
//! - `ActorSnapshot` / `BattleSnapshot`: Immutable state views
//! - `ActorDelta` / `BattleDelta`: Changed fields only
//! - `EventLog`: Records events during a battle

pub mod delta;
pub mod encoder;
pub mod event;
pub mod log;
pub mod snapshot;

pub use delta::{ActorDelta, BattleDelta};
pub use encoder::{DeltaDecoder, DeltaEncoder};
pub use event::{CombatEvent, CompactCombatEvent, DamageModifier, DamageModifiers, EventKind};
pub use log::EventLog;
pub use snapshot::{ActorSnapshot, BattleSnapshot};
