//! Battle orchestration.
//!
//! `Battle` runs the turn loop over a private copy of both teams, driving
//! the buff processor, tactic selector and effect resolver for every
//! acting actor. The finished `BattleLog` holds the verbose event list and
//! compacts it on demand.

pub mod engine;
pub mod outcome;

pub use engine::{simulate, Battle};
pub use outcome::{BattleLog, BattleOutcome, BattlePhase};
