//! Core engine types: teams, actors, resources, RNG, configuration.
//!
//! This module contains the data model every other module builds on.
//! Content layers configure battles by constructing these types; the
//! engine never hardcodes units or skills.

pub mod actor;
pub mod config;
pub mod resources;
pub mod rng;
pub mod stats;
pub mod team;

pub use actor::Actor;
pub use config::{DeltaMode, EngineConfig, DEFAULT_TURN_CAP};
pub use resources::ResourceBag;
pub use rng::{GameRng, GameRngState};
pub use team::{ActorRef, Roster, Team, TeamId};
