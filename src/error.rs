//! Error types for battle construction and event-stream handling.
//!
//! Two families of failure exist:
//!
//! - **Configuration errors** are raised by `Battle::new` before any state is
//!   mutated. They name the offending team, actor or skill.
//! - **Internal-consistency errors** are raised by the delta encoder/decoder
//!   when an invariant of the event stream breaks. They indicate a bug and
//!   are never recovered from.
//!
//! Soft conditions (an effect with no targets, an unhandled resource tick,
//! a regen tick that gains nothing) are not errors.

use thiserror::Error;

use crate::core::TeamId;

/// Result type alias using [`BattleError`].
pub type Result<T> = std::result::Result<T, BattleError>;

/// Top-level error type for the battle engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BattleError {
    // === Configuration ===
    /// A team was supplied with no actors.
    #[error("{team} has no actors")]
    EmptyTeam {
        /// The empty team.
        team: TeamId,
    },

    /// Two actors share a name. Names key snapshots and deltas.
    #[error("Actor name '{name}' is used more than once")]
    DuplicateActorName {
        /// The repeated name.
        name: String,
    },

    /// A skill, condition or target priority references an unregistered buff.
    #[error("Actor '{actor}' skill '{skill}' references unknown buff '{buff}'")]
    UnknownBuff {
        /// Actor owning the tactic.
        actor: String,
        /// Skill (or tactic skill) containing the reference.
        skill: String,
        /// The missing buff id.
        buff: String,
    },

    /// An actor starts with temporal effects that reference an unregistered buff.
    #[error("Actor '{actor}' starts with unknown buff '{buff}'")]
    UnknownStartingBuff {
        /// The actor.
        actor: String,
        /// The missing buff id.
        buff: String,
    },

    /// Resource maxima must be non-negative.
    #[error("Actor '{actor}' has invalid resource maxima")]
    InvalidResources {
        /// The actor.
        actor: String,
    },

    /// A skill can never select a target.
    #[error("Actor '{actor}' skill '{skill}' has max_targets = 0")]
    ZeroMaxTargets {
        /// The actor.
        actor: String,
        /// The skill.
        skill: String,
    },

    /// Keyframe delta mode needs a positive interval.
    #[error("Keyframe interval must be at least 1")]
    InvalidKeyframeInterval,

    /// A battle must be allowed at least one turn.
    #[error("Turn cap must be at least 1")]
    InvalidTurnCap,

    // === Internal consistency ===
    /// Compaction changed the number of events.
    #[error("Invariant violated: {original} events compacted into {compacted}")]
    EventCountMismatch {
        /// Events in the verbose log.
        original: usize,
        /// Events produced by the encoder.
        compacted: usize,
    },

    /// A partial delta referenced an actor the receiver has never seen.
    #[error("Invariant violated: delta for unknown actor '{name}' at event {event_index}")]
    UnknownActorInDelta {
        /// Actor name in the delta.
        name: String,
        /// Index of the compact event.
        event_index: usize,
    },
}
