//! Temporal effects - active buff instances on an actor.

use serde::{Deserialize, Serialize};

use super::definition::BuffId;

/// One active instance of a buff on one actor.
///
/// Several instances with the same `buff_id` may coexist (a buff reapplied
/// before it expired). They are aggregated, never replaced.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporalEffect {
    /// Definition this instance refers to.
    pub buff_id: BuffId,
    /// Turns left, counting the current one.
    pub remaining: u32,
    /// Magnitude multiplier for additive components.
    pub stacks: u32,
}

impl TemporalEffect {
    /// Create a new effect instance.
    pub fn new(buff_id: impl Into<BuffId>, remaining: u32, stacks: u32) -> Self {
        Self {
            buff_id: buff_id.into(),
            remaining,
            stacks,
        }
    }

    /// Stack count as a signed multiplier.
    #[must_use]
    pub fn stack_multiplier(&self) -> i64 {
        i64::from(self.stacks)
    }

    /// Count down one turn. Returns true if the instance has expired.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining == 0
    }
}
