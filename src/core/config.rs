//! Engine configuration.
//!
//! `EngineConfig` controls how a battle runs and how its event log is
//! compacted. The buff registry is configuration too, but it is passed
//! separately by reference since it is shared between battles.

use serde::{Deserialize, Serialize};

use crate::error::{BattleError, Result};

/// Default turn cap after which a battle is a draw.
pub const DEFAULT_TURN_CAP: u32 = 100;

/// How compact events carry actor state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeltaMode {
    /// Every event carries a full delta (all fields of all actors).
    FullEveryEvent,

    /// Only the first event is full; every other event is diffed against
    /// the immediately preceding event.
    #[default]
    InitialFullOnly,

    /// Events whose index is a multiple of `interval` are full; the rest
    /// are diffed against the preceding event.
    Keyframes {
        /// Distance between full events. Must be at least 1.
        interval: u32,
    },
}

impl DeltaMode {
    /// Whether the event at `index` must carry a full delta.
    #[must_use]
    pub fn is_full(self, index: usize) -> bool {
        match self {
            DeltaMode::FullEveryEvent => true,
            DeltaMode::InitialFullOnly => index == 0,
            DeltaMode::Keyframes { interval } => {
                interval == 0 || index % interval as usize == 0
            }
        }
    }

    /// Reject unusable modes.
    pub fn validate(self) -> Result<()> {
        match self {
            DeltaMode::Keyframes { interval: 0 } => Err(BattleError::InvalidKeyframeInterval),
            _ => Ok(()),
        }
    }
}

/// Battle engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Compaction mode for the delta event stream.
    pub delta_mode: DeltaMode,

    /// Turns played before the battle is declared a draw.
    pub turn_cap: u32,

    /// Seed for the battle RNG (crit rolls, random targeting).
    /// Same seed and rosters produce an identical event log.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            delta_mode: DeltaMode::default(),
            turn_cap: DEFAULT_TURN_CAP,
            seed: 42,
        }
    }
}

impl EngineConfig {
    /// Set the delta mode.
    #[must_use]
    pub fn with_delta_mode(mut self, mode: DeltaMode) -> Self {
        self.delta_mode = mode;
        self
    }

    /// Set the turn cap.
    #[must_use]
    pub fn with_turn_cap(mut self, turns: u32) -> Self {
        self.turn_cap = turns;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Reject unusable settings.
    pub fn validate(&self) -> Result<()> {
        if self.turn_cap == 0 {
            return Err(BattleError::InvalidTurnCap);
        }
        self.delta_mode.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.delta_mode, DeltaMode::InitialFullOnly);
        assert_eq!(config.turn_cap, 100);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_delta_mode(DeltaMode::FullEveryEvent)
            .with_turn_cap(10)
            .with_seed(7);

        assert_eq!(config.delta_mode, DeltaMode::FullEveryEvent);
        assert_eq!(config.turn_cap, 10);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_full_event_selection() {
        assert!(DeltaMode::FullEveryEvent.is_full(5));
        assert!(DeltaMode::InitialFullOnly.is_full(0));
        assert!(!DeltaMode::InitialFullOnly.is_full(1));

        let keyframes = DeltaMode::Keyframes { interval: 3 };
        let full: Vec<_> = (0..7).filter(|i| keyframes.is_full(*i)).collect();
        assert_eq!(full, vec![0, 3, 6]);
    }

    #[test]
    fn test_zero_keyframe_interval_rejected() {
        let config = EngineConfig::default().with_delta_mode(DeltaMode::Keyframes { interval: 0 });
        assert_eq!(config.validate(), Err(BattleError::InvalidKeyframeInterval));
    }

    #[test]
    fn test_zero_turn_cap_rejected() {
        let config = EngineConfig::default().with_turn_cap(0);
        assert_eq!(config.validate(), Err(BattleError::InvalidTurnCap));
    }

    #[test]
    fn test_serialization() {
        let config = EngineConfig::default().with_delta_mode(DeltaMode::Keyframes { interval: 8 });
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
