//! Battle phases, results and the finished battle log.

use serde::{Deserialize, Serialize};

use crate::core::{DeltaMode, Roster, TeamId};
use crate::error::Result;
use crate::events::{BattleSnapshot, CombatEvent, CompactCombatEvent, DeltaEncoder};

/// Battle state machine: `NotStarted -> InProgress -> Ended`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattlePhase {
    /// Constructed, nothing emitted yet.
    #[default]
    NotStarted,
    /// `BattleStart` emitted; turns are being played.
    InProgress,
    /// `BattleEnd` emitted.
    Ended,
}

/// Result of a completed battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// One side eliminated the other.
    Winner(TeamId),
    /// Turn cap reached with both sides standing, or both sides wiped out.
    Draw,
}

impl BattleOutcome {
    /// Outcome if the battle is decided: one side standing wins, no side
    /// standing is a draw. `None` while both sides have living actors.
    #[must_use]
    pub fn decide(roster: &Roster) -> Option<Self> {
        let mut standing = roster.standing();
        match (standing.next(), standing.next()) {
            (Some(_), Some(_)) => None,
            (Some(team), None) => Some(BattleOutcome::Winner(team)),
            (None, _) => Some(BattleOutcome::Draw),
        }
    }

    /// Winning side, if any.
    #[must_use]
    pub fn winner(self) -> Option<TeamId> {
        match self {
            BattleOutcome::Winner(team) => Some(team),
            BattleOutcome::Draw => None,
        }
    }

    /// Check if a side won.
    #[must_use]
    pub fn is_winner(self, team: TeamId) -> bool {
        self.winner() == Some(team)
    }
}

/// Everything a finished battle produced.
#[derive(Clone, Debug, PartialEq)]
pub struct BattleLog {
    /// Verbose events, each with a full snapshot.
    pub events: Vec<CombatEvent>,
    /// How the battle ended.
    pub outcome: BattleOutcome,
    /// Turns played.
    pub turns: u32,
    /// Final state of both teams.
    pub roster: Roster,
    /// Compaction mode from the engine configuration.
    pub delta_mode: DeltaMode,
}

impl BattleLog {
    /// Compact the event log with the configured delta mode.
    pub fn compact(&self) -> Result<Vec<CompactCombatEvent>> {
        self.compact_with(self.delta_mode)
    }

    /// Compact the event log with an explicit delta mode.
    pub fn compact_with(&self, mode: DeltaMode) -> Result<Vec<CompactCombatEvent>> {
        DeltaEncoder::compact(&self.events, mode)
    }

    /// Snapshot carried by the final event.
    #[must_use]
    pub fn final_snapshot(&self) -> Option<&BattleSnapshot> {
        self.events.last().map(|e| &e.snapshot)
    }

    /// Number of events with the given name.
    #[must_use]
    pub fn count(&self, event_name: &str) -> usize {
        self.events.iter().filter(|e| e.kind.name() == event_name).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_queries() {
        let win = BattleOutcome::Winner(TeamId::B);
        assert_eq!(win.winner(), Some(TeamId::B));
        assert!(win.is_winner(TeamId::B));
        assert!(!win.is_winner(TeamId::A));

        assert_eq!(BattleOutcome::Draw.winner(), None);
        assert!(!BattleOutcome::Draw.is_winner(TeamId::A));
    }

    #[test]
    fn test_decide_from_roster() {
        use crate::core::{Actor, ResourceBag, Team};

        let fighter = |name: &str, hp| {
            Actor::new(name, "Fighter", ResourceBag::new(10, 0, 0, 0).with_hp(hp))
        };
        let roster = |a: i64, b: i64| {
            Roster::new(
                Team::new(TeamId::A, [fighter("Knight", a)]),
                Team::new(TeamId::B, [fighter("Orc", b)]),
            )
        };

        assert_eq!(BattleOutcome::decide(&roster(5, 5)), None);
        assert_eq!(
            BattleOutcome::decide(&roster(5, 0)),
            Some(BattleOutcome::Winner(TeamId::A))
        );
        assert_eq!(
            BattleOutcome::decide(&roster(0, 5)),
            Some(BattleOutcome::Winner(TeamId::B))
        );
        assert_eq!(BattleOutcome::decide(&roster(0, 0)), Some(BattleOutcome::Draw));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&BattleOutcome::Winner(TeamId::A)).unwrap();
        assert_eq!(json, r#"{"Winner":"A"}"#);
        let draw: BattleOutcome = serde_json::from_str(r#""Draw""#).unwrap();
        assert_eq!(draw, BattleOutcome::Draw);
    }
}
