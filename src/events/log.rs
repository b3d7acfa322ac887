//! Append-only event recording.

use tracing::trace;

use super::event::{CombatEvent, EventKind};
use super::snapshot::BattleSnapshot;
use crate::buffs::BuffRegistry;
use crate::core::Roster;

/// Records events as they happen, snapshotting the roster at each one.
///
/// The snapshot is captured at emission time, so every event shows the
/// state immediately after its own change.
pub struct EventLog<'a> {
    registry: &'a BuffRegistry,
    turn: u32,
    events: Vec<CombatEvent>,
}

impl<'a> EventLog<'a> {
    /// Create an empty log.
    #[must_use]
    pub fn new(registry: &'a BuffRegistry) -> Self {
        Self {
            registry,
            turn: 0,
            events: Vec::new(),
        }
    }

    /// Buff definitions used to summarize effects in snapshots.
    #[must_use]
    pub fn registry(&self) -> &'a BuffRegistry {
        self.registry
    }

    /// Set the turn stamped on subsequent events.
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Current turn.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Append an event with a fresh snapshot of the roster.
    pub fn emit(&mut self, roster: &Roster, kind: EventKind) {
        trace!(turn = self.turn, event = kind.name(), "Event emitted");
        self.events.push(CombatEvent {
            turn: self.turn,
            kind,
            snapshot: BattleSnapshot::capture(roster, self.registry),
        });
    }

    /// Events recorded so far.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Number of events recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Finish recording.
    #[must_use]
    pub fn into_events(self) -> Vec<CombatEvent> {
        self.events
    }
}
