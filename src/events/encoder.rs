//! Snapshot-diffing encoder and its matching decoder.
//!
//! ## Encoding
//!
//! The first event always carries a full delta, which seeds the receiver.
//! Every later event is diffed against the snapshot of the event immediately
//! before it (not the last event that changed anything), unless the delta
//! mode asks for a full delta at that index.
//!
//! ## Decoding
//!
//! A receiver keeps one reconstructed snapshot and overwrites the present
//! fields of every delta onto it, in event order. Reconstruction is lossless:
//! decoding `compact(events)` yields exactly the snapshots of `events`.
//!
//! An actor introduced mid-stream joins the end of its team's block, which
//! is where a roster places a newly added actor.

use tracing::trace;

use super::delta::BattleDelta;
use super::event::{CombatEvent, CompactCombatEvent};
use super::snapshot::BattleSnapshot;
use crate::core::DeltaMode;
use crate::error::{BattleError, Result};

/// Streaming encoder from verbose to compact events.
#[derive(Clone, Debug, Default)]
pub struct DeltaEncoder {
    mode: DeltaMode,
    previous: Option<BattleSnapshot>,
    index: usize,
}

impl DeltaEncoder {
    /// Create an encoder for the given mode.
    #[must_use]
    pub fn new(mode: DeltaMode) -> Self {
        Self {
            mode,
            previous: None,
            index: 0,
        }
    }

    /// Number of events encoded so far.
    #[must_use]
    pub fn encoded(&self) -> usize {
        self.index
    }

    /// Compact the next event of the stream.
    pub fn push(&mut self, event: &CombatEvent) -> CompactCombatEvent {
        let delta = match &self.previous {
            Some(previous) if !self.mode.is_full(self.index) => {
                BattleDelta::diff(previous, &event.snapshot)
            }
            _ => BattleDelta::full(&event.snapshot),
        };

        trace!(
            index = self.index,
            event = event.kind.name(),
            changed = delta.actors.len(),
            "Event compacted"
        );

        self.previous = Some(event.snapshot.clone());
        self.index += 1;

        CompactCombatEvent {
            turn: event.turn,
            kind: event.kind.clone(),
            delta,
        }
    }

    /// Compact a whole event log.
    ///
    /// Fails if the output length differs from the input length.
    pub fn compact(events: &[CombatEvent], mode: DeltaMode) -> Result<Vec<CompactCombatEvent>> {
        mode.validate()?;

        let mut encoder = Self::new(mode);
        let compacted: Vec<_> = events.iter().map(|event| encoder.push(event)).collect();

        if compacted.len() != events.len() {
            return Err(BattleError::EventCountMismatch {
                original: events.len(),
                compacted: compacted.len(),
            });
        }
        Ok(compacted)
    }
}

/// Receiver-side reconstruction of full snapshots.
#[derive(Clone, Debug, Default)]
pub struct DeltaDecoder {
    current: BattleSnapshot,
    index: usize,
}

impl DeltaDecoder {
    /// Create a decoder with no prior state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently reconstructed snapshot.
    #[must_use]
    pub fn current(&self) -> &BattleSnapshot {
        &self.current
    }

    /// Apply the next compact event and return the reconstructed snapshot.
    ///
    /// A partial delta for an actor the decoder has never seen is an
    /// invariant violation.
    pub fn apply(&mut self, event: &CompactCombatEvent) -> Result<BattleSnapshot> {
        for delta in &event.delta.actors {
            if let Some(actor) = self.current.get_mut(&delta.name) {
                delta.apply_to(actor);
                continue;
            }

            let actor = delta
                .to_snapshot()
                .ok_or_else(|| BattleError::UnknownActorInDelta {
                    name: delta.name.clone(),
                    event_index: self.index,
                })?;
            let at = self
                .current
                .actors
                .iter()
                .rposition(|a| a.team <= actor.team)
                .map_or(0, |i| i + 1);
            self.current.actors.insert(at, actor);
        }

        self.index += 1;
        Ok(self.current.clone())
    }

    /// Reconstruct the full snapshot sequence of a compact stream.
    pub fn reconstruct(events: &[CompactCombatEvent]) -> Result<Vec<BattleSnapshot>> {
        let mut decoder = Self::new();
        events.iter().map(|event| decoder.apply(event)).collect()
    }
}
