//! Combat events.
//!
//! Every event pairs an `EventKind` (what happened, with its own fields)
//! with actor state: a full `BattleSnapshot` in the verbose log, or a
//! `BattleDelta` in the compact stream. Event fields are identical in both
//! forms; only the state payload differs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::delta::BattleDelta;
use super::snapshot::BattleSnapshot;
use crate::battle::BattleOutcome;
use crate::buffs::BuffId;

/// Modifiers that shaped a damage amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageModifier {
    /// The hit was a critical and dealt double damage.
    Critical,
}

/// Modifier list for one hit. Rarely more than one entry.
pub type DamageModifiers = SmallVec<[DamageModifier; 2]>;

/// What happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Battle begins; the snapshot is the starting state.
    BattleStart,

    /// A new turn begins.
    TurnStart {
        turn: u32,
    },

    /// An actor's slot in the turn order comes up.
    CharacterActivated {
        actor: String,
    },

    /// An actor used a skill on its initial targets.
    SkillUsed {
        actor: String,
        skill: String,
        targets: Vec<String>,
    },

    /// Damage landed on one target.
    DamageDealt {
        source: String,
        target: String,
        amount: i64,
        modifiers: DamageModifiers,
        remaining_hp: i64,
    },

    /// Health restored on one target.
    Healed {
        source: String,
        target: String,
        amount: i64,
        resulting_hp: i64,
    },

    /// A new buff instance was attached.
    BuffApplied {
        source: String,
        target: String,
        buff: BuffId,
        duration: u32,
        stacks: u32,
    },

    /// Every instance of a buff was stripped.
    BuffRemoved {
        source: String,
        target: String,
        buff: BuffId,
        instances: usize,
    },

    /// Aggregated per-turn resource tick from active buffs.
    ResourceDrained {
        actor: String,
        resource: String,
        amount: i64,
        resulting: i64,
    },

    /// Passive regeneration; `amount` is the actual gain after clamping.
    ResourceRegenerated {
        actor: String,
        resource: String,
        amount: i64,
        resulting: i64,
    },

    /// Battle is over.
    BattleEnd {
        outcome: BattleOutcome,
        turns: u32,
    },
}

impl EventKind {
    /// Stable event name, for logging and client dispatch.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::BattleStart => "BattleStart",
            EventKind::TurnStart { .. } => "TurnStart",
            EventKind::CharacterActivated { .. } => "CharacterActivated",
            EventKind::SkillUsed { .. } => "SkillUsed",
            EventKind::DamageDealt { .. } => "DamageDealt",
            EventKind::Healed { .. } => "Healed",
            EventKind::BuffApplied { .. } => "BuffApplied",
            EventKind::BuffRemoved { .. } => "BuffRemoved",
            EventKind::ResourceDrained { .. } => "ResourceDrained",
            EventKind::ResourceRegenerated { .. } => "ResourceRegenerated",
            EventKind::BattleEnd { .. } => "BattleEnd",
        }
    }

    /// Check for the terminal event.
    #[must_use]
    pub fn is_battle_end(&self) -> bool {
        matches!(self, EventKind::BattleEnd { .. })
    }
}

/// An event with a full snapshot (verbose form).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    /// Turn the event happened in (0 before the first turn).
    pub turn: u32,
    /// What happened.
    pub kind: EventKind,
    /// State of every actor right after the event.
    pub snapshot: BattleSnapshot,
}

/// An event with a delta (compact form).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactCombatEvent {
    /// Turn the event happened in.
    pub turn: u32,
    /// What happened, verbatim from the verbose event.
    pub kind: EventKind,
    /// Changes since the previous event (or a full delta).
    pub delta: BattleDelta,
}
