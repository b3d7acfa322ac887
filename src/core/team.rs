//! Team identification and the two-sided roster.
//!
//! ## TeamId
//!
//! A battle is always fought between exactly two sides, `TeamId::A` and
//! `TeamId::B`. Team A acts first within every turn.
//!
//! ## Roster
//!
//! Owns both teams for the duration of one battle. Indexable by `TeamId`
//! and by `ActorRef` for O(1) access.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::actor::Actor;

/// One of the two sides of a battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TeamId {
    /// First side to act each turn.
    A,
    /// Second side to act each turn.
    B,
}

impl TeamId {
    /// Both sides in acting order.
    pub const ALL: [TeamId; 2] = [TeamId::A, TeamId::B];

    /// Get the opposing side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            TeamId::A => TeamId::B,
            TeamId::B => TeamId::A,
        }
    }

    /// Get the storage index (A = 0, B = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            TeamId::A => 0,
            TeamId::B => 1,
        }
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TeamId::A => write!(f, "Team A"),
            TeamId::B => write!(f, "Team B"),
        }
    }
}

/// Position of an actor within the roster.
///
/// Stable for the whole battle: dead actors stay in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorRef {
    /// The actor's side.
    pub team: TeamId,
    /// Index within the side, in roster order.
    pub index: usize,
}

impl ActorRef {
    /// Create a new actor reference.
    #[must_use]
    pub const fn new(team: TeamId, index: usize) -> Self {
        Self { team, index }
    }
}

/// An ordered list of actors fighting on one side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Side this team fights on.
    pub id: TeamId,
    /// Actors in acting order.
    pub actors: Vec<Actor>,
}

impl Team {
    /// Create a team from actors, stamping each actor with the team id.
    pub fn new(id: TeamId, actors: impl IntoIterator<Item = Actor>) -> Self {
        let actors = actors
            .into_iter()
            .map(|mut actor| {
                actor.team = id;
                actor
            })
            .collect();
        Self { id, actors }
    }

    /// Check if any actor is still alive.
    #[must_use]
    pub fn has_living(&self) -> bool {
        self.actors.iter().any(Actor::is_alive)
    }

    /// Count living actors.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.actors.iter().filter(|a| a.is_alive()).count()
    }
}

/// Both teams of one battle.
///
/// The roster is a deep copy of the caller's templates; nothing outside the
/// battle observes its mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    teams: [Team; 2],
}

impl Roster {
    /// Build a roster from the two sides.
    ///
    /// Team ids are re-stamped so `a` is always `TeamId::A`.
    #[must_use]
    pub fn new(a: Team, b: Team) -> Self {
        Self {
            teams: [Team::new(TeamId::A, a.actors), Team::new(TeamId::B, b.actors)],
        }
    }

    /// Get an actor by reference.
    #[must_use]
    pub fn actor(&self, actor: ActorRef) -> &Actor {
        &self[actor.team].actors[actor.index]
    }

    /// Get a mutable actor by reference.
    pub fn actor_mut(&mut self, actor: ActorRef) -> &mut Actor {
        &mut self[actor.team].actors[actor.index]
    }

    /// Iterate over every actor reference in acting order (A then B).
    pub fn refs(&self) -> impl Iterator<Item = ActorRef> + '_ {
        self.teams.iter().flat_map(|team| {
            (0..team.actors.len()).map(move |index| ActorRef::new(team.id, index))
        })
    }

    /// References to living actors in acting order.
    #[must_use]
    pub fn living_refs(&self) -> Vec<ActorRef> {
        self.refs().filter(|r| self.actor(*r).is_alive()).collect()
    }

    /// References to living members of one side.
    #[must_use]
    pub fn living_in(&self, team: TeamId) -> Vec<ActorRef> {
        self[team]
            .actors
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_alive())
            .map(|(index, _)| ActorRef::new(team, index))
            .collect()
    }

    /// Iterate over all actors in acting order.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.teams.iter().flat_map(|t| t.actors.iter())
    }

    /// Iterate over both teams.
    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    /// Sides that still have a living actor, team A first.
    pub fn standing(&self) -> impl Iterator<Item = TeamId> + '_ {
        TeamId::ALL.into_iter().filter(|t| self[*t].has_living())
    }
}

impl Index<TeamId> for Roster {
    type Output = Team;

    fn index(&self, team: TeamId) -> &Self::Output {
        &self.teams[team.index()]
    }
}

impl IndexMut<TeamId> for Roster {
    fn index_mut(&mut self, team: TeamId) -> &mut Self::Output {
        &mut self.teams[team.index()]
    }
}
