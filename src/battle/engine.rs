//! The battle loop.
//!
//! A `Battle` owns a deep copy of both teams and plays them against each
//! other until one side is eliminated or the turn cap is reached.
//!
//! ## Turn Structure
//!
//! 1. Increment the turn and emit `TurnStart`
//! 2. If a side has no living actors, emit `BattleEnd` and stop (a draw
//!    when neither side has any)
//! 3. For every actor alive at this point, in roster order (team A first):
//!    emit `CharacterActivated`, run the buff pass, then, if still alive,
//!    select a tactic and resolve its skill
//! 4. If the turn cap is reached, end now: a side left standing alone
//!    wins, otherwise the battle is a draw
//!
//! Actors that die mid-turn keep their slot for that turn (they are
//! activated and their effects count down) but do not act.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::outcome::{BattleLog, BattleOutcome, BattlePhase};
use crate::buffs::{BuffId, BuffProcessor, BuffRegistry};
use crate::core::{Actor, EngineConfig, GameRng, Roster, Team, TeamId};
use crate::effects::EffectResolver;
use crate::error::{BattleError, Result};
use crate::events::{CombatEvent, EventKind, EventLog};
use crate::skills::{TacticSelector, TargetSelector};

/// One battle between two teams.
///
/// ## Example
///
/// ```
/// use battle_sim::battle::{Battle, BattleOutcome};
/// use battle_sim::buffs::BuffRegistry;
/// use battle_sim::core::{Actor, EngineConfig, ResourceBag, Team, TeamId};
/// use battle_sim::skills::{DamageCategory, Skill, SkillEffect, Tactic, TargetGroup};
///
/// let strike = Skill::new("Strike").with_effect(SkillEffect::damage(20, DamageCategory::Physical));
/// let fighter = |name: &str, hp| {
///     Actor::new(name, "Fighter", ResourceBag::new(hp, 0, 0, 0))
///         .with_tactic(Tactic::new(strike.clone(), TargetGroup::Enemies))
/// };
///
/// let registry = BuffRegistry::new();
/// let battle = Battle::new(
///     &Team::new(TeamId::A, [fighter("Hero", 50)]),
///     &Team::new(TeamId::B, [fighter("Villain", 40)]),
///     &registry,
///     EngineConfig::default(),
/// )
/// .unwrap();
///
/// let log = battle.run();
/// assert_eq!(log.outcome, BattleOutcome::Winner(TeamId::A));
/// ```
pub struct Battle<'r> {
    roster: Roster,
    config: EngineConfig,
    rng: GameRng,
    log: EventLog<'r>,
    phase: BattlePhase,
    turn: u32,
    outcome: Option<BattleOutcome>,
}

impl<'r> Battle<'r> {
    /// Validate and copy the teams, ready to start.
    ///
    /// The caller's teams are cloned; running the battle never mutates them.
    pub fn new(
        team_a: &Team,
        team_b: &Team,
        registry: &'r BuffRegistry,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;
        let roster = Roster::new(team_a.clone(), team_b.clone());
        Self::validate(&roster, registry)?;

        Ok(Self {
            roster,
            rng: GameRng::new(config.seed),
            config,
            log: EventLog::new(registry),
            phase: BattlePhase::NotStarted,
            turn: 0,
            outcome: None,
        })
    }

    /// Replace the seeded RNG (builder pattern).
    #[must_use]
    pub fn with_rng(mut self, rng: GameRng) -> Self {
        self.rng = rng;
        self
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Turns started so far.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Current state of both teams.
    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Events emitted so far.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        self.log.events()
    }

    /// Outcome, once ended.
    #[must_use]
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// Advance the state machine by one step and return the new phase.
    ///
    /// The first step emits `BattleStart`; each later step plays one turn.
    /// Stepping an ended battle does nothing.
    pub fn step(&mut self) -> BattlePhase {
        match self.phase {
            BattlePhase::NotStarted => self.start(),
            BattlePhase::InProgress => self.play_turn(),
            BattlePhase::Ended => {}
        }
        self.phase
    }

    /// Play to the end and return the log.
    #[must_use]
    pub fn run(mut self) -> BattleLog {
        while self.step() != BattlePhase::Ended {}

        BattleLog {
            events: self.log.into_events(),
            outcome: self.outcome.unwrap_or(BattleOutcome::Draw),
            turns: self.turn,
            roster: self.roster,
            delta_mode: self.config.delta_mode,
        }
    }

    fn start(&mut self) {
        debug!(
            team_a = self.roster[TeamId::A].actors.len(),
            team_b = self.roster[TeamId::B].actors.len(),
            seed = self.rng.seed(),
            "Battle started"
        );
        self.log.emit(&self.roster, EventKind::BattleStart);
        self.phase = BattlePhase::InProgress;
    }

    fn play_turn(&mut self) {
        self.turn += 1;
        self.log.set_turn(self.turn);
        self.log.emit(&self.roster, EventKind::TurnStart { turn: self.turn });
        debug!(turn = self.turn, "Turn started");

        if let Some(outcome) = BattleOutcome::decide(&self.roster) {
            self.end(outcome);
            return;
        }

        for who in self.roster.living_refs() {
            let name = self.roster.actor(who).name.clone();
            self.log.emit(&self.roster, EventKind::CharacterActivated { actor: name });

            BuffProcessor::process(&mut self.roster, who, &mut self.log);
            if !self.roster.actor(who).is_alive() {
                trace!(actor = %self.roster.actor(who).name, "Died before acting");
                continue;
            }

            let Some(tactic) = TacticSelector::select(&self.roster, who).cloned() else {
                continue;
            };
            let skill = &tactic.skill;
            let targets = TargetSelector::select(
                &self.roster,
                who,
                tactic.group,
                &tactic.priorities,
                skill.max_targets,
                skill.target_override.as_ref(),
                &mut self.rng,
            );
            EffectResolver::apply_skill(
                &mut self.roster,
                who,
                skill,
                &targets,
                &mut self.rng,
                &mut self.log,
            );
        }

        if self.turn >= self.config.turn_cap {
            let outcome = BattleOutcome::decide(&self.roster).unwrap_or(BattleOutcome::Draw);
            self.end(outcome);
        }
    }

    fn end(&mut self, outcome: BattleOutcome) {
        debug!(turn = self.turn, ?outcome, "Battle ended");
        self.log.emit(
            &self.roster,
            EventKind::BattleEnd {
                outcome,
                turns: self.turn,
            },
        );
        self.outcome = Some(outcome);
        self.phase = BattlePhase::Ended;
    }

    /// Reject rosters the engine cannot run.
    fn validate(roster: &Roster, registry: &BuffRegistry) -> Result<()> {
        let mut names = FxHashSet::default();

        for team in roster.teams() {
            if team.actors.is_empty() {
                return Err(BattleError::EmptyTeam { team: team.id });
            }
            for actor in &team.actors {
                if !names.insert(actor.name.as_str()) {
                    return Err(BattleError::DuplicateActorName {
                        name: actor.name.clone(),
                    });
                }
                Self::validate_actor(actor, registry)?;
            }
        }
        Ok(())
    }

    fn validate_actor(actor: &Actor, registry: &BuffRegistry) -> Result<()> {
        if !actor.resources.is_valid() {
            return Err(BattleError::InvalidResources {
                actor: actor.name.clone(),
            });
        }

        if let Some(effect) = actor.effects.iter().find(|e| !registry.contains(&e.buff_id)) {
            return Err(BattleError::UnknownStartingBuff {
                actor: actor.name.clone(),
                buff: effect.buff_id.to_string(),
            });
        }

        for tactic in &actor.tactics {
            let skill = &tactic.skill;
            if skill.max_targets == 0 {
                return Err(BattleError::ZeroMaxTargets {
                    actor: actor.name.clone(),
                    skill: skill.name.clone(),
                });
            }

            let mut referenced: Vec<&BuffId> = skill.referenced_buffs().collect();
            referenced.extend(tactic.conditions.iter().flat_map(|c| c.referenced_buffs()));
            referenced.extend(tactic.priorities.iter().filter_map(|p| p.buff()));

            if let Some(buff) = referenced.into_iter().find(|b| !registry.contains(b)) {
                return Err(BattleError::UnknownBuff {
                    actor: actor.name.clone(),
                    skill: skill.name.clone(),
                    buff: buff.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Validate, run and return the log of one battle.
pub fn simulate(
    team_a: &Team,
    team_b: &Team,
    registry: &BuffRegistry,
    config: EngineConfig,
) -> Result<BattleLog> {
    Ok(Battle::new(team_a, team_b, registry, config)?.run())
}
