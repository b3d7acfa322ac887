//! Tactics and tactic selection.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::condition::{Condition, ConditionContext, ConditionEvaluator};
use super::skill::Skill;
use super::targeting::{TargetGroup, TargetPriority};
use crate::core::{ActorRef, Roster};

/// A conditional rule: use `skill` on `group`, ordered by `priorities`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tactic {
    /// Extra conditions, all of which must hold.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Skill to use.
    pub skill: Skill,
    /// Pool of initial targets.
    pub group: TargetGroup,
    /// Ordering of the pool before truncation.
    #[serde(default)]
    pub priorities: Vec<TargetPriority>,
}

impl Tactic {
    /// Create an unconditional tactic.
    #[must_use]
    pub fn new(skill: Skill, group: TargetGroup) -> Self {
        Self {
            conditions: Vec::new(),
            skill,
            group,
            priorities: Vec::new(),
        }
    }

    /// Add a condition (builder pattern).
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a priority at the lowest precedence (builder pattern).
    #[must_use]
    pub fn with_priority(mut self, priority: TargetPriority) -> Self {
        self.priorities.push(priority);
        self
    }
}

/// Picks the tactic an actor uses this turn.
pub struct TacticSelector;

impl TacticSelector {
    /// First tactic, in priority order, whose skill is off cooldown and
    /// affordable and whose conditions (the skill's own and the tactic's)
    /// all hold. `None` means the actor skips its action.
    #[must_use]
    pub fn select(roster: &Roster, who: ActorRef) -> Option<&Tactic> {
        let ctx = ConditionContext::new(roster, who);
        let actor = ctx.actor;

        let chosen = actor.tactics.iter().find(|tactic| {
            let skill = &tactic.skill;
            actor.cooldown(&skill.name) == 0
                && actor.resources.mana() >= skill.mana_cost
                && ConditionEvaluator::evaluate(&skill.condition, &ctx)
                && tactic
                    .conditions
                    .iter()
                    .all(|c| ConditionEvaluator::evaluate(c, &ctx))
        });

        if chosen.is_none() {
            trace!(actor = %actor.name, "No usable tactic");
        }
        chosen
    }
}
