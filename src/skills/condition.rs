//! Activation conditions.
//!
//! Conditions decide whether a skill or tactic may be used, based on the
//! acting actor, its living allies (including itself) and living enemies.
//! They are a closed vocabulary of data-parameterized predicates so tactics
//! stay serializable.

use serde::{Deserialize, Serialize};

use crate::buffs::BuffId;
use crate::core::{Actor, ActorRef, Roster};

/// A predicate over the acting actor and both sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    // === Special ===

    /// Always holds.
    #[default]
    Always,

    /// Never holds (disabled tactic).
    Never,

    // === Self ===

    /// Own health below a percentage of maximum.
    SelfHpBelow(i64),

    /// Own health at or above a percentage of maximum.
    SelfHpAtLeast(i64),

    /// Own mana at least this amount.
    SelfManaAtLeast(i64),

    /// Actor has at least one instance of the buff.
    HasBuff(BuffId),

    /// Actor has no instance of the buff.
    LacksBuff(BuffId),

    // === Groups ===

    /// Some living ally is below a health percentage.
    AllyHpBelow(i64),

    /// Some living enemy is below a health percentage.
    EnemyHpBelow(i64),

    /// Some living ally lacks the buff.
    AllyLacksBuff(BuffId),

    /// Some living enemy lacks the buff.
    EnemyLacksBuff(BuffId),

    /// At least this many allies are alive.
    MinimumAliveAllies(usize),

    /// At least this many enemies are alive.
    MinimumAliveEnemies(usize),

    // === Combinators ===

    /// All conditions must hold.
    All(Vec<Condition>),

    /// At least one condition must hold.
    Any(Vec<Condition>),

    /// Condition must not hold.
    Not(Box<Condition>),
}

impl Condition {
    /// Create an AND condition.
    pub fn all(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::All(conditions.into_iter().collect())
    }

    /// Create an OR condition.
    pub fn any(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::Any(conditions.into_iter().collect())
    }

    /// Negate this condition.
    #[must_use]
    pub fn negate(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// Add another condition with AND.
    #[must_use]
    pub fn and(self, other: Condition) -> Self {
        match self {
            Self::All(mut conditions) => {
                conditions.push(other);
                Self::All(conditions)
            }
            _ => Self::All(vec![self, other]),
        }
    }

    /// Every buff id this condition refers to, depth first.
    #[must_use]
    pub fn referenced_buffs(&self) -> Vec<&BuffId> {
        let mut buffs = Vec::new();
        self.collect_buffs(&mut buffs);
        buffs
    }

    fn collect_buffs<'a>(&'a self, out: &mut Vec<&'a BuffId>) {
        match self {
            Self::HasBuff(buff)
            | Self::LacksBuff(buff)
            | Self::AllyLacksBuff(buff)
            | Self::EnemyLacksBuff(buff) => out.push(buff),
            Self::All(conditions) | Self::Any(conditions) => {
                for condition in conditions {
                    condition.collect_buffs(out);
                }
            }
            Self::Not(inner) => inner.collect_buffs(out),
            Self::Always
            | Self::Never
            | Self::SelfHpBelow(_)
            | Self::SelfHpAtLeast(_)
            | Self::SelfManaAtLeast(_)
            | Self::AllyHpBelow(_)
            | Self::EnemyHpBelow(_)
            | Self::MinimumAliveAllies(_)
            | Self::MinimumAliveEnemies(_) => {}
        }
    }
}

/// Context for evaluating conditions.
pub struct ConditionContext<'a> {
    /// The acting actor.
    pub actor: &'a Actor,
    /// Living allies, including the actor.
    pub allies: Vec<&'a Actor>,
    /// Living enemies.
    pub enemies: Vec<&'a Actor>,
}

impl<'a> ConditionContext<'a> {
    /// Build the context for an actor from the roster.
    #[must_use]
    pub fn new(roster: &'a Roster, who: ActorRef) -> Self {
        let living = move |team| {
            roster
                .living_in(team)
                .into_iter()
                .map(|r| roster.actor(r))
                .collect::<Vec<_>>()
        };
        Self {
            actor: roster.actor(who),
            allies: living(who.team),
            enemies: living(who.team.opponent()),
        }
    }
}

/// Evaluator for conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext) -> bool {
        match condition {
            Condition::Always => true,

            Condition::Never => false,

            Condition::SelfHpBelow(pct) => ctx.actor.resources.hp_percent() < *pct,

            Condition::SelfHpAtLeast(pct) => ctx.actor.resources.hp_percent() >= *pct,

            Condition::SelfManaAtLeast(mana) => ctx.actor.resources.mana() >= *mana,

            Condition::HasBuff(buff) => ctx.actor.has_buff(buff),

            Condition::LacksBuff(buff) => !ctx.actor.has_buff(buff),

            Condition::AllyHpBelow(pct) => {
                ctx.allies.iter().any(|a| a.resources.hp_percent() < *pct)
            }

            Condition::EnemyHpBelow(pct) => {
                ctx.enemies.iter().any(|a| a.resources.hp_percent() < *pct)
            }

            Condition::AllyLacksBuff(buff) => ctx.allies.iter().any(|a| !a.has_buff(buff)),

            Condition::EnemyLacksBuff(buff) => ctx.enemies.iter().any(|a| !a.has_buff(buff)),

            Condition::MinimumAliveAllies(count) => ctx.allies.len() >= *count,

            Condition::MinimumAliveEnemies(count) => ctx.enemies.len() >= *count,

            Condition::All(conditions) => conditions.iter().all(|c| Self::evaluate(c, ctx)),

            Condition::Any(conditions) => conditions.iter().any(|c| Self::evaluate(c, ctx)),

            Condition::Not(inner) => !Self::evaluate(inner, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffs::TemporalEffect;
    use crate::core::{ResourceBag, Team, TeamId};

    const CLERIC: ActorRef = ActorRef::new(TeamId::A, 0);

    fn roster() -> Roster {
        Roster::new(
            Team::new(
                TeamId::A,
                [
                    Actor::new("Cleric", "Healer", ResourceBag::new(40, 30, 0, 0).with_mana(12))
                        .with_effect(TemporalEffect::new("blessed", 2, 1)),
                    Actor::new("Knight", "Warrior", ResourceBag::new(100, 0, 0, 0).with_hp(20)),
                ],
            ),
            Team::new(
                TeamId::B,
                [
                    Actor::new("Orc", "Brute", ResourceBag::new(60, 0, 0, 0)),
                    Actor::new("Goblin", "Skirmisher", ResourceBag::new(30, 0, 0, 0).with_hp(0)),
                ],
            ),
        )
    }

    fn check(condition: Condition) -> bool {
        let roster = roster();
        let ctx = ConditionContext::new(&roster, CLERIC);
        ConditionEvaluator::evaluate(&condition, &ctx)
    }

    #[test]
    fn test_context_groups() {
        let roster = roster();
        let ctx = ConditionContext::new(&roster, CLERIC);
        assert_eq!(ctx.actor.name, "Cleric");
        assert_eq!(ctx.allies.len(), 2);
        // Dead goblin is excluded
        assert_eq!(ctx.enemies.len(), 1);
    }

    #[test]
    fn test_self_conditions() {
        assert!(check(Condition::SelfHpAtLeast(100)));
        assert!(!check(Condition::SelfHpBelow(50)));
        assert!(check(Condition::SelfManaAtLeast(12)));
        assert!(!check(Condition::SelfManaAtLeast(13)));
        assert!(check(Condition::HasBuff(BuffId::new("blessed"))));
        assert!(check(Condition::LacksBuff(BuffId::new("cursed"))));
    }

    #[test]
    fn test_group_conditions() {
        assert!(check(Condition::AllyHpBelow(50)));
        assert!(!check(Condition::EnemyHpBelow(50)));
        assert!(check(Condition::AllyLacksBuff(BuffId::new("blessed"))));
        assert!(check(Condition::EnemyLacksBuff(BuffId::new("blessed"))));
        assert!(check(Condition::MinimumAliveAllies(2)));
        assert!(!check(Condition::MinimumAliveEnemies(2)));
    }

    #[test]
    fn test_combinators() {
        assert!(check(Condition::Always));
        assert!(!check(Condition::Never));
        assert!(check(Condition::all([Condition::Always, Condition::AllyHpBelow(50)])));
        assert!(!check(Condition::all([Condition::Always, Condition::Never])));
        assert!(check(Condition::any([Condition::Never, Condition::Always])));
        assert!(check(Condition::Never.negate()));
        assert!(!check(Condition::Always.and(Condition::Never)));
    }

    #[test]
    fn test_referenced_buffs() {
        let condition = Condition::HasBuff(BuffId::new("a"))
            .and(Condition::any([Condition::EnemyLacksBuff(BuffId::new("b")), Condition::Always]))
            .and(Condition::AllyLacksBuff(BuffId::new("c")).negate());

        let buffs: Vec<_> = condition.referenced_buffs().into_iter().map(BuffId::as_str).collect();
        assert_eq!(buffs, vec!["a", "b", "c"]);
    }
}
