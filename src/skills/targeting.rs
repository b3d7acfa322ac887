//! Target selection.
//!
//! Three pieces of data describe who a skill hits:
//!
//! - `TargetGroup`: the pool a tactic picks its initial targets from
//! - `TargetPriority`: ordering applied to that pool before truncating to
//!   the skill's `max_targets`
//! - `TargetRule`: per-effect narrowing relative to the previous effect's
//!   targets (also usable as a skill-wide override)
//!
//! Every rule resolves to living actors only. Allies include the caster.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::buffs::BuffId;
use crate::core::{Actor, ActorRef, GameRng, Roster};

/// Pool a tactic chooses its initial targets from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetGroup {
    /// Only the acting actor.
    Caster,
    /// Living members of the actor's side, the actor included.
    Allies,
    /// Living members of the opposing side.
    #[default]
    Enemies,
}

/// Ordering key for a tactic's target pool.
///
/// Priorities apply lexicographically: the first is the primary key and
/// later ones only break ties.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPriority {
    /// Least current health first.
    LowestHp,
    /// Most current health first.
    HighestHp,
    /// Lowest health relative to maximum first.
    LowestHpRatio,
    /// Highest value of a stat first.
    HighestStat(String),
    /// Lowest value of a stat first.
    LowestStat(String),
    /// Least current mana first.
    LowestMana,
    /// Actors without the buff first.
    LacksBuff(BuffId),
    /// Random order. Shuffles the pool before the other keys apply.
    Random,
}

impl TargetPriority {
    /// Compare two candidates; `Less` means `a` is preferred.
    #[must_use]
    pub fn compare(&self, a: &Actor, b: &Actor) -> Ordering {
        match self {
            TargetPriority::LowestHp => a.resources.hp().cmp(&b.resources.hp()),
            TargetPriority::HighestHp => b.resources.hp().cmp(&a.resources.hp()),
            TargetPriority::LowestHpRatio => {
                let left = i128::from(a.resources.hp()) * i128::from(b.resources.max_hp());
                let right = i128::from(b.resources.hp()) * i128::from(a.resources.max_hp());
                left.cmp(&right)
            }
            TargetPriority::HighestStat(stat) => b.stat(stat).cmp(&a.stat(stat)),
            TargetPriority::LowestStat(stat) => a.stat(stat).cmp(&b.stat(stat)),
            TargetPriority::LowestMana => a.resources.mana().cmp(&b.resources.mana()),
            TargetPriority::LacksBuff(buff) => a.has_buff(buff).cmp(&b.has_buff(buff)),
            TargetPriority::Random => Ordering::Equal,
        }
    }

    /// Buff referenced by this priority, if any.
    #[must_use]
    pub fn buff(&self) -> Option<&BuffId> {
        match self {
            TargetPriority::LacksBuff(buff) => Some(buff),
            _ => None,
        }
    }
}

/// Target rule for one skill effect.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetRule {
    /// Same targets as the previous effect (the skill's initial targets for
    /// the first effect).
    #[default]
    Inherit,
    /// The caster only.
    Caster,
    /// Every living ally.
    AllAllies,
    /// Every living enemy.
    AllEnemies,
    /// Up to N random living allies.
    RandomAllies(usize),
    /// Up to N random living enemies.
    RandomEnemies(usize),
    /// The N living allies with least health.
    LowestHpAlly(usize),
    /// The N living enemies with least health.
    LowestHpEnemy(usize),
    /// The first N of the previous targets.
    FirstOfPrevious(usize),
    /// N random picks from the previous targets.
    RandomOfPrevious(usize),
}

impl TargetRule {
    /// Resolve against the roster and the previous effect's targets.
    pub fn resolve(
        &self,
        roster: &Roster,
        caster: ActorRef,
        previous: &[ActorRef],
        rng: &mut GameRng,
    ) -> Vec<ActorRef> {
        let allies = || roster.living_in(caster.team);
        let enemies = || roster.living_in(caster.team.opponent());
        let living_previous = || -> Vec<ActorRef> {
            previous
                .iter()
                .copied()
                .filter(|r| roster.actor(*r).is_alive())
                .collect()
        };

        match self {
            TargetRule::Inherit => living_previous(),
            TargetRule::Caster => TargetSelector::group(roster, caster, TargetGroup::Caster),
            TargetRule::AllAllies => allies(),
            TargetRule::AllEnemies => enemies(),
            TargetRule::RandomAllies(n) => rng.sample(&allies(), *n),
            TargetRule::RandomEnemies(n) => rng.sample(&enemies(), *n),
            TargetRule::LowestHpAlly(n) => lowest_hp(roster, allies(), *n),
            TargetRule::LowestHpEnemy(n) => lowest_hp(roster, enemies(), *n),
            TargetRule::FirstOfPrevious(n) => living_previous().into_iter().take(*n).collect(),
            TargetRule::RandomOfPrevious(n) => rng.sample(&living_previous(), *n),
        }
    }
}

fn lowest_hp(roster: &Roster, mut refs: Vec<ActorRef>, count: usize) -> Vec<ActorRef> {
    refs.sort_by_key(|r| roster.actor(*r).resources.hp());
    refs.truncate(count);
    refs
}

/// Initial target selection for a tactic.
pub struct TargetSelector;

impl TargetSelector {
    /// Living members of a group, in roster order.
    #[must_use]
    pub fn group(roster: &Roster, caster: ActorRef, group: TargetGroup) -> Vec<ActorRef> {
        match group {
            TargetGroup::Caster => {
                if roster.actor(caster).is_alive() {
                    vec![caster]
                } else {
                    Vec::new()
                }
            }
            TargetGroup::Allies => roster.living_in(caster.team),
            TargetGroup::Enemies => roster.living_in(caster.team.opponent()),
        }
    }

    /// Order a pool by priorities. Stable: ties keep roster order.
    pub fn prioritize(
        roster: &Roster,
        refs: &mut [ActorRef],
        priorities: &[TargetPriority],
        rng: &mut GameRng,
    ) {
        if priorities.contains(&TargetPriority::Random) {
            rng.shuffle(refs);
        }
        refs.sort_by(|a, b| {
            let (a, b) = (roster.actor(*a), roster.actor(*b));
            priorities
                .iter()
                .map(|p| p.compare(a, b))
                .find(|o| o.is_ne())
                .unwrap_or(Ordering::Equal)
        });
    }

    /// Pick a skill's initial targets.
    ///
    /// A skill-level override replaces the group and priorities entirely
    /// and is not capped. Otherwise the group is ordered by the priorities
    /// and truncated to `max_targets`.
    pub fn select(
        roster: &Roster,
        caster: ActorRef,
        group: TargetGroup,
        priorities: &[TargetPriority],
        max_targets: usize,
        target_override: Option<&TargetRule>,
        rng: &mut GameRng,
    ) -> Vec<ActorRef> {
        if let Some(rule) = target_override {
            return rule.resolve(roster, caster, &[], rng);
        }

        let mut targets = Self::group(roster, caster, group);
        Self::prioritize(roster, &mut targets, priorities, rng);
        targets.truncate(max_targets);
        targets
    }
}
