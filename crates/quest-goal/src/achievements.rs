// achievements.rs — Achievement catalog and evaluation.
//
// Achievements are derived from the goals currently in the store. The
// evaluator only reads; the store appends whatever it reports and never
// removes an achievement once unlocked.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::goal::{Goal, GoalType};

const SCRIPTURE_WARRIOR_ETERNAL_GOALS: usize = 50;
const GOAL_CRUSHER_SIMPLE_COMPLETED: usize = 10;
const COMPLETIONIST_CHECKLIST_COMPLETED: usize = 5;

/// The fixed achievement catalog, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Achievement {
    ScriptureWarrior,
    GoalCrusher,
    Completionist,
}

impl Achievement {
    pub const CATALOG: [Achievement; 3] = [
        Achievement::ScriptureWarrior,
        Achievement::GoalCrusher,
        Achievement::Completionist,
    ];

    /// Display name, also used verbatim in save files.
    pub fn name(&self) -> &'static str {
        match self {
            Achievement::ScriptureWarrior => "Scripture Warrior",
            Achievement::GoalCrusher => "Goal Crusher",
            Achievement::Completionist => "Completionist",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Achievement::ScriptureWarrior => "Complete 50 eternal goals",
            Achievement::GoalCrusher => "Complete 10 simple goals",
            Achievement::Completionist => "Complete 5 checklist goals",
        }
    }

    fn is_earned(&self, counts: &GoalCounts) -> bool {
        match self {
            Achievement::ScriptureWarrior => {
                counts.eternal_goals >= SCRIPTURE_WARRIOR_ETERNAL_GOALS
            }
            Achievement::GoalCrusher => counts.simple_completed >= GOAL_CRUSHER_SIMPLE_COMPLETED,
            Achievement::Completionist => {
                counts.checklist_completed >= COMPLETIONIST_CHECKLIST_COMPLETED
            }
        }
    }
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Achievement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Achievement::CATALOG
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown achievement '{}'", s))
    }
}

/// Tallies the evaluator works from.
///
/// Eternal goals are counted by presence, not by how often they were recorded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GoalCounts {
    pub simple_completed: usize,
    pub eternal_goals: usize,
    pub checklist_completed: usize,
}

impl GoalCounts {
    pub fn tally(goals: &[Goal]) -> Self {
        goals.iter().fold(Self::default(), |mut counts, goal| {
            match goal.goal_type() {
                GoalType::Simple if goal.is_complete() => counts.simple_completed += 1,
                GoalType::Eternal => counts.eternal_goals += 1,
                GoalType::Checklist if goal.is_complete() => counts.checklist_completed += 1,
                _ => {}
            }
            counts
        })
    }
}

/// Achievements earned by `goals` that are not yet in `unlocked`, in
/// catalog order.
pub fn evaluate(goals: &[Goal], unlocked: &[Achievement]) -> Vec<Achievement> {
    let counts = GoalCounts::tally(goals);
    Achievement::CATALOG
        .into_iter()
        .filter(|a| !unlocked.contains(a) && a.is_earned(&counts))
        .collect()
}
