// goal.rs — Goal: a trackable objective and its four behaviors.
//
// Every goal shares a name, a description and a base point value. What
// happens when an event is recorded depends on the variant:
//   Simple     — awards points once, then is complete
//   Eternal    — awards points every time, never completes
//   Checklist  — awards points every time, plus a one-off bonus at the target
//   Negative   — a habit to avoid; every event costs points
//
// Goals are only built through `GoalDraft`, which validates raw user input,
// or restored by the codec from a save file.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuestError;

/// Position of a goal in its store. Goals have no other identity.
pub type GoalId = usize;

/// Characters the save format uses as delimiters and does not escape.
const RESERVED_CHARS: [char; 4] = ['|', ':', '\n', '\r'];

/// The four goal behaviors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Simple,
    Eternal,
    Checklist,
    Negative,
}

impl GoalType {
    pub const ALL: [GoalType; 4] = [
        GoalType::Simple,
        GoalType::Eternal,
        GoalType::Checklist,
        GoalType::Negative,
    ];

    /// Record tag used in save files (e.g. `ChecklistGoal`).
    pub fn tag(&self) -> &'static str {
        match self {
            GoalType::Simple => "SimpleGoal",
            GoalType::Eternal => "EternalGoal",
            GoalType::Checklist => "ChecklistGoal",
            GoalType::Negative => "NegativeGoal",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        GoalType::ALL.into_iter().find(|t| t.tag() == tag)
    }

    /// Short explanation shown in goal-type menus.
    pub fn summary(&self) -> &'static str {
        match self {
            GoalType::Simple => "Simple Goal",
            GoalType::Eternal => "Eternal Goal",
            GoalType::Checklist => "Checklist Goal",
            GoalType::Negative => "Negative Goal (lose points for bad habits)",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalType::Simple => write!(f, "simple"),
            GoalType::Eternal => write!(f, "eternal"),
            GoalType::Checklist => write!(f, "checklist"),
            GoalType::Negative => write!(f, "negative"),
        }
    }
}

/// Accepts the variant name in any case, or the menu numbers 1-4.
impl FromStr for GoalType {
    type Err = QuestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "simple" => Ok(GoalType::Simple),
            "2" | "eternal" => Ok(GoalType::Eternal),
            "3" | "checklist" => Ok(GoalType::Checklist),
            "4" | "negative" => Ok(GoalType::Negative),
            other => Err(QuestError::validation(format!(
                "unknown goal type '{}' (expected simple, eternal, checklist or negative)",
                other
            ))),
        }
    }
}

/// Variant-specific progress. All counters only ever increase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalProgress {
    Simple {
        completed: bool,
    },
    Eternal {
        times_completed: u32,
    },
    Checklist {
        bonus: i64,
        amount_completed: u32,
        target: u32,
    },
    Negative {
        times_failed: u32,
    },
}

impl GoalProgress {
    /// Progress of a freshly created goal of the given type.
    fn fresh(kind: GoalType, bonus: i64, target: u32) -> Self {
        match kind {
            GoalType::Simple => GoalProgress::Simple { completed: false },
            GoalType::Eternal => GoalProgress::Eternal { times_completed: 0 },
            GoalType::Checklist => GoalProgress::Checklist {
                bonus,
                amount_completed: 0,
                target,
            },
            GoalType::Negative => GoalProgress::Negative { times_failed: 0 },
        }
    }

    pub fn goal_type(&self) -> GoalType {
        match self {
            GoalProgress::Simple { .. } => GoalType::Simple,
            GoalProgress::Eternal { .. } => GoalType::Eternal,
            GoalProgress::Checklist { .. } => GoalType::Checklist,
            GoalProgress::Negative { .. } => GoalType::Negative,
        }
    }
}

/// A trackable objective.
///
/// Fields are private so that the base point value cannot change after
/// construction; state only moves forward through [`Goal::record_event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    name: String,
    description: String,
    points: i64,
    progress: GoalProgress,
}

impl Goal {
    /// Rebuild a goal from already-validated parts (used by the codec).
    pub(crate) fn restore(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        progress: GoalProgress,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
            progress,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Base points. For negative goals this is the magnitude lost per event.
    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn progress(&self) -> &GoalProgress {
        &self.progress
    }

    pub fn goal_type(&self) -> GoalType {
        self.progress.goal_type()
    }

    /// Record one event and return the point delta it produced.
    ///
    /// A completed simple goal is left untouched and yields 0.
    pub fn record_event(&mut self) -> i64 {
        let points = self.points;
        match &mut self.progress {
            GoalProgress::Simple { completed } => {
                if *completed {
                    0
                } else {
                    *completed = true;
                    points
                }
            }
            GoalProgress::Eternal { times_completed } => {
                *times_completed = times_completed.saturating_add(1);
                points
            }
            GoalProgress::Checklist {
                bonus,
                amount_completed,
                target,
            } => {
                *amount_completed = amount_completed.saturating_add(1);
                // The bonus is paid on the event that reaches the target, never again.
                if *amount_completed == *target {
                    points.saturating_add(*bonus)
                } else {
                    points
                }
            }
            GoalProgress::Negative { times_failed } => {
                *times_failed = times_failed.saturating_add(1);
                -points
            }
        }
    }

    pub fn is_complete(&self) -> bool {
        match &self.progress {
            GoalProgress::Simple { completed } => *completed,
            GoalProgress::Checklist {
                amount_completed,
                target,
                ..
            } => amount_completed >= target,
            GoalProgress::Eternal { .. } | GoalProgress::Negative { .. } => false,
        }
    }

    /// One-line display: completion marker, name, description, progress.
    pub fn details(&self) -> String {
        let marker = match &self.progress {
            GoalProgress::Negative { .. } => "[!]",
            _ if self.is_complete() => "[X]",
            _ => "[ ]",
        };
        let head = format!("{} {} ({})", marker, self.name, self.description);
        match &self.progress {
            GoalProgress::Simple { .. } => head,
            GoalProgress::Eternal { times_completed } => {
                format!("{} -- Completed {} times", head, times_completed)
            }
            GoalProgress::Checklist {
                amount_completed,
                target,
                ..
            } => format!("{} -- Completed {}/{}", head, amount_completed, target),
            GoalProgress::Negative { times_failed } => {
                format!("{} -- Failed {} times", head, times_failed)
            }
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.details())
    }
}

/// Raw goal-creation input, exactly as a user typed it.
///
/// Nothing is checked until [`GoalDraft::build`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalDraft {
    pub kind: String,
    pub name: String,
    pub description: String,
    pub points: String,
    pub bonus: Option<String>,
    pub target: Option<String>,
}

impl GoalDraft {
    pub fn new(
        kind: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        points: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            description: description.into(),
            points: points.into(),
            bonus: None,
            target: None,
        }
    }

    /// Attach the checklist bonus and target.
    pub fn with_checklist(mut self, bonus: impl Into<String>, target: impl Into<String>) -> Self {
        self.bonus = Some(bonus.into());
        self.target = Some(target.into());
        self
    }

    /// Validate the draft and produce a fresh goal.
    pub fn build(&self) -> Result<Goal, QuestError> {
        let kind: GoalType = self.kind.parse()?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(QuestError::validation("goal name must not be empty"));
        }
        let description = self.description.trim();
        check_reserved("name", name)?;
        check_reserved("description", description)?;

        let points = parse_non_negative("points", &self.points)?;

        let (bonus, target) = if kind == GoalType::Checklist {
            let bonus = self
                .bonus
                .as_deref()
                .ok_or_else(|| QuestError::validation("checklist goals need a bonus"))?;
            let target = self
                .target
                .as_deref()
                .ok_or_else(|| QuestError::validation("checklist goals need a target"))?;
            (
                parse_non_negative("bonus", bonus)?,
                parse_target(target)?,
            )
        } else {
            (0, 0)
        };

        Ok(Goal::restore(
            name,
            description,
            points,
            GoalProgress::fresh(kind, bonus, target),
        ))
    }
}

fn check_reserved(field: &str, value: &str) -> Result<(), QuestError> {
    if value.contains(RESERVED_CHARS) {
        return Err(QuestError::validation(format!(
            "{} must not contain '|', ':' or line breaks",
            field
        )));
    }
    Ok(())
}

fn parse_int(field: &str, raw: &str) -> Result<i64, QuestError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| QuestError::validation(format!("{} '{}' is not a whole number", field, raw)))
}

fn parse_non_negative(field: &str, raw: &str) -> Result<i64, QuestError> {
    let value = parse_int(field, raw)?;
    if value < 0 {
        return Err(QuestError::validation(format!(
            "{} must not be negative (got {})",
            field, value
        )));
    }
    Ok(value)
}

fn parse_target(raw: &str) -> Result<u32, QuestError> {
    let value = parse_int("target", raw)?;
    if value <= 0 {
        return Err(QuestError::validation(format!(
            "target must be greater than zero (got {})",
            value
        )));
    }
    u32::try_from(value)
        .map_err(|_| QuestError::validation(format!("target {} is too large", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(draft: GoalDraft) -> Goal {
        draft.build().unwrap()
    }

    #[test]
    fn simple_goal_awards_points_once() {
        let mut goal = build(GoalDraft::new("simple", "Run a marathon", "26.2 miles", "1000"));
        assert!(!goal.is_complete());
        assert_eq!(goal.record_event(), 1000);
        assert!(goal.is_complete());

        let after_first = goal.clone();
        assert_eq!(goal.record_event(), 0);
        assert_eq!(goal.record_event(), 0);
        assert_eq!(goal, after_first);
    }

    #[test]
    fn eternal_goal_never_completes() {
        let mut goal = build(GoalDraft::new("eternal", "Read scriptures", "daily", "100"));
        for _ in 0..3 {
            assert_eq!(goal.record_event(), 100);
        }
        assert!(!goal.is_complete());
        assert_eq!(
            goal.progress(),
            &GoalProgress::Eternal { times_completed: 3 }
        );
    }

    #[test]
    fn checklist_pays_bonus_exactly_once() {
        let mut goal = build(
            GoalDraft::new("checklist", "Temple", "attend", "10").with_checklist("5", "3"),
        );
        let deltas: Vec<i64> = (0..3).map(|_| goal.record_event()).collect();
        assert_eq!(deltas, vec![10, 10, 15]);
        assert!(goal.is_complete());

        assert_eq!(goal.record_event(), 10);
        assert_eq!(goal.record_event(), 10);
        assert!(goal.is_complete());
    }

    #[test]
    fn checklist_cumulative_points_at_target() {
        let mut goal = build(
            GoalDraft::new("checklist", "Pushups", "sets", "25").with_checklist("500", "7"),
        );
        let total: i64 = (0..7).map(|_| goal.record_event()).sum();
        assert_eq!(total, 7 * 25 + 500);
    }

    #[test]
    fn negative_goal_subtracts_every_time() {
        let mut goal = build(GoalDraft::new("negative", "Junk food", "skip it", "50"));
        assert_eq!(goal.record_event(), -50);
        assert_eq!(goal.record_event(), -50);
        assert_eq!(goal.progress(), &GoalProgress::Negative { times_failed: 2 });
        assert!(!goal.is_complete());
    }

    #[test]
    fn details_include_marker_and_progress() {
        let mut simple = build(GoalDraft::new("1", "Hike", "the peak", "5"));
        assert_eq!(simple.details(), "[ ] Hike (the peak)");
        simple.record_event();
        assert_eq!(simple.details(), "[X] Hike (the peak)");

        let eternal = build(GoalDraft::new("2", "Pray", "morning", "5"));
        assert_eq!(eternal.details(), "[ ] Pray (morning) -- Completed 0 times");

        let mut checklist =
            build(GoalDraft::new("3", "Study", "chapters", "5").with_checklist("1", "2"));
        checklist.record_event();
        assert_eq!(checklist.details(), "[ ] Study (chapters) -- Completed 1/2");

        let negative = build(GoalDraft::new("4", "Snooze", "alarm", "5"));
        assert_eq!(negative.details(), "[!] Snooze (alarm) -- Failed 0 times");
    }

    #[test]
    fn goal_type_parses_names_and_menu_numbers() {
        assert_eq!("Checklist".parse::<GoalType>().unwrap(), GoalType::Checklist);
        assert_eq!(" 4 ".parse::<GoalType>().unwrap(), GoalType::Negative);
        assert!(matches!(
            "weekly".parse::<GoalType>(),
            Err(QuestError::Validation(_))
        ));
    }

    #[test]
    fn goal_type_tags() {
        for kind in GoalType::ALL {
            assert_eq!(GoalType::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(GoalType::from_tag("FooGoal"), None);
    }

    #[test]
    fn draft_rejects_bad_input() {
        let cases = [
            GoalDraft::new("simple", "Hike", "", "ten"),
            GoalDraft::new("simple", "Hike", "", "-5"),
            GoalDraft::new("simple", "   ", "", "5"),
            GoalDraft::new("daily", "Hike", "", "5"),
            GoalDraft::new("simple", "a|b", "", "5"),
            GoalDraft::new("simple", "Hike", "note: x", "5"),
            GoalDraft::new("checklist", "Hike", "", "5"),
            GoalDraft::new("checklist", "Hike", "", "5").with_checklist("5", "0"),
            GoalDraft::new("checklist", "Hike", "", "5").with_checklist("5", "-2"),
            GoalDraft::new("checklist", "Hike", "", "5").with_checklist("x", "3"),
        ];
        for draft in cases {
            assert!(
                matches!(draft.build(), Err(QuestError::Validation(_))),
                "expected validation error for {:?}",
                draft
            );
        }
    }

    #[test]
    fn draft_trims_and_allows_zero_points() {
        let goal = build(GoalDraft::new("eternal", "  Journal  ", " nightly ", " 0 "));
        assert_eq!(goal.name(), "Journal");
        assert_eq!(goal.description(), "nightly");
        assert_eq!(goal.points(), 0);
    }

    #[test]
    fn checklist_bonus_saturates_at_max_points() {
        let mut goal = build(
            GoalDraft::new("checklist", "Big", "", &i64::MAX.to_string()).with_checklist("1", "1"),
        );
        assert_eq!(goal.record_event(), i64::MAX);
        assert!(goal.is_complete());
    }
}
