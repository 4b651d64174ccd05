// store.rs — GoalStore: the in-memory quest session.
//
// The store owns the ordered goal list, the running score and the unlocked
// achievements. All mutation goes through it:
//   create_goal   — validate a draft and append it
//   record_event  — apply one event to a goal, update score and achievements
//   load_from     — replace everything with the contents of a save file
//
// Goals are addressed by position; there is no deletion or reordering.

use std::path::Path;

use crate::achievements::{self, Achievement};
use crate::codec;
use crate::error::QuestError;
use crate::goal::{Goal, GoalDraft, GoalId};
use crate::level::{self, ScoreSummary};

/// What a single recorded event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome {
    pub goal_id: GoalId,
    /// Point delta; negative for negative goals, 0 for a finished simple goal.
    pub points: i64,
    pub total_score: i64,
    pub level_before: u32,
    pub level_after: u32,
    /// Achievements unlocked by this event, in catalog order.
    pub unlocked: Vec<Achievement>,
    pub goal_complete: bool,
}

impl EventOutcome {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Ordered goals plus score and achievements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalStore {
    goals: Vec<Goal>,
    total_score: i64,
    achievements: Vec<Achievement>,
}

impl GoalStore {
    /// An empty store: no goals, zero score, no achievements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a store from decoded parts. Duplicate achievements collapse.
    pub(crate) fn from_parts(
        total_score: i64,
        goals: Vec<Goal>,
        achievements: impl IntoIterator<Item = Achievement>,
    ) -> Self {
        let mut store = Self {
            goals,
            total_score,
            achievements: Vec::new(),
        };
        for achievement in achievements {
            store.unlock(achievement);
        }
        store
    }

    /// Validate `draft` and append the new goal. Returns its index.
    pub fn create_goal(&mut self, draft: &GoalDraft) -> Result<GoalId, QuestError> {
        let goal = draft.build()?;
        let id = self.goals.len();
        tracing::debug!(id, kind = %goal.goal_type(), name = goal.name(), "goal created");
        self.goals.push(goal);
        Ok(id)
    }

    /// Record one event against the goal at `index`.
    ///
    /// Achievements are re-evaluated after every successful event, even one
    /// worth 0 points.
    pub fn record_event(&mut self, index: GoalId) -> Result<EventOutcome, QuestError> {
        let len = self.goals.len();
        let goal = self
            .goals
            .get_mut(index)
            .ok_or(QuestError::IndexOutOfRange { index, len })?;

        let level_before = level::level_for(self.total_score);
        let points = goal.record_event();
        let goal_complete = goal.is_complete();
        self.total_score = self.total_score.saturating_add(points);

        let unlocked = achievements::evaluate(&self.goals, &self.achievements);
        for achievement in &unlocked {
            self.unlock(*achievement);
        }

        tracing::debug!(
            index,
            points,
            total = self.total_score,
            "event recorded"
        );

        Ok(EventOutcome {
            goal_id: index,
            points,
            total_score: self.total_score,
            level_before,
            level_after: level::level_for(self.total_score),
            unlocked,
            goal_complete,
        })
    }

    /// Display lines for every goal, in insertion order.
    ///
    /// The iterator borrows the store; call again to restart.
    pub fn list_goals(&self) -> impl Iterator<Item = String> + '_ {
        self.goals.iter().map(Goal::details)
    }

    pub fn score(&self) -> ScoreSummary {
        ScoreSummary::from_total(self.total_score)
    }

    pub fn total_score(&self) -> i64 {
        self.total_score
    }

    /// Unlocked achievements, oldest first.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn get(&self, index: GoalId) -> Option<&Goal> {
        self.goals.get(index)
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// Write the store to `path`, replacing any existing file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), QuestError> {
        codec::save(self, path)
    }

    /// Replace the whole store with the contents of `path`.
    ///
    /// On any error the store is left exactly as it was.
    pub fn load_from(&mut self, path: impl AsRef<Path>) -> Result<(), QuestError> {
        let loaded = codec::load(path)?;
        *self = loaded;
        Ok(())
    }

    fn unlock(&mut self, achievement: Achievement) {
        if !self.achievements.contains(&achievement) {
            self.achievements.push(achievement);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn simple(name: &str, points: &str) -> GoalDraft {
        GoalDraft::new("simple", name, "test goal", points)
    }

    #[test]
    fn new_store_is_empty() {
        let store = GoalStore::new();
        assert!(store.is_empty());
        assert_eq!(store.total_score(), 0);
        assert!(store.achievements().is_empty());
        assert_eq!(store.score().level, 1);
    }

    #[test]
    fn create_goal_appends_in_order() {
        let mut store = GoalStore::new();
        assert_eq!(store.create_goal(&simple("First", "10")).unwrap(), 0);
        assert_eq!(store.create_goal(&simple("Second", "20")).unwrap(), 1);

        let names: Vec<&str> = store.goals().iter().map(Goal::name).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn create_goal_rejects_invalid_draft() {
        let mut store = GoalStore::new();
        let result = store.create_goal(&simple("Bad", "lots"));
        assert!(matches!(result, Err(QuestError::Validation(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn record_event_updates_score() {
        let mut store = GoalStore::new();
        store.create_goal(&simple("Hike", "300")).unwrap();
        store
            .create_goal(&GoalDraft::new("negative", "Soda", "", "500"))
            .unwrap();

        let outcome = store.record_event(0).unwrap();
        assert_eq!(outcome.points, 300);
        assert_eq!(outcome.total_score, 300);
        assert!(outcome.goal_complete);

        let outcome = store.record_event(1).unwrap();
        assert_eq!(outcome.points, -500);
        assert_eq!(store.total_score(), -200);
        assert_eq!(store.score().level, 1);
    }

    #[test]
    fn record_event_out_of_range() {
        let mut store = GoalStore::new();
        store.create_goal(&simple("Only", "1")).unwrap();
        let before = store.clone();

        let result = store.record_event(1);
        assert!(matches!(
            result,
            Err(QuestError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn record_event_reports_level_up() {
        let mut store = GoalStore::new();
        store
            .create_goal(&GoalDraft::new("eternal", "Scripture", "", "600"))
            .unwrap();

        assert!(!store.record_event(0).unwrap().leveled_up());
        let outcome = store.record_event(0).unwrap();
        assert!(outcome.leveled_up());
        assert_eq!(outcome.level_before, 1);
        assert_eq!(outcome.level_after, 2);
    }

    #[test]
    fn checklist_scenario() {
        let mut store = GoalStore::new();
        store
            .create_goal(&GoalDraft::new("checklist", "Temple", "", "10").with_checklist("5", "3"))
            .unwrap();

        let deltas: Vec<i64> = (0..3)
            .map(|_| store.record_event(0).unwrap().points)
            .collect();
        assert_eq!(deltas, vec![10, 10, 15]);
        assert!(store.get(0).unwrap().is_complete());
        assert_eq!(store.total_score(), 35);
    }

    #[test]
    fn achievements_unlock_once_and_persist() {
        let mut store = GoalStore::new();
        for i in 0..10 {
            store.create_goal(&simple(&format!("s{}", i), "1")).unwrap();
        }
        for i in 0..9 {
            assert!(store.record_event(i).unwrap().unlocked.is_empty());
        }
        let outcome = store.record_event(9).unwrap();
        assert_eq!(outcome.unlocked, vec![Achievement::GoalCrusher]);

        // Zero-point repeats and losses never revoke it.
        store
            .create_goal(&GoalDraft::new("negative", "Late", "", "100"))
            .unwrap();
        for _ in 0..3 {
            let outcome = store.record_event(10).unwrap();
            assert!(outcome.unlocked.is_empty());
        }
        store.record_event(0).unwrap();
        assert_eq!(store.achievements(), &[Achievement::GoalCrusher]);
    }

    #[test]
    fn zero_point_event_still_evaluates_achievements() {
        // Fifty eternal goals worth nothing still earn Scripture Warrior.
        let mut store = GoalStore::new();
        for i in 0..50 {
            store
                .create_goal(&GoalDraft::new("eternal", format!("e{}", i), "", "0"))
                .unwrap();
        }
        let outcome = store.record_event(0).unwrap();
        assert_eq!(outcome.points, 0);
        assert_eq!(outcome.unlocked, vec![Achievement::ScriptureWarrior]);
    }

    #[test]
    fn list_goals_is_restartable() {
        let mut store = GoalStore::new();
        store.create_goal(&simple("A", "1")).unwrap();
        store.create_goal(&simple("B", "1")).unwrap();

        let first: Vec<String> = store.list_goals().collect();
        let second: Vec<String> = store.list_goals().collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["[ ] A (test goal)", "[ ] B (test goal)"]);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.txt");

        let mut store = GoalStore::new();
        store.create_goal(&simple("Hike", "100")).unwrap();
        store.record_event(0).unwrap();
        store.save_to(&path).unwrap();

        let mut reloaded = GoalStore::new();
        reloaded.load_from(&path).unwrap();
        assert_eq!(reloaded, store);
    }

    #[test]
    fn failed_load_keeps_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.txt");
        std::fs::write(&path, "120\nFooGoal:x|y|10|1\nACHIEVEMENTS:\n").unwrap();

        let mut store = GoalStore::new();
        store.create_goal(&simple("Keep me", "5")).unwrap();
        store.record_event(0).unwrap();
        let before = store.clone();

        let result = store.load_from(&path);
        assert!(matches!(result, Err(QuestError::Parse { line: 2, .. })));
        assert_eq!(store, before);

        let missing = store.load_from(dir.path().join("nope.txt"));
        assert!(matches!(missing, Err(QuestError::Io { .. })));
        assert_eq!(store, before);
    }
}
