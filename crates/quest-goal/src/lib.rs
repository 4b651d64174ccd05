//! # quest-goal
//!
//! Goal tracking, scoring and save files for Eternal Quest.
//!
//! A [`GoalStore`] holds an ordered list of [`Goal`]s, a running score and
//! the achievements unlocked so far. Recording an event against a goal
//! awards (or, for negative goals, removes) points, may level the player
//! up, and re-evaluates the achievement catalog.
//!
//! ## Key components
//!
//! - [`Goal`] / [`GoalProgress`] — the four goal behaviors (Simple, Eternal,
//!   Checklist, Negative)
//! - [`GoalDraft`] — raw creation input, validated into a goal
//! - [`GoalStore`] — the session: create, record, list, score, save, load
//! - [`ScoreSummary`] — level and title derived from the score
//! - [`Achievement`] — the fixed catalog and its evaluator
//! - [`codec`] — the line-oriented save file format
//! - [`QuestEvent`] / [`EventDispatcher`] — optional JSONL activity log
//! - [`QuestConfig`] — `.quest/` layout and `quest.toml` settings
//!
//! ## Quick Example
//!
//! ```rust
//! use quest_goal::{GoalDraft, GoalStore};
//!
//! let mut store = GoalStore::new();
//! let id = store
//!     .create_goal(&GoalDraft::new("checklist", "Temple", "monthly", "10").with_checklist("5", "3"))
//!     .unwrap();
//! let deltas: Vec<i64> = (0..3).map(|_| store.record_event(id).unwrap().points).collect();
//! assert_eq!(deltas, vec![10, 10, 15]);
//! ```

pub mod achievements;
pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod goal;
pub mod level;
pub mod store;

pub use achievements::{Achievement, GoalCounts};
pub use config::{QuestConfig, QuestSettings};
pub use error::QuestError;
pub use events::{EventDispatcher, LogSink, NotificationSink, QuestEvent};
pub use goal::{Goal, GoalDraft, GoalId, GoalProgress, GoalType};
pub use level::ScoreSummary;
pub use store::{EventOutcome, GoalStore};
