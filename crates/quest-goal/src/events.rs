// events.rs — Activity events and notification dispatch.
//
// The CLI emits a QuestEvent at key points in a session (goal created, event
// recorded, level up, achievement unlocked, save, load). Sinks subscribe to
// them; the built-in LogSink appends JSONL to `.quest/events.jsonl`.
//
// The activity log is optional. Dispatch never fails: sink errors are
// logged and dropped so a broken log can't interrupt the quest.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::achievements::Achievement;
use crate::error::QuestError;
use crate::goal::{Goal, GoalId, GoalType};
use crate::store::EventOutcome;

/// Events emitted during a quest session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A goal was added to the store.
    GoalCreated {
        goal_id: GoalId,
        goal_type: GoalType,
        name: String,
        points: i64,
        timestamp: DateTime<Utc>,
    },

    /// An event was recorded against a goal.
    EventRecorded {
        goal_id: GoalId,
        name: String,
        points: i64,
        total_score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The total score crossed into a higher level.
    LevelUp {
        level: u32,
        title: String,
        timestamp: DateTime<Utc>,
    },

    /// An achievement was unlocked.
    AchievementUnlocked {
        achievement: Achievement,
        timestamp: DateTime<Utc>,
    },

    /// The session was written to a save file.
    QuestSaved {
        path: String,
        goals: usize,
        timestamp: DateTime<Utc>,
    },

    /// The session was replaced from a save file.
    QuestLoaded {
        path: String,
        goals: usize,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalCreated { .. } => "goal_created",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::LevelUp { .. } => "level_up",
            QuestEvent::AchievementUnlocked { .. } => "achievement_unlocked",
            QuestEvent::QuestSaved { .. } => "quest_saved",
            QuestEvent::QuestLoaded { .. } => "quest_loaded",
        }
    }

    pub fn goal_created(goal_id: GoalId, goal: &Goal) -> Self {
        QuestEvent::GoalCreated {
            goal_id,
            goal_type: goal.goal_type(),
            name: goal.name().to_string(),
            points: goal.points(),
            timestamp: Utc::now(),
        }
    }

    /// All events implied by one recorded event: the record itself, then a
    /// level-up if any, then each unlocked achievement.
    pub fn from_outcome(goal: &Goal, outcome: &EventOutcome) -> Vec<Self> {
        let timestamp = Utc::now();
        let mut events = vec![QuestEvent::EventRecorded {
            goal_id: outcome.goal_id,
            name: goal.name().to_string(),
            points: outcome.points,
            total_score: outcome.total_score,
            timestamp,
        }];
        if outcome.leveled_up() {
            events.push(QuestEvent::LevelUp {
                level: outcome.level_after,
                title: crate::level::title_for(outcome.level_after).to_string(),
                timestamp,
            });
        }
        events.extend(
            outcome
                .unlocked
                .iter()
                .map(|&achievement| QuestEvent::AchievementUnlocked {
                    achievement,
                    timestamp,
                }),
        );
        events
    }

    pub fn quest_saved(path: &Path, goals: usize) -> Self {
        QuestEvent::QuestSaved {
            path: path.display().to_string(),
            goals,
            timestamp: Utc::now(),
        }
    }

    pub fn quest_loaded(path: &Path, goals: usize) -> Self {
        QuestEvent::QuestLoaded {
            path: path.display().to_string(),
            goals,
            timestamp: Utc::now(),
        }
    }
}

/// Receives quest events.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged by the dispatcher and otherwise ignored.
    fn send(&self, event: &QuestEvent) -> Result<(), QuestError>;
}

/// Appends events as JSONL to a file, one event per line.
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Read every event back from a log file, oldest first. A line that is
    /// not an event is reported with its 1-based line number.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<QuestEvent>, QuestError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| QuestError::io(path, source))?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str(line)
                    .map_err(|e| QuestError::parse(i + 1, format!("bad activity entry: {}", e)))
            })
            .collect()
    }

    fn append_line(&self, line: &str) -> Result<(), QuestError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| QuestError::io(parent, source))?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| QuestError::io(&self.path, source))?;
        writeln!(file, "{}", line).map_err(|source| QuestError::io(&self.path, source))
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), QuestError> {
        let line = serde_json::to_string(event)?;
        self.append_line(&line)
    }
}

/// Fans quest activity out to every registered sink.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Send one event to every sink and return how many accepted it. A
    /// failing sink is logged and skipped.
    pub fn dispatch(&self, event: &QuestEvent) -> usize {
        let mut delivered = 0;
        for (position, sink) in self.sinks.iter().enumerate() {
            match sink.send(event) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!(
                    event = event.event_type(),
                    sink = position,
                    "activity not recorded: {}",
                    e
                ),
            }
        }
        delivered
    }

    /// Send the events of one quest action in order.
    pub fn dispatch_all<'a>(&self, events: impl IntoIterator<Item = &'a QuestEvent>) {
        for event in events {
            self.dispatch(event);
        }
    }
}
