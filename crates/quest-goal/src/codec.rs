// codec.rs — Line-oriented save file format.
//
// Layout:
//
//   <total score>
//   <Tag>:<name>|<description>|<points>[|<extra fields>]
//   ...
//   ACHIEVEMENTS:
//   <achievement name>
//   ...
//
// Extra fields per tag:
//   SimpleGoal     completed (True/False)
//   EternalGoal    timesCompleted
//   ChecklistGoal  bonus, amountCompleted, target
//   NegativeGoal   timesFailed
//
// The tag ends at the first ':' and fields are split on '|'. Nothing is
// escaped: a name or description containing '|' produces a file that will
// not load. Goal creation rejects those characters for that reason.
//
// Saving composes the whole file in memory, writes a sibling temp file and
// renames it over the destination. Loading decodes into a fresh store that
// the caller swaps in only on success.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::achievements::Achievement;
use crate::error::QuestError;
use crate::goal::{Goal, GoalProgress, GoalType};
use crate::store::GoalStore;

pub const ACHIEVEMENTS_MARKER: &str = "ACHIEVEMENTS:";

/// Number of `|`-separated fields after the tag for each goal type.
fn field_count(kind: GoalType) -> usize {
    match kind {
        GoalType::Checklist => 6,
        GoalType::Simple | GoalType::Eternal | GoalType::Negative => 4,
    }
}

/// Encode one goal as a save-file record (no trailing newline).
pub fn encode_goal(goal: &Goal) -> String {
    let head = format!(
        "{}:{}|{}|{}",
        goal.goal_type().tag(),
        goal.name(),
        goal.description(),
        goal.points()
    );
    match goal.progress() {
        GoalProgress::Simple { completed } => {
            format!("{}|{}", head, if *completed { "True" } else { "False" })
        }
        GoalProgress::Eternal { times_completed } => format!("{}|{}", head, times_completed),
        GoalProgress::Checklist {
            bonus,
            amount_completed,
            target,
        } => format!("{}|{}|{}|{}", head, bonus, amount_completed, target),
        GoalProgress::Negative { times_failed } => format!("{}|{}", head, times_failed),
    }
}

/// Encode the full store as save-file text.
pub fn encode(store: &GoalStore) -> String {
    let mut out = format!("{}\n", store.total_score());
    for goal in store.goals() {
        out.push_str(&encode_goal(goal));
        out.push('\n');
    }
    out.push_str(ACHIEVEMENTS_MARKER);
    out.push('\n');
    for achievement in store.achievements() {
        out.push_str(achievement.name());
        out.push('\n');
    }
    out
}

/// Decode save-file text into a new store.
///
/// Blank lines are ignored. A file without the achievements marker simply
/// has no achievements.
pub fn decode(text: &str) -> Result<GoalStore, QuestError> {
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (_, first) = lines
        .next()
        .ok_or_else(|| QuestError::parse(1, "save file is empty"))?;
    let total_score: i64 = first
        .trim()
        .parse()
        .map_err(|_| QuestError::parse(1, format!("expected a total score, found '{}'", first)))?;

    let mut goals = Vec::new();
    let mut achievements = Vec::new();
    let mut reading_achievements = false;

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        if reading_achievements {
            let achievement = line
                .trim()
                .parse::<Achievement>()
                .map_err(|message| QuestError::parse(line_no, message))?;
            achievements.push(achievement);
        } else if line == ACHIEVEMENTS_MARKER {
            reading_achievements = true;
        } else {
            goals.push(decode_goal(line_no, line)?);
        }
    }

    Ok(GoalStore::from_parts(total_score, goals, achievements))
}

/// Decode one goal record. `line_no` is only used in error messages.
pub fn decode_goal(line_no: usize, line: &str) -> Result<Goal, QuestError> {
    let (tag, rest) = line
        .split_once(':')
        .ok_or_else(|| QuestError::parse(line_no, "expected '<GoalType>:<fields>'"))?;
    let kind = GoalType::from_tag(tag)
        .ok_or_else(|| QuestError::parse(line_no, format!("unknown goal type '{}'", tag)))?;

    let fields: Vec<&str> = rest.split('|').collect();
    let expected = field_count(kind);
    if fields.len() != expected {
        return Err(QuestError::parse(
            line_no,
            format!(
                "{} expects {} fields, found {}",
                tag,
                expected,
                fields.len()
            ),
        ));
    }

    let name = fields[0];
    if name.trim().is_empty() {
        return Err(QuestError::parse(line_no, "goal name is empty"));
    }
    let description = fields[1];
    let points = parse_amount(line_no, "points", fields[2])?;

    let progress = match kind {
        GoalType::Simple => GoalProgress::Simple {
            completed: parse_bool(line_no, fields[3])?,
        },
        GoalType::Eternal => GoalProgress::Eternal {
            times_completed: parse_field(line_no, "timesCompleted", fields[3])?,
        },
        GoalType::Checklist => {
            let bonus = parse_amount(line_no, "bonus", fields[3])?;
            let target: u32 = parse_field(line_no, "target", fields[5])?;
            if target == 0 {
                return Err(QuestError::parse(line_no, "checklist target must be positive"));
            }
            GoalProgress::Checklist {
                bonus,
                amount_completed: parse_field(line_no, "amountCompleted", fields[4])?,
                target,
            }
        }
        GoalType::Negative => GoalProgress::Negative {
            times_failed: parse_field(line_no, "timesFailed", fields[3])?,
        },
    };

    Ok(Goal::restore(name, description, points, progress))
}

fn parse_field<T: FromStr>(line_no: usize, field: &str, raw: &str) -> Result<T, QuestError> {
    raw.trim().parse().map_err(|_| {
        QuestError::parse(
            line_no,
            format!("{} '{}' is not a valid whole number", field, raw),
        )
    })
}

/// Points and bonuses are stored as non-negative magnitudes.
fn parse_amount(line_no: usize, field: &str, raw: &str) -> Result<i64, QuestError> {
    let value: i64 = parse_field(line_no, field, raw)?;
    if value < 0 {
        return Err(QuestError::parse(
            line_no,
            format!("{} must not be negative (got {})", field, value),
        ));
    }
    Ok(value)
}

fn parse_bool(line_no: usize, raw: &str) -> Result<bool, QuestError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(QuestError::parse(
            line_no,
            format!("completed '{}' is not True or False", raw),
        )),
    }
}

/// Write `store` to `path`, replacing any existing file.
///
/// The destination is only touched by the final rename, so a failed save
/// leaves the previous file intact.
pub fn save(store: &GoalStore, path: impl AsRef<Path>) -> Result<(), QuestError> {
    let path = path.as_ref();
    let contents = encode(store);
    let temp = temp_path(path);

    // Whichever step fails, the destination is untouched and the temp file goes.
    let written = fs::write(&temp, contents)
        .map_err(|source| QuestError::io(&temp, source))
        .and_then(|()| fs::rename(&temp, path).map_err(|source| QuestError::io(path, source)));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(e);
    }

    tracing::info!(path = %path.display(), goals = store.len(), "quest saved");
    Ok(())
}

/// Read and decode the save file at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<GoalStore, QuestError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| QuestError::io(path, source))?;
    let store = decode(&text)?;
    tracing::info!(path = %path.display(), goals = store.len(), "quest loaded");
    Ok(store)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "quest".into());
    name.push(".tmp");
    path.with_file_name(name)
}
