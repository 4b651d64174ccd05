// level.rs — Score → level derivation.
//
// Every 1000 points is a level, starting at level 1 and capped at level 10.
// Scores can go negative through negative goals; floor division is used and
// the result is clamped, so every negative score sits at level 1.

use std::fmt;

pub const POINTS_PER_LEVEL: i64 = 1000;
pub const MAX_LEVEL: u32 = 10;

const LEVEL_TITLES: [&str; MAX_LEVEL as usize] = [
    "Beginner",
    "Apprentice",
    "Journeyman",
    "Skilled",
    "Expert",
    "Master",
    "Grandmaster",
    "Champion",
    "Hero",
    "Legend",
];

/// Level for a total score, in `1..=MAX_LEVEL`.
pub fn level_for(total: i64) -> u32 {
    let raw = total.div_euclid(POINTS_PER_LEVEL) + 1;
    raw.clamp(1, MAX_LEVEL as i64) as u32
}

/// Title for a level. Out-of-range levels are clamped.
pub fn title_for(level: u32) -> &'static str {
    let index = level.clamp(1, MAX_LEVEL) as usize - 1;
    LEVEL_TITLES[index]
}

/// Score, level and progress toward the next level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub total: i64,
    pub level: u32,
    pub title: &'static str,
    /// `None` once the maximum level is reached.
    pub points_to_next: Option<i64>,
}

impl ScoreSummary {
    pub fn from_total(total: i64) -> Self {
        let level = level_for(total);
        let points_to_next = if level < MAX_LEVEL {
            Some((i64::from(level) * POINTS_PER_LEVEL).saturating_sub(total))
        } else {
            None
        };
        Self {
            total,
            level,
            title: title_for(level),
            points_to_next,
        }
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "You have {} points.", self.total)?;
        write!(f, "Level {}: {}", self.level, self.title)?;
        match self.points_to_next {
            Some(remaining) => write!(
                f,
                "\n({} points until Level {})",
                remaining,
                self.level + 1
            ),
            None => write!(f, "\n(MAX LEVEL ACHIEVED!)"),
        }
    }
}
