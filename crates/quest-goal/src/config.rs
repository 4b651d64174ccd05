// config.rs — Project layout and settings.
//
// QuestConfig decides where a project's quest state lives. The
// `for_project()` constructor lays everything out under `.quest/` in the
// project root; `quest.toml` in that directory can override the save file
// and switch off autosave or the activity log.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::QuestError;

const QUEST_DIR: &str = ".quest";
const SETTINGS_FILE: &str = "quest.toml";
const EVENTS_FILE: &str = "events.jsonl";

/// Settings read from `.quest/quest.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSettings {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub activity: ActivitySettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Save file, relative to `.quest/` unless absolute.
    #[serde(default = "default_save_file")]
    pub save_file: PathBuf,

    /// Save the session when the interactive shell exits.
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            save_file: default_save_file(),
            autosave: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySettings {
    /// Append activity events to `.quest/events.jsonl`.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for ActivitySettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_save_file() -> PathBuf {
    PathBuf::from("goals.txt")
}

fn default_true() -> bool {
    true
}

impl QuestSettings {
    /// Parse settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, QuestError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| QuestError::io(path, source))?;
        toml::from_str(&content).map_err(|e| QuestError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// invalid. An invalid file is reported with a warning.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("ignoring settings: {}", e);
            Self::default()
        })
    }
}

/// Resolved locations of a project's quest state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestConfig {
    /// Root directory of the project.
    pub project_root: PathBuf,

    /// The `.quest/` state directory.
    pub quest_dir: PathBuf,

    /// Default save file.
    pub save_file: PathBuf,

    /// JSONL activity log.
    pub events_log: PathBuf,

    /// Settings file (may not exist).
    pub settings_file: PathBuf,

    pub settings: QuestSettings,
}

impl QuestConfig {
    /// Standard `.quest/` layout with default settings.
    pub fn for_project(project_root: impl AsRef<Path>) -> Self {
        Self::with_settings(project_root, QuestSettings::default())
    }

    /// Standard layout, with settings read from `.quest/quest.toml` if present.
    pub fn load(project_root: impl AsRef<Path>) -> Self {
        let settings_file = project_root.as_ref().join(QUEST_DIR).join(SETTINGS_FILE);
        let settings = QuestSettings::load_or_default(&settings_file);
        Self::with_settings(project_root, settings)
    }

    fn with_settings(project_root: impl AsRef<Path>, settings: QuestSettings) -> Self {
        let root = project_root.as_ref().to_path_buf();
        let quest_dir = root.join(QUEST_DIR);
        Self {
            save_file: quest_dir.join(&settings.storage.save_file),
            events_log: quest_dir.join(EVENTS_FILE),
            settings_file: quest_dir.join(SETTINGS_FILE),
            project_root: root,
            quest_dir,
            settings,
        }
    }

    /// Create the `.quest/` directory if needed.
    pub fn ensure_dirs(&self) -> Result<(), QuestError> {
        std::fs::create_dir_all(&self.quest_dir)
            .map_err(|source| QuestError::io(&self.quest_dir, source))
    }
}
