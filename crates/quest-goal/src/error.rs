// error.rs — Error types for goal tracking and persistence.

use thiserror::Error;

/// Errors that can occur while creating goals, recording events, or
/// reading and writing save files.
#[derive(Debug, Error)]
pub enum QuestError {
    /// Goal-creation input was rejected.
    #[error("invalid goal: {0}")]
    Validation(String),

    /// A goal reference pointed past the end of the store.
    #[error("goal index {index} out of range (store has {len} goal(s))")]
    IndexOutOfRange { index: usize, len: usize },

    /// A save file was malformed. `line` is 1-based.
    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize an activity event.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The settings file could not be parsed.
    #[error("invalid settings at {path}: {message}")]
    Config { path: String, message: String },
}

impl QuestError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        QuestError::Validation(message.into())
    }

    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        QuestError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        QuestError::Parse {
            line,
            message: message.into(),
        }
    }
}
