// session.rs — One CLI session: a store bound to its save file.
//
// Wraps GoalStore so every mutation also reaches the activity log. Store
// errors are returned untouched; the caller decides how to show them.

use std::path::{Path, PathBuf};

use anyhow::Context;
use quest_goal::{
    codec, EventDispatcher, EventOutcome, GoalDraft, GoalId, GoalStore, LogSink, QuestConfig,
    QuestError, QuestEvent,
};

pub struct Session {
    pub config: QuestConfig,
    pub save_file: PathBuf,
    pub store: GoalStore,
    /// The save file exists but could not be read. Autosave leaves it alone
    /// until the player saves or loads explicitly.
    pub unreadable_save: bool,
    dispatcher: EventDispatcher,
}

impl Session {
    /// Open the session, loading `save_file` (or the configured save file)
    /// when it exists. A missing file starts an empty quest.
    pub fn open(config: QuestConfig, save_file: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut session = Self::open_empty(config, save_file);
        if session.save_file.exists() {
            session.store = codec::load(&session.save_file)
                .with_context(|| format!("failed to load {}", session.save_file.display()))?;
        } else {
            tracing::debug!(path = %session.save_file.display(), "no save file yet, starting fresh");
        }
        Ok(session)
    }

    /// Like [`Session::open`], but an unreadable save file yields an empty
    /// quest with `unreadable_save` set instead of an error.
    pub fn open_or_recover(config: QuestConfig, save_file: Option<PathBuf>) -> Self {
        let fallback = (config.clone(), save_file.clone());
        match Self::open(config, save_file) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!("starting with an empty quest: {:#}", e);
                eprintln!("Warning: {:#}. Starting with an empty quest.", e);
                let mut session = Self::open_empty(fallback.0, fallback.1);
                session.unreadable_save = true;
                session
            }
        }
    }

    /// Open without reading the save file. Used when its contents are about
    /// to be replaced wholesale.
    pub fn open_empty(config: QuestConfig, save_file: Option<PathBuf>) -> Self {
        let save_file = save_file.unwrap_or_else(|| config.save_file.clone());

        let mut dispatcher = EventDispatcher::new();
        if config.settings.activity.enabled {
            dispatcher.add_sink(Box::new(LogSink::new(&config.events_log)));
        }

        Self {
            config,
            save_file,
            store: GoalStore::new(),
            unreadable_save: false,
            dispatcher,
        }
    }

    pub fn create(&mut self, draft: &GoalDraft) -> Result<GoalId, QuestError> {
        let id = self.store.create_goal(draft)?;
        if let Some(goal) = self.store.get(id) {
            self.dispatcher.dispatch(&QuestEvent::goal_created(id, goal));
        }
        Ok(id)
    }

    pub fn record(&mut self, index: GoalId) -> Result<EventOutcome, QuestError> {
        let outcome = self.store.record_event(index)?;
        if let Some(goal) = self.store.get(index) {
            self.dispatcher
                .dispatch_all(&QuestEvent::from_outcome(goal, &outcome));
        }
        Ok(outcome)
    }

    /// Save to the session's own save file.
    pub fn save(&self) -> Result<(), QuestError> {
        if self.save_file.starts_with(&self.config.quest_dir) {
            self.config.ensure_dirs()?;
        }
        self.save_as(&self.save_file)
    }

    pub fn save_as(&self, path: &Path) -> Result<(), QuestError> {
        self.store.save_to(path)?;
        self.dispatcher
            .dispatch(&QuestEvent::quest_saved(path, self.store.len()));
        Ok(())
    }

    /// Replace the session's contents with `path`. The store is unchanged on error.
    pub fn load_from(&mut self, path: &Path) -> Result<(), QuestError> {
        self.store.load_from(path)?;
        self.unreadable_save = false;
        self.dispatcher
            .dispatch(&QuestEvent::quest_loaded(path, self.store.len()));
        Ok(())
    }
}
