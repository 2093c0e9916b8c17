//! Session configuration.

use crate::logging::LogConfig;
use std::path::{Path, PathBuf};
use xbase_snapshot::{SnapshotFormat, SnapshotStore, DEFAULT_SNAPSHOT_FILE};

/// Default interactive prompt
pub const DEFAULT_PROMPT: &str = ". ";

/// Settings for a [`Session`](crate::Session) and the `xbase` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Snapshot file loaded at startup and written on SAVE/QUIT
    pub snapshot_path: PathBuf,
    /// Snapshot encoding; inferred from the extension when `None`
    pub snapshot_format: Option<SnapshotFormat>,
    /// Save on QUIT
    pub autosave: bool,
    /// Logging setup
    pub log: LogConfig,
    /// Prompt shown by the interactive loop
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_FILE),
            snapshot_format: None,
            autosave: true,
            log: LogConfig::default(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different snapshot file
    pub fn with_snapshot_path(mut self, path: impl AsRef<Path>) -> Self {
        self.snapshot_path = path.as_ref().to_path_buf();
        self
    }

    /// Force a snapshot encoding
    pub fn with_snapshot_format(mut self, format: SnapshotFormat) -> Self {
        self.snapshot_format = Some(format);
        self
    }

    /// Enable or disable saving on QUIT
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Replace the logging setup
    pub fn with_log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }

    /// Replace the prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Snapshot store for these settings
    pub fn store(&self) -> SnapshotStore {
        match self.snapshot_format {
            Some(format) => SnapshotStore::with_format(&self.snapshot_path, format),
            None => SnapshotStore::new(&self.snapshot_path),
        }
    }
}
