//! UI preferences that outlive a session.
//!
//! The store is opened once at startup and handed to whoever needs it. Every change is written
//! straight back to disk so a crash never loses a toggle.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
/// Persisted display choices.
pub struct Preferences {
    /// Use the dark palette.
    #[serde(default)]
    pub dark_mode: bool,
}

/// Owns the current preferences and the file they persist to.
pub struct PreferenceStore {
    path: PathBuf,
    current: Preferences,
}

impl PreferenceStore {
    #[must_use]
    /// Read the persisted preferences, falling back to defaults if the file is missing or bad.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable preferences");
                Preferences::default()
            }),
            Err(_) => Preferences::default(),
        };
        Self { path, current }
    }

    #[must_use]
    /// Current preferences.
    pub fn get(&self) -> Preferences {
        self.current
    }

    #[must_use]
    /// File the preferences are written to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply a change and write it through to disk.
    ///
    /// The in-memory value is updated even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the file write fails.
    pub fn update(&mut self, change: impl FnOnce(&mut Preferences)) -> Result<()> {
        change(&mut self.current);
        let json = serde_json::to_string_pretty(&self.current)?;
        fs::write(&self.path, json).map_err(|source| Error::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/preferences.rs"]
mod tests;
