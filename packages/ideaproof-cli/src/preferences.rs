use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::i18n::Language;

const FILE_NAME: &str = "preferences.json";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: Language,
}

/// JSON file holding the user's preferences.
#[derive(Clone, Debug)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store under the platform config directory, if there is one.
    pub fn user() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::new(dir.join("ideaproof").join(FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved preferences. A missing or unreadable file yields the defaults.
    pub fn load(&self) -> Preferences {
        match fs::read_to_string(&self.path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|error| {
                warn!(path = %self.path.display(), %error, "ignoring malformed preferences");
                Preferences::default()
            }),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Preferences::default(),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable preferences");
                Preferences::default()
            }
        }
    }

    pub fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("failed to create {}", dir.display()))?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(preferences)?)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!(path = %self.path.display(), ?preferences, "preferences saved");

        Ok(())
    }
}
