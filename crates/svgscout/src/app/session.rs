//! View-state persistence between invocations.
//!
//! The scan pipeline itself holds no cross-invocation state; only the
//! presentation layer remembers how the catalog was being viewed.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const SESSION_DIR: &str = ".svgscout";
const SESSION_FILE: &str = "session.json";

/// Snapshot of catalog view state persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Active name filter when the session closed.
    pub filter: Option<String>,
    /// User-selected preview theme override.
    pub theme: Option<String>,
}

/// Persists view state to a session file under `.svgscout/`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
    path: PathBuf,
}

impl SessionStore {
    /// Create a new store rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let path = root.join(SESSION_DIR).join(SESSION_FILE);
        Self { root, path }
    }

    /// Location of the persisted session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the most recently persisted snapshot.
    pub fn load(&self) -> Result<Option<SessionSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read session file at {}", self.path.display()))?;
        let snapshot = serde_json::from_str(&data)
            .with_context(|| format!("invalid session data in {}", self.path.display()))?;
        Ok(Some(snapshot))
    }

    /// Persist the snapshot, creating parent directories as needed.
    pub fn save(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let dir = self.path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create session directory {}", dir.display()))?;

        let data =
            serde_json::to_string_pretty(snapshot).context("failed to serialize session")?;
        fs::write(&self.path, data)
            .with_context(|| format!("failed to write session file to {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_round_trip() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let store = SessionStore::new(temp.path());

        assert_eq!(store.load()?, None);

        let snapshot = SessionSnapshot {
            filter: Some("arrow".into()),
            theme: Some("InspiredGitHub".into()),
        };
        store.save(&snapshot)?;

        assert_eq!(store.load()?, Some(snapshot));
        Ok(())
    }
}
