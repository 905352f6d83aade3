//! Storage backends for the wizard state

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::form::wizard::WizardState;

/// Synchronous commit/read access to the persisted state
pub trait SessionStore {
    fn commit(&mut self, state: &WizardState) -> Result<()>;
    fn read(&self) -> Result<Option<WizardState>>;
    fn clear(&mut self) -> Result<()>;
}

/// Keeps the last committed state in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Option<WizardState>,
}

impl SessionStore for MemoryStore {
    fn commit(&mut self, state: &WizardState) -> Result<()> {
        self.state = Some(state.clone());
        Ok(())
    }

    fn read(&self) -> Result<Option<WizardState>> {
        Ok(self.state.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.state = None;
        Ok(())
    }
}

/// Pretty-printed JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for JsonFileStore {
    fn commit(&mut self, state: &WizardState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create session directory {}", parent.display())
            })?;
        }

        let content =
            serde_json::to_string_pretty(state).context("Failed to serialize session")?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write session file {}", self.path.display()))?;

        log::debug!("Committed session to {}", self.path.display());
        Ok(())
    }

    fn read(&self) -> Result<Option<WizardState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file {}", self.path.display()))?;
        let state = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file {}", self.path.display()))?;
        Ok(Some(state))
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).with_context(|| {
                format!("Failed to remove session file {}", self.path.display())
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::steps::Step;

    #[test]
    fn test_json_store_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::new(temp.path().join("nested").join("session.json"));
        assert!(store.read().unwrap().is_none());

        let mut state = WizardState::default();
        state.current_step = Step::Dataset;
        state.data.initiative_name = "Churn".to_string();
        store.commit(&state).unwrap();

        let loaded = store.read().unwrap().unwrap();
        assert_eq!(loaded, state);

        store.clear().unwrap();
        assert!(store.read().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(path).read().is_err());
    }
}
