//! Explicit cross-stage variable hand-off.
//!
//! Notebook stages that used to share values through an interactive-session
//! store instead serialize them to named JSON files in a store directory. A
//! later stage (or a later session) reads them back by name. The store never
//! deletes anything; stages overwrite by re-writing the same name.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct VariableStore {
    dir: PathBuf,
}

impl Default for VariableStore {
    fn default() -> Self {
        VariableStore::new(".wsra_store")
    }
}

impl VariableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        VariableStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Read the value stored under `name`. Fails with
    /// [`Error::VariableNotStored`] if no stage ever wrote it.
    pub fn read<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let path = self.path_for(name);
        if !path.exists() {
            return Err(Error::VariableNotStored(name.to_string()));
        }
        debug!(name, path = %path.display(), "reading stored variable");
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Persist `value` under `name` for a later stage. Creates the store
    /// directory on first write.
    pub fn write<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(name);
        debug!(name, path = %path.display(), "writing stored variable");
        fs::write(&path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }
}
