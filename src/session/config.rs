//! Session configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::grid::coord::NODE_SIZE;

/// Configuration for a logging session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Edge length of one grid cell in world units
    pub cell_size: f32,
    /// Raise a progress notice after this many newly inserted cells
    /// during a load (0 disables progress notices)
    pub progress_every: usize,
    /// Directory holding the per-map node map files
    pub node_map_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cell_size: NODE_SIZE,
            progress_every: 10,
            node_map_dir: PathBuf::from("nodelog/nodemap"),
        }
    }
}

impl SessionConfig {
    /// Save to a JSON file (sync)
    pub fn save_sync(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file (sync)
    pub fn load_sync(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| Error::Config(e.to_string()))
    }
}
