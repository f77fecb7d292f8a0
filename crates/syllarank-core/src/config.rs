//! Configuration and data directory management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Paths to the Syllarank data directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Record database directory (`data/records/`).
    pub records: PathBuf,
    /// Institution directory CSVs queued for ingest (`data/directories/`).
    pub directories: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            records: root.join("records"),
            directories: root.join("directories"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    /// Create all required directories.
    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.records)?;
        std::fs::create_dir_all(&self.directories)?;
        Ok(())
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Data directory paths.
    pub data_paths: DataPaths,
}

impl EngineConfig {
    /// Create configuration from environment and defaults. `SYLLARANK_DATA`
    /// overrides the default data directory.
    pub fn from_env(default_data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = std::env::var("SYLLARANK_DATA")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir.as_ref().to_path_buf());

        let data_paths = DataPaths::new(root)?;

        Ok(Self { data_paths })
    }
}
