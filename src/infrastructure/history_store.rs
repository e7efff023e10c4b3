//! JSON file persistence for the metrics history.

use crate::domain::metrics::History;
use crate::domain::ports::HistoryRepository;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Stores the whole history as one pretty-printed JSON object.
pub struct JsonHistoryStore {
    file_path: PathBuf,
}

impl JsonHistoryStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl HistoryRepository for JsonHistoryStore {
    fn load(&self) -> Result<History> {
        if !self.file_path.exists() {
            info!("No history at {:?}, starting empty", self.file_path);
            return Ok(History::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read history file {:?}", self.file_path))?;
        let history: History = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history JSON {:?}", self.file_path))?;

        info!("Loaded history from {:?}", self.file_path);
        Ok(history)
    }

    fn save(&self, history: &History) -> Result<()> {
        let content =
            serde_json::to_string_pretty(history).context("Failed to serialize history")?;

        if let Some(parent) = self
            .file_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
        {
            fs::create_dir_all(parent).context("Failed to create history directory")?;
        }

        // Write to temp file then rename so readers never see a torn file
        let temp_path = self.file_path.with_extension("tmp");
        fs::write(&temp_path, content).context("Failed to write temp history file")?;
        fs::rename(&temp_path, &self.file_path).context("Failed to rename history file")?;

        info!("Saved history to {:?}", self.file_path);
        Ok(())
    }
}
