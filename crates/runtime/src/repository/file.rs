//! File-based HighScoreRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{HighScoreRepository, RepositoryError, Result};

const FILE_NAME: &str = "high_score.json";

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

/// Stores the high score as a small JSON document.
///
/// # File Format
///
/// `{base_dir}/high_score.json` containing `{"high_score": <n>}`. Writes go
/// to a temporary sibling first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileHighScoreRepository {
    base_dir: PathBuf,
}

impl FileHighScoreRepository {
    /// Create a repository rooted at `base_dir`, creating the directory if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn path(&self) -> PathBuf {
        self.base_dir.join(FILE_NAME)
    }
}

impl HighScoreRepository for FileHighScoreRepository {
    fn load(&self) -> Result<Option<u32>> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let record: HighScoreRecord = serde_json::from_slice(&bytes).map_err(|e| {
            RepositoryError::CorruptedData(format!("{}: {}", path.display(), e))
        })?;

        tracing::debug!("Loaded high score {} from {}", record.high_score, path.display());

        Ok(Some(record.high_score))
    }

    fn save(&self, high_score: u32) -> Result<()> {
        let path = self.path();
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec(&HighScoreRecord { high_score })?;

        fs::write(&temp_path, bytes)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved high score {} to {}", high_score, path.display());

        Ok(())
    }
}
