//! In-memory HighScoreRepository implementation for tests and local runs.

use std::sync::RwLock;

use super::{HighScoreRepository, RepositoryError, Result};

/// Keeps the high score in process memory.
#[derive(Debug, Default)]
pub struct InMemoryHighScoreRepo {
    high_score: RwLock<Option<u32>>,
}

impl InMemoryHighScoreRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with a previously stored high score.
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score: RwLock::new(Some(high_score)),
        }
    }

    /// Last stored value, `None` if never saved or the lock is poisoned.
    pub fn stored(&self) -> Option<u32> {
        self.high_score.read().ok().and_then(|value| *value)
    }
}

impl HighScoreRepository for InMemoryHighScoreRepo {
    fn load(&self) -> Result<Option<u32>> {
        let value = self
            .high_score
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(*value)
    }

    fn save(&self, high_score: u32) -> Result<()> {
        let mut value = self
            .high_score
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        *value = Some(high_score);
        Ok(())
    }
}
