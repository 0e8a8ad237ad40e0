//! Repository contract for the persisted high score.

use std::sync::Arc;

use super::Result;

/// Durable storage for the single integer that survives between rounds.
///
/// `load` returns `Ok(None)` when nothing has been stored yet. Implementations
/// are called from the engine's timeline and should finish quickly.
pub trait HighScoreRepository: Send + Sync {
    fn load(&self) -> Result<Option<u32>>;

    fn save(&self, high_score: u32) -> Result<()>;
}

impl<T: HighScoreRepository + ?Sized> HighScoreRepository for Arc<T> {
    fn load(&self) -> Result<Option<u32>> {
        (**self).load()
    }

    fn save(&self, high_score: u32) -> Result<()> {
        (**self).save(high_score)
    }
}

impl<T: HighScoreRepository + ?Sized> HighScoreRepository for Box<T> {
    fn load(&self) -> Result<Option<u32>> {
        (**self).load()
    }

    fn save(&self, high_score: u32) -> Result<()> {
        (**self).save(high_score)
    }
}
