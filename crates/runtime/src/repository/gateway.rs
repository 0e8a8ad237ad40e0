//! Best-effort access to the persisted high score.

use super::HighScoreRepository;

/// Wraps a [`HighScoreRepository`] so storage failures never reach gameplay.
///
/// Load failures degrade to `0`; save failures are logged and dropped.
pub struct HighScoreGateway {
    repository: Box<dyn HighScoreRepository>,
}

impl HighScoreGateway {
    pub fn new(repository: impl HighScoreRepository + 'static) -> Self {
        Self {
            repository: Box::new(repository),
        }
    }

    /// Stored high score, or `0` when absent or unreadable.
    pub fn load(&self) -> u32 {
        match self.repository.load() {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(err) => {
                tracing::warn!("Failed to load high score, starting from 0: {}", err);
                0
            }
        }
    }

    /// Persists `high_score`. Returns whether the write succeeded.
    pub fn save(&self, high_score: u32) -> bool {
        match self.repository.save(high_score) {
            Ok(()) => true,
            Err(err) => {
                tracing::error!("Failed to persist high score {}: {}", high_score, err);
                false
            }
        }
    }
}

impl std::fmt::Debug for HighScoreGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighScoreGateway").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryHighScoreRepo, RepositoryError, Result};
    use std::sync::Arc;

    struct BrokenRepo;

    impl HighScoreRepository for BrokenRepo {
        fn load(&self) -> Result<Option<u32>> {
            Err(RepositoryError::CorruptedData("bad".into()))
        }

        fn save(&self, _high_score: u32) -> Result<()> {
            Err(RepositoryError::LockPoisoned)
        }
    }

    #[test]
    fn absent_value_loads_zero() {
        let gateway = HighScoreGateway::new(InMemoryHighScoreRepo::new());
        assert_eq!(gateway.load(), 0);
    }

    #[test]
    fn failures_are_absorbed() {
        let gateway = HighScoreGateway::new(BrokenRepo);
        assert_eq!(gateway.load(), 0);
        assert!(!gateway.save(10));
    }

    #[test]
    fn shared_repo_sees_saves() {
        let repo = Arc::new(InMemoryHighScoreRepo::with_high_score(3));
        let gateway = HighScoreGateway::new(Arc::clone(&repo));
        assert_eq!(gateway.load(), 3);
        assert!(gateway.save(7));
        assert_eq!(repo.stored(), Some(7));
    }
}
