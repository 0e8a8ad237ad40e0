//! Repository layer for the persisted high score.
//!
//! The high score is the only value that outlives a round. Repositories do
//! the raw storage; [`HighScoreGateway`] is what the engine talks to and
//! turns every storage failure into a logged, non-fatal event.

mod error;
mod file;
mod gateway;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileHighScoreRepository;
pub use gateway::HighScoreGateway;
pub use memory::InMemoryHighScoreRepo;
pub use traits::HighScoreRepository;
