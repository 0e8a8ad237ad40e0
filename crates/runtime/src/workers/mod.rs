//! Worker tasks that back the runtime orchestration.
//!
//! The game worker is the single logical thread the engine runs on.

mod game;

pub use game::{Command, GameWorker};
