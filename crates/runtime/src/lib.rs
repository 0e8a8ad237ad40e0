//! Runtime orchestration for the whack-a-mole engine.
//!
//! This crate wraps the pure round rules from `game-core` with everything
//! that has a side effect: scheduling, persistence and change notification.
//! Consumers either embed [`GameEngine`] directly with their own
//! [`Scheduler`], or use [`Runtime`] to run it on a tokio task and interact
//! through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the engine that owns round state and timers
//! - [`scheduler`] defines the timer capability and a deterministic queue
//! - [`runtime`] hosts the async orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus
//! - [`repository`] persists the high score
pub mod api;
pub mod engine;
pub mod events;
pub mod repository;
pub mod runtime;
pub mod scheduler;

mod workers;

pub use api::{Result, RuntimeError, RuntimeHandle};
pub use engine::GameEngine;
pub use events::{Event, EventBus, RoundEvent, Topic};
pub use repository::{
    FileHighScoreRepository, HighScoreGateway, HighScoreRepository, InMemoryHighScoreRepo,
    RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use scheduler::{CancelToken, FiredTask, Scheduler, Task, TimerQueue};
