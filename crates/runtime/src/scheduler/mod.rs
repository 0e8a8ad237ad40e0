//! Scheduler capability consumed by the game engine.
//!
//! The engine never owns real time. It asks a [`Scheduler`] to deliver a
//! [`Task`] after a delay (or periodically) and keeps the returned
//! [`CancelToken`] so it can revoke the callback later. Tasks are plain data:
//! the host hands each fired task back to
//! [`GameEngine::fire`](crate::GameEngine::fire), which keeps every callback on
//! the engine's single logical timeline.
mod queue;

pub use queue::{FiredTask, TimerQueue};

use game_core::HoleId;
use serde::{Deserialize, Serialize};

/// Handle identifying one scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CancelToken(pub u64);

/// Work the engine asks the scheduler to deliver back to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Task {
    /// One second of the round timer (scheduled as repeating).
    RoundTick,
    /// Try to raise a mole in a free hole.
    SpawnAttempt,
    /// Hide the mole raised by spawn number `spawn` in `hole`.
    Expire { hole: HoleId, spawn: u64 },
}

/// Host-supplied timer primitive.
///
/// Implementations must deliver tasks on one logical thread, in due-time
/// order, and must not deliver a task after `cancel` returned for its token.
pub trait Scheduler {
    /// Delivers `task` once, `delay_ms` from now.
    fn schedule_once(&mut self, delay_ms: u64, task: Task) -> CancelToken;

    /// Delivers `task` every `interval_ms` until cancelled.
    fn schedule_repeating(&mut self, interval_ms: u64, task: Task) -> CancelToken;

    /// Revokes a pending callback. Unknown tokens are ignored.
    fn cancel(&mut self, token: CancelToken);
}
