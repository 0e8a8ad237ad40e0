//! Game worker that owns the authoritative [`game_core::RoundState`].
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), fires
//! scheduled callbacks when their deadline passes, and lets the wrapped
//! [`GameEngine`] publish events to the EventBus. Everything runs on this one
//! task, so commands and timer callbacks never interleave.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::debug;

use game_core::{HitOutcome, HoleId, Phase, RoundState};

use crate::api::Result;
use crate::engine::GameEngine;
use crate::scheduler::TimerQueue;

/// Commands that can be sent to the game worker
pub enum Command {
    Start {
        reply: oneshot::Sender<Result<()>>,
    },
    HitHole {
        hole: HoleId,
        reply: oneshot::Sender<Result<HitOutcome>>,
    },
    Reset {
        reply: oneshot::Sender<Phase>,
    },
    ClearHighScore {
        reply: oneshot::Sender<()>,
    },
    /// Query the current round state (read-only).
    QueryState {
        reply: oneshot::Sender<RoundState>,
    },
    /// Stop the worker loop after cancelling the round.
    Shutdown,
}

/// Background task that maps wall-clock time onto the engine's virtual clock.
///
/// The engine's [`TimerQueue`] counts milliseconds since `origin`. Before
/// every command the worker fires whatever has fallen due, so a click that
/// arrives after a deadline observes the post-deadline state.
pub struct GameWorker {
    engine: GameEngine<TimerQueue>,
    origin: Instant,
    command_rx: mpsc::Receiver<Command>,
}

impl GameWorker {
    pub fn new(engine: GameEngine<TimerQueue>, command_rx: mpsc::Receiver<Command>) -> Self {
        Self {
            engine,
            origin: Instant::now(),
            command_rx,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            let deadline = self
                .engine
                .next_deadline()
                .map(|ms| self.origin + Duration::from_millis(ms));

            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => {
                        self.catch_up();
                        self.handle_command(cmd);
                    }
                },
                _ = sleep_until(deadline) => self.catch_up(),
            }
        }

        self.engine.reset();
        debug!("GameWorker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Start { reply } => {
                let result: Result<()> = self.engine.start().map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("Start reply channel closed (caller dropped)");
                }
            }
            Command::HitHole { hole, reply } => {
                let result: Result<HitOutcome> = self.engine.hit_hole(hole).map_err(Into::into);
                if reply.send(result).is_err() {
                    debug!("HitHole reply channel closed (caller dropped)");
                }
            }
            Command::Reset { reply } => {
                if reply.send(self.engine.reset()).is_err() {
                    debug!("Reset reply channel closed (caller dropped)");
                }
            }
            Command::ClearHighScore { reply } => {
                self.engine.clear_high_score();
                if reply.send(()).is_err() {
                    debug!("ClearHighScore reply channel closed (caller dropped)");
                }
            }
            Command::QueryState { reply } => {
                if reply.send(self.engine.state().clone()).is_err() {
                    debug!("QueryState reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    /// Fires every callback whose deadline has passed.
    fn catch_up(&mut self) {
        let elapsed = u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.engine.advance_to(elapsed);
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
