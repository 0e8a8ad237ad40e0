//! High-level runtime orchestrator.
//!
//! The runtime owns the game worker, wires up command/event channels, and
//! exposes a builder-based API for hosts to drive rounds.

use std::path::PathBuf;

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use game_core::GameConfig;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::engine::GameEngine;
use crate::events::{Event, EventBus, Topic};
use crate::repository::{
    FileHighScoreRepository, HighScoreGateway, HighScoreRepository, InMemoryHighScoreRepo,
};
use crate::scheduler::TimerQueue;
use crate::workers::{Command, GameWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Capacity of each topic channel.
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Main runtime that hosts one game engine
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Subscribe to events from a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    /// Shutdown the runtime gracefully
    ///
    /// Any round in progress is abandoned; outstanding handles start failing
    /// with [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        // The worker may already be gone; joining reports the real outcome.
        let _ = self.handle.send(Command::Shutdown).await;
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

enum RepositorySource {
    Memory,
    Directory(PathBuf),
    Custom(Box<dyn HighScoreRepository>),
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    repository: RepositorySource,
    seed: Option<u64>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            repository: RepositorySource::Memory,
            seed: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the game rules
    pub fn game_config(mut self, game_config: GameConfig) -> Self {
        self.config.game_config = game_config;
        self
    }

    /// Persist the high score through a caller-supplied repository
    pub fn repository(mut self, repository: impl HighScoreRepository + 'static) -> Self {
        self.repository = RepositorySource::Custom(Box::new(repository));
        self
    }

    /// Persist the high score as JSON under `dir`
    pub fn save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repository = RepositorySource::Directory(dir.into());
        self
    }

    /// Fix the spawn RNG seed (random when unset)
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the runtime
    ///
    /// Must be called from within a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let gateway = match self.repository {
            RepositorySource::Memory => HighScoreGateway::new(InMemoryHighScoreRepo::new()),
            RepositorySource::Directory(dir) => {
                HighScoreGateway::new(FileHighScoreRepository::new(dir)?)
            }
            RepositorySource::Custom(repository) => HighScoreGateway::new(repository),
        };

        let seed = self.seed.unwrap_or_else(rand::random);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let engine = GameEngine::new(
            self.config.game_config,
            TimerQueue::new(),
            gateway,
            event_bus.clone(),
            seed,
        )?;

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size.max(1));
        let handle = RuntimeHandle::new(command_tx, event_bus);

        let worker = GameWorker::new(engine, command_rx);
        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        tracing::info!(seed, "Runtime started");

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
