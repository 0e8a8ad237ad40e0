//! Deterministic round rules and data types for the whack-a-mole game.
//!
//! `game-core` defines the canonical round state, configuration and rules and
//! exposes pure APIs that the runtime drives from its scheduler. All state
//! mutation flows through [`engine::RoundEngine`]; randomness comes from a
//! seeded [`RoundRng`] so rounds can be replayed.
pub mod config;
pub mod engine;
pub mod error;
pub mod rng;
pub mod state;

pub use config::{ConfigError, GameConfig, MissPolicy, ScoringRule};
pub use engine::{
    CommandError, CommandKind, EndReason, HitOutcome, RoundEngine, RoundSummary, SpawnedMole,
    TickOutcome,
};
pub use error::{ErrorSeverity, GameError};
pub use rng::RoundRng;
pub use state::{HoleId, Mole, MoleColor, MoleContainer, Phase, RoundFields, RoundState};
