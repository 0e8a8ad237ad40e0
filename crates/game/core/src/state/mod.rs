//! Authoritative round state representation.
//!
//! Runtime layers clone or query this state but mutate it exclusively
//! through [`RoundEngine`](crate::engine::RoundEngine).
mod delta;
mod mole;

pub use delta::RoundFields;
pub use mole::{HoleId, Mole, MoleColor, MoleContainer};

/// Lifecycle phase of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// No round in progress; only `high_score` is meaningful.
    #[default]
    Idle,
    Active,
    /// Terminal for the round; final score and high score are readable.
    Ended,
}

/// Canonical snapshot of a round.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    pub score: u32,
    pub misses: u32,
    /// Seconds left in the round.
    pub remaining_time: u32,
    pub phase: Phase,
    pub moles: MoleContainer,
    /// Best final score seen so far. The only field carried across rounds.
    pub high_score: u32,
}

impl RoundState {
    /// Creates an idle state with an empty board.
    pub fn new(holes: u32, high_score: u32) -> Self {
        Self {
            score: 0,
            misses: 0,
            remaining_time: 0,
            phase: Phase::Idle,
            moles: MoleContainer::new(holes),
            high_score,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::Ended
    }
}
