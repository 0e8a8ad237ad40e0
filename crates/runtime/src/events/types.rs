//! Payloads published on the [`Topic::Round`](super::Topic::Round) topic.

use game_core::{EndReason, HoleId, MoleColor, RoundSummary};
use serde::{Deserialize, Serialize};

/// Gameplay and lifecycle happenings, in the order the engine applied them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A new round began.
    Started { duration_secs: u32, holes: u32 },

    /// A mole appeared.
    MoleSpawned { hole: HoleId, color: MoleColor },

    /// A mole went down on its own.
    MoleExpired { hole: HoleId },

    /// A click landed on a visible mole.
    Hit {
        hole: HoleId,
        color: MoleColor,
        points: u32,
    },

    /// A click landed on an empty hole.
    Miss { hole: HoleId, misses: u32 },

    /// Terminal notification of a round.
    Ended {
        reason: EndReason,
        final_score: u32,
        high_score: u32,
        new_record: bool,
    },

    /// The engine returned to idle.
    Reset,

    /// The high score was zeroed.
    HighScoreCleared,
}

impl From<RoundSummary> for RoundEvent {
    fn from(summary: RoundSummary) -> Self {
        RoundEvent::Ended {
            reason: summary.reason,
            final_score: summary.final_score,
            high_score: summary.high_score,
            new_record: summary.is_new_record(),
        }
    }
}
