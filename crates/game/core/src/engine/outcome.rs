//! Results reported by [`RoundEngine`](super::RoundEngine) commands.

use crate::state::{HoleId, MoleColor};

/// Why a round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EndReason {
    TimeUp,
    TooManyMisses,
}

/// Final numbers of a round, produced exactly once on entry to `Ended`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSummary {
    pub reason: EndReason,
    pub final_score: u32,
    pub misses: u32,
    /// High score after re-evaluation.
    pub high_score: u32,
    pub previous_high_score: u32,
}

impl RoundSummary {
    /// True when this round raised the high score.
    pub fn is_new_record(&self) -> bool {
        self.high_score > self.previous_high_score
    }
}

/// Result of `hit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HitOutcome {
    Hit {
        hole: HoleId,
        color: MoleColor,
        points: u32,
    },
    Miss {
        hole: HoleId,
        misses: u32,
        /// Present when this miss exhausted the miss budget.
        ended: Option<RoundSummary>,
    },
}

impl HitOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    pub fn ended(&self) -> Option<&RoundSummary> {
        match self {
            Self::Hit { .. } => None,
            Self::Miss { ended, .. } => ended.as_ref(),
        }
    }
}

/// Result of one round-timer tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickOutcome {
    pub remaining_time: u32,
    pub ended: Option<RoundSummary>,
}

/// A mole raised by a spawn attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnedMole {
    pub hole: HoleId,
    pub color: MoleColor,
}
