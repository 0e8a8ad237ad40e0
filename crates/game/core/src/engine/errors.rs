//! Error types for round commands.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{HoleId, Phase};

/// Identifies which round command was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum CommandKind {
    Start,
    HitHole,
    Tick,
    Spawn,
    Expire,
}

/// Errors surfaced while applying a command to the round.
///
/// Every variant is raised before any mutation, so a rejected command
/// leaves the state untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandError {
    #[error("{hole} is out of range for a board of {holes} holes")]
    HoleOutOfRange { hole: HoleId, holes: u32 },

    #[error("{command} is not valid while the round is {phase}")]
    InvalidPhase { command: CommandKind, phase: Phase },
}

impl CommandError {
    pub(crate) fn invalid_phase(command: CommandKind, phase: Phase) -> Self {
        Self::InvalidPhase { command, phase }
    }

    /// True for the invalid-argument category (bad hole id).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::HoleOutOfRange { .. })
    }

    /// True for the invalid-state category (wrong phase).
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidPhase { .. })
    }
}

impl GameError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HoleOutOfRange { .. } => ErrorSeverity::Validation,
            Self::InvalidPhase { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::HoleOutOfRange { .. } => "COMMAND_HOLE_OUT_OF_RANGE",
            Self::InvalidPhase { .. } => "COMMAND_INVALID_PHASE",
        }
    }
}
