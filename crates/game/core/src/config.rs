//! Round configuration and its validation rules.

use crate::error::{ErrorSeverity, GameError};

/// How the miss limit is compared against the running miss count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum MissPolicy {
    /// The round ends as soon as `misses >= max_misses`.
    #[default]
    AtLimit,
    /// The round ends once `misses > max_misses`.
    BeyondLimit,
}

impl MissPolicy {
    /// Returns true when `misses` has reached the end condition for `max_misses`.
    pub const fn is_exhausted(self, misses: u32, max_misses: u32) -> bool {
        match self {
            Self::AtLimit => misses >= max_misses,
            Self::BeyondLimit => misses > max_misses,
        }
    }
}

/// Points awarded for a hit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ScoringRule {
    /// Every mole is worth `points_per_hit`; color is cosmetic.
    #[default]
    Flat,
    /// `points_per_hit` is multiplied by the mole color's bonus multiplier.
    ColorBonus,
}

/// Immutable per-engine round configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Length of a round in seconds.
    pub round_duration_secs: u32,
    /// Number of holes on the board.
    pub number_of_holes: u32,
    /// Miss budget, interpreted through [`MissPolicy`].
    pub max_misses: u32,
    /// Lower bound (inclusive) of the delay between spawn attempts.
    pub min_spawn_interval_ms: u64,
    /// Upper bound (inclusive) of the delay between spawn attempts.
    pub max_spawn_interval_ms: u64,
    /// How long a spawned mole stays up before it expires.
    pub mole_visible_duration_ms: u64,
    /// Base points for a hit.
    pub points_per_hit: u32,
    pub miss_policy: MissPolicy,
    pub scoring: ScoringRule,
}

impl GameConfig {
    // ===== defaults =====
    pub const DEFAULT_ROUND_DURATION_SECS: u32 = 30;
    pub const DEFAULT_NUMBER_OF_HOLES: u32 = 9;
    pub const DEFAULT_MAX_MISSES: u32 = 3;
    pub const DEFAULT_MIN_SPAWN_INTERVAL_MS: u64 = 500;
    pub const DEFAULT_MAX_SPAWN_INTERVAL_MS: u64 = 2_000;
    pub const DEFAULT_MOLE_VISIBLE_DURATION_MS: u64 = 1_500;
    pub const DEFAULT_POINTS_PER_HIT: u32 = 1;

    /// Period of the round timer.
    pub const TICK_INTERVAL_MS: u64 = 1_000;

    pub fn new() -> Self {
        Self {
            round_duration_secs: Self::DEFAULT_ROUND_DURATION_SECS,
            number_of_holes: Self::DEFAULT_NUMBER_OF_HOLES,
            max_misses: Self::DEFAULT_MAX_MISSES,
            min_spawn_interval_ms: Self::DEFAULT_MIN_SPAWN_INTERVAL_MS,
            max_spawn_interval_ms: Self::DEFAULT_MAX_SPAWN_INTERVAL_MS,
            mole_visible_duration_ms: Self::DEFAULT_MOLE_VISIBLE_DURATION_MS,
            points_per_hit: Self::DEFAULT_POINTS_PER_HIT,
            miss_policy: MissPolicy::default(),
            scoring: ScoringRule::default(),
        }
    }

    #[must_use]
    pub const fn with_round_duration_secs(mut self, secs: u32) -> Self {
        self.round_duration_secs = secs;
        self
    }

    #[must_use]
    pub const fn with_number_of_holes(mut self, holes: u32) -> Self {
        self.number_of_holes = holes;
        self
    }

    #[must_use]
    pub const fn with_max_misses(mut self, max_misses: u32) -> Self {
        self.max_misses = max_misses;
        self
    }

    #[must_use]
    pub const fn with_spawn_interval_ms(mut self, min: u64, max: u64) -> Self {
        self.min_spawn_interval_ms = min;
        self.max_spawn_interval_ms = max;
        self
    }

    #[must_use]
    pub const fn with_mole_visible_duration_ms(mut self, duration: u64) -> Self {
        self.mole_visible_duration_ms = duration;
        self
    }

    #[must_use]
    pub const fn with_points_per_hit(mut self, points: u32) -> Self {
        self.points_per_hit = points;
        self
    }

    #[must_use]
    pub const fn with_miss_policy(mut self, policy: MissPolicy) -> Self {
        self.miss_policy = policy;
        self
    }

    #[must_use]
    pub const fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.scoring = scoring;
        self
    }

    /// Rejects configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.round_duration_secs == 0 {
            return Err(ConfigError::ZeroRoundDuration);
        }
        if self.number_of_holes == 0 {
            return Err(ConfigError::NoHoles);
        }
        if self.min_spawn_interval_ms > self.max_spawn_interval_ms {
            return Err(ConfigError::SpawnIntervalInverted {
                min: self.min_spawn_interval_ms,
                max: self.max_spawn_interval_ms,
            });
        }
        if self.max_spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.mole_visible_duration_ms == 0 {
            return Err(ConfigError::ZeroVisibleDuration);
        }
        if self.points_per_hit == 0 {
            return Err(ConfigError::ZeroPointsPerHit);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Malformed configuration, rejected before any engine is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConfigError {
    #[error("round duration must be at least one second")]
    ZeroRoundDuration,

    #[error("board must have at least one hole")]
    NoHoles,

    #[error("spawn interval is inverted: min {min}ms > max {max}ms")]
    SpawnIntervalInverted { min: u64, max: u64 },

    #[error("spawn interval upper bound must be positive")]
    ZeroSpawnInterval,

    #[error("mole visible duration must be positive")]
    ZeroVisibleDuration,

    #[error("points per hit must be positive")]
    ZeroPointsPerHit,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroRoundDuration => "CONFIG_ZERO_ROUND_DURATION",
            Self::NoHoles => "CONFIG_NO_HOLES",
            Self::SpawnIntervalInverted { .. } => "CONFIG_SPAWN_INTERVAL_INVERTED",
            Self::ZeroSpawnInterval => "CONFIG_ZERO_SPAWN_INTERVAL",
            Self::ZeroVisibleDuration => "CONFIG_ZERO_VISIBLE_DURATION",
            Self::ZeroPointsPerHit => "CONFIG_ZERO_POINTS_PER_HIT",
        }
    }
}
