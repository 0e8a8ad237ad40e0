//! Round rules: lifecycle, hit/miss resolution, spawn selection and scoring.
//!
//! The [`RoundEngine`] is the authoritative reducer for [`RoundState`]. It
//! knows nothing about time or scheduling: the runtime decides *when* a tick,
//! spawn attempt or expiry happens, the engine decides *what* it does to the
//! state. Every command validates first and mutates second, so a rejected
//! command leaves the state untouched.

mod errors;
mod outcome;

pub use errors::{CommandError, CommandKind};
pub use outcome::{EndReason, HitOutcome, RoundSummary, SpawnedMole, TickOutcome};

use crate::config::{GameConfig, ScoringRule};
use crate::rng::RoundRng;
use crate::state::{HoleId, MoleColor, Phase, RoundState};

/// Applies round commands to a borrowed [`RoundState`].
pub struct RoundEngine<'a> {
    state: &'a mut RoundState,
    config: &'a GameConfig,
}

impl<'a> RoundEngine<'a> {
    pub fn new(state: &'a mut RoundState, config: &'a GameConfig) -> Self {
        Self { state, config }
    }

    /// `Idle | Ended -> Active`. Clears the transient fields and keeps the high score.
    pub fn start(&mut self) -> Result<(), CommandError> {
        self.require_not(CommandKind::Start, Phase::Active)?;

        self.state.score = 0;
        self.state.misses = 0;
        self.state.remaining_time = self.config.round_duration_secs;
        self.state.moles.clear();
        self.state.phase = Phase::Active;
        Ok(())
    }

    /// Resolves a click on `hole` as a hit or a miss.
    ///
    /// Argument validation precedes phase validation.
    pub fn hit(&mut self, hole: HoleId) -> Result<HitOutcome, CommandError> {
        self.require_hole(hole)?;
        self.require(CommandKind::HitHole, Phase::Active)?;

        if let Some(mole) = self.state.moles.get(hole).copied()
            && mole.visible
        {
            self.state.moles.hide(hole);
            let points = self.points_for(mole.color);
            self.state.score = self.state.score.saturating_add(points);
            return Ok(HitOutcome::Hit {
                hole,
                color: mole.color,
                points,
            });
        }

        self.state.misses = self.state.misses.saturating_add(1);
        let misses = self.state.misses;
        let ended = self
            .config
            .miss_policy
            .is_exhausted(misses, self.config.max_misses)
            .then(|| self.finish(EndReason::TooManyMisses));

        Ok(HitOutcome::Miss {
            hole,
            misses,
            ended,
        })
    }

    /// One second of the round timer. Ends the round when time runs out.
    pub fn tick(&mut self) -> Result<TickOutcome, CommandError> {
        self.require(CommandKind::Tick, Phase::Active)?;

        self.state.remaining_time = self.state.remaining_time.saturating_sub(1);
        let ended = (self.state.remaining_time == 0).then(|| self.finish(EndReason::TimeUp));

        Ok(TickOutcome {
            remaining_time: self.state.remaining_time,
            ended,
        })
    }

    /// Raises a mole in a uniformly chosen free hole.
    ///
    /// Returns `Ok(None)` when every hole is occupied; the caller simply
    /// tries again later.
    pub fn spawn(&mut self, rng: &mut RoundRng) -> Result<Option<SpawnedMole>, CommandError> {
        self.require(CommandKind::Spawn, Phase::Active)?;

        let free = self.state.moles.free_holes();
        if free.is_empty() {
            return Ok(None);
        }

        let hole = free[rng.index(free.len())];
        let color = MoleColor::from_index(rng.index(MoleColor::count()));
        self.state.moles.show(hole, color);

        Ok(Some(SpawnedMole { hole, color }))
    }

    /// Hides the mole in `hole` after its visible duration. Returns false if
    /// the hole was already empty.
    pub fn expire(&mut self, hole: HoleId) -> Result<bool, CommandError> {
        self.require_hole(hole)?;
        self.require(CommandKind::Expire, Phase::Active)?;
        Ok(self.state.moles.hide(hole))
    }

    /// Returns to `Idle` from any phase, keeping only the high score.
    ///
    /// Resetting an active round abandons it without touching the high score.
    pub fn reset(&mut self) -> Phase {
        let previous = self.state.phase;
        self.state.score = 0;
        self.state.misses = 0;
        self.state.remaining_time = 0;
        self.state.moles.clear();
        self.state.phase = Phase::Idle;
        previous
    }

    /// Zeroes the high score in any phase. The running score is untouched.
    pub fn clear_high_score(&mut self) {
        self.state.high_score = 0;
    }

    /// Uniform delay before the next spawn attempt.
    pub fn next_spawn_delay_ms(&self, rng: &mut RoundRng) -> u64 {
        rng.range_u64(
            self.config.min_spawn_interval_ms,
            self.config.max_spawn_interval_ms,
        )
    }

    /// Points a hit on a mole of `color` is worth under the configured rule.
    pub fn points_for(&self, color: MoleColor) -> u32 {
        match self.config.scoring {
            ScoringRule::Flat => self.config.points_per_hit,
            ScoringRule::ColorBonus => self.config.points_per_hit.saturating_mul(color.multiplier()),
        }
    }

    /// Entry into `Ended`: clear the board and re-evaluate the high score once.
    fn finish(&mut self, reason: EndReason) -> RoundSummary {
        let previous_high_score = self.state.high_score;
        self.state.phase = Phase::Ended;
        self.state.moles.hide_all();
        self.state.high_score = previous_high_score.max(self.state.score);

        RoundSummary {
            reason,
            final_score: self.state.score,
            misses: self.state.misses,
            high_score: self.state.high_score,
            previous_high_score,
        }
    }

    fn require(&self, command: CommandKind, phase: Phase) -> Result<(), CommandError> {
        if self.state.phase != phase {
            return Err(CommandError::invalid_phase(command, self.state.phase));
        }
        Ok(())
    }

    fn require_not(&self, command: CommandKind, phase: Phase) -> Result<(), CommandError> {
        if self.state.phase == phase {
            return Err(CommandError::invalid_phase(command, self.state.phase));
        }
        Ok(())
    }

    fn require_hole(&self, hole: HoleId) -> Result<(), CommandError> {
        if !self.state.moles.contains(hole) {
            return Err(CommandError::HoleOutOfRange {
                hole,
                holes: self.config.number_of_holes,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MissPolicy;

    fn scenario_config() -> GameConfig {
        GameConfig::new()
            .with_round_duration_secs(30)
            .with_number_of_holes(9)
            .with_max_misses(3)
            .with_spawn_interval_ms(500, 2_000)
            .with_mole_visible_duration_ms(1_500)
            .with_points_per_hit(1)
    }

    fn active_state(config: &GameConfig, high_score: u32) -> RoundState {
        let mut state = RoundState::new(config.number_of_holes, high_score);
        RoundEngine::new(&mut state, config).start().unwrap();
        state
    }

    #[test]
    fn start_initializes_round() {
        let config = scenario_config();
        let state = active_state(&config, 5);

        assert_eq!(state.phase, Phase::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, 0);
        assert_eq!(state.remaining_time, 30);
        assert_eq!(state.moles.len(), 9);
        assert_eq!(state.moles.visible_count(), 0);
        assert_eq!(state.high_score, 5);
    }

    #[test]
    fn start_while_active_is_rejected_without_mutation() {
        let config = scenario_config();
        let mut state = active_state(&config, 0);
        state.score = 4;
        let before = state.clone();

        let err = RoundEngine::new(&mut state, &config).start().unwrap_err();
        assert!(err.is_invalid_state());
        assert_eq!(state, before);
    }

    #[test]
    fn hit_visible_mole_scores_and_hides() {
        let config = scenario_config();
        let mut state = active_state(&config, 0);
        state.moles.show(HoleId(4), MoleColor::Blue);

        let outcome = RoundEngine::new(&mut state, &config)
            .hit(HoleId(4))
            .unwrap();

        assert!(outcome.is_hit());
        assert_eq!(state.score, 1);
        assert_eq!(state.misses, 0);
        assert!(!state.moles.is_visible(HoleId(4)));
    }

    #[test]
    fn rehit_of_hidden_hole_is_a_miss() {
        let config = scenario_config();
        let mut state = active_state(&config, 0);
        state.moles.show(HoleId(4), MoleColor::Red);

        let mut engine = RoundEngine::new(&mut state, &config);
        engine.hit(HoleId(4)).unwrap();
        let outcome = engine.hit(HoleId(4)).unwrap();

        assert!(!outcome.is_hit());
        assert_eq!(state.score, 1);
        assert_eq!(state.misses, 1);
    }

    #[test]
    fn out_of_range_hole_is_invalid_argument() {
        let config = scenario_config();
        let mut state = active_state(&config, 0);
        let before = state.clone();

        let err = RoundEngine::new(&mut state, &config)
            .hit(HoleId(99))
            .unwrap_err();

        assert!(err.is_invalid_argument());
        assert_eq!(
            err,
            CommandError::HoleOutOfRange {
                hole: HoleId(99),
                holes: 9
            }
        );
        assert_eq!(state, before);
    }

    #[test]
    fn hit_while_idle_is_invalid_phase() {
        let config = scenario_config();
        let mut state = RoundState::new(9, 0);

        let err = RoundEngine::new(&mut state, &config)
            .hit(HoleId(0))
            .unwrap_err();

        assert_eq!(
            err,
            CommandError::InvalidPhase {
                command: CommandKind::HitHole,
                phase: Phase::Idle
            }
        );
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn third_miss_ends_round_at_limit() {
        let config = scenario_config();
        let mut state = active_state(&config, 0);
        state.score = 2;

        let mut engine = RoundEngine::new(&mut state, &config);
        assert!(engine.hit(HoleId(0)).unwrap().ended().is_none());
        assert!(engine.hit(HoleId(1)).unwrap().ended().is_none());
        let outcome = engine.hit(HoleId(2)).unwrap();

        let summary = outcome.ended().copied().expect("third miss ends the round");
        assert_eq!(summary.reason, EndReason::TooManyMisses);
        assert_eq!(summary.final_score, 2);
        assert!(summary.is_new_record());
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.high_score, 2);
    }

    #[test]
    fn beyond_limit_policy_allows_one_more_miss() {
        let config = scenario_config().with_miss_policy(MissPolicy::BeyondLimit);
        let mut state = active_state(&config, 0);

        let mut engine = RoundEngine::new(&mut state, &config);
        for hole in 0..3 {
            assert!(engine.hit(HoleId(hole)).unwrap().ended().is_none());
        }
        assert!(engine.hit(HoleId(3)).unwrap().ended().is_some());
    }

    #[test]
    fn timeout_updates_high_score() {
        let config = scenario_config().with_round_duration_secs(2);
        let mut state = active_state(&config, 10);
        state.score = 12;

        let mut engine = RoundEngine::new(&mut state, &config);
        let first = engine.tick().unwrap();
        assert_eq!(first.remaining_time, 1);
        assert!(first.ended.is_none());

        let second = engine.tick().unwrap();
        let summary = second.ended.expect("time is up");
        assert_eq!(summary.reason, EndReason::TimeUp);
        assert_eq!(summary.previous_high_score, 10);
        assert_eq!(summary.high_score, 12);
        assert_eq!(state.high_score, 12);
        assert_eq!(state.remaining_time, 0);
    }

    #[test]
    fn lower_score_keeps_existing_high_score() {
        let config = scenario_config().with_round_duration_secs(1);
        let mut state = active_state(&config, 10);
        state.score = 3;

        let summary = RoundEngine::new(&mut state, &config)
            .tick()
            .unwrap()
            .ended
            .unwrap();
        assert!(!summary.is_new_record());
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn tick_after_end_is_rejected() {
        let config = scenario_config().with_round_duration_secs(1);
        let mut state = active_state(&config, 0);
        let mut engine = RoundEngine::new(&mut state, &config);
        engine.tick().unwrap();

        assert!(engine.tick().unwrap_err().is_invalid_state());
        assert_eq!(state.remaining_time, 0);
    }

    #[test]
    fn spawn_only_picks_free_holes() {
        let config = scenario_config().with_number_of_holes(3);
        let mut state = active_state(&config, 0);
        let mut rng = RoundRng::new(11);

        let mut engine = RoundEngine::new(&mut state, &config);
        let mut seen = Vec::new();
        for _ in 0..3 {
            let mole = engine.spawn(&mut rng).unwrap().expect("a hole is free");
            assert!(!seen.contains(&mole.hole));
            seen.push(mole.hole);
        }
        assert_eq!(engine.spawn(&mut rng).unwrap(), None);
        assert_eq!(state.moles.visible_count(), 3);
    }

    #[test]
    fn single_hole_board_spawns_into_that_hole() {
        let config = scenario_config().with_number_of_holes(1);
        let mut state = active_state(&config, 0);
        let mut rng = RoundRng::new(5);

        let mut engine = RoundEngine::new(&mut state, &config);
        let mole = engine.spawn(&mut rng).unwrap().unwrap();
        assert_eq!(mole.hole, HoleId(0));
        assert!(engine.expire(HoleId(0)).unwrap());
        assert!(!engine.expire(HoleId(0)).unwrap());
    }

    #[test]
    fn color_bonus_multiplies_points() {
        let config = scenario_config()
            .with_points_per_hit(2)
            .with_scoring(ScoringRule::ColorBonus);
        let mut state = active_state(&config, 0);
        state.moles.show(HoleId(1), MoleColor::Purple);

        RoundEngine::new(&mut state, &config).hit(HoleId(1)).unwrap();
        assert_eq!(state.score, 20);
    }

    #[test]
    fn reset_keeps_high_score_only() {
        let config = scenario_config();
        let mut state = active_state(&config, 7);
        state.score = 3;
        state.moles.show(HoleId(2), MoleColor::Yellow);

        let previous = RoundEngine::new(&mut state, &config).reset();
        assert_eq!(previous, Phase::Active);
        assert_eq!(state, RoundState::new(9, 7));
    }

    #[test]
    fn clear_high_score_leaves_running_score() {
        let config = scenario_config();
        let mut state = active_state(&config, 9);
        state.score = 4;

        RoundEngine::new(&mut state, &config).clear_high_score();
        assert_eq!(state.high_score, 0);
        assert_eq!(state.score, 4);
        assert_eq!(state.phase, Phase::Active);
    }
}
