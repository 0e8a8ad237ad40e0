//! Behavioral shell around the round rules.
//!
//! [`GameEngine`] owns the authoritative [`RoundState`] and everything with a
//! side effect: the scheduler handles for the round timer and the spawn/expire
//! chain, the high-score gateway, and the event bus. State transitions are
//! delegated to [`RoundEngine`]; this type decides when they happen and who
//! hears about them.

use game_core::{
    CommandError, ConfigError, GameConfig, HitOutcome, HoleId, Phase, RoundEngine, RoundFields,
    RoundRng, RoundState, RoundSummary,
};
use tokio::sync::broadcast;
use tracing::{debug, info, trace};

use crate::events::{Event, EventBus, RoundEvent, Topic};
use crate::repository::HighScoreGateway;
use crate::scheduler::{CancelToken, FiredTask, Scheduler, Task, TimerQueue};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ExpirySlot {
    token: CancelToken,
    spawn: u64,
}

/// Cancellation handles for everything the current round has scheduled.
#[derive(Debug, Default)]
struct RoundTimers {
    round: Option<CancelToken>,
    spawn: Option<CancelToken>,
    /// Indexed by hole id.
    expiries: Vec<Option<ExpirySlot>>,
    spawn_seq: u64,
}

impl RoundTimers {
    fn new(holes: u32) -> Self {
        Self {
            expiries: vec![None; holes as usize],
            ..Self::default()
        }
    }

    fn take_expiry(&mut self, hole: HoleId) -> Option<ExpirySlot> {
        self.expiries.get_mut(hole.index()).and_then(Option::take)
    }

    fn cancel_all<S: Scheduler>(&mut self, scheduler: &mut S) -> usize {
        let tokens: Vec<CancelToken> = self
            .round
            .take()
            .into_iter()
            .chain(self.spawn.take())
            .chain(
                self.expiries
                    .iter_mut()
                    .filter_map(|slot| slot.take().map(|slot| slot.token)),
            )
            .collect();

        for &token in &tokens {
            scheduler.cancel(token);
        }
        tokens.len()
    }
}

/// Single-threaded whack-a-mole engine driven by an injected [`Scheduler`].
///
/// Host commands (`start`, `hit_hole`, `reset`, `clear_high_score`) and
/// scheduled callbacks ([`GameEngine::fire`]) must arrive on the same logical
/// timeline. Each mutation is followed by one event per changed observable.
pub struct GameEngine<S: Scheduler> {
    config: GameConfig,
    state: RoundState,
    rng: RoundRng,
    scheduler: S,
    gateway: HighScoreGateway,
    events: EventBus,
    timers: RoundTimers,
}

impl<S: Scheduler> GameEngine<S> {
    /// Validates `config` and loads the persisted high score.
    pub fn new(
        config: GameConfig,
        scheduler: S,
        gateway: HighScoreGateway,
        events: EventBus,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let high_score = gateway.load();
        let state = RoundState::new(config.number_of_holes, high_score);
        let timers = RoundTimers::new(config.number_of_holes);

        debug!(
            holes = config.number_of_holes,
            high_score, seed, "Game engine initialized"
        );

        Ok(Self {
            config,
            state,
            rng: RoundRng::new(seed),
            scheduler,
            gateway,
            events,
            timers,
        })
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Begins a round: resets the transient fields, arms the 1 s round timer
    /// and the first spawn attempt.
    pub fn start(&mut self) -> Result<(), CommandError> {
        let before = self.state.clone();
        RoundEngine::new(&mut self.state, &self.config).start()?;

        self.timers.cancel_all(&mut self.scheduler);
        self.timers.round = Some(
            self.scheduler
                .schedule_repeating(GameConfig::TICK_INTERVAL_MS, Task::RoundTick),
        );
        self.schedule_next_spawn();

        info!(
            duration_secs = self.config.round_duration_secs,
            holes = self.config.number_of_holes,
            "Round started"
        );

        self.publish_since(&before);
        self.events.publish(Event::Round(RoundEvent::Started {
            duration_secs: self.config.round_duration_secs,
            holes: self.config.number_of_holes,
        }));
        Ok(())
    }

    /// Resolves a click on `hole`.
    pub fn hit_hole(&mut self, hole: HoleId) -> Result<HitOutcome, CommandError> {
        let before = self.state.clone();
        let outcome = RoundEngine::new(&mut self.state, &self.config).hit(hole)?;

        match outcome {
            HitOutcome::Hit { color, points, .. } => {
                if let Some(slot) = self.timers.take_expiry(hole) {
                    self.scheduler.cancel(slot.token);
                }
                debug!(%hole, %color, points, score = self.state.score, "Hit");
                self.publish_since(&before);
                self.events.publish(Event::Round(RoundEvent::Hit {
                    hole,
                    color,
                    points,
                }));
            }
            HitOutcome::Miss { misses, ended, .. } => {
                debug!(%hole, misses, "Miss");
                self.publish_since(&before);
                self.events
                    .publish(Event::Round(RoundEvent::Miss { hole, misses }));
                if let Some(summary) = ended {
                    self.conclude(summary);
                }
            }
        }

        Ok(outcome)
    }

    /// Returns to `Idle`, cancelling everything the round scheduled.
    ///
    /// Returns the phase the engine was in. Resetting an active round
    /// abandons it without re-evaluating the high score.
    pub fn reset(&mut self) -> Phase {
        let before = self.state.clone();
        let cancelled = self.timers.cancel_all(&mut self.scheduler);
        let previous = RoundEngine::new(&mut self.state, &self.config).reset();

        info!(%previous, cancelled, "Round reset");

        self.publish_since(&before);
        self.events.publish(Event::Round(RoundEvent::Reset));
        previous
    }

    /// Zeroes and persists the high score. Valid in any phase.
    pub fn clear_high_score(&mut self) {
        let before = self.state.clone();
        RoundEngine::new(&mut self.state, &self.config).clear_high_score();
        self.gateway.save(0);

        info!("High score cleared");

        self.publish_since(&before);
        self.events
            .publish(Event::Round(RoundEvent::HighScoreCleared));
    }

    /// Delivers a scheduled callback.
    ///
    /// Callbacks whose token is no longer held by the engine, that arrive
    /// outside `Active`, or that refer to an older spawn are ignored. Returns
    /// whether the task was applied.
    pub fn fire(&mut self, token: CancelToken, task: Task) -> bool {
        if !self.state.is_active() {
            trace!(?task, phase = %self.state.phase, "Ignoring callback outside active round");
            return false;
        }

        match task {
            Task::RoundTick => self.on_tick(token),
            Task::SpawnAttempt => self.on_spawn_attempt(token),
            Task::Expire { hole, spawn } => self.on_expire(token, hole, spawn),
        }
    }

    fn on_tick(&mut self, token: CancelToken) -> bool {
        if self.timers.round != Some(token) {
            trace!(?token, "Stale round tick");
            return false;
        }

        let before = self.state.clone();
        let Ok(outcome) = RoundEngine::new(&mut self.state, &self.config).tick() else {
            return false;
        };

        self.publish_since(&before);
        if let Some(summary) = outcome.ended {
            self.conclude(summary);
        }
        true
    }

    /// Spawn attempts form a single chain: every attempt, spawned or skipped,
    /// schedules the next one. Expiry only hides its mole.
    fn on_spawn_attempt(&mut self, token: CancelToken) -> bool {
        if self.timers.spawn != Some(token) {
            trace!(?token, "Stale spawn attempt");
            return false;
        }
        self.timers.spawn = None;

        let before = self.state.clone();
        let Ok(spawned) = RoundEngine::new(&mut self.state, &self.config).spawn(&mut self.rng)
        else {
            return false;
        };

        match spawned {
            Some(mole) => {
                self.timers.spawn_seq += 1;
                let spawn = self.timers.spawn_seq;
                let token = self.scheduler.schedule_once(
                    self.config.mole_visible_duration_ms,
                    Task::Expire {
                        hole: mole.hole,
                        spawn,
                    },
                );
                if let Some(slot) = self.timers.expiries.get_mut(mole.hole.index()) {
                    *slot = Some(ExpirySlot { token, spawn });
                }

                debug!(hole = %mole.hole, color = %mole.color, spawn, "Mole spawned");
                self.publish_since(&before);
                self.events.publish(Event::Round(RoundEvent::MoleSpawned {
                    hole: mole.hole,
                    color: mole.color,
                }));
            }
            None => debug!("Spawn skipped, every hole is occupied"),
        }

        self.schedule_next_spawn();
        true
    }

    fn on_expire(&mut self, token: CancelToken, hole: HoleId, spawn: u64) -> bool {
        let expected = ExpirySlot { token, spawn };
        if self.timers.expiries.get(hole.index()).copied().flatten() != Some(expected) {
            trace!(%hole, spawn, "Stale expiry");
            return false;
        }
        self.timers.take_expiry(hole);

        let before = self.state.clone();
        let Ok(hidden) = RoundEngine::new(&mut self.state, &self.config).expire(hole) else {
            return false;
        };

        if hidden {
            debug!(%hole, spawn, "Mole expired");
            self.publish_since(&before);
            self.events
                .publish(Event::Round(RoundEvent::MoleExpired { hole }));
        }
        true
    }

    fn schedule_next_spawn(&mut self) {
        let delay = RoundEngine::new(&mut self.state, &self.config).next_spawn_delay_ms(&mut self.rng);
        self.timers.spawn = Some(self.scheduler.schedule_once(delay, Task::SpawnAttempt));
        trace!(delay_ms = delay, "Next spawn attempt scheduled");
    }

    /// Entry into `Ended`: stop all scheduled work, persist a new record and
    /// announce the result.
    fn conclude(&mut self, summary: RoundSummary) {
        let cancelled = self.timers.cancel_all(&mut self.scheduler);

        if summary.is_new_record() {
            self.gateway.save(summary.high_score);
        }

        info!(
            reason = %summary.reason,
            final_score = summary.final_score,
            high_score = summary.high_score,
            cancelled,
            "Round ended"
        );

        self.events.publish(Event::Round(summary.into()));
    }

    fn publish_since(&self, before: &RoundState) {
        let fields = RoundFields::from_states(before, &self.state);
        if !fields.is_empty() {
            self.events.publish_changes(fields, &self.state);
        }
    }
}

impl GameEngine<TimerQueue> {
    /// Moves the virtual clock forward by `ms`, firing everything that falls due.
    pub fn advance(&mut self, ms: u64) -> usize {
        let target = self.scheduler.now_ms().saturating_add(ms);
        self.advance_to(target)
    }

    /// Fires every task due at or before `to_ms` in order and returns how
    /// many were applied.
    pub fn advance_to(&mut self, to_ms: u64) -> usize {
        let mut applied = 0;
        while let Some(FiredTask { token, task, .. }) = self.scheduler.pop_due(to_ms) {
            if self.fire(token, task) {
                applied += 1;
            }
        }
        self.scheduler.advance_clock(to_ms);
        applied
    }

    /// Virtual time of the next pending callback.
    pub fn next_deadline(&self) -> Option<u64> {
        self.scheduler.next_deadline()
    }
}
