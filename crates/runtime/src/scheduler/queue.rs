//! Deterministic timer queue.
//!
//! [`TimerQueue`] keeps pending tasks ordered by due time (ties broken by
//! insertion order) against a virtual millisecond clock. Tests advance the
//! clock by hand; the async runtime advances it from wall time.

use std::collections::{BTreeMap, HashMap};

use super::{CancelToken, Scheduler, Task};

/// A task whose due time has been reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTask {
    pub token: CancelToken,
    pub task: Task,
    /// Virtual time at which the task fired.
    pub at_ms: u64,
}

#[derive(Clone, Debug)]
struct Entry {
    task: Task,
    key: (u64, u64),
    period_ms: Option<u64>,
}

/// Virtual-clock [`Scheduler`] implementation.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_token: u64,
    next_seq: u64,
    /// (due_ms, seq) -> token
    order: BTreeMap<(u64, u64), CancelToken>,
    entries: HashMap<CancelToken, Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of callbacks still pending.
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    pub fn is_pending(&self, token: CancelToken) -> bool {
        self.entries.contains_key(&token)
    }

    /// Pending tasks in firing order.
    pub fn pending_tasks(&self) -> Vec<Task> {
        self.order
            .values()
            .filter_map(|token| self.entries.get(token).map(|entry| entry.task))
            .collect()
    }

    /// Due time of the earliest pending task.
    pub fn next_deadline(&self) -> Option<u64> {
        self.order.keys().next().map(|(due, _)| *due)
    }

    /// Pops the earliest task due at or before `until_ms`, moving the clock
    /// to its due time. Repeating tasks are re-armed for their next period.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<FiredTask> {
        let (&key, &token) = self.order.iter().next()?;
        if key.0 > until_ms {
            return None;
        }
        self.order.remove(&key);

        let entry = self.entries.remove(&token)?;
        self.now_ms = self.now_ms.max(key.0);

        if let Some(period) = entry.period_ms {
            let next_key = self.next_key(key.0 + period);
            self.order.insert(next_key, token);
            self.entries.insert(
                token,
                Entry {
                    key: next_key,
                    ..entry
                },
            );
        }

        Some(FiredTask {
            token,
            task: entry.task,
            at_ms: key.0,
        })
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn advance_clock(&mut self, to_ms: u64) {
        self.now_ms = self.now_ms.max(to_ms);
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.order.clear();
        self.entries.clear();
    }

    fn insert(&mut self, delay_ms: u64, period_ms: Option<u64>, task: Task) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token += 1;

        let key = self.next_key(self.now_ms.saturating_add(delay_ms));
        self.order.insert(key, token);
        self.entries.insert(
            token,
            Entry {
                task,
                key,
                period_ms,
            },
        );
        token
    }

    fn next_key(&mut self, due_ms: u64) -> (u64, u64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        (due_ms, seq)
    }
}

impl Scheduler for TimerQueue {
    fn schedule_once(&mut self, delay_ms: u64, task: Task) -> CancelToken {
        self.insert(delay_ms, None, task)
    }

    fn schedule_repeating(&mut self, interval_ms: u64, task: Task) -> CancelToken {
        // A zero period would fire forever within one instant.
        let period = interval_ms.max(1);
        self.insert(period, Some(period), task)
    }

    fn cancel(&mut self, token: CancelToken) {
        if let Some(entry) = self.entries.remove(&token) {
            self.order.remove(&entry.key);
        }
    }
}
