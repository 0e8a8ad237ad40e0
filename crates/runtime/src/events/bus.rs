//! Topic-based event bus implementation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use game_core::{MoleContainer, Phase, RoundFields, RoundState};

use super::types::RoundEvent;

/// Topics for event routing. Each observable slice of the round has its own.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    Score,
    Misses,
    RemainingTime,
    Moles,
    Phase,
    HighScore,
    /// Lifecycle and gameplay happenings (start, hit, miss, spawn, end).
    Round,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::Score,
        Topic::Misses,
        Topic::RemainingTime,
        Topic::Moles,
        Topic::Phase,
        Topic::HighScore,
        Topic::Round,
    ];

    const fn index(self) -> usize {
        match self {
            Topic::Score => 0,
            Topic::Misses => 1,
            Topic::RemainingTime => 2,
            Topic::Moles => 3,
            Topic::Phase => 4,
            Topic::HighScore => 5,
            Topic::Round => 6,
        }
    }
}

/// Event wrapper that carries the new value of one observable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Score(u32),
    Misses(u32),
    RemainingTime(u32),
    Moles(MoleContainer),
    Phase(Phase),
    HighScore(u32),
    Round(RoundEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Score(_) => Topic::Score,
            Event::Misses(_) => Topic::Misses,
            Event::RemainingTime(_) => Topic::RemainingTime,
            Event::Moles(_) => Topic::Moles,
            Event::Phase(_) => Topic::Phase,
            Event::HighScore(_) => Topic::HighScore,
            Event::Round(_) => Topic::Round,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Publishing never blocks; events sent while a
/// topic has no subscribers are dropped.
pub struct EventBus {
    channels: Arc<[broadcast::Sender<Event>; 7]>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Topic::ALL.map(|_| broadcast::channel(capacity).0)),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels[topic.index()].send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Publishes one event per field flagged in `fields`, carrying its value in `state`.
    pub fn publish_changes(&self, fields: RoundFields, state: &RoundState) {
        if fields.contains(RoundFields::SCORE) {
            self.publish(Event::Score(state.score));
        }
        if fields.contains(RoundFields::MISSES) {
            self.publish(Event::Misses(state.misses));
        }
        if fields.contains(RoundFields::REMAINING_TIME) {
            self.publish(Event::RemainingTime(state.remaining_time));
        }
        if fields.contains(RoundFields::MOLES) {
            self.publish(Event::Moles(state.moles.clone()));
        }
        if fields.contains(RoundFields::PHASE) {
            self.publish(Event::Phase(state.phase));
        }
        if fields.contains(RoundFields::HIGH_SCORE) {
            self.publish(Event::HighScore(state.high_score));
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels[topic.index()].subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let mut score_rx = bus.subscribe(Topic::Score);
        let mut misses_rx = bus.subscribe(Topic::Misses);

        bus.publish(Event::Score(3));

        assert_eq!(score_rx.try_recv().unwrap(), Event::Score(3));
        assert!(matches!(misses_rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[test]
    fn publish_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::HighScore(1));
    }

    #[test]
    fn publish_changes_follows_mask() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe_multiple(&[Topic::Score, Topic::Phase, Topic::Moles]);
        let state = RoundState::new(4, 0);

        bus.publish_changes(RoundFields::SCORE | RoundFields::PHASE, &state);

        assert_eq!(rx[0].1.try_recv().unwrap(), Event::Score(0));
        assert_eq!(rx[1].1.try_recv().unwrap(), Event::Phase(Phase::Idle));
        assert!(rx[2].1.try_recv().is_err());
    }

    #[test]
    fn clones_share_channels() {
        let bus = EventBus::new();
        let clone = bus.clone();
        let mut rx = bus.subscribe(Topic::HighScore);

        clone.publish(Event::HighScore(8));
        assert_eq!(rx.try_recv().unwrap(), Event::HighScore(8));
    }
}
