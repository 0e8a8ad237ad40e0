//! Topic-based event bus for round observables.
//!
//! Every observable slice of the round (score, misses, remaining time, moles,
//! phase, high score) is published on its own topic, so a renderer redraws
//! only what changed. Gameplay happenings go to [`Topic::Round`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::RoundEvent;
