use bitflags::bitflags;

use super::RoundState;

bitflags! {
    /// Tracks which observable fields of a [`RoundState`] changed during a transition.
    ///
    /// Renderers subscribe per field, so the runtime only notifies the
    /// observers whose bit is set.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct RoundFields: u8 {
        const SCORE          = 1 << 0;
        const MISSES         = 1 << 1;
        const REMAINING_TIME = 1 << 2;
        const PHASE          = 1 << 3;
        const MOLES          = 1 << 4;
        const HIGH_SCORE     = 1 << 5;
    }
}

impl RoundFields {
    /// Compares two states field by field.
    pub fn from_states(before: &RoundState, after: &RoundState) -> Self {
        let mut fields = Self::empty();
        fields.set(Self::SCORE, before.score != after.score);
        fields.set(Self::MISSES, before.misses != after.misses);
        fields.set(
            Self::REMAINING_TIME,
            before.remaining_time != after.remaining_time,
        );
        fields.set(Self::PHASE, before.phase != after.phase);
        fields.set(Self::MOLES, before.moles != after.moles);
        fields.set(Self::HIGH_SCORE, before.high_score != after.high_score);
        fields
    }
}
