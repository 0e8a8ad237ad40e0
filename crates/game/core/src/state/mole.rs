//! Holes, moles and the fixed-length board that holds them.

use core::fmt;

use strum::VariantArray;

/// Stable identifier of a hole on the board, in `[0, number_of_holes)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoleId(pub u32);

impl HoleId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for HoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hole#{}", self.0)
    }
}

impl From<u32> for HoleId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Mole color. Cosmetic unless the round uses
/// [`ScoringRule::ColorBonus`](crate::ScoringRule::ColorBonus).
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::VariantArray,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MoleColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl MoleColor {
    /// Bonus multiplier applied under color scoring.
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Red => 5,
            Self::Blue => 3,
            Self::Green => 2,
            Self::Yellow => 1,
            Self::Purple => 10,
        }
    }

    /// Maps an arbitrary index onto a color (used with a uniform draw).
    pub fn from_index(index: usize) -> Self {
        Self::VARIANTS[index % Self::VARIANTS.len()]
    }

    pub const fn count() -> usize {
        Self::VARIANTS.len()
    }
}

/// Occupant slot of a single hole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mole {
    pub hole: HoleId,
    pub visible: bool,
    pub color: MoleColor,
}

impl Mole {
    pub const fn hidden(hole: HoleId) -> Self {
        Self {
            hole,
            visible: false,
            color: MoleColor::Red,
        }
    }
}

/// Board of moles ordered by hole id.
///
/// The length is fixed at construction and never changes; hiding a mole
/// flips its flag instead of removing the entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoleContainer {
    moles: Vec<Mole>,
}

impl MoleContainer {
    /// Creates `holes` hidden moles.
    pub fn new(holes: u32) -> Self {
        Self {
            moles: (0..holes).map(|id| Mole::hidden(HoleId(id))).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.moles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moles.is_empty()
    }

    pub fn contains(&self, hole: HoleId) -> bool {
        hole.index() < self.moles.len()
    }

    pub fn get(&self, hole: HoleId) -> Option<&Mole> {
        self.moles.get(hole.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mole> {
        self.moles.iter()
    }

    pub fn as_slice(&self) -> &[Mole] {
        &self.moles
    }

    pub fn is_visible(&self, hole: HoleId) -> bool {
        self.get(hole).is_some_and(|mole| mole.visible)
    }

    /// Raises a mole. Returns false if the hole is unknown or already occupied.
    pub fn show(&mut self, hole: HoleId, color: MoleColor) -> bool {
        match self.moles.get_mut(hole.index()) {
            Some(mole) if !mole.visible => {
                mole.visible = true;
                mole.color = color;
                true
            }
            _ => false,
        }
    }

    /// Hides a mole. Returns true if it was visible.
    pub fn hide(&mut self, hole: HoleId) -> bool {
        match self.moles.get_mut(hole.index()) {
            Some(mole) if mole.visible => {
                mole.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Returns every slot to an empty, hidden mole.
    pub fn clear(&mut self) {
        for mole in &mut self.moles {
            *mole = Mole::hidden(mole.hole);
        }
    }

    /// Hides every mole, returning how many were visible.
    pub fn hide_all(&mut self) -> usize {
        let mut hidden = 0;
        for mole in &mut self.moles {
            if mole.visible {
                mole.visible = false;
                hidden += 1;
            }
        }
        hidden
    }

    /// Holes that currently have no visible mole, in id order.
    pub fn free_holes(&self) -> Vec<HoleId> {
        self.moles
            .iter()
            .filter(|mole| !mole.visible)
            .map(|mole| mole.hole)
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.moles.iter().filter(|mole| mole.visible).count()
    }
}
