// Roster positions and team completion.
//
// The Build-a-Team surface has exactly 14 slots: the nine field positions
// (defense plus DH) and a five-man starting rotation. Each slot is an
// independent search-and-select input; this module only names the slots
// and derives completion over them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::search::store::SlotStore;

/// One of the 14 roster positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Catcher,
    FirstBase,
    SecondBase,
    ShortStop,
    ThirdBase,
    LeftField,
    CenterField,
    RightField,
    DesignatedHitter,
    Starter1,
    Starter2,
    Starter3,
    Starter4,
    Starter5,
}

/// The nine field positions, in display order.
pub const FIELD: [Slot; 9] = [
    Slot::Catcher,
    Slot::FirstBase,
    Slot::SecondBase,
    Slot::ShortStop,
    Slot::ThirdBase,
    Slot::LeftField,
    Slot::CenterField,
    Slot::RightField,
    Slot::DesignatedHitter,
];

/// The five rotation slots, in display order.
pub const ROTATION: [Slot; 5] = [
    Slot::Starter1,
    Slot::Starter2,
    Slot::Starter3,
    Slot::Starter4,
    Slot::Starter5,
];

/// All 14 slots: field first, then rotation.
pub const ALL: [Slot; 14] = [
    Slot::Catcher,
    Slot::FirstBase,
    Slot::SecondBase,
    Slot::ShortStop,
    Slot::ThirdBase,
    Slot::LeftField,
    Slot::CenterField,
    Slot::RightField,
    Slot::DesignatedHitter,
    Slot::Starter1,
    Slot::Starter2,
    Slot::Starter3,
    Slot::Starter4,
    Slot::Starter5,
];

impl Slot {
    /// Short position code, e.g. "SS" or "SP3".
    pub fn code(&self) -> &'static str {
        match self {
            Slot::Catcher => "C",
            Slot::FirstBase => "1B",
            Slot::SecondBase => "2B",
            Slot::ShortStop => "SS",
            Slot::ThirdBase => "3B",
            Slot::LeftField => "LF",
            Slot::CenterField => "CF",
            Slot::RightField => "RF",
            Slot::DesignatedHitter => "DH",
            Slot::Starter1 => "SP1",
            Slot::Starter2 => "SP2",
            Slot::Starter3 => "SP3",
            Slot::Starter4 => "SP4",
            Slot::Starter5 => "SP5",
        }
    }

    /// Full position name for display.
    pub fn title(&self) -> &'static str {
        match self {
            Slot::Catcher => "Catcher",
            Slot::FirstBase => "First Base",
            Slot::SecondBase => "Second Base",
            Slot::ShortStop => "Shortstop",
            Slot::ThirdBase => "Third Base",
            Slot::LeftField => "Left Field",
            Slot::CenterField => "Center Field",
            Slot::RightField => "Right Field",
            Slot::DesignatedHitter => "Designated Hitter",
            Slot::Starter1 => "Starter 1",
            Slot::Starter2 => "Starter 2",
            Slot::Starter3 => "Starter 3",
            Slot::Starter4 => "Starter 4",
            Slot::Starter5 => "Starter 5",
        }
    }

    /// Parse a position code back into a slot.
    pub fn from_code(s: &str) -> Option<Self> {
        ALL.iter()
            .copied()
            .find(|slot| slot.code().eq_ignore_ascii_case(s))
    }

    /// Whether this slot belongs to the starting rotation.
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            Slot::Starter1 | Slot::Starter2 | Slot::Starter3 | Slot::Starter4 | Slot::Starter5
        )
    }

    /// The slot after this one in display order, wrapping around.
    pub fn next(&self) -> Slot {
        let idx = ALL.iter().position(|s| s == self).unwrap_or(0);
        ALL[(idx + 1) % ALL.len()]
    }

    /// The slot before this one in display order, wrapping around.
    pub fn prev(&self) -> Slot {
        let idx = ALL.iter().position(|s| s == self).unwrap_or(0);
        ALL[(idx + ALL.len() - 1) % ALL.len()]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Completion Evaluator: true iff every one of the 14 slots holds a
/// resolved selection. Pure derivation; recomputed on every snapshot.
pub fn team_complete(store: &SlotStore<Slot>) -> bool {
    ALL.iter().all(|slot| store.selection(*slot).is_some())
}
