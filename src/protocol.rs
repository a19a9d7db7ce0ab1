// Shared message and read-model types crossing task boundaries.
//
// The TUI and the app orchestrator communicate exclusively through these
// types over mpsc channels: `UserCommand` flows TUI -> app, `UiUpdate`
// flows app -> TUI. The wire types (`Candidate`, `Prediction`) mirror the
// backend's JSON payloads.

use serde::{Deserialize, Serialize};

use crate::roster::Slot;
use crate::search::store::SlotView;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// A player returned by the search endpoint.
///
/// Produced only by `/api/players` responses; replaced wholesale on each
/// new result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    #[serde(rename = "playerID")]
    pub id: String,
    #[serde(rename = "fullName")]
    pub display_name: String,
}

/// Percentile summary for one projected metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDistribution {
    pub mean: f64,
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// The prior-season inputs the prediction endpoint conditioned on,
/// echoed back in its response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionUsed {
    pub prev_year: i32,
    #[serde(rename = "prev_OBP")]
    pub prev_obp: f64,
    #[serde(rename = "prev_SLG")]
    pub prev_slg: f64,
    #[serde(rename = "prev_PA")]
    pub prev_pa: u32,
    pub age_next: f64,
}

/// A successful `/api/predict` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub name: String,
    #[serde(rename = "playerID", default)]
    pub player_id: Option<String>,
    pub upcoming_year: i32,
    pub condition_used: ConditionUsed,
    #[serde(rename = "OBP")]
    pub obp: StatDistribution,
    #[serde(rename = "SLG")]
    pub slg: StatDistribution,
    #[serde(rename = "OPS")]
    pub ops: StatDistribution,
}

// ---------------------------------------------------------------------------
// Prediction state
// ---------------------------------------------------------------------------

/// Lifecycle of the prediction request on the single-search surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictStatus {
    /// No request made since the last edit.
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request succeeded.
    Ready,
    /// The last request was rejected or failed validation.
    Failed,
}

/// Result of a spawned prediction task, tagged with the generation that
/// was current when the task started. Stale generations are discarded.
#[derive(Debug, Clone)]
pub enum PredictionEvent {
    Ready {
        generation: u64,
        prediction: Box<Prediction>,
    },
    Failed {
        generation: u64,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// TUI -> app commands
// ---------------------------------------------------------------------------

/// Write actions a slot accepts from the rendering layer.
///
/// These actions are the slot's entire write surface; rendering never
/// mutates state directly. `Submit` is resolved by the app into a pick or
/// a raw submission depending on panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotAction {
    /// The user edited the slot's text; carries the full new value.
    TextChanged(String),
    /// The slot's input gained focus.
    Activate,
    /// Commit the suggestion at the given index in the open panel.
    Pick(usize),
    /// Reset the slot to empty.
    Clear,
    /// Close the suggestion panel (Escape).
    Close,
    /// Enter was pressed in the slot.
    Submit,
}

/// Commands sent from the TUI to the app orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Quit,
    /// Action on the single player-search slot (Predict tab).
    Search(SlotAction),
    /// Action on one of the 14 roster slots (Build a Team tab).
    Roster(Slot, SlotAction),
}

// ---------------------------------------------------------------------------
// App -> TUI updates
// ---------------------------------------------------------------------------

/// Read model for the prediction panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictView {
    pub status: PredictStatus,
    pub prediction: Option<Prediction>,
    pub error: Option<String>,
}

impl Default for PredictView {
    fn default() -> Self {
        PredictView {
            status: PredictStatus::Idle,
            prediction: None,
            error: None,
        }
    }
}

/// Read model for one roster slot, paired with its position.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterSlotView {
    pub slot: Slot,
    pub view: SlotView,
}

/// Full read model pushed to the TUI after every state change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiSnapshot {
    pub search: SlotView,
    pub predict: PredictView,
    /// All 14 roster slots in display order.
    pub roster: Vec<RosterSlotView>,
    pub team_complete: bool,
}

/// Updates pushed from the app orchestrator to the TUI render loop.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Snapshot(Box<UiSnapshot>),
}
