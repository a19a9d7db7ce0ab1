// Integration tests for the scouting assistant.
//
// These tests exercise the full orchestrator end-to-end through the library
// crate's public API: keystroke commands in, UI snapshots out, with a
// scripted backend standing in for the prediction service. Timers run under
// paused tokio time, so quiet periods elapse instantly and deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use scout_assistant::api::{ApiError, PlayerApi};
use scout_assistant::app::{self, EMPTY_NAME_ERROR};
use scout_assistant::config::Config;
use scout_assistant::protocol::*;
use scout_assistant::roster::{Slot, ALL};

// ===========================================================================
// Test helpers
// ===========================================================================

fn lindor() -> Candidate {
    Candidate {
        id: "lindofr01".into(),
        display_name: "Francisco Lindor".into(),
    }
}

fn trout() -> Candidate {
    Candidate {
        id: "troutmi01".into(),
        display_name: "Mike Trout".into(),
    }
}

fn dist(mean: f64) -> StatDistribution {
    StatDistribution {
        mean,
        p10: mean - 0.04,
        p25: mean - 0.02,
        p50: mean,
        p75: mean + 0.02,
        p90: mean + 0.04,
    }
}

fn prediction_for(name: &str) -> Prediction {
    Prediction {
        name: name.to_owned(),
        player_id: Some("lindofr01".into()),
        upcoming_year: 2026,
        condition_used: ConditionUsed {
            prev_year: 2025,
            prev_obp: 0.344,
            prev_slg: 0.500,
            prev_pa: 685,
            age_next: 32.0,
        },
        obp: dist(0.35),
        slg: dist(0.48),
        ops: dist(0.83),
    }
}

/// Scripted backend. Search answers from a fixed list, optionally after a
/// per-query artificial delay; predict succeeds or fails per configuration.
struct ScriptedApi {
    candidates: Vec<Candidate>,
    /// Delay applied to searches whose query matches the given string.
    slow_query: Option<(String, Duration)>,
    predict_error: Option<String>,
    search_calls: AtomicUsize,
    predict_calls: AtomicUsize,
}

impl ScriptedApi {
    fn new(candidates: Vec<Candidate>) -> Self {
        ScriptedApi {
            candidates,
            slow_query: None,
            predict_error: None,
            search_calls: AtomicUsize::new(0),
            predict_calls: AtomicUsize::new(0),
        }
    }

    fn with_slow_query(mut self, query: &str, delay: Duration) -> Self {
        self.slow_query = Some((query.to_owned(), delay));
        self
    }

    fn with_predict_error(mut self, message: &str) -> Self {
        self.predict_error = Some(message.to_owned());
        self
    }
}

#[async_trait]
impl PlayerApi for ScriptedApi {
    async fn search(&self, query: &str) -> Result<Vec<Candidate>, ApiError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some((slow, delay)) = &self.slow_query {
            if query == slow {
                tokio::time::sleep(*delay).await;
            }
        }
        Ok(self
            .candidates
            .iter()
            .filter(|c| {
                c.display_name
                    .to_lowercase()
                    .contains(&query.to_lowercase())
            })
            .cloned()
            .collect())
    }

    async fn predict(&self, name: &str) -> Result<Prediction, ApiError> {
        self.predict_calls.fetch_add(1, Ordering::SeqCst);
        match &self.predict_error {
            Some(message) => Err(ApiError::Rejected {
                message: message.clone(),
            }),
            None => Ok(prediction_for(name)),
        }
    }
}

struct Harness {
    cmd_tx: mpsc::Sender<UserCommand>,
    ui_rx: mpsc::Receiver<UiUpdate>,
    api: Arc<ScriptedApi>,
}

fn start(api: ScriptedApi) -> Harness {
    let api = Arc::new(api);
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ui_tx, ui_rx) = mpsc::channel(1024);
    tokio::spawn(app::run(
        Config::default(),
        Arc::clone(&api) as Arc<dyn PlayerApi>,
        cmd_rx,
        ui_tx,
    ));
    Harness { cmd_tx, ui_rx, api }
}

impl Harness {
    async fn search(&self, action: SlotAction) {
        self.cmd_tx
            .send(UserCommand::Search(action))
            .await
            .unwrap();
    }

    async fn roster(&self, slot: Slot, action: SlotAction) {
        self.cmd_tx
            .send(UserCommand::Roster(slot, action))
            .await
            .unwrap();
    }

    /// Type a string one keystroke at a time, with realistic inter-key gaps
    /// shorter than the quiet period.
    async fn type_search(&self, text: &str) {
        for end in 1..=text.len() {
            self.search(SlotAction::TextChanged(text[..end].to_owned()))
                .await;
            tokio::time::sleep(Duration::from_millis(40)).await;
        }
    }

    /// Drain queued snapshots, returning the most recent.
    async fn latest_snapshot(&mut self) -> UiSnapshot {
        let UiUpdate::Snapshot(first) = self.ui_rx.recv().await.unwrap();
        let mut latest = *first;
        loop {
            tokio::task::yield_now().await;
            match self.ui_rx.try_recv() {
                Ok(UiUpdate::Snapshot(snapshot)) => latest = *snapshot,
                Err(_) => return latest,
            }
        }
    }
}

/// Let pending timers fire and spawned tasks settle under paused time.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(200)).await;
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

// ===========================================================================
// Debounce behavior
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn one_search_per_burst_of_keystrokes() {
    let mut h = start(ScriptedApi::new(vec![lindor(), trout()]));

    h.type_search("Lindor").await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    assert_eq!(snapshot.search.query_text, "Lindor");
    assert!(snapshot.search.is_active);
    assert_eq!(snapshot.search.suggestions, vec![lindor()]);
    // Five qualifying prefixes were typed but only the last survived its
    // quiet period.
    assert_eq!(h.api.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn backspacing_below_floor_cancels_the_pending_search() {
    let mut h = start(ScriptedApi::new(vec![lindor()]));

    h.search(SlotAction::TextChanged("Fr".into())).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    h.search(SlotAction::TextChanged("F".into())).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    assert_eq!(snapshot.search.query_text, "F");
    assert!(!snapshot.search.is_active);
    assert!(snapshot.search.suggestions.is_empty());
    assert_eq!(h.api.search_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_never_overwrites_fresh_results() {
    // "Li" resolves slowly; by the time it lands, the user has typed
    // "Lindor" and its results are already showing.
    let api = ScriptedApi::new(vec![lindor()])
        .with_slow_query("Li", Duration::from_secs(2));
    let mut h = start(api);

    h.search(SlotAction::TextChanged("Li".into())).await;
    settle().await; // "Li" lookup is now in flight
    h.search(SlotAction::TextChanged("Lindor".into())).await;
    settle().await; // "Lindor" resolves

    let fresh = h.latest_snapshot().await;
    assert_eq!(fresh.search.suggestions, vec![lindor()]);

    // Let the slow lookup finish and deliver.
    tokio::time::sleep(Duration::from_secs(3)).await;
    settle().await;

    let after = h.latest_snapshot().await;
    assert_eq!(after.search.suggestions, vec![lindor()]);
    assert_eq!(after.search.query_text, "Lindor");
    assert_eq!(h.api.search_calls.load(Ordering::SeqCst), 2);
}

// ===========================================================================
// Predict flow
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn search_pick_predict_end_to_end() {
    let mut h = start(ScriptedApi::new(vec![lindor()]));

    h.type_search("Lindor").await;
    settle().await;
    h.search(SlotAction::Submit).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    // The pick resolved the text to the candidate's display name and
    // closed the panel.
    assert_eq!(snapshot.search.query_text, "Francisco Lindor");
    assert_eq!(snapshot.search.selection, Some(lindor()));
    assert!(!snapshot.search.is_active);
    // The prediction was requested with the resolved name.
    assert_eq!(snapshot.predict.status, PredictStatus::Ready);
    let prediction = snapshot.predict.prediction.unwrap();
    assert_eq!(prediction.name, "Francisco Lindor");
    assert_eq!(prediction.upcoming_year, 2026);
    assert_eq!(h.api.predict_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn raw_name_submits_without_suggestions() {
    let mut h = start(ScriptedApi::new(Vec::new()));

    h.search(SlotAction::TextChanged("Mike Trout".into())).await;
    settle().await;
    h.search(SlotAction::Submit).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    assert_eq!(snapshot.predict.status, PredictStatus::Ready);
    assert_eq!(snapshot.predict.prediction.unwrap().name, "Mike Trout");
}

#[tokio::test(start_paused = true)]
async fn empty_submission_is_rejected_locally() {
    let mut h = start(ScriptedApi::new(Vec::new()));

    h.search(SlotAction::TextChanged("   ".into())).await;
    h.search(SlotAction::Submit).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    assert_eq!(snapshot.predict.status, PredictStatus::Failed);
    assert_eq!(snapshot.predict.error.as_deref(), Some(EMPTY_NAME_ERROR));
    assert!(snapshot.predict.prediction.is_none());
    assert_eq!(h.api.predict_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn backend_error_message_shown_verbatim() {
    let api = ScriptedApi::new(Vec::new()).with_predict_error("Player not found");
    let mut h = start(api);

    h.search(SlotAction::TextChanged("Nobody Real".into())).await;
    h.search(SlotAction::Submit).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    assert_eq!(snapshot.predict.status, PredictStatus::Failed);
    assert_eq!(snapshot.predict.error.as_deref(), Some("Player not found"));
    assert!(snapshot.predict.prediction.is_none());
}

#[tokio::test(start_paused = true)]
async fn editing_clears_the_previous_outcome() {
    let mut h = start(ScriptedApi::new(vec![lindor()]));

    h.search(SlotAction::TextChanged("Francisco Lindor".into()))
        .await;
    h.search(SlotAction::Submit).await;
    settle().await;
    let ready = h.latest_snapshot().await;
    assert_eq!(ready.predict.status, PredictStatus::Ready);

    h.search(SlotAction::TextChanged("Francisco Lindo".into()))
        .await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    assert_eq!(snapshot.predict.status, PredictStatus::Idle);
    assert!(snapshot.predict.prediction.is_none());
    assert!(snapshot.predict.error.is_none());
}

// ===========================================================================
// Build a Team flow
// ===========================================================================

#[tokio::test(start_paused = true)]
async fn roster_slot_search_and_pick() {
    let mut h = start(ScriptedApi::new(vec![lindor()]));

    h.roster(Slot::ShortStop, SlotAction::TextChanged("Lindor".into()))
        .await;
    settle().await;
    h.roster(Slot::ShortStop, SlotAction::Submit).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    let shortstop = snapshot
        .roster
        .iter()
        .find(|entry| entry.slot == Slot::ShortStop)
        .unwrap();
    assert_eq!(shortstop.view.query_text, "Francisco Lindor");
    assert_eq!(shortstop.view.selection, Some(lindor()));
    assert!(!shortstop.view.is_active);
    // Roster picks never trigger predictions.
    assert_eq!(h.api.predict_calls.load(Ordering::SeqCst), 0);
    assert!(!snapshot.team_complete);
}

#[tokio::test(start_paused = true)]
async fn switching_slots_closes_the_previous_panel() {
    let mut h = start(ScriptedApi::new(vec![lindor()]));

    h.roster(Slot::ShortStop, SlotAction::TextChanged("Lindor".into()))
        .await;
    settle().await;
    h.roster(Slot::Catcher, SlotAction::Activate).await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    for entry in &snapshot.roster {
        assert!(
            entry.view.suggestions.is_empty(),
            "{:?} still shows suggestions",
            entry.slot
        );
    }
}

#[tokio::test(start_paused = true)]
async fn team_completes_when_all_fourteen_slots_are_filled() {
    let mut h = start(ScriptedApi::new(vec![lindor()]));

    for (i, &slot) in ALL.iter().enumerate() {
        let before = h.latest_snapshot().await;
        assert!(!before.team_complete, "complete after only {i} picks");

        h.roster(slot, SlotAction::TextChanged("Lindor".into()))
            .await;
        settle().await;
        h.roster(slot, SlotAction::Submit).await;
        settle().await;
    }

    let snapshot = h.latest_snapshot().await;
    assert!(snapshot.team_complete);

    // Clearing any slot drops the team back to incomplete.
    h.roster(Slot::Starter4, SlotAction::Clear).await;
    settle().await;
    let snapshot = h.latest_snapshot().await;
    assert!(!snapshot.team_complete);
}

#[tokio::test(start_paused = true)]
async fn predict_and_roster_surfaces_are_independent() {
    let mut h = start(ScriptedApi::new(vec![lindor(), trout()]));

    h.search(SlotAction::TextChanged("Trout".into())).await;
    h.roster(Slot::CenterField, SlotAction::TextChanged("Lindor".into()))
        .await;
    settle().await;

    let snapshot = h.latest_snapshot().await;
    // Each surface keeps its own text and its own suggestion panel.
    assert_eq!(snapshot.search.query_text, "Trout");
    assert_eq!(snapshot.search.suggestions, vec![trout()]);
    let center = snapshot
        .roster
        .iter()
        .find(|entry| entry.slot == Slot::CenterField)
        .unwrap();
    assert_eq!(center.view.query_text, "Lindor");
    assert_eq!(center.view.suggestions, vec![lindor()]);
}
