// Application orchestrator.
//
// Owns the two slot stores (the single Predict search box and the 14-slot
// roster), their debounce timers, and the prediction lifecycle. Runs a
// single event loop multiplexing TUI commands, due search timers, lookup
// results, and prediction outcomes, and pushes a fresh `UiSnapshot` to the
// render loop after every state change.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::PlayerApi;
use crate::config::Config;
use crate::protocol::{
    PredictStatus, PredictView, PredictionEvent, RosterSlotView, SlotAction, UiSnapshot, UiUpdate,
    UserCommand,
};
use crate::roster::{self, Slot};
use crate::search::debounce::Debouncer;
use crate::search::resolver::spawn_lookup;
use crate::search::store::{SlotStore, TextChange};
use crate::search::SearchEvent;

/// Shown when Enter is pressed on an empty search box. Never hits the
/// network.
pub const EMPTY_NAME_ERROR: &str = "Please enter a player name";

/// Key for the Predict tab's single search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchSlot;

struct App {
    api: Arc<dyn PlayerApi>,
    max_suggestions: usize,

    search: SlotStore<SearchSlot>,
    roster: SlotStore<Slot>,
    search_debounce: Debouncer<SearchSlot>,
    roster_debounce: Debouncer<Slot>,
    search_tx: mpsc::Sender<SearchEvent<SearchSlot>>,
    roster_tx: mpsc::Sender<SearchEvent<Slot>>,

    predict: PredictView,
    /// Bumped on every submission; outcomes tagged with an older value are
    /// discarded.
    predict_generation: u64,
    predict_tx: mpsc::Sender<PredictionEvent>,

    ui_tx: mpsc::Sender<UiUpdate>,
}

/// Run the orchestrator until the TUI sends `Quit` or hangs up.
pub async fn run(
    config: Config,
    api: Arc<dyn PlayerApi>,
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
) {
    let (search_tx, mut search_rx) = mpsc::channel(64);
    let (roster_tx, mut roster_rx) = mpsc::channel(64);
    let (predict_tx, mut predict_rx) = mpsc::channel(16);

    let mut app = App {
        api,
        max_suggestions: config.search.max_suggestions,
        search: SlotStore::new(config.search.min_query_len),
        roster: SlotStore::new(config.search.min_query_len),
        search_debounce: Debouncer::new(config.quiet_period(), search_tx.clone()),
        roster_debounce: Debouncer::new(config.quiet_period(), roster_tx.clone()),
        search_tx,
        roster_tx,
        predict: PredictView::default(),
        predict_generation: 0,
        predict_tx,
        ui_tx,
    };

    // Initial paint so the TUI has something to draw before the first
    // keystroke.
    app.publish().await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) | None => break,
                    Some(UserCommand::Search(action)) => app.handle_search_action(action),
                    Some(UserCommand::Roster(slot, action)) => {
                        app.handle_roster_action(slot, action)
                    }
                }
                app.publish().await;
            }
            Some(event) = search_rx.recv() => {
                app.handle_search_event(event);
                app.publish().await;
            }
            Some(event) = roster_rx.recv() => {
                app.handle_roster_event(event);
                app.publish().await;
            }
            Some(event) = predict_rx.recv() => {
                app.handle_prediction_event(event);
                app.publish().await;
            }
        }
    }

    app.search_debounce.cancel_all();
    app.roster_debounce.cancel_all();
    info!("app loop stopped");
}

impl App {
    // -- Predict tab --------------------------------------------------------

    fn handle_search_action(&mut self, action: SlotAction) {
        match action {
            SlotAction::TextChanged(text) => {
                // Any edit invalidates the previous prediction and its error.
                self.reset_prediction();
                match self.search.on_text_changed(SearchSlot, &text) {
                    TextChange::Schedule { query, generation } => {
                        self.search_debounce.schedule(SearchSlot, query, generation);
                    }
                    TextChange::Cancel => self.search_debounce.cancel(SearchSlot),
                }
            }
            SlotAction::Activate => self.search.activate(SearchSlot),
            SlotAction::Pick(index) => {
                self.search_debounce.cancel(SearchSlot);
                if let Some(candidate) = self.search.pick_suggestion(SearchSlot, index) {
                    self.submit_prediction(candidate.display_name);
                }
            }
            SlotAction::Clear => {
                self.search_debounce.cancel(SearchSlot);
                self.search.clear(SearchSlot);
                self.reset_prediction();
            }
            SlotAction::Close => self.search.deactivate(),
            SlotAction::Submit => {
                self.search_debounce.cancel(SearchSlot);
                if self.search.is_active(SearchSlot) && !self.search.suggestions().is_empty() {
                    // Enter with an open panel commits the top suggestion.
                    if let Some(candidate) = self.search.pick_suggestion(SearchSlot, 0) {
                        self.submit_prediction(candidate.display_name);
                    }
                    return;
                }
                let name = self.search.query_text(SearchSlot).trim().to_owned();
                if name.is_empty() {
                    self.predict = PredictView {
                        status: PredictStatus::Failed,
                        prediction: None,
                        error: Some(EMPTY_NAME_ERROR.to_owned()),
                    };
                    return;
                }
                self.search.deactivate();
                self.submit_prediction(name);
            }
        }
    }

    fn submit_prediction(&mut self, name: String) {
        self.predict_generation += 1;
        let generation = self.predict_generation;
        self.predict = PredictView {
            status: PredictStatus::Loading,
            prediction: None,
            error: None,
        };
        info!(%name, generation, "requesting prediction");

        let api = Arc::clone(&self.api);
        let tx = self.predict_tx.clone();
        tokio::spawn(async move {
            let event = match api.predict(&name).await {
                Ok(prediction) => PredictionEvent::Ready {
                    generation,
                    prediction: Box::new(prediction),
                },
                Err(e) => PredictionEvent::Failed {
                    generation,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(event).await;
        });
    }

    fn handle_prediction_event(&mut self, event: PredictionEvent) {
        let generation = match &event {
            PredictionEvent::Ready { generation, .. } => *generation,
            PredictionEvent::Failed { generation, .. } => *generation,
        };
        if generation != self.predict_generation {
            debug!(
                generation,
                current = self.predict_generation,
                "discarding stale prediction outcome"
            );
            return;
        }
        match event {
            PredictionEvent::Ready { prediction, .. } => {
                self.predict = PredictView {
                    status: PredictStatus::Ready,
                    prediction: Some(*prediction),
                    error: None,
                };
            }
            PredictionEvent::Failed { message, .. } => {
                self.predict = PredictView {
                    status: PredictStatus::Failed,
                    prediction: None,
                    error: Some(message),
                };
            }
        }
    }

    fn reset_prediction(&mut self) {
        // Invalidate any in-flight request as well; its outcome will arrive
        // tagged with an older generation and be dropped.
        self.predict_generation += 1;
        self.predict = PredictView::default();
    }

    // -- Build a Team tab ---------------------------------------------------

    fn handle_roster_action(&mut self, slot: Slot, action: SlotAction) {
        match action {
            SlotAction::TextChanged(text) => match self.roster.on_text_changed(slot, &text) {
                TextChange::Schedule { query, generation } => {
                    self.roster_debounce.schedule(slot, query, generation);
                }
                TextChange::Cancel => self.roster_debounce.cancel(slot),
            },
            SlotAction::Activate => {
                // Focus moved here: whatever panel was open belongs to some
                // other slot now, so close it before the gated re-open.
                if self.roster.active_slot() != Some(slot) {
                    self.roster.deactivate();
                }
                self.roster.activate(slot);
            }
            SlotAction::Pick(index) => {
                self.roster_debounce.cancel(slot);
                self.roster.pick_suggestion(slot, index);
            }
            SlotAction::Clear => {
                self.roster_debounce.cancel(slot);
                self.roster.clear(slot);
            }
            SlotAction::Close => self.roster.deactivate(),
            SlotAction::Submit => {
                // Enter commits the top suggestion; with no panel open it
                // does nothing.
                self.roster_debounce.cancel(slot);
                if self.roster.is_active(slot) && !self.roster.suggestions().is_empty() {
                    self.roster.pick_suggestion(slot, 0);
                }
            }
        }
    }

    // -- due timers and lookup results --------------------------------------

    fn handle_search_event(&mut self, event: SearchEvent<SearchSlot>) {
        match event {
            SearchEvent::QueryDue {
                key,
                query,
                generation,
            } => {
                if self.search.current_generation(key) != generation {
                    return;
                }
                spawn_lookup(
                    Arc::clone(&self.api),
                    key,
                    query,
                    generation,
                    self.search_tx.clone(),
                );
            }
            SearchEvent::Results {
                key,
                generation,
                mut candidates,
            } => {
                candidates.truncate(self.max_suggestions);
                self.search.apply_results(key, generation, candidates);
            }
        }
    }

    fn handle_roster_event(&mut self, event: SearchEvent<Slot>) {
        match event {
            SearchEvent::QueryDue {
                key,
                query,
                generation,
            } => {
                if self.roster.current_generation(key) != generation {
                    return;
                }
                spawn_lookup(
                    Arc::clone(&self.api),
                    key,
                    query,
                    generation,
                    self.roster_tx.clone(),
                );
            }
            SearchEvent::Results {
                key,
                generation,
                mut candidates,
            } => {
                candidates.truncate(self.max_suggestions);
                self.roster.apply_results(key, generation, candidates);
            }
        }
    }

    // -- read model ---------------------------------------------------------

    fn snapshot(&self) -> UiSnapshot {
        UiSnapshot {
            search: self.search.view(SearchSlot),
            predict: self.predict.clone(),
            roster: roster::ALL
                .iter()
                .map(|&slot| RosterSlotView {
                    slot,
                    view: self.roster.view(slot),
                })
                .collect(),
            team_complete: roster::team_complete(&self.roster),
        }
    }

    async fn publish(&self) {
        let _ = self
            .ui_tx
            .send(UiUpdate::Snapshot(Box::new(self.snapshot())))
            .await;
    }
}
