// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` holding the latest `UiSnapshot` pushed by the
// app orchestrator plus purely local concerns (active tab, focused roster
// slot). Keyboard input is translated into `UserCommand` messages; the
// screen re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;

use crate::protocol::{RosterSlotView, UiSnapshot, UiUpdate, UserCommand};
use crate::roster::Slot;

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Which surface fills the main panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Predict,
    Team,
}

impl Tab {
    pub fn toggled(self) -> Tab {
        match self {
            Tab::Predict => Tab::Team,
            Tab::Team => Tab::Predict,
        }
    }
}

/// TUI-local state read by `render_frame`.
///
/// The snapshot is replaced wholesale on every update from the app
/// orchestrator; tab and focus are local and survive snapshot replacement.
pub struct ViewState {
    /// Latest full read model from the app orchestrator.
    pub snapshot: UiSnapshot,
    /// Which tab is showing.
    pub active_tab: Tab,
    /// The roster slot holding keyboard focus on the Team tab.
    pub focused: Slot,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            snapshot: UiSnapshot::default(),
            active_tab: Tab::Predict,
            focused: Slot::Catcher,
        }
    }
}

impl ViewState {
    /// Read model for one roster slot, if the snapshot carries it.
    pub fn roster_view(&self, slot: Slot) -> Option<&RosterSlotView> {
        self.snapshot.roster.iter().find(|entry| entry.slot == slot)
    }

    /// Current text of a roster slot's input ("" before the first snapshot).
    pub fn roster_text(&self, slot: Slot) -> &str {
        self.roster_view(slot)
            .map(|entry| entry.view.query_text.as_str())
            .unwrap_or("")
    }
}

/// Apply a single UiUpdate to the ViewState.
fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Snapshot(snapshot) => {
            state.snapshot = *snapshot;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the active tab.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let chrome = build_layout(frame.area());

    widgets::status_bar::render_tab_bar(frame, chrome.tab_bar, state);
    match state.active_tab {
        Tab::Predict => {
            let predict = layout::build_predict_layout(chrome.main);
            widgets::search_panel::render(frame, &predict, state);
            widgets::prediction::render(frame, predict.prediction, state);
        }
        Tab::Team => {
            let team = layout::build_team_layout(chrome.main);
            widgets::roster_board::render(frame, &team, state);
        }
    }
    widgets::status_bar::render_help_bar(frame, chrome.help_bar, state);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// 1. Initializes the terminal (raw mode, alternate screen).
/// 2. Installs a panic hook to restore the terminal on crash.
/// 3. Runs an async select loop: UI updates, keyboard input, render ticks.
/// 4. Restores the terminal on clean exit.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    // Chain our restore in front of the original hook so a crash never
    // leaves the terminal in raw mode.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Channel closed: app is shutting down
                    None => break,
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quitting = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quitting {
                                break;
                            }
                        }
                    }
                    // Mouse, resize, focus events: nothing to do
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
