// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// orchestrator, or into local ViewState mutations (tab switching, roster
// focus movement). Text editing is reconstructed here: the full new input
// value is sent on every keystroke, never a delta.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Tab, ViewState};
use crate::protocol::{SlotAction, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press should be forwarded to
/// the app orchestrator. Returns `None` when the key press was handled
/// locally by mutating `ViewState` (tab switch, focus movement) or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress; ignoring
    // non-Press events prevents double-processing.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    // Ctrl+C always quits immediately regardless of tab (escape hatch)
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    // Ctrl+B toggles between Predict and Team. A plain letter cannot be
    // used: both tabs are live text inputs.
    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('b')
    {
        view_state.active_tab = view_state.active_tab.toggled();
        return None;
    }

    match view_state.active_tab {
        Tab::Predict => handle_predict_tab(key_event, view_state),
        Tab::Team => handle_team_tab(key_event, view_state),
    }
}

/// Predict tab: a single search box plus the prediction report.
fn handle_predict_tab(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let action = match key_event.code {
        KeyCode::Enter => SlotAction::Submit,
        KeyCode::Esc => SlotAction::Close,
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            SlotAction::Clear
        }
        _ => {
            let current = view_state.snapshot.search.query_text.as_str();
            SlotAction::TextChanged(edited_text(current, key_event)?)
        }
    };
    Some(UserCommand::Search(action))
}

/// Team tab: 14 roster inputs with a movable focus.
fn handle_team_tab(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    let slot = view_state.focused;
    let action = match key_event.code {
        // Focus movement; the newly focused slot re-opens its panel (the
        // store gates re-opening on its query floor).
        KeyCode::Tab | KeyCode::Down => {
            view_state.focused = slot.next();
            return Some(UserCommand::Roster(view_state.focused, SlotAction::Activate));
        }
        KeyCode::BackTab | KeyCode::Up => {
            view_state.focused = slot.prev();
            return Some(UserCommand::Roster(view_state.focused, SlotAction::Activate));
        }
        KeyCode::Enter => SlotAction::Submit,
        KeyCode::Esc => SlotAction::Close,
        KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            SlotAction::Clear
        }
        _ => {
            let current = view_state.roster_text(slot);
            SlotAction::TextChanged(edited_text(current, key_event)?)
        }
    };
    Some(UserCommand::Roster(slot, action))
}

/// Apply a printable or Backspace keystroke to `current`, returning the
/// full new value. `None` for keys that do not edit text, and for a
/// Backspace that changes nothing.
fn edited_text(current: &str, key_event: KeyEvent) -> Option<String> {
    match key_event.code {
        KeyCode::Char(c)
            if key_event
                .modifiers
                .difference(KeyModifiers::SHIFT)
                .is_empty() =>
        {
            let mut text = current.to_owned();
            text.push(c);
            Some(text)
        }
        KeyCode::Backspace => {
            if current.is_empty() {
                return None;
            }
            let mut text = current.to_owned();
            text.pop();
            Some(text)
        }
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{RosterSlotView, UiSnapshot};
    use crate::roster::{Slot, ALL};
    use crate::search::store::SlotView;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn state_with_search_text(text: &str) -> ViewState {
        let mut state = ViewState::default();
        state.snapshot.search.query_text = text.to_owned();
        state
    }

    fn team_state() -> ViewState {
        let mut snapshot = UiSnapshot::default();
        snapshot.roster = ALL
            .iter()
            .map(|&slot| RosterSlotView {
                slot,
                view: SlotView::default(),
            })
            .collect();
        let mut state = ViewState {
            snapshot,
            ..ViewState::default()
        };
        state.active_tab = Tab::Team;
        state
    }

    #[test]
    fn ctrl_c_quits_from_any_tab() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(ctrl('c'), &mut state), Some(UserCommand::Quit));
        state.active_tab = Tab::Team;
        assert_eq!(handle_key(ctrl('c'), &mut state), Some(UserCommand::Quit));
    }

    #[test]
    fn ctrl_b_toggles_tab_locally() {
        let mut state = ViewState::default();
        assert_eq!(handle_key(ctrl('b'), &mut state), None);
        assert_eq!(state.active_tab, Tab::Team);
        assert_eq!(handle_key(ctrl('b'), &mut state), None);
        assert_eq!(state.active_tab, Tab::Predict);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = press(KeyCode::Char('a'));
        event.kind = KeyEventKind::Release;
        assert_eq!(handle_key(event, &mut state), None);
    }

    #[test]
    fn typing_appends_to_search_text() {
        let mut state = state_with_search_text("Lindo");
        assert_eq!(
            handle_key(press(KeyCode::Char('r')), &mut state),
            Some(UserCommand::Search(SlotAction::TextChanged(
                "Lindor".into()
            )))
        );
    }

    #[test]
    fn backspace_removes_last_char() {
        let mut state = state_with_search_text("Fr");
        assert_eq!(
            handle_key(press(KeyCode::Backspace), &mut state),
            Some(UserCommand::Search(SlotAction::TextChanged("F".into())))
        );
    }

    #[test]
    fn backspace_on_empty_does_nothing() {
        let mut state = state_with_search_text("");
        assert_eq!(handle_key(press(KeyCode::Backspace), &mut state), None);
    }

    #[test]
    fn enter_escape_and_ctrl_u_map_to_actions() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut state),
            Some(UserCommand::Search(SlotAction::Submit))
        );
        assert_eq!(
            handle_key(press(KeyCode::Esc), &mut state),
            Some(UserCommand::Search(SlotAction::Close))
        );
        assert_eq!(
            handle_key(ctrl('u'), &mut state),
            Some(UserCommand::Search(SlotAction::Clear))
        );
    }

    #[test]
    fn ctrl_modified_letters_do_not_type() {
        let mut state = state_with_search_text("ab");
        assert_eq!(handle_key(ctrl('x'), &mut state), None);
        assert_eq!(state.snapshot.search.query_text, "ab");
    }

    #[test]
    fn tab_key_advances_roster_focus_and_activates() {
        let mut state = team_state();
        assert_eq!(state.focused, Slot::Catcher);
        assert_eq!(
            handle_key(press(KeyCode::Tab), &mut state),
            Some(UserCommand::Roster(Slot::FirstBase, SlotAction::Activate))
        );
        assert_eq!(state.focused, Slot::FirstBase);
    }

    #[test]
    fn back_tab_wraps_to_last_rotation_slot() {
        let mut state = team_state();
        assert_eq!(
            handle_key(press(KeyCode::BackTab), &mut state),
            Some(UserCommand::Roster(Slot::Starter5, SlotAction::Activate))
        );
        assert_eq!(state.focused, Slot::Starter5);
    }

    #[test]
    fn typing_targets_the_focused_slot() {
        let mut state = team_state();
        state.focused = Slot::ShortStop;
        assert_eq!(
            handle_key(press(KeyCode::Char('L')), &mut state),
            Some(UserCommand::Roster(
                Slot::ShortStop,
                SlotAction::TextChanged("L".into())
            ))
        );
    }

    #[test]
    fn enter_submits_the_focused_slot() {
        let mut state = team_state();
        state.focused = Slot::Starter2;
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut state),
            Some(UserCommand::Roster(Slot::Starter2, SlotAction::Submit))
        );
    }
}
