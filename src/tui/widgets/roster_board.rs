// Roster board widget: the 14 Build-a-Team inputs.
//
// Field positions in the left column, the five-man rotation on the right.
// The focused slot is highlighted; the active slot's suggestion panel
// renders under the board. Each row shows either the slot's in-progress
// query text or its committed selection.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::protocol::RosterSlotView;
use crate::roster::{Slot, FIELD, ROTATION};
use crate::tui::layout::TeamLayout;
use crate::tui::ViewState;

/// Render the banner, both columns, and the focused slot's suggestions.
pub fn render(frame: &mut Frame, layout: &TeamLayout, state: &ViewState) {
    render_banner(frame, layout.banner, state);
    render_column(frame, layout.field, "Lineup + Defense", &FIELD, state);
    render_column(frame, layout.rotation, "Starting Rotation", &ROTATION, state);
    render_suggestions(frame, layout.suggestions, state);
}

fn render_banner(frame: &mut Frame, area: Rect, state: &ViewState) {
    let (text, style) = banner_line(state.snapshot.team_complete);
    let paragraph = ratatui::widgets::Paragraph::new(Span::styled(text, style));
    frame.render_widget(paragraph, area);
}

/// Completion banner content: flips the moment the 14th slot is filled.
pub fn banner_line(team_complete: bool) -> (&'static str, Style) {
    if team_complete {
        (
            " Team complete",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (" Fill all positions", Style::default().fg(Color::Yellow))
    }
}

fn render_column(frame: &mut Frame, area: Rect, title: &str, slots: &[Slot], state: &ViewState) {
    let items: Vec<ListItem> = slots
        .iter()
        .map(|&slot| {
            let entry = state.roster_view(slot);
            slot_item(slot, entry, slot == state.focused)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_owned()),
    );
    frame.render_widget(list, area);
}

/// Format one roster row as a ListItem.
fn slot_item<'a>(slot: Slot, entry: Option<&RosterSlotView>, focused: bool) -> ListItem<'a> {
    ListItem::new(Line::from(Span::styled(
        format!(" {}", slot_text(slot, entry)),
        slot_style(entry, focused),
    )))
}

/// Plain-text form of one roster row.
pub fn slot_text(slot: Slot, entry: Option<&RosterSlotView>) -> String {
    let code = slot.code();
    match entry {
        Some(entry) if entry.view.selection.is_some() => {
            // Selection and text always agree; show the resolved name.
            format!("{}: {}", code, entry.view.query_text)
        }
        Some(entry) if !entry.view.query_text.is_empty() => {
            format!("{}: {}\u{2588}", code, entry.view.query_text)
        }
        _ => format!("{}: [empty]", code),
    }
}

fn slot_style(entry: Option<&RosterSlotView>, focused: bool) -> Style {
    let mut style = match entry {
        Some(entry) if entry.view.selection.is_some() => Style::default().fg(Color::Green),
        Some(entry) if !entry.view.query_text.is_empty() => Style::default().fg(Color::White),
        _ => Style::default().fg(Color::DarkGray),
    };
    if focused {
        style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
    }
    style
}

fn render_suggestions(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(entry) = state
        .snapshot
        .roster
        .iter()
        .find(|entry| entry.view.is_active)
    else {
        return;
    };

    let items: Vec<ListItem> = entry
        .view
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, candidate)| super::search_panel::suggestion_item(candidate, i == 0))
        .collect();

    let title = format!("Suggestions ({})", entry.slot.title());
    let list = if items.is_empty() {
        List::new([ListItem::new(Span::styled(
            " No matches",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    }
    .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
