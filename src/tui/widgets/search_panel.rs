// Search panel widget: the Predict tab's player input and its suggestions.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::protocol::Candidate;
use crate::tui::layout::PredictLayout;
use crate::tui::ViewState;

/// Render the search input and suggestion panel.
pub fn render(frame: &mut Frame, layout: &PredictLayout, state: &ViewState) {
    render_input(frame, layout.search, state);
    render_suggestions(frame, layout.suggestions, state);
}

fn render_input(frame: &mut Frame, area: Rect, state: &ViewState) {
    let search = &state.snapshot.search;
    let style = if search.selection.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    // Trailing block stands in for a cursor; the terminal cursor is hidden.
    let text = format!("{}\u{2588}", search.query_text);
    let paragraph = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Player"),
    );
    frame.render_widget(paragraph, area);
}

fn render_suggestions(frame: &mut Frame, area: Rect, state: &ViewState) {
    let search = &state.snapshot.search;
    if !search.is_active {
        return;
    }

    let items: Vec<ListItem> = search
        .suggestions
        .iter()
        .enumerate()
        .map(|(i, candidate)| suggestion_item(candidate, i == 0))
        .collect();

    let list = if items.is_empty() {
        List::new([ListItem::new(Span::styled(
            " No matches",
            Style::default().fg(Color::DarkGray),
        ))])
    } else {
        List::new(items)
    }
    .block(Block::default().borders(Borders::ALL).title("Suggestions"));
    frame.render_widget(list, area);
}

/// Format one suggestion row; the top row is the Enter-key default.
pub fn suggestion_item<'a>(candidate: &Candidate, is_top: bool) -> ListItem<'a> {
    let style = if is_top {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    ListItem::new(Line::from(Span::styled(
        format!(" {}", candidate.display_name),
        style,
    )))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
