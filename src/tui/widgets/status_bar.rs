// Tab bar and help bar widgets.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Tab, ViewState};

/// Render the top tab indicator.
pub fn render_tab_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        " scout ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.extend(tab_spans(state.active_tab));
    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// Build tab indicator spans with the active tab highlighted.
pub fn tab_spans(active: Tab) -> Vec<Span<'static>> {
    let tabs = [(Tab::Predict, "Predict"), (Tab::Team, "Build a Team")];

    let mut spans = Vec::new();
    for (tab, label) in tabs {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{label}]"), style));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Render the bottom help bar with tab-specific key hints.
pub fn render_help_bar(frame: &mut Frame, area: Rect, state: &ViewState) {
    let text = help_text(state.active_tab);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

pub fn help_text(tab: Tab) -> &'static str {
    match tab {
        Tab::Predict => " Type to search | Enter:Predict | Esc:Close | ^U:Clear | ^B:Tab | ^C:Quit",
        Tab::Team => {
            " Type to search | Tab/\u{2193}\u{2191}:Move | Enter:Pick | Esc:Close | ^U:Clear | ^B:Tab | ^C:Quit"
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
