// Prediction report widget: percentile projections for one player.
//
// Mirrors the backend's response: a header with the projection year and the
// prior-season inputs, one stat card per metric (OBP, SLG, OPS), and an
// interpretation block quoting the p25-p75 band.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::protocol::{PredictStatus, Prediction, StatDistribution};
use crate::tui::ViewState;

/// Render the prediction area for the current `PredictView`.
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let predict = &state.snapshot.predict;
    match predict.status {
        PredictStatus::Idle => {
            render_message(frame, area, "Type a player name and press Enter.", Color::DarkGray);
        }
        PredictStatus::Loading => {
            render_message(frame, area, "Analyzing...", Color::Yellow);
        }
        PredictStatus::Failed => {
            let message = predict.error.as_deref().unwrap_or("Prediction failed");
            render_message(frame, area, message, Color::Red);
        }
        PredictStatus::Ready => {
            if let Some(prediction) = &predict.prediction {
                render_report(frame, area, prediction);
            }
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, message: &str, color: Color) {
    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(color)))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Projection"));
    frame.render_widget(paragraph, area);
}

fn render_report(frame: &mut Frame, area: Rect, prediction: &Prediction) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header + previous season
            Constraint::Min(9),    // stat cards
            Constraint::Length(6), // interpretation
        ])
        .split(area);

    render_header(frame, sections[0], prediction);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(sections[1]);
    render_stat_card(frame, cards[0], "OBP", &prediction.obp);
    render_stat_card(frame, cards[1], "SLG", &prediction.slg);
    render_stat_card(frame, cards[2], "OPS", &prediction.ops);

    render_interpretation(frame, sections[2], prediction);
}

fn render_header(frame: &mut Frame, area: Rect, prediction: &Prediction) {
    let cond = &prediction.condition_used;
    let lines = vec![
        Line::from(Span::styled(
            format!("{} \u{2014} {} Projection", prediction.name, prediction.upcoming_year),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Previous season ({}): OBP {:.3}  SLG {:.3}  PA {}  Age {}",
                cond.prev_year, cond.prev_obp, cond.prev_slg, cond.prev_pa, cond.age_next
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Projection"));
    frame.render_widget(paragraph, area);
}

fn render_stat_card(frame: &mut Frame, area: Rect, title: &str, stats: &StatDistribution) {
    let paragraph = Paragraph::new(stat_card_lines(stats))
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
    frame.render_widget(paragraph, area);
}

/// Rows of one stat card, mean first, then the percentile ladder.
pub fn stat_card_lines(stats: &StatDistribution) -> Vec<Line<'static>> {
    let row = |label: &str, value: f64, color: Color| {
        Line::from(vec![
            Span::styled(format!(" {label:<15}"), Style::default().fg(Color::Gray)),
            Span::styled(format!("{value:.3}"), Style::default().fg(color)),
        ])
    };
    vec![
        row("Mean:", stats.mean, Color::White),
        row("P10 (downside):", stats.p10, Color::Red),
        row("P25:", stats.p25, Color::White),
        row("P50 (median):", stats.p50, Color::Cyan),
        row("P75:", stats.p75, Color::White),
        row("P90 (upside):", stats.p90, Color::Green),
    ]
}

fn render_interpretation(frame: &mut Frame, area: Rect, prediction: &Prediction) {
    let band = |name: &str, stats: &StatDistribution| {
        Line::from(Span::raw(format!(
            " \u{2022} {}: {:.3} \u{2014} {:.3}",
            name, stats.p25, stats.p75
        )))
    };
    let lines = vec![
        Line::from(Span::raw("50% of simulated seasons fall between:")),
        band("OBP", &prediction.obp),
        band("SLG", &prediction.slg),
        band("OPS", &prediction.ops),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Interpretation"));
    frame.render_widget(paragraph, area);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
