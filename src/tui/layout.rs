// Screen layout: panel arrangement and sizing.
//
// Both tabs share a frame chrome:
//
// +--------------------------------------------------+
// | Tab Bar (1 row)                                   |
// +--------------------------------------------------+
// | Main (fill, tab-dependent)                        |
// +--------------------------------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// The Predict tab splits Main into a search box, its suggestion panel, and
// the prediction report. The Team tab splits Main into a completion banner,
// the two roster columns, and the focused slot's suggestion panel.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas shared by both tabs.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: tab indicator.
    pub tab_bar: Rect,
    /// Middle: tab-dependent content area.
    pub main: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

/// Resolved areas for the Predict tab.
#[derive(Debug, Clone)]
pub struct PredictLayout {
    /// Single-line search input with a border.
    pub search: Rect,
    /// Suggestion panel directly under the input.
    pub suggestions: Rect,
    /// Percentile report for the last prediction.
    pub prediction: Rect,
}

/// Resolved areas for the Build-a-Team tab.
#[derive(Debug, Clone)]
pub struct TeamLayout {
    /// Completion banner above the board.
    pub banner: Rect,
    /// Left column: the nine field positions.
    pub field: Rect,
    /// Right column: the five-man rotation.
    pub rotation: Rect,
    /// Suggestion panel for the focused slot, under the board.
    pub suggestions: Rect,
}

/// Build the shared frame chrome from the terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tab bar
            Constraint::Min(10),   // main
            Constraint::Length(1), // help bar
        ])
        .split(area);

    AppLayout {
        tab_bar: vertical[0],
        main: vertical[1],
        help_bar: vertical[2],
    }
}

/// Split the main area for the Predict tab.
pub fn build_predict_layout(main: Rect) -> PredictLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input (bordered)
            Constraint::Length(8), // suggestion panel
            Constraint::Min(8),    // prediction report
        ])
        .split(main);

    PredictLayout {
        search: vertical[0],
        suggestions: vertical[1],
        prediction: vertical[2],
    }
}

/// Split the main area for the Build-a-Team tab.
pub fn build_team_layout(main: Rect) -> TeamLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // banner
            Constraint::Min(11),    // board
            Constraint::Length(8),  // suggestion panel
        ])
        .split(main);

    let banner = vertical[0];
    let board = vertical[1];
    let suggestions = vertical[2];

    // Field positions left, rotation right.
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(board);

    TeamLayout {
        banner,
        field: columns[0],
        rotation: columns[1],
        suggestions,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
