// TUI widget modules for each panel.

pub mod prediction;
pub mod roster_board;
pub mod search_panel;
pub mod status_bar;
