//! Ratatui widgets for the scout TUI.

pub mod command_bar;
pub mod header;
pub mod help;
pub mod query_bar;
pub mod results_view;
pub mod status_line;
