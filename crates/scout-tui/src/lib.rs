//! scout TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use scout_core::{config::Config, SearchController};
use theme::Theme;

/// Start the interactive console. Must run inside a tokio runtime context.
pub fn run(controller: SearchController, config: Config, endpoint: String) -> anyhow::Result<()> {
    let theme = Theme::by_name(&config.ui.theme).unwrap_or_else(|| {
        tracing::warn!(theme = %config.ui.theme, "unknown theme, using default");
        Theme::load_default()
    });
    App::new(controller, config, theme, endpoint).run()
}
