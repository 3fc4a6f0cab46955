//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, drains
//! search settlements every frame, and tears everything down cleanly on exit
//! or panic.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        header::Header,
        help::HelpPopup,
        query_bar::{QueryBar, QueryBarState},
        results_view::{ResultsView, ResultsViewState},
        status_line::StatusLine,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use scout_core::{config::Config, Generation, SearchController};
use std::{io, time::Duration};

/// Frames per spinner step (the loop runs at ~60 fps).
const SPINNER_DIVISOR: usize = 5;

/// Opens a URL outside the console. Swappable so tests never launch a browser.
pub type LinkOpener = Box<dyn FnMut(&str) -> io::Result<()>>;

// ---------------------------------------------------------------------------
// Focus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    /// The `[ Search ]` button next to the query input.
    Button,
    Results,
    /// Vim-style `:` command line is active.
    Command,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Query => Focus::Button,
            Focus::Button => Focus::Results,
            Focus::Results | Focus::Command => Focus::Query,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Query | Focus::Command => Focus::Results,
            Focus::Button => Focus::Query,
            Focus::Results => Focus::Button,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub controller: SearchController,
    pub query: QueryBarState,
    pub results: ResultsViewState,
    pub focus: Focus,
    /// Focus state before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    /// Shown in the header.
    pub endpoint: String,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    /// Transient message in the status line, cleared on the next search.
    pub notice: Option<String>,
    pub tick: usize,
    pub quit: bool,
    /// Last applied generation the results view has been reset for.
    seen_generation: Generation,
    opener: LinkOpener,
}

impl AppState {
    /// The one submission path shared by Enter in the query bar, the search
    /// button and `:search`.
    pub fn submit(&mut self) {
        self.notice = None;
        match self.controller.submit() {
            Some(request) => {
                tracing::debug!(generation = request.generation, "app: search dispatched")
            }
            None => tracing::debug!("app: nothing to search"),
        }
    }

    /// Replace the query bar contents and mirror them into the controller.
    pub fn replace_query(&mut self, text: &str) {
        self.query.set(text);
        self.controller.set_query_text(text);
    }

    fn edit_query(&mut self, event: &AppEvent) {
        if self.query.handle(event) {
            self.controller.set_query_text(self.query.input.clone());
        }
    }

    /// Drain settled searches and reset the results view when a new result
    /// set lands.
    pub fn poll_searches(&mut self) {
        self.controller.poll_settlements();
        self.sync_results();
    }

    fn sync_results(&mut self) {
        let applied = self.controller.state().latest_applied_generation();
        if applied != self.seen_generation {
            self.seen_generation = applied;
            self.results.reset();
        }
    }

    pub fn open_selected(&mut self) {
        let Some(item) = self.results.selected_item(self.controller.state().results()) else {
            return;
        };
        let url = item.url.clone();
        self.notice = Some(match (self.opener)(&url) {
            Ok(()) => {
                tracing::debug!(%url, "app: opened link");
                format!("opened {url}")
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "app: failed to open link");
                format!("could not open {url}: {e}")
            }
        });
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    pub fn new(controller: SearchController, config: Config, theme: Theme, endpoint: String) -> Self {
        let state = AppState {
            controller,
            query: QueryBarState::default(),
            results: ResultsViewState::default(),
            focus: Focus::Query,
            prev_focus: Focus::Query,
            theme,
            config,
            endpoint,
            show_help: false,
            command_bar: CommandBarState::default(),
            notice: None,
            tick: 0,
            quit: false,
            seen_generation: 0,
            opener: Box::new(open_in_browser),
        };
        App { state }
    }

    /// Replace the link opener (tests use a recording closure).
    pub fn with_opener(mut self, opener: LinkOpener) -> Self {
        self.state.opener = opener;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    ///
    /// Must be called from within a tokio runtime context: searches are
    /// dispatched as tokio tasks.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.poll_searches();
            self.state.tick = self.state.tick.wrapping_add(1);

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        // Use insert-mode mapping when a text widget is focused
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            match event {
                AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit => {
                    tracing::debug!("help popup closed");
                    s.show_help = false;
                }
                _ => {}
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => {
                    let input = s.command_bar.input.clone();
                    match Command::parse(&input) {
                        Ok(cmd) => {
                            tracing::debug!(command = ?cmd, "executing command");
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                            execute_command(s, cmd);
                        }
                        Err(msg) if msg.is_empty() => {
                            s.command_bar.clear();
                            s.focus = s.prev_focus;
                        }
                        Err(msg) => {
                            // Show the error; bar stays open
                            s.command_bar.error = Some(msg);
                        }
                    }
                }
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::Query => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::Query => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape => {
                if s.focus == Focus::Query {
                    tracing::debug!("focus: Query -> Results");
                    s.focus = Focus::Results;
                }
            }

            AppEvent::FocusNext => s.focus = s.focus.next(),
            AppEvent::FocusPrev => s.focus = s.focus.prev(),
            AppEvent::QueryFocus => s.focus = Focus::Query,

            AppEvent::Enter => match s.focus {
                Focus::Query | Focus::Button => s.submit(),
                Focus::Results => s.open_selected(),
                Focus::Command => {}
            },

            AppEvent::OpenLink => s.open_selected(),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Returns true when the current focus is on a text-input widget, meaning
/// alphabetic keys should produce characters rather than trigger shortcuts.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::Query | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::Query => s.edit_query(&event),
        Focus::Results => {
            let len = s.controller.state().results().len();
            s.results.handle(&event, len);
        }
        Focus::Button | Focus::Command => {}
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // header | query bar | results | status line
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let search = state.controller.state();

    frame.render_widget(
        Header::new(&state.config.ui.title, &state.endpoint, &state.theme),
        vert[0],
    );
    frame.render_widget(
        QueryBar::new(
            &state.query,
            state.focus == Focus::Query,
            state.focus == Focus::Button,
            &state.theme,
        ),
        vert[1],
    );
    frame.render_widget(
        ResultsView::new(
            search.results(),
            search.status(),
            &state.results,
            state.focus == Focus::Results,
            &state.theme,
        ),
        vert[2],
    );
    frame.render_widget(
        StatusLine::new(
            search,
            state.tick / SPINNER_DIVISOR,
            state.notice.as_deref(),
            &state.theme,
        ),
        vert[3],
    );

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = bottom_row(area);
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::Query {
        let qb = QueryBar::new(&state.query, true, false, &state.theme);
        let (cx, cy) = qb.cursor_position(vert[1]);
        frame.set_cursor_position((cx, cy));
    }
}

/// The last row of `area`, or an empty rect when there is no row at all.
fn bottom_row(area: Rect) -> Rect {
    Rect { y: area.bottom().saturating_sub(1), height: area.height.min(1), ..area }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

/// Launch the system browser detached from the console, so the page gets no
/// handle back to scout.
fn open_in_browser(url: &str) -> io::Result<()> {
    open::that_detached(url)
}

/// Restore the terminal when the UI thread panics. Panics on runtime worker
/// threads (a misbehaving transport) are caught by the controller and must
/// not tear the screen down.
fn install_panic_hook() {
    let ui_thread = std::thread::current().id();
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if std::thread::current().id() == ui_thread {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original(info);
        } else {
            tracing::error!(panic = %info, "search task panicked");
        }
    }));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
