// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

use crate::{
    app::{AppState, Focus},
    theme::Theme,
};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Close the app
    Quit,
    // Toggle the help popup
    Help,
    // Change theme
    Theme(String),
    // Empty the query bar (results stay until the next search)
    Clear,
    // Replace the query text and submit it
    Search(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// Returns `Ok(cmd)` on success, `Err(message)` on failure. An empty
    /// string returns `Err("")` as a sentinel meaning "close without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "exit" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "clear" => Ok(Command::Clear),
            "theme" => {
                if rest.is_empty() {
                    Err("usage: theme <default|gruvbox>".to_string())
                } else if Theme::by_name(rest).is_none() {
                    Err(format!("unknown theme: {rest}"))
                } else {
                    Ok(Command::Theme(rest.to_string()))
                }
            }
            "search" | "s" => {
                if rest.is_empty() {
                    Err("usage: search <text>".to_string())
                } else {
                    Ok(Command::Search(rest.to_string()))
                }
            }
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => {
            s.quit = true;
        }
        Command::Help => {
            s.show_help = !s.show_help;
        }
        Command::Theme(name) => {
            if let Some(theme) = Theme::by_name(&name) {
                s.theme = theme;
            }
        }
        Command::Clear => {
            s.replace_query("");
            s.focus = Focus::Query;
        }
        Command::Search(text) => {
            s.replace_query(&text);
            s.submit();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
