//! Headless mode: plain stdout output instead of the TUI.
//!
//! One-shot (`--query`) prints a single ranked list and exits; without a
//! query a `query> ` prompt reads searches from stdin until `exit` or EOF.

use scout_core::{Applied, ResultItem, SearchController};
use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;

pub const PROMPT: &str = "query> ";
pub const NO_MATCHES: &str = "No matching documents found.";
pub const HEADING: &str = "Top results:";

/// Results printed per query unless `--top` says otherwise.
pub const DEFAULT_TOP: NonZeroUsize = match NonZeroUsize::new(5) {
    Some(n) => n,
    None => unreachable!(),
};

/// Result of a single headless search, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Printed,
    Failed,
    EmptyQuery,
}

impl Outcome {
    pub fn exit_code(self) -> u8 {
        match self {
            Outcome::Printed => 0,
            Outcome::Failed => 1,
            Outcome::EmptyQuery => 2,
        }
    }
}

/// Submit `text`, wait for it to settle, and print the ranked results.
pub async fn search_once(
    controller: &mut SearchController,
    text: &str,
    top: NonZeroUsize,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Outcome> {
    controller.set_query_text(text);
    if controller.submit().is_none() {
        return Ok(Outcome::EmptyQuery);
    }

    match controller.next_settlement().await {
        Some(Applied::Results(_)) => {
            print_results(controller.state().results(), top, out)?;
            Ok(Outcome::Printed)
        }
        _ => {
            let reason = controller
                .state()
                .last_error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "search did not complete".to_string());
            writeln!(err, "error: {reason}")?;
            Ok(Outcome::Failed)
        }
    }
}

/// Read queries line by line until `exit` (any case) or EOF. Failures are
/// reported and the prompt continues.
pub async fn repl(
    controller: &mut SearchController,
    top: NonZeroUsize,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            break;
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            break;
        }

        let outcome = search_once(controller, line, top, out, err).await?;
        tracing::debug!(?outcome, "headless: query handled");
    }
    Ok(())
}

pub fn print_results(
    results: &[ResultItem],
    top: NonZeroUsize,
    out: &mut impl Write,
) -> io::Result<()> {
    if results.is_empty() {
        return writeln!(out, "{NO_MATCHES}");
    }
    writeln!(out, "{HEADING}")?;
    for (rank, item) in results.iter().take(top.get()).enumerate() {
        writeln!(out, "{}. {} (score: {})", rank + 1, item.url, item.score_label())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use pretty_assertions::assert_eq;
    use scout_core::{ControllerOptions, SearchTransport, TransportError, TransportResult};

    struct Canned;

    impl SearchTransport for Canned {
        fn search(&self, text: String) -> BoxFuture<'static, TransportResult> {
            Box::pin(async move {
                match text.as_str() {
                    "down" => Err(TransportError::Network("connection refused".into())),
                    "nothing" => Ok(vec![]),
                    _ => Ok(vec![
                        ResultItem::new("https://a.example", 0.93214),
                        ResultItem::new("https://b.example", 0.5),
                        ResultItem::new("https://c.example", 0.1),
                    ]),
                }
            })
        }
    }

    fn top(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn controller() -> SearchController {
        SearchController::new(Canned, ControllerOptions::default())
    }

    async fn once(text: &str, top: NonZeroUsize) -> (Outcome, String, String) {
        let mut c = controller();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let outcome = search_once(&mut c, text, top, &mut out, &mut err).await.unwrap();
        (outcome, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[tokio::test]
    async fn prints_ranked_results() {
        let (outcome, out, _) = once("rust", top(5)).await;
        assert_eq!(outcome, Outcome::Printed);
        assert_eq!(
            out,
            "Top results:\n\
             1. https://a.example (score: 0.9321)\n\
             2. https://b.example (score: 0.5000)\n\
             3. https://c.example (score: 0.1000)\n"
        );
    }

    #[tokio::test]
    async fn top_limits_output() {
        let (_, out, _) = once("rust", top(1)).await;
        assert_eq!(out, "Top results:\n1. https://a.example (score: 0.9321)\n");
    }

    #[test]
    fn default_top_prints_five() {
        let results: Vec<ResultItem> = (0..7)
            .map(|i| ResultItem::new(format!("https://{i}.example"), 0.5))
            .collect();
        let mut out = Vec::new();
        print_results(&results, DEFAULT_TOP, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().count(), 6);
        assert!(out.ends_with("5. https://4.example (score: 0.5000)\n"));
    }

    #[tokio::test]
    async fn empty_result_list() {
        let (outcome, out, _) = once("nothing", top(5)).await;
        assert_eq!(outcome, Outcome::Printed);
        assert_eq!(out, "No matching documents found.\n");
    }

    #[tokio::test]
    async fn transport_failure_goes_to_stderr() {
        let (outcome, out, err) = once("down", top(5)).await;
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(out, "");
        assert_eq!(err, "error: network error: connection refused\n");
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let (outcome, out, _) = once("   ", top(5)).await;
        assert_eq!(outcome.exit_code(), 2);
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn repl_runs_until_exit() {
        let mut c = controller();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let input = "nothing\n\ndown\nEXIT\nrust\n".as_bytes();
        repl(&mut c, DEFAULT_TOP, input, &mut out, &mut err).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "query> No matching documents found.\nquery> query> query> "
        );
        assert_eq!(
            String::from_utf8(err).unwrap(),
            "error: network error: connection refused\n"
        );
        // Only the two non-blank queries before `exit` were dispatched.
        assert_eq!(c.state().current_generation(), 2);
    }

    #[tokio::test]
    async fn repl_stops_at_eof() {
        let mut c = controller();
        let (mut out, mut err) = (Vec::new(), Vec::new());
        repl(&mut c, top(2), "rust".as_bytes(), &mut out, &mut err).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "query> Top results:\n\
             1. https://a.example (score: 0.9321)\n\
             2. https://b.example (score: 0.5000)\n\
             query> \n"
        );
    }
}
