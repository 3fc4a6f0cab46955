mod headless;

use anyhow::Context;
use clap::Parser;
use scout_core::{config::Config, ControllerOptions, SearchController};
use scout_transport::HttpTransport;
use std::{
    io::{self, Write},
    num::NonZeroUsize,
    process::ExitCode,
};

const DEBUG_LOG: &str = "/tmp/scout-debug.log";

#[derive(Parser)]
#[command(name = "scout", about = "Terminal console for a ranked-search service")]
struct Cli {
    /// Write debug logs to /tmp/scout-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Search endpoint URL; overrides `search.endpoint` in the config file.
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in milliseconds (0 disables it).
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print results to stdout instead of starting the TUI.
    #[arg(long)]
    headless: bool,

    /// Query for a one-shot headless search.
    #[arg(long, requires = "headless")]
    query: Option<String>,

    /// Print at most N results in headless mode.
    #[arg(long, value_name = "N", default_value_t = headless::DEFAULT_TOP)]
    top: NonZeroUsize,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(DEBUG_LOG)?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("scout debug log started, tail -f {DEBUG_LOG}");
    }

    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config: falling back to defaults");
        Config::defaults()
    });
    if let Some(endpoint) = cli.endpoint {
        config.search.endpoint = endpoint;
    }
    if let Some(ms) = cli.timeout_ms {
        config.search.request_timeout_ms = ms;
    }

    let transport = HttpTransport::new(config.search.endpoint.clone())
        .context("cannot use search endpoint")?;
    let endpoint = transport.endpoint().to_string();

    let runtime = tokio::runtime::Runtime::new()?;
    // Searches are spawned onto this runtime from synchronous code too.
    let _guard = runtime.enter();
    let mut controller = SearchController::new(transport, ControllerOptions::from(&config.search));
    tracing::debug!(%endpoint, options = ?controller.options(), "controller ready");

    if !cli.headless {
        scout_tui::run(controller, config, endpoint)?;
        return Ok(ExitCode::SUCCESS);
    }

    let (mut out, mut err) = (io::stdout().lock(), io::stderr().lock());
    match cli.query {
        Some(text) => {
            let outcome = runtime.block_on(headless::search_once(
                &mut controller,
                &text,
                cli.top,
                &mut out,
                &mut err,
            ))?;
            if outcome == headless::Outcome::EmptyQuery {
                writeln!(err, "error: --query must contain search terms")?;
            }
            Ok(ExitCode::from(outcome.exit_code()))
        }
        None => {
            runtime.block_on(headless::repl(
                &mut controller,
                cli.top,
                io::stdin().lock(),
                &mut out,
                &mut err,
            ))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
