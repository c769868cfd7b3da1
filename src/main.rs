mod commands;

use std::process::ExitCode;

use anyhow::{Context, Result};
use calendar_helper_core::fetch::FetchRequest;
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const USAGE: &str = "Usage: fetch-events <calendar_name> <days_back> <days_ahead>";

/// Log filter variable, e.g. CALENDAR_HELPER_LOG=debug
const LOG_ENV: &str = "CALENDAR_HELPER_LOG";

// Every argument is positional. There is no `--help`/`--version`, so a calendar
// may be named `-h` or `--help`; arguments past the third are ignored.
#[derive(Parser)]
#[command(name = "fetch-events", disable_help_flag = true)]
#[command(about = "Print the events of a macOS Calendar calendar within a date window as JSON")]
struct Cli {
    /// Calendar title as shown in Calendar.app (exact, case-sensitive)
    #[arg(allow_hyphen_values = true)]
    calendar_name: String,

    /// Days before now to include
    #[arg(allow_hyphen_values = true)]
    days_back: u32,

    /// Days after now to include
    #[arg(allow_hyphen_values = true)]
    days_ahead: u32,

    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _rest: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            eprintln!("{}", USAGE);
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => err.exit(),
    };

    init_logging()?;

    commands::fetch_events::run(FetchRequest {
        calendar_name: cli.calendar_name,
        days_back: cli.days_back,
        days_ahead: cli.days_ahead,
    })
}

/// Logs go to stderr; stdout is reserved for the JSON result.
fn init_logging() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).context("Failed to set up logging")
}
