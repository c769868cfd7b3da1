use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use calendar_helper_core::config::HelperConfig;
use calendar_helper_core::fetch::{FetchOutcome, FetchRequest, fetch_events};
use calendar_helper_core::output::{NotFoundBody, write_json};
use calendar_helper_core::store::fixture::FixtureStore;
use calendar_helper_core::store::open_host_store;
use chrono::Local;

/// Fetch the requested calendar's events and print them as JSON.
///
/// Exits 1 with a JSON error object when the calendar does not exist. Any
/// other failure is returned as an error and never reaches stdout.
pub fn run(request: FetchRequest) -> Result<ExitCode> {
    let config = HelperConfig::load().context("Failed to load configuration")?;
    let now = Local::now();

    let outcome = match &config.fixture {
        Some(path) => {
            tracing::debug!(path = %path.display(), "reading calendars from fixture");
            let store = FixtureStore::load(path)?;
            fetch_events(&store, &request, &now, &config.unknown_source)?
        }
        None => {
            let store = open_host_store().context("Failed to open the calendar store")?;
            fetch_events(&store, &request, &now, &config.unknown_source)?
        }
    };

    let stdout = io::stdout().lock();

    match outcome {
        FetchOutcome::Events(records) => {
            write_json(stdout, &records, config.ensure_ascii).context("Failed to write events")?;
            Ok(ExitCode::SUCCESS)
        }
        FetchOutcome::CalendarNotFound { name } => {
            write_json(stdout, &NotFoundBody::new(&name), config.ensure_ascii)
                .context("Failed to write error")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
