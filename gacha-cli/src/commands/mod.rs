//! CLI command implementations

pub mod account;
pub mod config;
pub mod interactive;
pub mod logs;
pub mod payment;
pub mod status;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use dialoguer::{Input, Password};
use gacha_core::{ActionOutcome, EntryPoint, GachaContext, LogEvent, LoggingService};

use crate::output::TerminalPresenter;
use logs::LoggedAction;

/// Get the logging service
///
/// Returns None if logging fails to initialize (shouldn't block actions)
pub fn get_logger(entry_point: EntryPoint) -> Option<LoggingService> {
    let data_dir = get_data_dir().ok()?;
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, entry_point, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

/// Log the outcome of an action
pub fn log_outcome(
    logger: &Option<LoggingService>,
    action: LoggedAction,
    outcome: &ActionOutcome,
) {
    log_event(logger, LogEvent::from_outcome(action.as_str(), outcome));
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("GACHA_DIR") {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".gacha"))
        .context("Could not find home directory; set GACHA_DIR")
}

/// Build the client context, rendering through `presenter`
pub fn get_context(presenter: Arc<TerminalPresenter>) -> Result<GachaContext> {
    let data_dir = get_data_dir()?;

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    GachaContext::new(&data_dir, presenter).context("Failed to initialize client")
}

/// Exit code for a finished action
pub fn exit_code(outcome: &ActionOutcome) -> ExitCode {
    if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Use `value` or prompt for it
pub fn text_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new().with_prompt(prompt).interact_text()?),
    }
}

/// Use `value` or prompt for it without echo
pub fn password_or_prompt(value: Option<String>) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Password::new().with_prompt("Password").interact()?),
    }
}
