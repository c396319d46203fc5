//! Output formatting utilities and the terminal presenter

use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use indicatif::{ProgressBar, ProgressStyle};

use gacha_core::ports::Presenter;
use gacha_core::{ActionOutcome, OutputArea, ViewMode};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Renders outcomes and view changes to the terminal
///
/// While a request is in flight a spinner runs on TTYs; anything printed in
/// the meantime suspends it.
pub struct TerminalPresenter {
    json: bool,
    spinner: Mutex<Option<ProgressBar>>,
}

impl TerminalPresenter {
    pub fn new(json: bool) -> Self {
        Self {
            json,
            spinner: Mutex::new(None),
        }
    }

    /// Run `f` behind a spinner labelled `message`
    pub fn with_spinner<T>(&self, message: &str, f: impl FnOnce() -> T) -> T {
        self.start_spinner(message);
        let result = f();
        self.stop_spinner();
        result
    }

    /// Start a spinner (TTY only, never in JSON mode)
    pub fn start_spinner(&self, message: &str) {
        if self.json || !atty::is(atty::Stream::Stderr) {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    /// Clear the running spinner, if any
    pub fn stop_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(spinner) = slot.take() {
                spinner.finish_and_clear();
            }
        }
    }

    fn print(&self, f: impl FnOnce()) {
        let active = self.spinner.lock().ok().and_then(|slot| slot.clone());
        match active {
            Some(spinner) => spinner.suspend(f),
            None => f(),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn show_view(&self, mode: ViewMode) {
        if self.json {
            return;
        }
        self.print(|| {
            println!();
            match mode {
                ViewMode::Unauthenticated => {
                    println!("{}", "Login / Sign up".bold());
                }
                ViewMode::Authenticated => {
                    println!("{}", "Menu".bold());
                    println!("  Buy currency, view transactions, or log out.");
                }
            }
        });
    }

    fn show_outcome(&self, outcome: &ActionOutcome) {
        if self.json {
            if let Ok(json) = serde_json::to_string_pretty(outcome) {
                println!("{}", json);
            }
            return;
        }

        self.print(|| {
            if !outcome.success {
                error(&outcome.message);
            } else if outcome.area == OutputArea::ServiceResult && outcome.message.contains('\n') {
                // Transaction listing: plain lines
                println!("{}", outcome.message);
            } else if outcome.message.is_empty() {
                warning("No transactions found.");
            } else {
                success(&outcome.message);
            }
        });
    }
}
