//! Logs command - review recorded actions from the event log

use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::{Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::Confirm;
use gacha_core::services::logging::now_ms;
use gacha_core::services::{LogEntry, LogQuery};
use gacha_core::{EntryPoint, LoggingService};

use super::get_data_dir;
use crate::output::{create_table, info, success};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent actions, newest first
    List {
        /// Only this action
        #[arg(short, long, value_enum)]
        action: Option<LoggedAction>,
        /// Only failed actions
        #[arg(long)]
        failed: bool,
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Success and failure counts per action
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete old entries
    Clear {
        /// Keep the last N days
        #[arg(long, default_value = "30")]
        days: u32,
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Actions the client records
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LoggedAction {
    Login,
    Signup,
    Logout,
    Buy,
    Transactions,
}

impl LoggedAction {
    /// Command name as stored in the log
    pub fn as_str(&self) -> &'static str {
        match self {
            LoggedAction::Login => "login",
            LoggedAction::Signup => "signup",
            LoggedAction::Logout => "logout",
            LoggedAction::Buy => "buy_currency",
            LoggedAction::Transactions => "view_transactions",
        }
    }
}

fn open_log() -> Result<LoggingService> {
    let data_dir = get_data_dir()?;
    std::fs::create_dir_all(&data_dir)?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
}

fn local_time(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%m/%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}

/// `ok` or the failure with its details, e.g. `HTTP 401: Wrong password`
fn result_cell(entry: &LogEntry) -> String {
    match (&entry.error_message, &entry.error_details) {
        (None, _) => "ok".green().to_string(),
        (Some(message), Some(details)) => format!("{}: {}", details, message).red().to_string(),
        (Some(message), None) => message.red().to_string(),
    }
}

pub fn run(command: LogsCommands) -> Result<()> {
    let log = open_log()?;

    match command {
        LogsCommands::List {
            action,
            failed,
            limit,
            json,
        } => {
            let entries = log.query(&LogQuery {
                command: action.map(|a| a.as_str().to_string()),
                failed_only: failed,
                limit,
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
                return Ok(());
            }
            if entries.is_empty() {
                info("Nothing recorded yet.");
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["When", "Via", "Action", "Result"]);
            for entry in &entries {
                table.add_row(vec![
                    local_time(entry.timestamp),
                    entry.entry_point.clone(),
                    entry.command.clone().unwrap_or_else(|| entry.event.clone()),
                    result_cell(entry),
                ]);
            }
            println!("{}", table);
        }
        LogsCommands::Stats { json } => {
            let stats = log.action_stats()?;

            if json {
                println!(
                    "{}",
                    serde_json::json!({
                        "actions": stats,
                        "total_entries": log.count()?,
                        "database_path": log.db_path().to_string_lossy(),
                    })
                );
                return Ok(());
            }

            let mut table = create_table();
            table.set_header(vec!["Action", "Succeeded", "Failed", "Last run"]);
            for s in &stats {
                let failed = if s.failed > 0 {
                    s.failed.to_string().red().to_string()
                } else {
                    "0".to_string()
                };
                table.add_row(vec![
                    s.command.clone(),
                    s.succeeded.to_string(),
                    failed,
                    local_time(s.last_run),
                ]);
            }
            println!("{}", table);
            println!("{}", format!("Log database: {}", log.db_path().display()).dimmed());
        }
        LogsCommands::Clear { days, yes } => {
            if !yes
                && !Confirm::new()
                    .with_prompt(format!("Delete entries older than {} days?", days))
                    .default(false)
                    .interact()?
            {
                info("Nothing deleted.");
                return Ok(());
            }

            let deleted = log.delete_before(now_ms() - i64::from(days) * DAY_MS)?;
            success(&format!("Deleted {} entries", deleted));
        }
    }

    Ok(())
}
