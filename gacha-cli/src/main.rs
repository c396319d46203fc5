//! Gacha CLI - wallet client for the gacha auth and payment services

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{account, config, interactive, logs, payment, status};

/// Gacha - sign in, buy currency and review transactions
#[derive(Parser)]
#[command(name = "gacha", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and store the session tokens
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Password (prompted if omitted)
        #[arg(short, long, env = "GACHA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create an account
    Signup {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,
        /// Email (prompted if omitted)
        #[arg(short, long)]
        email: Option<String>,
        /// Password (prompted if omitted)
        #[arg(short, long, env = "GACHA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Revoke the refresh token and forget the session
    Logout {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Buy in-game currency
    Buy {
        /// Amount to buy (prompted if omitted)
        #[arg(short, long)]
        amount: Option<String>,
        /// Payment method (prompted if omitted)
        #[arg(short, long)]
        method: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List your transactions
    Transactions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the stored session and service endpoints
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Menu-driven session
    Interactive,

    /// View and change settings
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },

    /// View and manage application logs
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Login { username, password, json } => {
            account::run_login(username, password, json)
        }
        Commands::Signup { username, email, password, json } => {
            account::run_signup(username, email, password, json)
        }
        Commands::Logout { json } => account::run_logout(json),
        Commands::Buy { amount, method, json } => payment::run_buy(amount, method, json),
        Commands::Transactions { json } => payment::run_transactions(json),
        Commands::Status { json } => status::run(json).map(|_| ExitCode::SUCCESS),
        Commands::Interactive => interactive::run().map(|_| ExitCode::SUCCESS),
        Commands::Config { command } => config::run(command).map(|_| ExitCode::SUCCESS),
        Commands::Logs { command } => logs::run(command).map(|_| ExitCode::SUCCESS),
    }
}
