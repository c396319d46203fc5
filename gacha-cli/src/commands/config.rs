//! Config command - view and change settings.json

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use gacha_core::config::Config;

use super::get_data_dir;
use crate::output::{create_table, success};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change a setting (authBaseUrl, paymentBaseUrl, acceptInvalidCerts, requestTimeoutSecs)
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let data_dir = get_data_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&data_dir)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }

            println!("{}", "Configuration".bold());
            let mut table = create_table();
            table.add_row(vec!["authBaseUrl".to_string(), config.auth_base_url]);
            table.add_row(vec!["paymentBaseUrl".to_string(), config.payment_base_url]);
            table.add_row(vec![
                "acceptInvalidCerts".to_string(),
                config.accept_invalid_certs.to_string(),
            ]);
            table.add_row(vec![
                "requestTimeoutSecs".to_string(),
                config
                    .request_timeout_secs
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            ]);
            println!("{}", table);
            println!("{}", format!("Data directory: {}", data_dir.display()).dimmed());
        }
        ConfigCommands::Set { key, value } => {
            // Environment overrides are not written back
            let mut config = Config::load_file(&data_dir)?;
            config.set(&key, &value)?;
            config.save(&data_dir)?;
            success(&format!("Set {} = {}", key, value));
        }
    }

    Ok(())
}
