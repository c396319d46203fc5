//! Status command - show the stored session and service endpoints

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use super::get_context;
use crate::output::{create_table, TerminalPresenter};

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context(Arc::new(TerminalPresenter::new(json)))?;
    let status = ctx.status_service.get_status()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", "Session Status".bold());
    println!();

    let yes_no = |present: bool| if present { "yes" } else { "no" };

    let mut table = create_table();
    table.add_row(vec![
        "Logged in as",
        status.logged_username.as_deref().unwrap_or("-"),
    ]);
    table.add_row(vec!["Access token", yes_no(status.has_access_token)]);
    table.add_row(vec!["Refresh token", yes_no(status.has_refresh_token)]);
    table.add_row(vec!["Auth service", status.auth_base_url.as_str()]);
    table.add_row(vec!["Payment service", status.payment_base_url.as_str()]);
    table.add_row(vec![
        "Accept invalid certs",
        yes_no(status.accept_invalid_certs),
    ]);

    println!("{}", table);

    if status.logged_username.is_none() {
        println!();
        println!("Run {} to sign in.", "gacha login".cyan());
    }

    Ok(())
}
