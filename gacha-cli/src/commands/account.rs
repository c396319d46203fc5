//! Login, signup and logout commands

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use gacha_core::EntryPoint;

use super::logs::LoggedAction;
use super::{exit_code, get_context, get_logger, log_outcome, password_or_prompt, text_or_prompt};
use crate::output::TerminalPresenter;

pub fn run_login(
    username: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<ExitCode> {
    let username = text_or_prompt(username, "Username")?;
    let password = password_or_prompt(password)?;

    let presenter = Arc::new(TerminalPresenter::new(json));
    let ctx = get_context(presenter.clone())?;
    let logger = get_logger(EntryPoint::Cli);

    let outcome = presenter.with_spinner("Logging in...", || {
        ctx.session_client.login(&username, &password)
    });
    log_outcome(&logger, LoggedAction::Login, &outcome);

    Ok(exit_code(&outcome))
}

pub fn run_signup(
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<ExitCode> {
    let username = text_or_prompt(username, "Username")?;
    let email = text_or_prompt(email, "Email")?;
    let password = password_or_prompt(password)?;

    let presenter = Arc::new(TerminalPresenter::new(json));
    let ctx = get_context(presenter.clone())?;
    let logger = get_logger(EntryPoint::Cli);

    let outcome = presenter.with_spinner("Signing up...", || {
        ctx.session_client.signup(&username, &password, &email)
    });
    log_outcome(&logger, LoggedAction::Signup, &outcome);

    Ok(exit_code(&outcome))
}

pub fn run_logout(json: bool) -> Result<ExitCode> {
    let presenter = Arc::new(TerminalPresenter::new(json));
    let ctx = get_context(presenter.clone())?;
    let logger = get_logger(EntryPoint::Cli);

    let outcome = presenter.with_spinner("Logging out...", || ctx.session_client.logout());
    log_outcome(&logger, LoggedAction::Logout, &outcome);

    Ok(exit_code(&outcome))
}
