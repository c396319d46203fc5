//! Interactive mode - a menu that follows the login/logout view

use std::sync::Arc;

use anyhow::Result;
use dialoguer::{Input, Password, Select};
use gacha_core::ports::Presenter;
use gacha_core::{EntryPoint, LogEvent, ViewMode};

use super::logs::LoggedAction;
use super::payment::{PromptedPurchase, SpinnerInput};
use super::{get_context, get_logger, log_event, log_outcome};
use crate::output::{info, TerminalPresenter};

const UNAUTHENTICATED_ITEMS: &[&str] = &["Login", "Sign up", "Quit"];
const AUTHENTICATED_ITEMS: &[&str] = &["Buy currency", "View transactions", "Logout", "Quit"];

pub fn run() -> Result<()> {
    let presenter = Arc::new(TerminalPresenter::new(false));
    let ctx = get_context(presenter.clone())?;
    let logger = get_logger(EntryPoint::Interactive);
    log_event(&logger, LogEvent::new("interactive_started"));

    let client = &ctx.session_client;
    presenter.show_view(client.view_mode());

    loop {
        let mode = client.view_mode();
        let items = match mode {
            ViewMode::Unauthenticated => UNAUTHENTICATED_ITEMS,
            ViewMode::Authenticated => AUTHENTICATED_ITEMS,
        };

        let choice = Select::new()
            .with_prompt("Choose an action")
            .items(items)
            .default(0)
            .interact_opt()?;

        let Some(index) = choice else {
            break;
        };

        match (mode, items[index]) {
            (_, "Quit") => break,
            (ViewMode::Unauthenticated, "Login") => {
                let username: String = Input::new().with_prompt("Username").interact_text()?;
                let password = Password::new().with_prompt("Password").interact()?;
                let outcome = presenter
                    .with_spinner("Logging in...", || client.login(&username, &password));
                log_outcome(&logger, LoggedAction::Login, &outcome);
            }
            (ViewMode::Unauthenticated, "Sign up") => {
                let username: String = Input::new().with_prompt("Username").interact_text()?;
                let email: String = Input::new().with_prompt("Email").interact_text()?;
                let password = Password::new().with_prompt("Password").interact()?;
                let outcome = presenter.with_spinner("Signing up...", || {
                    client.signup(&username, &password, &email)
                });
                log_outcome(&logger, LoggedAction::Signup, &outcome);
            }
            (ViewMode::Authenticated, "Buy currency") => {
                let input = PromptedPurchase {
                    amount: None,
                    method: None,
                };
                let outcome = client.buy_currency(&SpinnerInput {
                    inner: &input,
                    presenter: &presenter,
                });
                presenter.stop_spinner();
                log_outcome(&logger, LoggedAction::Buy, &outcome);
            }
            (ViewMode::Authenticated, "View transactions") => {
                let outcome = presenter
                    .with_spinner("Fetching transactions...", || client.view_transactions());
                log_outcome(&logger, LoggedAction::Transactions, &outcome);
            }
            (ViewMode::Authenticated, "Logout") => {
                let outcome = presenter.with_spinner("Logging out...", || client.logout());
                log_outcome(&logger, LoggedAction::Logout, &outcome);
            }
            _ => {}
        }
        println!();
    }

    info("Bye.");
    Ok(())
}
