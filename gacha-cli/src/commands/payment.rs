//! Buy-currency and transaction listing commands

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use dialoguer::Input;
use gacha_core::domain::Error;
use gacha_core::ports::PurchaseInput;
use gacha_core::{EntryPoint, PurchaseRequest};

use super::logs::LoggedAction;
use super::{exit_code, get_context, get_logger, log_outcome};
use crate::output::TerminalPresenter;

/// Amount and payment method from flags, prompting for whatever is missing
pub struct PromptedPurchase {
    pub amount: Option<String>,
    pub method: Option<String>,
}

impl PromptedPurchase {
    fn value_or_prompt(value: &Option<String>, prompt: &str) -> gacha_core::domain::Result<String> {
        match value {
            Some(v) => Ok(v.clone()),
            None => Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| Error::Input(e.to_string())),
        }
    }
}

impl PurchaseInput for PromptedPurchase {
    fn request_purchase(&self) -> gacha_core::domain::Result<PurchaseRequest> {
        let amount = Self::value_or_prompt(&self.amount, "Enter amount to buy")?;
        let method = Self::value_or_prompt(&self.method, "Enter payment method")?;
        Ok(PurchaseRequest::new(amount, method))
    }
}

pub fn run_buy(amount: Option<String>, method: Option<String>, json: bool) -> Result<ExitCode> {
    let presenter = Arc::new(TerminalPresenter::new(json));
    let ctx = get_context(presenter.clone())?;
    let logger = get_logger(EntryPoint::Cli);

    // Prompts run before the spinner starts; the guard runs before prompts
    let input = PromptedPurchase { amount, method };
    let outcome = ctx.session_client.buy_currency(&SpinnerInput {
        inner: &input,
        presenter: &presenter,
    });
    presenter.stop_spinner();
    log_outcome(&logger, LoggedAction::Buy, &outcome);

    Ok(exit_code(&outcome))
}

pub fn run_transactions(json: bool) -> Result<ExitCode> {
    let presenter = Arc::new(TerminalPresenter::new(json));
    let ctx = get_context(presenter.clone())?;
    let logger = get_logger(EntryPoint::Cli);

    let outcome = presenter.with_spinner("Fetching transactions...", || {
        ctx.session_client.view_transactions()
    });
    log_outcome(&logger, LoggedAction::Transactions, &outcome);

    Ok(exit_code(&outcome))
}

/// Collects the purchase, then starts the spinner for the request itself
pub struct SpinnerInput<'a> {
    pub inner: &'a dyn PurchaseInput,
    pub presenter: &'a TerminalPresenter,
}

impl PurchaseInput for SpinnerInput<'_> {
    fn request_purchase(&self) -> gacha_core::domain::Result<PurchaseRequest> {
        let purchase = self.inner.request_purchase()?;
        self.presenter.start_spinner("Buying currency...");
        Ok(purchase)
    }
}
