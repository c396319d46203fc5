//! Session client - the five user actions
//!
//! Each action sends at most one request, updates session storage from the
//! response, and produces exactly one [`ActionOutcome`]. Failures never
//! escape an action: they are rendered into its output area.
//!
//! The view mode only changes on a successful login or logout.

use std::sync::{Arc, Mutex};

use chrono::Local;

use crate::domain::result::{Error, Result};
use crate::domain::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY};
use crate::domain::transaction::format_transactions;
use crate::domain::{ActionOutcome, AuthEvent, OutputArea, PaymentCredentials, Session, ViewMode};
use crate::ports::{AuthApi, NullPresenter, PaymentApi, Presenter, PurchaseInput, SessionStorage};

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const LOGOUT_FAILED: &str = "Logout failed";
const PURCHASE_FAILED: &str = "Failed to purchase currency";
const TRANSACTIONS_FAILED: &str = "Failed to fetch transactions";

/// Client-side session handling for the auth and payment services
pub struct SessionClient {
    storage: Arc<dyn SessionStorage>,
    auth: Arc<dyn AuthApi>,
    payment: Arc<dyn PaymentApi>,
    presenter: Arc<dyn Presenter>,
    view: Mutex<ViewMode>,
}

impl SessionClient {
    /// Create a client in the unauthenticated view, rendering nothing
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        auth: Arc<dyn AuthApi>,
        payment: Arc<dyn PaymentApi>,
    ) -> Self {
        Self {
            storage,
            auth,
            payment,
            presenter: Arc::new(NullPresenter),
            view: Mutex::new(ViewMode::default()),
        }
    }

    /// Render view transitions and outcomes through `presenter`
    pub fn with_presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    /// Current view mode
    pub fn view_mode(&self) -> ViewMode {
        self.view.lock().map(|v| *v).unwrap_or_default()
    }

    /// The stored session, if all three entries are present
    pub fn session(&self) -> Result<Option<Session>> {
        let access_token = self.storage.get(ACCESS_TOKEN_KEY)?;
        let refresh_token = self.storage.get(REFRESH_TOKEN_KEY)?;
        let username = self.storage.get(USERNAME_KEY)?;

        Ok(match (access_token, refresh_token, username) {
            (Some(a), Some(r), Some(u)) => Some(Session::new(a, r, u)),
            _ => None,
        })
    }

    /// Log in and persist the returned tokens
    pub fn login(&self, username: &str, password: &str) -> ActionOutcome {
        let result = self.try_login(username, password);
        let event = if result.is_ok() {
            AuthEvent::LoginSucceeded
        } else {
            AuthEvent::Unchanged
        };
        let result = result.map(|_| "Login successful!".to_string());
        self.finish(OutputArea::LoginResult, result, LOGIN_FAILED, event)
    }

    /// Create an account. The session is untouched; a login must follow.
    pub fn signup(&self, username: &str, password: &str, email: &str) -> ActionOutcome {
        let result = self
            .auth
            .signup(username, password, email)
            .map(|_| "Signup successful!".to_string());
        self.finish(OutputArea::SignupResult, result, SIGNUP_FAILED, AuthEvent::Unchanged)
    }

    /// Log out with the stored refresh token and clear all session storage
    pub fn logout(&self) -> ActionOutcome {
        let result = self.try_logout();
        let event = if result.is_ok() {
            AuthEvent::LogoutSucceeded
        } else {
            AuthEvent::Unchanged
        };
        let result = result.map(|_| "Logout successful!".to_string());
        self.finish(OutputArea::LogoutResult, result, LOGOUT_FAILED, event)
    }

    /// Buy currency for the stored user
    ///
    /// `input` is only asked for the amount and payment method once the
    /// stored session has passed the guard.
    pub fn buy_currency(&self, input: &dyn PurchaseInput) -> ActionOutcome {
        let result = self.try_buy_currency(input);
        self.finish(OutputArea::ServiceResult, result, PURCHASE_FAILED, AuthEvent::Unchanged)
    }

    /// List the stored user's transactions, one line each, in the order
    /// the payment service returned them
    pub fn view_transactions(&self) -> ActionOutcome {
        let result = self.try_view_transactions();
        self.finish(OutputArea::ServiceResult, result, TRANSACTIONS_FAILED, AuthEvent::Unchanged)
    }

    fn try_login(&self, username: &str, password: &str) -> Result<()> {
        let tokens = self.auth.login(username, password)?;
        let session = Session::new(tokens.access_token, tokens.refresh_token, username);
        self.storage.set_many(&session.entries())
    }

    fn try_logout(&self) -> Result<()> {
        let refresh_token = self.storage.get(REFRESH_TOKEN_KEY)?.unwrap_or_default();
        self.auth.logout(&refresh_token)?;
        self.storage.clear()
    }

    fn try_buy_currency(&self, input: &dyn PurchaseInput) -> Result<String> {
        let credentials = self.payment_credentials()?;
        let purchase = input.request_purchase()?;
        let balance = self.payment.buy_currency(&credentials, &purchase)?;
        Ok(format!("Currency purchased! Balance: {}", balance))
    }

    fn try_view_transactions(&self) -> Result<String> {
        let credentials = self.payment_credentials()?;
        let transactions = self.payment.view_transactions(&credentials)?;
        Ok(format_transactions(&transactions, &Local))
    }

    /// Guard for payment calls: a stored username and access token
    fn payment_credentials(&self) -> Result<PaymentCredentials> {
        let username = non_empty(self.storage.get(USERNAME_KEY)?)
            .ok_or(Error::MissingSession("Username"))?;
        let access_token = non_empty(self.storage.get(ACCESS_TOKEN_KEY)?)
            .ok_or(Error::MissingSession("Access token"))?;

        Ok(PaymentCredentials {
            username,
            access_token,
        })
    }

    /// Render the outcome, then apply and render any view transition
    fn finish(
        &self,
        area: OutputArea,
        result: Result<String>,
        fallback: &str,
        event: AuthEvent,
    ) -> ActionOutcome {
        let outcome = ActionOutcome::from_result(area, result, fallback);
        self.presenter.show_outcome(&outcome);

        if event != AuthEvent::Unchanged {
            let mode = {
                let mut view = self.view.lock().unwrap_or_else(|e| e.into_inner());
                *view = view.after(event);
                *view
            };
            self.presenter.show_view(mode);
        }

        outcome
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
