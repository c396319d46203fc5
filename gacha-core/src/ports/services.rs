//! Remote service ports
//!
//! The auth and payment services are opaque collaborators. Implementations
//! perform exactly one request per call and never retry.

use serde::Deserialize;

use crate::domain::result::Result;
use crate::domain::{Balance, PaymentCredentials, PurchaseRequest, Transaction};

/// Tokens returned by a successful login
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl std::fmt::Debug for LoginTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("LoginTokens { .. }")
    }
}

/// Authentication service
///
/// Errors are `Error::Server` for non-2xx responses and `Error::Transport`
/// for network or body parse failures.
pub trait AuthApi: Send + Sync {
    /// `POST /login`
    fn login(&self, username: &str, password: &str) -> Result<LoginTokens>;

    /// `POST /signup`
    fn signup(&self, username: &str, password: &str, email: &str) -> Result<()>;

    /// `DELETE /logout`, authorized with the refresh token
    fn logout(&self, refresh_token: &str) -> Result<()>;
}

/// Payment service, authorized with the access token
pub trait PaymentApi: Send + Sync {
    /// `POST /buycurrency`
    fn buy_currency(
        &self,
        credentials: &PaymentCredentials,
        purchase: &PurchaseRequest,
    ) -> Result<Balance>;

    /// `GET /viewTrans?username=...`
    fn view_transactions(&self, credentials: &PaymentCredentials) -> Result<Vec<Transaction>>;
}
