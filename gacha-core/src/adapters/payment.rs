//! Payment service HTTP client
//!
//! `POST /buycurrency` and `GET /viewTrans` under the payment base path,
//! both authorized with the session's access token.

use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

use super::http::{map_request_error, normalize_base_url, read_json};
use crate::domain::result::{Error, Result};
use crate::domain::{Balance, PaymentCredentials, PurchaseRequest, Transaction};
use crate::ports::PaymentApi;

/// Default payment service base URL
pub const DEFAULT_PAYMENT_URL: &str = "https://localhost:5001/payment_service";

/// Successful `/buycurrency` body
#[derive(Debug, Deserialize)]
struct BuyCurrencyResponse {
    balance: Balance,
}

/// Payment service client
#[derive(Debug, Clone)]
pub struct PaymentClient {
    client: Client,
    base_url: String,
}

impl PaymentClient {
    /// Create a client for the service at `base_url`
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `/viewTrans` URL with the username as a query parameter
    fn view_transactions_url(&self, username: &str) -> Result<Url> {
        Url::parse_with_params(
            &format!("{}/viewTrans", self.base_url),
            &[("username", username)],
        )
        .map_err(|e| Error::Config(format!("Invalid payment service URL: {}", e)))
    }
}

impl PaymentApi for PaymentClient {
    fn buy_currency(
        &self,
        credentials: &PaymentCredentials,
        purchase: &PurchaseRequest,
    ) -> Result<Balance> {
        let response = self
            .client
            .post(format!("{}/buycurrency", self.base_url))
            .bearer_auth(&credentials.access_token)
            .form(&[
                ("username", credentials.username.as_str()),
                ("amount", purchase.amount.as_str()),
                ("payment_method", purchase.payment_method.as_str()),
            ])
            .send()
            .map_err(|e| map_request_error("payment", e))?;

        let body: BuyCurrencyResponse = read_json(response)?;
        Ok(body.balance)
    }

    fn view_transactions(&self, credentials: &PaymentCredentials) -> Result<Vec<Transaction>> {
        let url = self.view_transactions_url(&credentials.username)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&credentials.access_token)
            .send()
            .map_err(|e| map_request_error("payment", e))?;

        read_json(response)
    }
}
