//! Auth service HTTP client
//!
//! `POST /login`, `POST /signup`, `DELETE /logout` under the auth base path.

use reqwest::blocking::Client;

use super::http::{expect_success, map_request_error, normalize_base_url, read_json};
use crate::domain::result::Result;
use crate::ports::{AuthApi, LoginTokens};

/// Default auth service base URL
pub const DEFAULT_AUTH_URL: &str = "https://localhost:5001/auth_service";

/// Auth service client
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
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

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl AuthApi for AuthClient {
    fn login(&self, username: &str, password: &str) -> Result<LoginTokens> {
        let response = self
            .client
            .post(self.url("login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .map_err(|e| map_request_error("auth", e))?;

        read_json(response)
    }

    fn signup(&self, username: &str, password: &str, email: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("signup"))
            .form(&[("username", username), ("password", password), ("email", email)])
            .send()
            .map_err(|e| map_request_error("auth", e))?;

        // Success body is `{}`; it must still be JSON
        read_json::<serde_json::Value>(response).map(|_| ())
    }

    fn logout(&self, refresh_token: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url("logout"))
            .bearer_auth(refresh_token)
            .send()
            .map_err(|e| map_request_error("auth", e))?;

        expect_success(response)
    }
}
