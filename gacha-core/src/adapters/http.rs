//! Shared HTTP plumbing for the auth and payment clients

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use url::Url;

use crate::domain::result::{Error, Result};

/// Connection settings shared by both service clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    /// Skip TLS certificate validation (self-signed local services)
    pub accept_invalid_certs: bool,
    /// `None` waits for as long as the server takes
    pub timeout: Option<Duration>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            timeout: None,
        }
    }
}

/// Build a blocking client with a cookie store, so credentials set by the
/// auth service are sent back on later requests
pub fn build_client(settings: &HttpSettings) -> Result<Client> {
    Client::builder()
        .cookie_store(true)
        .danger_accept_invalid_certs(settings.accept_invalid_certs)
        .timeout(settings.timeout)
        .build()
        .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))
}

/// Validate a service base URL and strip any trailing slash
pub fn normalize_base_url(base_url: &str) -> Result<String> {
    let parsed = Url::parse(base_url)
        .map_err(|e| Error::Config(format!("Invalid service URL '{}': {}", base_url, e)))?;

    match parsed.scheme() {
        "https" | "http" => {}
        other => {
            return Err(Error::Config(format!(
                "Service URL must use https or http, got '{}'",
                other
            )))
        }
    }

    Ok(base_url.trim_end_matches('/').to_string())
}

/// Body of a failed response: `{"Error": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "Error", default)]
    error: Option<JsonValue>,
}

/// Map request errors to user-friendly messages
pub(crate) fn map_request_error(service: &str, error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::transport(format!("{} service request timed out", service))
    } else if error.is_connect() {
        Error::transport(format!("Unable to connect to the {} service", service))
    } else {
        Error::transport(format!("{} service request failed: {}", service, error))
    }
}

/// Turn a non-2xx response into `Error::Server`
///
/// The error body must be JSON; anything else is a transport failure.
pub(crate) fn server_error(response: Response) -> Error {
    let status = response.status().as_u16();
    let body = match response.text() {
        Ok(body) => body,
        Err(e) => return Error::transport(e.to_string()),
    };

    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(parsed) => Error::Server {
            status,
            message: parsed.error.and_then(error_text),
        },
        Err(e) => Error::transport(format!(
            "Invalid response from server (HTTP {}): {}",
            status, e
        )),
    }
}

/// Read a 2xx JSON body, or convert the response into an error
pub(crate) fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(server_error(response));
    }

    let body = response.text().map_err(|e| Error::transport(e.to_string()))?;
    serde_json::from_str(&body)
        .map_err(|e| Error::transport(format!("Invalid response from server: {}", e)))
}

/// Require a 2xx status and ignore the body
pub(crate) fn expect_success(response: Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(server_error(response))
    }
}

fn error_text(value: JsonValue) -> Option<String> {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
