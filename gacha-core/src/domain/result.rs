//! Result and error types for the core library

use serde::Serialize;
use thiserror::Error;

use super::view::OutputArea;

/// Core library error type
///
/// Only `Server` and `Transport` ever reach the user as distinct texts;
/// everything else is rendered through the transport path.
#[derive(Error, Debug)]
pub enum Error {
    /// Non-2xx response. `message` is the body's `Error` field, if any.
    #[error("{}", .message.as_deref().unwrap_or("request failed"))]
    Server { status: u16, message: Option<String> },

    #[error("{0}")]
    Transport(String),

    #[error("{0} not found. Please log in again.")]
    MissingSession(&'static str),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Text shown in the output area when this error ends an action.
    ///
    /// Server failures show the server's own text or `fallback`; every other
    /// kind is shown as `Error: <message>`.
    pub fn display_text(&self, fallback: &str) -> String {
        match self {
            Error::Server { message, .. } => message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
            other => format!("Error: {}", other),
        }
    }

    /// Short, credential-free classification for the event log
    pub fn details(&self) -> String {
        match self {
            Error::Server { status, .. } => format!("HTTP {}", status),
            Error::Transport(_) => "transport".to_string(),
            Error::MissingSession(field) => format!("missing session: {}", field),
            Error::Storage(_) => "storage".to_string(),
            Error::Input(_) => "input".to_string(),
            Error::Config(_) => "config".to_string(),
            Error::Io(_) => "io".to_string(),
            Error::Json(_) => "json".to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

/// The single UI update produced by one action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub area: OutputArea,
    pub message: String,
    pub success: bool,
    /// What kind of failure ended the action (`HTTP 401`, `transport`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ActionOutcome {
    /// Create a successful outcome
    pub fn ok(area: OutputArea, message: impl Into<String>) -> Self {
        Self {
            area,
            message: message.into(),
            success: true,
            details: None,
        }
    }

    /// Create a failed outcome
    pub fn fail(area: OutputArea, message: impl Into<String>) -> Self {
        Self {
            area,
            message: message.into(),
            success: false,
            details: None,
        }
    }

    /// Attach failure details
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Build an outcome from an action result, using `fallback` for server
    /// failures that carry no `Error` text
    pub fn from_result(area: OutputArea, result: Result<String>, fallback: &str) -> Self {
        match result {
            Ok(message) => Self::ok(area, message),
            Err(e) => Self::fail(area, e.display_text(fallback)).with_details(e.details()),
        }
    }
}
