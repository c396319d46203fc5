//! View model - which panels are visible and where results go

use serde::{Deserialize, Serialize};

/// The two UI modes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Login and signup panels visible
    #[default]
    Unauthenticated,
    /// Service menu visible
    Authenticated,
}

/// Outcome of the last auth action, as far as the view is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    LoginSucceeded,
    LogoutSucceeded,
    /// Any other outcome, including failed logins and logouts
    Unchanged,
}

impl ViewMode {
    /// Next mode after an auth event. Token validity is never consulted.
    pub fn after(self, event: AuthEvent) -> ViewMode {
        match event {
            AuthEvent::LoginSucceeded => ViewMode::Authenticated,
            AuthEvent::LogoutSucceeded => ViewMode::Unauthenticated,
            AuthEvent::Unchanged => self,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, ViewMode::Authenticated)
    }
}

/// Dedicated result area for each action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputArea {
    LoginResult,
    SignupResult,
    LogoutResult,
    /// Shared by buy-currency and view-transactions
    ServiceResult,
}

impl OutputArea {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputArea::LoginResult => "login-result",
            OutputArea::SignupResult => "signup-result",
            OutputArea::LogoutResult => "logout-result",
            OutputArea::ServiceResult => "service-result",
        }
    }
}
