//! Session domain model

use serde::{Deserialize, Serialize};

/// Storage key for the access token
pub const ACCESS_TOKEN_KEY: &str = "access_token";
/// Storage key for the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Storage key for the logged-in username
pub const USERNAME_KEY: &str = "logged_username";

/// All keys written on login and removed on logout
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY];

/// Tokens and username held between login and logout
///
/// There is no expiry or refresh: the access token is reused verbatim for
/// every authorized call until logout.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub username: String,
}

impl Session {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            username: username.into(),
        }
    }

    /// Key/value pairs as they are persisted
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (ACCESS_TOKEN_KEY, self.access_token.as_str()),
            (REFRESH_TOKEN_KEY, self.refresh_token.as_str()),
            (USERNAME_KEY, self.username.as_str()),
        ]
    }
}

// Tokens stay out of debug output and logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("username", &self.username)
            .finish()
    }
}

/// Credentials needed by the payment service calls
#[derive(Clone, PartialEq, Eq)]
pub struct PaymentCredentials {
    pub username: String,
    pub access_token: String,
}
