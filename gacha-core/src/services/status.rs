//! Status service - what the client currently holds

use std::sync::Arc;

use serde::Serialize;

use crate::config::Config;
use crate::domain::result::Result;
use crate::domain::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY};
use crate::ports::SessionStorage;

/// Session and configuration summary. Never contains token values.
#[derive(Debug, Serialize)]
pub struct StatusSummary {
    pub logged_username: Option<String>,
    pub has_access_token: bool,
    pub has_refresh_token: bool,
    pub auth_base_url: String,
    pub payment_base_url: String,
    pub accept_invalid_certs: bool,
}

/// Status service for session summaries
pub struct StatusService {
    storage: Arc<dyn SessionStorage>,
    config: Config,
}

impl StatusService {
    pub fn new(storage: Arc<dyn SessionStorage>, config: Config) -> Self {
        Self { storage, config }
    }

    /// Get the current status summary
    pub fn get_status(&self) -> Result<StatusSummary> {
        let present = |key: &str| -> Result<bool> {
            Ok(self.storage.get(key)?.map(|v| !v.is_empty()).unwrap_or(false))
        };

        Ok(StatusSummary {
            logged_username: self.storage.get(USERNAME_KEY)?.filter(|u| !u.is_empty()),
            has_access_token: present(ACCESS_TOKEN_KEY)?,
            has_refresh_token: present(REFRESH_TOKEN_KEY)?,
            auth_base_url: self.config.auth_base_url.clone(),
            payment_base_url: self.config.payment_base_url.clone(),
            accept_invalid_certs: self.config.accept_invalid_certs,
        })
    }
}
