//! Gacha Core - session client for the gacha auth and payment services
//!
//! This crate follows hexagonal architecture:
//!
//! - **domain**: Session, Transaction, view modes and action outcomes
//! - **ports**: Trait definitions for storage, remote services and the UI
//! - **services**: The session client and supporting services
//! - **adapters**: Concrete implementations (reqwest clients, file storage)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use adapters::{build_client, AuthClient, FileSessionStorage, PaymentClient};
use config::Config;
use ports::{Presenter, SessionStorage};
use services::*;

// Re-export commonly used types at crate root
pub use domain::{ActionOutcome, OutputArea, PurchaseRequest, Session, Transaction, ViewMode};
pub use domain::result::Error;
pub use services::{EntryPoint, LogEvent, LoggingService, SessionClient};

/// Main context for client operations
///
/// Holds the configuration, the persistent session storage, and the
/// services built on top of them.
pub struct GachaContext {
    pub config: Config,
    pub data_dir: PathBuf,
    pub storage: Arc<FileSessionStorage>,
    pub session_client: SessionClient,
    pub status_service: StatusService,
}

impl GachaContext {
    /// Create a context rooted at `data_dir`, rendering through `presenter`
    pub fn new(data_dir: &Path, presenter: Arc<dyn Presenter>) -> Result<Self> {
        let config = Config::load(data_dir)?;

        let storage = Arc::new(
            FileSessionStorage::new(data_dir).context("Failed to open session storage")?,
        );

        let http = build_client(&config.http_settings())?;
        let auth = AuthClient::new(http.clone(), &config.auth_base_url)?;
        let payment = PaymentClient::new(http, &config.payment_base_url)?;

        let shared: Arc<dyn SessionStorage> = storage.clone();
        let session_client =
            SessionClient::new(Arc::clone(&shared), Arc::new(auth), Arc::new(payment))
                .with_presenter(presenter);
        let status_service = StatusService::new(shared, config.clone());

        Ok(Self {
            config,
            data_dir: data_dir.to_path_buf(),
            storage,
            session_client,
            status_service,
        })
    }
}
