//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The session client
//! depends only on these traits, not on concrete implementations.

mod services;
mod storage;
mod ui;

pub use services::{AuthApi, LoginTokens, PaymentApi};
pub use storage::SessionStorage;
pub use ui::{NullPresenter, Presenter, PurchaseInput};
