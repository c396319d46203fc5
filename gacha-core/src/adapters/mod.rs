//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP clients for the auth and payment services
//! - a JSON file for persistent session storage
//! - an in-memory map for embedded use and tests

pub mod auth;
pub mod file_storage;
pub mod http;
pub mod memory_storage;
pub mod payment;

#[cfg(test)]
pub mod mock_server;

pub use auth::{AuthClient, DEFAULT_AUTH_URL};
pub use file_storage::FileSessionStorage;
pub use http::{build_client, HttpSettings};
pub use memory_storage::MemorySessionStorage;
pub use payment::{PaymentClient, DEFAULT_PAYMENT_URL};
