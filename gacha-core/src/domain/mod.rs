//! Core domain entities
//!
//! Pure data structures with formatting and transition logic - no I/O.

mod purchase;
pub mod result;
pub mod session;
pub mod transaction;
pub mod view;

pub use purchase::{Balance, PurchaseRequest};
pub use result::{ActionOutcome, Error, Result};
pub use session::{PaymentCredentials, Session};
pub use transaction::{Transaction, TransactionDate};
pub use view::{AuthEvent, OutputArea, ViewMode};
