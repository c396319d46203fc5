//! Service layer - action orchestration
//!
//! Services coordinate domain logic and port interactions.

pub mod logging;
mod session;
mod status;

pub use logging::{ActionStats, EntryPoint, LogEntry, LogEvent, LogQuery, LoggingService};
pub use session::SessionClient;
pub use status::{StatusService, StatusSummary};
