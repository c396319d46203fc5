//! Session storage port - persistent key/value store for session entries

use crate::domain::result::Result;

/// Persistent string key/value storage
///
/// The session client reads and writes through this trait without any
/// coordination between actions; last write wins.
pub trait SessionStorage: Send + Sync {
    /// Read a value, `None` if the key was never set or has been cleared
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several values at once: either all are stored or none are
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<()>;

    /// Remove a single key
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove every entry
    fn clear(&self) -> Result<()>;
}
