//! File-backed session storage
//!
//! Entries live in `session.json` in the data directory. Every read and
//! write takes an OS file lock on `session.lock`, so several processes (or
//! threads) never observe a half-written file. There is no coordination
//! beyond that: concurrent writers simply race and the last one wins.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::result::{Error, Result};
use crate::ports::SessionStorage;

const SESSION_FILE: &str = "session.json";
const LOCK_FILE: &str = "session.lock";

type Entries = BTreeMap<String, String>;

/// Session storage persisted as a JSON object on disk
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
    lock_path: PathBuf,
}

impl FileSessionStorage {
    /// Storage rooted at `dir`; the directory is created if needed
    pub fn new(dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SESSION_FILE),
            lock_path: dir.join(LOCK_FILE),
        })
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock(&self) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .map_err(|e| Error::storage(format!("Failed to open session lock: {}", e)))
    }

    fn read_entries(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&content)
            .map_err(|e| Error::storage(format!("Corrupt session file {:?}: {}", self.path, e)))
    }

    fn write_entries(&self, entries: &Entries) -> Result<()> {
        let tmp_path = self.path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&tmp_path, content)?;
        restrict_permissions(&tmp_path)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn with_shared<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let lock = self.open_lock()?;
        lock.lock_shared()
            .map_err(|e| Error::storage(format!("Failed to lock session: {}", e)))?;
        let result = f(self);
        let _ = lock.unlock();
        result
    }

    fn with_exclusive<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let lock = self.open_lock()?;
        lock.lock_exclusive()
            .map_err(|e| Error::storage(format!("Failed to lock session: {}", e)))?;
        let result = f(self);
        let _ = lock.unlock();
        result
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.with_shared(|s| Ok(s.read_entries()?.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_exclusive(|s| {
            let mut entries = s.read_entries()?;
            entries.insert(key.to_string(), value.to_string());
            s.write_entries(&entries)
        })
    }

    fn set_many(&self, pairs: &[(&str, &str)]) -> Result<()> {
        self.with_exclusive(|s| {
            let mut entries = s.read_entries()?;
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
            s.write_entries(&entries)
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_exclusive(|s| {
            let mut entries = s.read_entries()?;
            if entries.remove(key).is_some() {
                s.write_entries(&entries)?;
            }
            Ok(())
        })
    }

    fn clear(&self) -> Result<()> {
        self.with_exclusive(|s| {
            if s.path.exists() {
                std::fs::remove_file(&s.path)?;
            }
            Ok(())
        })
    }
}

/// Tokens are credentials: owner read/write only
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
