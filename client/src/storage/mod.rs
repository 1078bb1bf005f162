//! Durable client-side token storage.
//!
//! The browser original keeps tokens in localStorage; here the same contract
//! is a small key/value store behind the `TokenStorage` trait, with a
//! file-backed implementation for real hosts and an in-memory one for tests.
//! Values are plain strings, no encryption. Only `SessionStore` operations
//! write through this trait, so the store is single-writer by construction.

use anyhow::Context;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::errors::ClientResult;

/// Storage key for the bearer access token.
pub const ACCESS_TOKEN_KEY: &str = "pawhaven.access_token";
/// Storage key for the optional refresh token.
pub const REFRESH_TOKEN_KEY: &str = "pawhaven.refresh_token";

/// Key/value persistence surviving process restarts.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

/// File-backed storage: a JSON object map at a configured path.
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> ClientResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading token store {}", self.path.display()))?;
        let entries = serde_json::from_str(&raw)
            .with_context(|| format!("parsing token store {}", self.path.display()))?;
        Ok(entries)
    }

    fn save(&self, entries: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating token store dir {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(entries).context("serializing token store")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("writing token store {}", self.path.display()))?;
        Ok(())
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral hosts.
#[derive(Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}
