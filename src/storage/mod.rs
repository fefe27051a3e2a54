//! Client-side key/value storage
//!
//! The dashboard keeps three small values between page loads: the theme
//! name, the doctor session and the monitor selection. This module abstracts
//! `localStorage` behind [`KeyValueStore`] so controllers can be driven by an
//! in-memory store in tests and a JSON file in the terminal monitor.
//!
//! - **memory**: `MemoryStore`, process-local
//! - **file**: `FileStore`, one JSON object on disk
//! - **error**: Error types

pub mod error;
pub mod file;
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Key holding the theme name
pub const THEME_KEY: &str = "citycare_theme";
/// Key holding the doctor login session
pub const DOCTOR_SESSION_KEY: &str = "doctor_session";
/// Key holding the last monitor selection
pub const MONITOR_SESSION_KEY: &str = "monitor_session";
/// Key holding a backend URL override (browser only)
pub const API_URL_KEY: &str = "citycare_api_url";

/// String key/value store with `localStorage` semantics
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// Read and decode a JSON value stored under `key`
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get_item(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`
pub fn write_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let raw = serde_json::to_string(value)?;
    store.set_item(key, &raw)
}
