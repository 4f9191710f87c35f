//! Shared key-value store.
//!
//! The app and the widget run as separate processes and share state only
//! through this store. Each `set` replaces the whole value under one key
//! atomically, so readers see either the old value or the new one, never a
//! mix. There is no cross-key transaction; last writer wins.

mod error;
mod file;
mod memory;

use serde::Serialize;
use serde::de::DeserializeOwned;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// A namespace of byte values addressed by string keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the value under `key`.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;
}

/// Read and decode a JSON value.
pub fn load_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode and write a JSON value.
pub fn save_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &bytes)
}
