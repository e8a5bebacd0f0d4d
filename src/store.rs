//! Durable key-value storage for the playlist, favorites and history.
//!
//! Values are JSON strings. Callers go through [`load_or_default`] and
//! [`save`] so a missing or corrupt record always degrades to an empty
//! default instead of failing the caller.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const PLAYLIST_KEY: &str = "playlist";
pub const FAVORITES_KEY: &str = "favorites";
pub const RECENTLY_PLAYED_KEY: &str = "recentlyPlayed";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not write {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal key-value store. Implementations decide where bytes live.
pub trait Store {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

/// Read and decode `key`. Absent or undecodable values yield `T::default()`.
pub fn load_or_default<T>(store: &dyn Store, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };

    match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding corrupt stored value");
            T::default()
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn save<T>(store: &mut dyn Store, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, raw)
}

#[cfg(test)]
mod tests;
