//! Shared secure-credential store
//!
//! Both SDKs keep their "current user" and "current installation" records
//! here, each under its own key namespace. The stored encoding is private to
//! each SDK.

mod memory;

#[cfg(target_arch = "wasm32")]
mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserKeychain;
pub use memory::MemoryKeychain;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::services::errors::ProviderError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KeychainError {
    #[error("Keychain write failed for '{key}': {message}")]
    WriteFailed { key: String, message: String },

    #[error("Keychain serialization failed for '{key}': {message}")]
    Serialization { key: String, message: String },
}

impl From<KeychainError> for ProviderError {
    fn from(err: KeychainError) -> Self {
        ProviderError::opaque(err.to_string())
    }
}

pub trait Keychain: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    fn remove(&self, key: &str);
}

/// Read and decode a JSON record. Undecodable entries count as absent.
pub fn load_json<T: DeserializeOwned>(keychain: &dyn Keychain, key: &str) -> Option<T> {
    let raw = keychain.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Discarding unreadable keychain entry '{}': {}", key, e);
            None
        }
    }
}

pub fn store_json<T: Serialize>(
    keychain: &dyn Keychain,
    key: &str,
    value: &T,
) -> Result<(), KeychainError> {
    let raw = serde_json::to_string(value).map_err(|e| KeychainError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    keychain.set(key, &raw)
}
