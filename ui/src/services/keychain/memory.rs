use std::collections::HashMap;
use std::sync::RwLock;

use super::{Keychain, KeychainError};

/// Process-local keychain. Used natively and in tests.
#[derive(Debug, Default)]
pub struct MemoryKeychain {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKeychain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Keychain for MemoryKeychain {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        let mut entries = self.entries.write().map_err(|e| KeychainError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let keychain = MemoryKeychain::new();
        assert!(keychain.is_empty());

        keychain.set("modern.currentUser", "{}").unwrap();
        assert_eq!(keychain.get("modern.currentUser").as_deref(), Some("{}"));
        assert_eq!(keychain.len(), 1);

        keychain.remove("modern.currentUser");
        assert_eq!(keychain.get("modern.currentUser"), None);
        assert!(keychain.is_empty());
    }
}
