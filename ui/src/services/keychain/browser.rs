use gloo_storage::{LocalStorage, Storage};

use super::{Keychain, KeychainError};

/// Keychain persisted in the browser's `localStorage`.
pub struct BrowserKeychain {
    prefix: String,
}

impl BrowserKeychain {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn storage_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

impl Keychain for BrowserKeychain {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::get::<String>(&self.storage_key(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        LocalStorage::set(&self.storage_key(key), value).map_err(|e| KeychainError::WriteFailed {
            key: key.to_string(),
            message: format!("{:?}", e),
        })
    }

    fn remove(&self, key: &str) {
        LocalStorage::delete(&self.storage_key(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_browser_keychain_round_trip() {
        let keychain = BrowserKeychain::new("keychain-test");
        keychain.set("legacy.currentUser", "{\"objectId\":\"u1\"}").unwrap();
        assert_eq!(
            keychain.get("legacy.currentUser").as_deref(),
            Some("{\"objectId\":\"u1\"}")
        );

        keychain.remove("legacy.currentUser");
        assert_eq!(keychain.get("legacy.currentUser"), None);
    }
}
