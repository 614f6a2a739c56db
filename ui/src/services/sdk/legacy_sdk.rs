//! Legacy identity SDK
//!
//! Callback style: every remote operation runs on a background task and
//! reports through its completion exactly once. Records live in the shared
//! keychain under `legacy.*` in the legacy SDK's own encoding.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::services::client::{ParseClient, ParseInstallation, ParseUser};
use crate::services::errors::ProviderError;
use crate::services::keychain::{load_json, store_json, Keychain};
use crate::services::providers::{Account, Completion, Installation, LegacyProvider};
use crate::utils::spawn_background;

const CURRENT_USER_KEY: &str = "legacy.currentUser";
const CURRENT_INSTALLATION_KEY: &str = "legacy.currentInstallation";
const DEVICE_TYPE: &str = "web";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    object_id: String,
    username: Option<String>,
    session_token: Option<String>,
}

impl From<ParseUser> for StoredUser {
    fn from(user: ParseUser) -> Self {
        Self {
            object_id: user.object_id,
            username: user.username,
            session_token: user.session_token,
        }
    }
}

impl From<StoredUser> for Account {
    fn from(user: StoredUser) -> Self {
        Account {
            object_id: Some(user.object_id),
            username: user.username,
            session_token: user.session_token,
        }
    }
}

#[derive(Clone)]
pub struct LegacySdk {
    client: ParseClient,
    keychain: Arc<dyn Keychain>,
}

impl LegacySdk {
    /// Initialise the SDK, creating this device's installation record if the
    /// keychain has none yet.
    pub fn new(client: ParseClient, keychain: Arc<dyn Keychain>) -> Self {
        let sdk = Self { client, keychain };
        if sdk.current_installation().is_none() {
            let installation = Installation {
                object_id: None,
                installation_id: Some(Uuid::new_v4().to_string()),
                channels: Vec::new(),
                device_type: Some(DEVICE_TYPE.to_string()),
            };
            match store_json(sdk.keychain.as_ref(), CURRENT_INSTALLATION_KEY, &installation) {
                Ok(()) => info!(
                    "Created local installation {}",
                    installation.installation_id.as_deref().unwrap_or_default()
                ),
                Err(e) => warn!("Could not persist new installation: {}", e),
            }
        }
        sdk
    }

    fn installation_id(&self) -> Option<String> {
        self.current_installation()
            .and_then(|installation| installation.installation_id)
    }

    fn store_user(&self, user: ParseUser) -> Result<Account, ProviderError> {
        let stored = StoredUser::from(user);
        store_json(self.keychain.as_ref(), CURRENT_USER_KEY, &stored)?;
        Ok(stored.into())
    }

    async fn persist_installation(&self, mut installation: Installation) -> Result<(), ProviderError> {
        // The local mutation sticks even if the remote save fails.
        store_json(self.keychain.as_ref(), CURRENT_INSTALLATION_KEY, &installation)?;

        let body = ParseInstallation::from(&installation);
        match installation.object_id.clone() {
            Some(object_id) => self.client.update_installation(&object_id, &body).await?,
            None => {
                let object_id = self.client.create_installation(&body).await?;
                installation.object_id = Some(object_id);
                store_json(self.keychain.as_ref(), CURRENT_INSTALLATION_KEY, &installation)?;
            }
        }
        Ok(())
    }
}

impl LegacyProvider for LegacySdk {
    fn current_account(&self) -> Option<Account> {
        load_json::<StoredUser>(self.keychain.as_ref(), CURRENT_USER_KEY).map(Account::from)
    }

    fn current_installation(&self) -> Option<Installation> {
        load_json(self.keychain.as_ref(), CURRENT_INSTALLATION_KEY)
    }

    fn sign_up_in_background(&self, username: &str, password: &str, completion: Completion<Account>) {
        let sdk = self.clone();
        let username = username.to_string();
        let password = password.to_string();
        spawn_background(async move {
            let installation_id = sdk.installation_id();
            let result = match sdk
                .client
                .sign_up(&username, &password, installation_id.as_deref())
                .await
            {
                Ok(user) => sdk.store_user(user),
                Err(e) => Err(e.into()),
            };
            completion(result);
        });
    }

    fn log_in_in_background(&self, username: &str, password: &str, completion: Completion<Account>) {
        let sdk = self.clone();
        let username = username.to_string();
        let password = password.to_string();
        spawn_background(async move {
            let installation_id = sdk.installation_id();
            let result = match sdk
                .client
                .log_in(&username, &password, installation_id.as_deref())
                .await
            {
                Ok(user) => sdk.store_user(user),
                Err(e) => Err(e.into()),
            };
            completion(result);
        });
    }

    fn log_out_in_background(&self, completion: Completion<()>) {
        let session_token = self
            .current_account()
            .and_then(|account| account.session_token);
        self.keychain.remove(CURRENT_USER_KEY);

        let sdk = self.clone();
        spawn_background(async move {
            let result = match session_token {
                Some(token) => sdk.client.log_out(&token).await.map_err(ProviderError::from),
                None => Ok(()),
            };
            completion(result);
        });
    }

    fn become_in_background(&self, session_token: &str, completion: Completion<Account>) {
        let sdk = self.clone();
        let session_token = session_token.to_string();
        spawn_background(async move {
            let result = match sdk.client.current_user_for_token(&session_token).await {
                Ok(user) => sdk.store_user(user),
                Err(e) => Err(e.into()),
            };
            completion(result);
        });
    }

    fn save_installation_in_background(&self, installation: Installation, completion: Completion<()>) {
        let sdk = self.clone();
        spawn_background(async move {
            completion(sdk.persist_installation(installation).await);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::config::AppConfig;
    use crate::services::keychain::MemoryKeychain;

    fn sdk_with(keychain: Arc<MemoryKeychain>) -> LegacySdk {
        let client = ParseClient::new(AppConfig::default()).unwrap();
        LegacySdk::new(client, keychain)
    }

    #[test]
    fn test_new_sdk_creates_local_installation_once() {
        let keychain = Arc::new(MemoryKeychain::new());
        let sdk = sdk_with(keychain.clone());

        let installation = sdk.current_installation().unwrap();
        assert!(installation.object_id.is_none());
        assert!(installation.channels.is_empty());
        assert_eq!(installation.device_type.as_deref(), Some("web"));

        let again = sdk_with(keychain);
        assert_eq!(
            again.current_installation().unwrap().installation_id,
            installation.installation_id
        );
    }

    #[test]
    fn test_current_account_reads_legacy_encoding() {
        let keychain = Arc::new(MemoryKeychain::new());
        keychain
            .set(
                CURRENT_USER_KEY,
                r#"{"objectId":"u1","username":"alice","sessionToken":"r:tok"}"#,
            )
            .unwrap();

        let account = sdk_with(keychain).current_account().unwrap();
        assert_eq!(account.object_id.as_deref(), Some("u1"));
        assert_eq!(account.session_token.as_deref(), Some("r:tok"));
    }

    #[tokio::test]
    async fn test_log_out_without_session_clears_locally_and_succeeds() {
        let keychain = Arc::new(MemoryKeychain::new());
        keychain
            .set(CURRENT_USER_KEY, r#"{"objectId":"u1","username":null,"sessionToken":null}"#)
            .unwrap();
        let sdk = sdk_with(keychain);

        let result = crate::services::providers::resolve("log out", |done| {
            sdk.log_out_in_background(done)
        })
        .await;

        assert_eq!(result, Ok(()));
        assert!(sdk.current_account().is_none());
    }
}
