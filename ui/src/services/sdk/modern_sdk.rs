//! Modern identity SDK
//!
//! Suspending operations over the same REST client. Records live in the
//! shared keychain under `modern.*`. The installation starts absent and only
//! appears once one is saved or adopted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::services::client::{ParseClient, ParseInstallation};
use crate::services::errors::ProviderError;
use crate::services::keychain::{load_json, store_json, Keychain};
use crate::services::providers::{Account, Installation, ModernProvider};

const CURRENT_USER_KEY: &str = "modern.currentUser";
const CURRENT_INSTALLATION_KEY: &str = "modern.currentInstallation";

#[derive(Clone)]
pub struct ModernSdk {
    client: ParseClient,
    keychain: Arc<dyn Keychain>,
}

impl ModernSdk {
    pub fn new(client: ParseClient, keychain: Arc<dyn Keychain>) -> Self {
        Self { client, keychain }
    }

    fn store_account(&self, account: Account) -> Result<Account, ProviderError> {
        store_json(self.keychain.as_ref(), CURRENT_USER_KEY, &account)?;
        Ok(account)
    }

    fn store_installation(&self, installation: Installation) -> Result<Installation, ProviderError> {
        store_json(self.keychain.as_ref(), CURRENT_INSTALLATION_KEY, &installation)?;
        Ok(installation)
    }

    fn installation_id(&self) -> Option<String> {
        self.current_installation()
            .and_then(|installation| installation.installation_id)
    }
}

#[async_trait(?Send)]
impl ModernProvider for ModernSdk {
    fn current_account(&self) -> Option<Account> {
        load_json(self.keychain.as_ref(), CURRENT_USER_KEY)
    }

    fn current_installation(&self) -> Option<Installation> {
        load_json(self.keychain.as_ref(), CURRENT_INSTALLATION_KEY)
    }

    async fn sign_up(&self, username: &str, password: &str) -> Result<Account, ProviderError> {
        let installation_id = self.installation_id();
        let user = self
            .client
            .sign_up(username, password, installation_id.as_deref())
            .await?;
        self.store_account(user.into())
    }

    async fn log_in(&self, username: &str, password: &str) -> Result<Account, ProviderError> {
        let installation_id = self.installation_id();
        let user = self
            .client
            .log_in(username, password, installation_id.as_deref())
            .await?;
        self.store_account(user.into())
    }

    async fn log_out(&self) -> Result<(), ProviderError> {
        let session_token = self
            .current_account()
            .and_then(|account| account.session_token);
        self.keychain.remove(CURRENT_USER_KEY);

        match session_token {
            Some(token) => {
                self.client.log_out(&token).await?;
                info!("Modern session revoked");
                Ok(())
            }
            None => Ok(()),
        }
    }

    async fn become_account(&self, session_token: &str) -> Result<Account, ProviderError> {
        let user = self.client.current_user_for_token(session_token).await?;
        info!("Adopted session for user {}", user.object_id);
        self.store_account(user.into())
    }

    async fn save_installation(&self, installation: Installation) -> Result<Installation, ProviderError> {
        let body = ParseInstallation::from(&installation);
        let mut saved = installation;
        match saved.object_id.clone() {
            Some(object_id) => self.client.update_installation(&object_id, &body).await?,
            None => saved.object_id = Some(self.client.create_installation(&body).await?),
        }
        self.store_installation(saved)
    }

    async fn become_installation(&self, object_id: &str) -> Result<Installation, ProviderError> {
        let installation: Installation = self.client.fetch_installation(object_id).await?.into();
        if installation.installation_id.is_none() {
            warn!("Installation {} has no installationId", object_id);
        }
        info!("Adopted installation {}", object_id);
        self.store_installation(installation)
    }
}
