//! Contracts for the two identity providers
//!
//! The legacy provider reports every remote operation through a completion
//! callback that may fire on any thread. The modern provider exposes
//! suspending operations. Both expose synchronous reads of their cached
//! local state.

use async_trait::async_trait;

use super::types::{Account, Installation};
use crate::services::errors::ProviderError;

/// Single-shot completion handed to a legacy background operation
pub type Completion<T> = Box<dyn FnOnce(Result<T, ProviderError>) + Send + 'static>;

pub trait LegacyProvider {
    fn current_account(&self) -> Option<Account>;

    /// Every device has one once the provider is initialised.
    fn current_installation(&self) -> Option<Installation>;

    fn sign_up_in_background(&self, username: &str, password: &str, completion: Completion<Account>);

    fn log_in_in_background(&self, username: &str, password: &str, completion: Completion<Account>);

    /// Clears the local account whatever the remote outcome.
    fn log_out_in_background(&self, completion: Completion<()>);

    fn become_in_background(&self, session_token: &str, completion: Completion<Account>);

    /// Stores `installation` as current, then persists it remotely.
    fn save_installation_in_background(&self, installation: Installation, completion: Completion<()>);
}

#[async_trait(?Send)]
pub trait ModernProvider {
    fn current_account(&self) -> Option<Account>;

    /// Absent until an installation has been adopted or saved.
    fn current_installation(&self) -> Option<Installation>;

    async fn sign_up(&self, username: &str, password: &str) -> Result<Account, ProviderError>;

    async fn log_in(&self, username: &str, password: &str) -> Result<Account, ProviderError>;

    /// Clears the local account whatever the remote outcome.
    async fn log_out(&self) -> Result<(), ProviderError>;

    /// Adopt an already-authenticated session without credentials.
    async fn become_account(&self, session_token: &str) -> Result<Account, ProviderError>;

    async fn save_installation(&self, installation: Installation) -> Result<Installation, ProviderError>;

    /// Adopt the remote installation `object_id` as this device's record.
    async fn become_installation(&self, object_id: &str) -> Result<Installation, ProviderError>;
}
