//! Callback-to-future bridge for the legacy provider
//!
//! Each legacy call gets a oneshot channel; its completion sends the result
//! and the awaiting task resumes on its own executor, whatever thread the
//! completion fired on.

use std::rc::Rc;

use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::traits::{Completion, LegacyProvider};
use super::types::{Account, Installation};
use crate::services::errors::ProviderError;

/// Run a callback-style operation and wait for its single completion.
///
/// A completion that is dropped without being called resolves to an opaque
/// error instead of hanging.
pub async fn resolve<T, F>(operation: &str, start: F) -> Result<T, ProviderError>
where
    T: Send + 'static,
    F: FnOnce(Completion<T>),
{
    let (tx, rx) = oneshot::channel();
    start(Box::new(move |result| {
        // The waiter may have gone away; nothing left to notify then.
        let _ = tx.send(result);
    }));

    match rx.await {
        Ok(result) => {
            debug!("Legacy {} completed (ok: {})", operation, result.is_ok());
            result
        }
        Err(_) => {
            warn!("Legacy {} dropped its completion without calling it", operation);
            Err(ProviderError::opaque(format!(
                "The legacy {} request ended without a result",
                operation
            )))
        }
    }
}

/// Suspending view over a [`LegacyProvider`].
#[derive(Clone)]
pub struct LegacyBridge {
    provider: Rc<dyn LegacyProvider>,
}

impl LegacyBridge {
    pub fn new(provider: Rc<dyn LegacyProvider>) -> Self {
        Self { provider }
    }

    pub fn current_account(&self) -> Option<Account> {
        self.provider.current_account()
    }

    pub fn current_installation(&self) -> Option<Installation> {
        self.provider.current_installation()
    }

    pub async fn sign_up(&self, username: &str, password: &str) -> Result<Account, ProviderError> {
        resolve("sign up", |done| {
            self.provider.sign_up_in_background(username, password, done)
        })
        .await
    }

    pub async fn log_in(&self, username: &str, password: &str) -> Result<Account, ProviderError> {
        resolve("log in", |done| {
            self.provider.log_in_in_background(username, password, done)
        })
        .await
    }

    pub async fn log_out(&self) -> Result<(), ProviderError> {
        resolve("log out", |done| self.provider.log_out_in_background(done)).await
    }

    pub async fn become_account(&self, session_token: &str) -> Result<Account, ProviderError> {
        resolve("become", |done| {
            self.provider.become_in_background(session_token, done)
        })
        .await
    }

    pub async fn save_installation(&self, installation: Installation) -> Result<(), ProviderError> {
        resolve("installation save", |done| {
            self.provider.save_installation_in_background(installation, done)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[tokio::test]
    async fn test_resolve_completion_from_another_thread() {
        let result: Result<u32, ProviderError> = resolve("test", |done| {
            thread::spawn(move || done(Ok(7)));
        })
        .await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test]
    async fn test_resolve_passes_errors_through() {
        let result: Result<(), ProviderError> = resolve("test", |done| {
            done(Err(ProviderError::structured(209, "Invalid session token")));
        })
        .await;
        assert_eq!(
            result,
            Err(ProviderError::structured(209, "Invalid session token"))
        );
    }

    #[tokio::test]
    async fn test_dropped_completion_resolves_to_opaque_error() {
        let result: Result<(), ProviderError> = resolve("log out", |done| drop(done)).await;
        match result {
            Err(ProviderError::Opaque { description }) => {
                assert_eq!(description, "The legacy log out request ended without a result");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
