//! Migration workflow controller
//!
//! Drives the legacy → modern handoff for the current account and for this
//! device's installation, and publishes one [`MigrationState`] that the
//! presentation layer watches.
//!
//! Every modern-provider step starts only after the legacy step it depends
//! on has fully succeeded. Mutating operations are serialized: a second
//! intent waits until the first one, including its handoff, has settled.

use std::rc::Rc;
use std::sync::Arc;

use tokio::sync::{watch, Mutex, MutexGuard};
use tracing::{error, info, instrument, warn};

use super::intents::MigrationIntent;
use super::types::*;
use crate::services::client::{ClientError, ParseClient};
use crate::services::config::AppConfig;
use crate::services::errors::{MigrationError, MigrationResult, PreconditionError, ProviderError};
use crate::services::keychain::Keychain;
use crate::services::providers::{Account, LegacyBridge, LegacyProvider, ModernProvider};
use crate::services::sdk::{LegacySdk, ModernSdk};

const SIGN_UP_FALLBACK: &str = "Could not sign up";
const LOG_IN_FALLBACK: &str = "Could not log in";
const LOG_OUT_FALLBACK: &str = "Could not log out";
const SAVE_INSTALLATION_FALLBACK: &str = "Could not save installation";

#[derive(Clone, Copy, Debug)]
enum Credentials {
    SignUp,
    LogIn,
}

impl Credentials {
    fn fallback(self) -> &'static str {
        match self {
            Credentials::SignUp => SIGN_UP_FALLBACK,
            Credentials::LogIn => LOG_IN_FALLBACK,
        }
    }
}

pub struct MigrationController {
    config: AppConfig,
    legacy: LegacyBridge,
    modern: Rc<dyn ModernProvider>,
    state: watch::Sender<MigrationState>,
    operation_lock: Mutex<()>,
}

/// Holds the operation lock and keeps `busy` set while alive.
struct OperationGuard<'a> {
    controller: &'a MigrationController,
    _lock: MutexGuard<'a, ()>,
}

impl Drop for OperationGuard<'_> {
    fn drop(&mut self) {
        self.controller.dispatch(MigrationAction::SetBusy(false));
    }
}

impl MigrationController {
    /// Build a controller over two providers and load their current state.
    pub fn new(
        config: AppConfig,
        legacy: Rc<dyn LegacyProvider>,
        modern: Rc<dyn ModernProvider>,
    ) -> Self {
        let (state, _) = watch::channel(MigrationState::default());
        let controller = Self {
            config,
            legacy: LegacyBridge::new(legacy),
            modern,
            state,
            operation_lock: Mutex::new(()),
        };
        controller.refresh_all_state();
        controller
    }

    /// Controller over the Parse-backed SDKs sharing `keychain`.
    pub fn with_parse_sdks(config: AppConfig, keychain: Arc<dyn Keychain>) -> Result<Self, ClientError> {
        let client = ParseClient::new(config.clone())?;
        let legacy = LegacySdk::new(client.clone(), keychain.clone());
        let modern = ModernSdk::new(client, keychain);
        Ok(Self::new(config, Rc::new(legacy), Rc::new(modern)))
    }

    /// Receiver that is notified once per applied action.
    pub fn subscribe(&self) -> watch::Receiver<MigrationState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> MigrationState {
        self.state.borrow().clone()
    }

    pub fn view(&self) -> ViewState {
        self.state.borrow().view.clone()
    }

    /// Entry point for the presentation layer.
    pub async fn handle(&self, intent: MigrationIntent) {
        info!("Handling intent: {:?}", intent);
        match intent {
            MigrationIntent::SignUp { username, password } => self.sign_up(&username, &password).await,
            MigrationIntent::LogIn { username, password } => self.log_in(&username, &password).await,
            MigrationIntent::LogOutLegacy => self.log_out_legacy().await,
            MigrationIntent::LogOutModern => self.log_out_modern().await,
            MigrationIntent::SaveInstallation => self.save_installation().await,
            MigrationIntent::RetrySessionHandoff => self.retry_session_handoff().await,
            MigrationIntent::Refresh => self.refresh_all_state(),
        }
    }

    /// Create the account with the legacy provider, then hand the session
    /// off to the modern provider.
    #[instrument(skip(self, password))]
    pub async fn sign_up(&self, username: &str, password: &str) {
        self.run_authentication(Credentials::SignUp, username, password)
            .await
    }

    /// Log in with the legacy provider, then hand the session off to the
    /// modern provider.
    #[instrument(skip(self, password))]
    pub async fn log_in(&self, username: &str, password: &str) {
        self.run_authentication(Credentials::LogIn, username, password)
            .await
    }

    /// Re-run the handoff for the current legacy session. The only way out
    /// of `MigrationFailed`; nothing retries on its own.
    pub async fn retry_session_handoff(&self) {
        let _operation = self.begin().await;
        match self.legacy.current_account() {
            Some(account) => {
                self.dispatch(MigrationAction::ClearError);
                self.hand_off_session(&account).await;
            }
            None => self.report(&MigrationError::from(PreconditionError::NotLoggedIn), LOG_IN_FALLBACK),
        }
    }

    /// Log out of the legacy provider. The legacy session is gone afterwards
    /// whatever the transport outcome; the modern provider is then logged
    /// out too when configured to cascade.
    pub async fn log_out_legacy(&self) {
        let _operation = self.begin().await;

        let legacy_result = self.legacy.log_out().await;
        self.refresh_after_legacy_logout();
        match legacy_result {
            Ok(()) => self.dispatch(MigrationAction::ClearError),
            Err(err) => self.report(&MigrationError::from(err), LOG_OUT_FALLBACK),
        }

        if self.config.cascade_modern_logout && self.modern.current_account().is_some() {
            let modern_result = self.modern.log_out().await;
            self.refresh_after_legacy_logout();
            // Success here must not erase the legacy step's message.
            if let Err(err) = modern_result {
                self.report(&MigrationError::from(err), LOG_OUT_FALLBACK);
            }
        }
    }

    pub async fn log_out_modern(&self) {
        let _operation = self.begin().await;

        let result = self.modern.log_out().await;
        self.refresh_all_state();
        match result {
            Ok(()) => self.dispatch(MigrationAction::ClearError),
            Err(err) => self.report(&MigrationError::from(err), LOG_OUT_FALLBACK),
        }
    }

    /// Subscribe the legacy installation to the default channels, persist
    /// it, then make the modern provider adopt the same remote record.
    /// A failed adoption leaves the saved legacy installation in place.
    pub async fn save_installation(&self) {
        let _operation = self.begin().await;
        if let Err(err) = self.link_installation().await {
            self.report(&err, SAVE_INSTALLATION_FALLBACK);
        }
    }

    /// Overwrite every record with what the providers hold now.
    pub fn refresh_all_state(&self) {
        self.dispatch(MigrationAction::Refreshed(self.snapshot()));
    }

    async fn run_authentication(&self, credentials: Credentials, username: &str, password: &str) {
        let _operation = self.begin().await;
        if let Err(err) = self.authenticate(credentials, username, password).await {
            self.report(&err, credentials.fallback());
        }
    }

    async fn authenticate(
        &self,
        credentials: Credentials,
        username: &str,
        password: &str,
    ) -> MigrationResult<()> {
        if self.legacy.current_account().is_some() {
            return Err(PreconditionError::AlreadyLoggedIn.into());
        }

        let account = match credentials {
            Credentials::SignUp => self.legacy.sign_up(username, password).await,
            Credentials::LogIn => self.legacy.log_in(username, password).await,
        }
        .map_err(|err| {
            warn!("Legacy {:?} failed: {}", credentials, err);
            err
        })?;

        // Prefer what the provider cached over the response echo.
        let account = self.legacy.current_account().unwrap_or(account);
        info!(
            "Legacy {:?} succeeded for user {}",
            credentials,
            account.object_id.as_deref().unwrap_or_default()
        );
        self.dispatch(MigrationAction::LegacyAuthenticated(LegacySession::from(&account)));

        self.hand_off_session(&account).await;
        Ok(())
    }

    /// Let the modern provider become the account behind `account`'s
    /// session. Failures are recorded as `MigrationFailed`.
    async fn hand_off_session(&self, account: &Account) {
        let session_token = match account.session_token.as_deref() {
            Some(token) if account.has_session() => token,
            _ => {
                let message = "The legacy session has no session token to hand off".to_string();
                error!("{}", message);
                self.dispatch(MigrationAction::HandoffFailed(message));
                return;
            }
        };

        match self.modern.become_account(session_token).await {
            Ok(modern_account) if modern_account.object_id != account.object_id => {
                error!(
                    "Modern handoff adopted user {} instead of {}",
                    modern_account.object_id.as_deref().unwrap_or_default(),
                    account.object_id.as_deref().unwrap_or_default()
                );
                // Drop the session for the wrong account.
                if let Err(err) = self.modern.log_out().await {
                    warn!("Could not drop mismatched modern session: {}", err);
                }
                self.dispatch(MigrationAction::HandoffFailed(
                    ACCOUNT_MISMATCH_MESSAGE.to_string(),
                ));
            }
            Ok(modern_account) => {
                info!(
                    "Modern handoff succeeded for user {}",
                    modern_account.object_id.as_deref().unwrap_or_default()
                );
                self.dispatch(MigrationAction::HandoffSucceeded(ModernSession::from(
                    &modern_account,
                )));
            }
            Err(err) => {
                let message = MigrationError::from(err).user_message(LOG_IN_FALLBACK);
                error!("Modern handoff failed: {}", message);
                self.dispatch(MigrationAction::HandoffFailed(message));
            }
        }
    }

    async fn link_installation(&self) -> MigrationResult<()> {
        let mut installation = self
            .legacy
            .current_installation()
            .ok_or_else(|| ProviderError::opaque(SAVE_INSTALLATION_FALLBACK))?;
        installation.channels = self.config.default_channels.clone();

        if let Err(err) = self.legacy.save_installation(installation).await {
            // The channel mutation is kept locally; show it.
            self.refresh_all_state();
            return Err(err.into());
        }

        let saved = self.legacy.current_installation();
        let (saved, object_id) = match saved.and_then(|i| i.object_id.clone().map(|id| (i, id))) {
            Some(found) => found,
            None => return Err(ProviderError::opaque(SAVE_INSTALLATION_FALLBACK).into()),
        };
        info!("Legacy installation saved as {}", object_id);
        self.dispatch(MigrationAction::LegacyInstallationSaved(LegacyInstallation::from(&saved)));

        let adopted = self.modern.become_installation(&object_id).await?;
        info!("Modern provider adopted installation {}", object_id);
        self.dispatch(MigrationAction::InstallationAdopted(ModernInstallation::from(&adopted)));
        Ok(())
    }

    fn snapshot(&self) -> ProviderSnapshot {
        ProviderSnapshot {
            legacy_session: self.legacy.current_account().as_ref().map(LegacySession::from),
            legacy_installation: self
                .legacy
                .current_installation()
                .as_ref()
                .map(LegacyInstallation::from),
            modern_session: self.modern.current_account().as_ref().map(ModernSession::from),
            modern_installation: self
                .modern
                .current_installation()
                .as_ref()
                .map(ModernInstallation::from),
        }
    }

    /// Refresh, treating the legacy logout as final.
    fn refresh_after_legacy_logout(&self) {
        let mut snapshot = self.snapshot();
        if snapshot.legacy_session.take().is_some() {
            warn!("Legacy provider still reports a user after logout; clearing it");
        }
        self.dispatch(MigrationAction::Refreshed(snapshot));
    }

    async fn begin(&self) -> OperationGuard<'_> {
        let lock = self.operation_lock.lock().await;
        self.dispatch(MigrationAction::SetBusy(true));
        OperationGuard {
            controller: self,
            _lock: lock,
        }
    }

    fn report(&self, err: &MigrationError, fallback: &str) {
        let message = err.user_message(fallback);
        crate::console_error!("[Migration] {}", message);
        self.dispatch(MigrationAction::SetError(message));
    }

    fn dispatch(&self, action: MigrationAction) {
        self.state.send_modify(|state| state.reduce_in_place(action));
    }
}
