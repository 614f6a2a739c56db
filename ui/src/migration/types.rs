// Core types for the keychain migration - no dioxus imports needed here
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::state_machine::{InstallationPhase, SessionEvent, SessionPhase};
use crate::services::providers::{Account, Installation};

/// Shown when the modern provider adopts a session for another account.
pub const ACCOUNT_MISMATCH_MESSAGE: &str =
    "The modern session belongs to a different account than the legacy session";

/// Authenticated legacy-provider user
#[derive(Clone, PartialEq, Eq, Default)]
pub struct LegacySession {
    pub user_id: Option<String>,
    pub session_token: Option<String>,
}

impl fmt::Debug for LegacySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacySession")
            .field("user_id", &self.user_id)
            .field("session_token", &self.session_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl From<&Account> for LegacySession {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.object_id.clone(),
            session_token: account.session_token.clone(),
        }
    }
}

/// This device's legacy installation record
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LegacyInstallation {
    pub installation_id: String,
    /// Remote id, present once saved
    pub object_id: Option<String>,
    pub channels: BTreeSet<String>,
}

impl From<&Installation> for LegacyInstallation {
    fn from(installation: &Installation) -> Self {
        Self {
            installation_id: installation.installation_id.clone().unwrap_or_default(),
            object_id: installation.object_id.clone(),
            channels: installation.channels.iter().cloned().collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModernSession {
    pub user_id: Option<String>,
}

impl From<&Account> for ModernSession {
    fn from(account: &Account) -> Self {
        Self {
            user_id: account.object_id.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModernInstallation {
    pub installation_id: Option<String>,
    pub object_id: Option<String>,
}

impl From<&Installation> for ModernInstallation {
    fn from(installation: &Installation) -> Self {
        Self {
            installation_id: installation.installation_id.clone(),
            object_id: installation.object_id.clone(),
        }
    }
}

/// Fresh read of both providers' cached local state
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProviderSnapshot {
    pub legacy_session: Option<LegacySession>,
    pub legacy_installation: Option<LegacyInstallation>,
    pub modern_session: Option<ModernSession>,
    pub modern_installation: Option<ModernInstallation>,
}

/// What the presentation layer renders. Recomputed wholesale after every
/// action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub legacy_logged_in: bool,
    pub legacy_user_id: String,
    pub legacy_installation_id: String,
    pub modern_logged_in: bool,
    pub modern_user_id: String,
    pub modern_installation_id: String,
    /// Empty when there is no error
    pub error_message: String,
    pub session_phase: SessionPhase,
    pub installation_phase: InstallationPhase,
    /// An operation is in flight
    pub busy: bool,
}

impl ViewState {
    pub fn project(state: &MigrationState) -> Self {
        let legacy_user_id = state
            .legacy_session
            .as_ref()
            .and_then(|session| session.user_id.clone())
            .unwrap_or_default();
        let modern_user_id = state
            .modern_session
            .as_ref()
            .and_then(|session| session.user_id.clone())
            .unwrap_or_default();

        Self {
            legacy_logged_in: state.legacy_session.is_some(),
            legacy_user_id,
            legacy_installation_id: state
                .legacy_installation
                .as_ref()
                .map(|installation| installation.installation_id.clone())
                .unwrap_or_default(),
            modern_logged_in: state.modern_session.is_some(),
            modern_user_id,
            modern_installation_id: state
                .modern_installation
                .as_ref()
                .and_then(|installation| installation.installation_id.clone())
                .unwrap_or_default(),
            error_message: state.error_message.clone(),
            session_phase: state.session_phase,
            installation_phase: state.installation_phase,
            busy: state.busy,
        }
    }

    /// A legacy session without its modern counterpart can re-run the
    /// handoff, whatever phase led there.
    pub fn can_retry_handoff(&self) -> bool {
        self.legacy_logged_in && self.session_phase != SessionPhase::FullyMigrated
    }
}

// Action enum for state mutations
#[derive(Clone, Debug)]
pub enum MigrationAction {
    /// Legacy signup/login succeeded
    LegacyAuthenticated(LegacySession),
    HandoffSucceeded(ModernSession),
    /// Handoff errored with this message
    HandoffFailed(String),
    /// Legacy installation persisted and read back
    LegacyInstallationSaved(LegacyInstallation),
    InstallationAdopted(ModernInstallation),
    /// Overwrite every record with what the providers hold now
    Refreshed(ProviderSnapshot),
    SetError(String),
    ClearError,
    SetBusy(bool),
}

/// Records owned by the controller, plus the derived view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MigrationState {
    pub legacy_session: Option<LegacySession>,
    pub legacy_installation: Option<LegacyInstallation>,
    pub modern_session: Option<ModernSession>,
    pub modern_installation: Option<ModernInstallation>,
    pub session_phase: SessionPhase,
    pub installation_phase: InstallationPhase,
    pub error_message: String,
    pub busy: bool,
    pub view: ViewState,
}

impl MigrationState {
    /// Apply one action and recompute the view from the resulting records.
    pub fn reduce_in_place(&mut self, action: MigrationAction) {
        let old_phase = self.session_phase;

        match action {
            MigrationAction::LegacyAuthenticated(session) => {
                self.legacy_session = Some(session);
                self.session_phase = self.session_phase.on(SessionEvent::LegacyAuthenticated);
                self.error_message.clear();
            }
            MigrationAction::HandoffSucceeded(session) => {
                let same_account = self.legacy_user_id().is_some()
                    && self.legacy_user_id() == session.user_id.as_deref();
                if same_account {
                    self.modern_session = Some(session);
                    self.session_phase = self.session_phase.on(SessionEvent::HandoffSucceeded);
                } else {
                    self.session_phase = self.session_phase.on(SessionEvent::HandoffFailed);
                    self.error_message = ACCOUNT_MISMATCH_MESSAGE.to_string();
                }
            }
            MigrationAction::HandoffFailed(message) => {
                self.session_phase = self.session_phase.on(SessionEvent::HandoffFailed);
                self.error_message = message;
            }
            MigrationAction::LegacyInstallationSaved(installation) => {
                self.legacy_installation = Some(installation);
                self.error_message.clear();
            }
            MigrationAction::InstallationAdopted(installation) => {
                self.modern_installation = Some(installation);
            }
            MigrationAction::Refreshed(snapshot) => {
                let had_modern = self.modern_session.is_some();
                self.legacy_session = snapshot.legacy_session;
                self.legacy_installation = snapshot.legacy_installation;
                self.modern_session = snapshot.modern_session;
                self.modern_installation = snapshot.modern_installation;

                if self.legacy_session.is_none() {
                    self.session_phase = self.session_phase.on(SessionEvent::LegacyLoggedOut);
                } else if had_modern && self.modern_session.is_none() {
                    self.session_phase = self.session_phase.on(SessionEvent::ModernLoggedOut);
                }
                self.session_phase = self
                    .session_phase
                    .reconcile(self.legacy_user_id(), self.modern_user_id());
            }
            MigrationAction::SetError(message) => {
                self.error_message = message;
            }
            MigrationAction::ClearError => {
                self.error_message.clear();
            }
            MigrationAction::SetBusy(busy) => {
                self.busy = busy;
            }
        }

        self.installation_phase = InstallationPhase::from_object_ids(
            self.legacy_installation
                .as_ref()
                .and_then(|installation| installation.object_id.as_deref()),
            self.modern_installation
                .as_ref()
                .and_then(|installation| installation.object_id.as_deref()),
        );

        if old_phase != self.session_phase {
            crate::console_info!(
                "[STATE] Session phase {:?} -> {:?}",
                old_phase,
                self.session_phase
            );
        }

        self.view = ViewState::project(self);
    }

    pub fn legacy_user_id(&self) -> Option<&str> {
        self.legacy_session
            .as_ref()
            .and_then(|session| session.user_id.as_deref())
    }

    pub fn modern_user_id(&self) -> Option<&str> {
        self.modern_session
            .as_ref()
            .and_then(|session| session.user_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn legacy(user: &str) -> LegacySession {
        LegacySession {
            user_id: Some(user.to_string()),
            session_token: Some(format!("r:{}", user)),
        }
    }

    fn modern(user: &str) -> ModernSession {
        ModernSession {
            user_id: Some(user.to_string()),
        }
    }

    #[test]
    fn test_legacy_authentication_clears_error_and_projects_view() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::SetError("old failure".to_string()));
        assert_eq!(state.view.error_message, "old failure");

        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        assert_eq!(state.session_phase, SessionPhase::LegacyOnly);
        assert!(state.view.legacy_logged_in);
        assert_eq!(state.view.legacy_user_id, "u1");
        assert!(!state.view.modern_logged_in);
        assert_eq!(state.view.error_message, "");
    }

    #[test]
    fn test_handoff_outcomes() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        state.reduce_in_place(MigrationAction::HandoffFailed("network down".to_string()));
        assert_eq!(state.view.session_phase, SessionPhase::MigrationFailed);
        assert_eq!(state.view.error_message, "network down");

        state.reduce_in_place(MigrationAction::HandoffSucceeded(modern("u1")));
        assert_eq!(state.view.session_phase, SessionPhase::FullyMigrated);
        assert!(state.view.modern_logged_in);
        assert_eq!(state.view.modern_user_id, "u1");
    }

    #[test]
    fn test_handoff_to_different_account_fails_migration() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        state.reduce_in_place(MigrationAction::HandoffSucceeded(modern("u2")));
        assert_eq!(state.session_phase, SessionPhase::MigrationFailed);
        assert!(!state.view.modern_logged_in);
        assert_eq!(state.view.error_message, ACCOUNT_MISMATCH_MESSAGE);
    }

    #[test]
    fn test_retry_offered_whenever_legacy_session_is_not_migrated() {
        let mut state = MigrationState::default();
        assert!(!state.view.can_retry_handoff());

        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        assert!(state.view.can_retry_handoff());

        state.reduce_in_place(MigrationAction::HandoffSucceeded(modern("u1")));
        assert!(!state.view.can_retry_handoff());

        // Modern logout demotes to LegacyOnly
        state.reduce_in_place(MigrationAction::Refreshed(ProviderSnapshot {
            legacy_session: Some(legacy("u1")),
            ..ProviderSnapshot::default()
        }));
        assert_eq!(state.session_phase, SessionPhase::LegacyOnly);
        assert!(state.view.can_retry_handoff());

        state.reduce_in_place(MigrationAction::HandoffFailed("network down".to_string()));
        assert!(state.view.can_retry_handoff());
    }

    #[test]
    fn test_refresh_overwrites_records() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        state.reduce_in_place(MigrationAction::HandoffSucceeded(modern("u1")));

        state.reduce_in_place(MigrationAction::Refreshed(ProviderSnapshot {
            legacy_session: None,
            legacy_installation: Some(LegacyInstallation {
                installation_id: "device-1".to_string(),
                object_id: None,
                channels: BTreeSet::new(),
            }),
            modern_session: Some(modern("u1")),
            modern_installation: None,
        }));

        assert_eq!(state.session_phase, SessionPhase::LoggedOut);
        assert!(!state.view.legacy_logged_in);
        assert_eq!(state.view.legacy_user_id, "");
        assert_eq!(state.view.legacy_installation_id, "device-1");
        assert!(state.view.modern_logged_in);
    }

    #[test]
    fn test_refresh_after_modern_logout_demotes_phase() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        state.reduce_in_place(MigrationAction::HandoffSucceeded(modern("u1")));

        state.reduce_in_place(MigrationAction::Refreshed(ProviderSnapshot {
            legacy_session: Some(legacy("u1")),
            ..ProviderSnapshot::default()
        }));
        assert_eq!(state.session_phase, SessionPhase::LegacyOnly);
    }

    #[test]
    fn test_refresh_keeps_migration_failure_and_error() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::LegacyAuthenticated(legacy("u1")));
        state.reduce_in_place(MigrationAction::HandoffFailed("network down".to_string()));

        state.reduce_in_place(MigrationAction::Refreshed(ProviderSnapshot {
            legacy_session: Some(legacy("u1")),
            ..ProviderSnapshot::default()
        }));
        assert_eq!(state.session_phase, SessionPhase::MigrationFailed);
        assert_eq!(state.view.error_message, "network down");
    }

    #[test]
    fn test_installation_link_follows_object_ids() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::LegacyInstallationSaved(LegacyInstallation {
            installation_id: "device-1".to_string(),
            object_id: Some("inst1".to_string()),
            channels: ["global".to_string()].into_iter().collect(),
        }));
        assert_eq!(state.view.installation_phase, InstallationPhase::Unlinked);

        state.reduce_in_place(MigrationAction::InstallationAdopted(ModernInstallation {
            installation_id: Some("device-1".to_string()),
            object_id: Some("inst1".to_string()),
        }));
        assert_eq!(state.view.installation_phase, InstallationPhase::Linked);
        assert_eq!(state.view.modern_installation_id, "device-1");
    }

    #[test]
    fn test_session_token_is_redacted_in_debug() {
        let rendered = format!("{:?}", legacy("u1"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("r:u1"));
    }

    #[test]
    fn test_busy_flag_reaches_view() {
        let mut state = MigrationState::default();
        state.reduce_in_place(MigrationAction::SetBusy(true));
        assert!(state.view.busy);
        state.reduce_in_place(MigrationAction::SetBusy(false));
        assert!(!state.view.busy);
    }
}
