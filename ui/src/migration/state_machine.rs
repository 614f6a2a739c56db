//! Session and installation migration phases

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    LoggedOut,
    /// Legacy session active, modern handoff not (yet) done
    LegacyOnly,
    FullyMigrated,
    /// Handoff errored; the legacy session is still valid
    MigrationFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    LegacyAuthenticated,
    HandoffSucceeded,
    HandoffFailed,
    ModernLoggedOut,
    LegacyLoggedOut,
}

impl SessionPhase {
    pub fn on(self, event: SessionEvent) -> SessionPhase {
        use SessionEvent::*;
        use SessionPhase::*;

        match (self, event) {
            (_, LegacyLoggedOut) => LoggedOut,
            (LoggedOut, LegacyAuthenticated) => LegacyOnly,
            // Nothing to hand off without a legacy session
            (LoggedOut, _) => LoggedOut,
            (_, HandoffSucceeded) => FullyMigrated,
            (_, HandoffFailed) => MigrationFailed,
            (FullyMigrated, ModernLoggedOut) => LegacyOnly,
            (phase, _) => phase,
        }
    }

    /// Phase implied by the current account ids. A modern account that is
    /// not the legacy account is not a migration. A recorded failure stays
    /// until something resolves it.
    pub fn reconcile(self, legacy_user: Option<&str>, modern_user: Option<&str>) -> SessionPhase {
        match (legacy_user, modern_user) {
            (None, _) => SessionPhase::LoggedOut,
            (Some(legacy), Some(modern)) if legacy == modern => SessionPhase::FullyMigrated,
            _ if self == SessionPhase::MigrationFailed => SessionPhase::MigrationFailed,
            _ => SessionPhase::LegacyOnly,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SessionPhase::LoggedOut => "Logged out",
            SessionPhase::LegacyOnly => "Legacy session only",
            SessionPhase::FullyMigrated => "Fully migrated",
            SessionPhase::MigrationFailed => "Migration failed",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstallationPhase {
    #[default]
    Unlinked,
    /// Both SDKs point at the same remote installation
    Linked,
}

impl InstallationPhase {
    pub fn from_object_ids(legacy: Option<&str>, modern: Option<&str>) -> InstallationPhase {
        match (legacy, modern) {
            (Some(legacy), Some(modern)) if legacy == modern => InstallationPhase::Linked,
            _ => InstallationPhase::Unlinked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionEvent::*;
    use super::SessionPhase::*;
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        let phase = LoggedOut.on(LegacyAuthenticated);
        assert_eq!(phase, LegacyOnly);
        let phase = phase.on(HandoffSucceeded);
        assert_eq!(phase, FullyMigrated);
        assert_eq!(phase.on(LegacyLoggedOut), LoggedOut);
    }

    #[test]
    fn test_failed_handoff_and_manual_retry() {
        let phase = LegacyOnly.on(HandoffFailed);
        assert_eq!(phase, MigrationFailed);
        assert_eq!(phase.on(HandoffFailed), MigrationFailed);
        assert_eq!(phase.on(HandoffSucceeded), FullyMigrated);
        assert_eq!(phase.on(LegacyLoggedOut), LoggedOut);
    }

    #[test]
    fn test_events_without_legacy_session_are_ignored() {
        for event in [HandoffSucceeded, HandoffFailed, ModernLoggedOut] {
            assert_eq!(LoggedOut.on(event), LoggedOut);
        }
    }

    #[test]
    fn test_modern_logout_only_demotes_full_migration() {
        assert_eq!(FullyMigrated.on(ModernLoggedOut), LegacyOnly);
        assert_eq!(LegacyOnly.on(ModernLoggedOut), LegacyOnly);
        assert_eq!(MigrationFailed.on(ModernLoggedOut), MigrationFailed);
    }

    #[test]
    fn test_second_legacy_authentication_keeps_phase() {
        assert_eq!(FullyMigrated.on(LegacyAuthenticated), FullyMigrated);
        assert_eq!(MigrationFailed.on(LegacyAuthenticated), MigrationFailed);
    }

    #[test]
    fn test_reconcile_against_account_ids() {
        assert_eq!(FullyMigrated.reconcile(None, Some("u1")), LoggedOut);
        assert_eq!(LoggedOut.reconcile(Some("u1"), Some("u1")), FullyMigrated);
        assert_eq!(FullyMigrated.reconcile(Some("u1"), Some("u2")), LegacyOnly);
        assert_eq!(MigrationFailed.reconcile(Some("u1"), None), MigrationFailed);
        assert_eq!(LoggedOut.reconcile(Some("u1"), None), LegacyOnly);
    }

    #[test]
    fn test_installation_link() {
        assert_eq!(
            InstallationPhase::from_object_ids(Some("i1"), Some("i1")),
            InstallationPhase::Linked
        );
        assert_eq!(
            InstallationPhase::from_object_ids(Some("i1"), None),
            InstallationPhase::Unlinked
        );
        assert_eq!(
            InstallationPhase::from_object_ids(None, None),
            InstallationPhase::Unlinked
        );
    }
}
