use dioxus::prelude::*;

use crate::migration::{InstallationPhase, SessionPhase};

#[derive(Props, PartialEq, Clone)]
pub struct MigrationStatusProps {
    pub session_phase: SessionPhase,
    pub installation_phase: InstallationPhase,
}

#[component]
pub fn MigrationStatus(props: MigrationStatusProps) -> Element {
    let session_class = match props.session_phase {
        SessionPhase::FullyMigrated => "status-ok",
        SessionPhase::MigrationFailed => "status-error",
        SessionPhase::LegacyOnly => "status-pending",
        SessionPhase::LoggedOut => "status-idle",
    };
    let (installation_class, installation_label) = match props.installation_phase {
        InstallationPhase::Linked => ("status-ok", "Linked"),
        InstallationPhase::Unlinked => ("status-idle", "Not linked"),
    };

    rsx! {
        div {
            class: "migration-status",
            span {
                class: "status-chip {session_class}",
                "Session: {props.session_phase.label()}"
            }
            span {
                class: "status-chip {installation_class}",
                "Installation: {installation_label}"
            }
        }
    }
}
