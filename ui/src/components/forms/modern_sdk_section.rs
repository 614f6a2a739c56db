//! Modern SDK panel. Read-only apart from logout and the handoff retry,
//! offered while a legacy session has no migrated counterpart.

use dioxus::prelude::*;

use crate::migration::{MigrationIntent, ViewState};

#[derive(Props, PartialEq, Clone)]
pub struct ModernSdkSectionProps {
    pub view: ViewState,
    pub on_intent: EventHandler<MigrationIntent>,
}

#[component]
pub fn ModernSdkSection(props: ModernSdkSectionProps) -> Element {
    let view = props.view.clone();
    let on_intent = props.on_intent;

    rsx! {
        section {
            class: "sdk-section modern-sdk",
            h2 {
                class: "section-title",
                "Modern SDK"
            }

            if view.modern_logged_in {
                p {
                    class: "account-status logged-in",
                    "User objectId: {view.modern_user_id}"
                }
                button {
                    class: "action-button",
                    disabled: view.busy,
                    onclick: move |_| on_intent.call(MigrationIntent::LogOutModern),
                    "Logout"
                }
            } else {
                p {
                    class: "account-status logged-out",
                    "Not logged in"
                }
            }

            if view.can_retry_handoff() {
                button {
                    class: "action-button retry-button",
                    disabled: view.busy,
                    onclick: move |_| on_intent.call(MigrationIntent::RetrySessionHandoff),
                    "Retry Handoff"
                }
            }

            p {
                class: "installation-status",
                "Installation id: {view.modern_installation_id}"
            }
        }
    }
}
