//! Legacy SDK panel: credentials, account status and installation save

use dioxus::prelude::*;

use crate::components::inputs::{FormInput, InputType};
use crate::migration::{MigrationIntent, ViewState};

#[derive(Props, PartialEq, Clone)]
pub struct LegacySdkSectionProps {
    pub view: ViewState,
    pub username: Signal<String>,
    pub password: Signal<String>,
    pub on_intent: EventHandler<MigrationIntent>,
}

#[component]
pub fn LegacySdkSection(props: LegacySdkSectionProps) -> Element {
    let view = props.view.clone();
    let mut username = props.username;
    let mut password = props.password;
    let on_intent = props.on_intent;

    let credentials_missing = username().trim().is_empty() || password().is_empty();

    rsx! {
        section {
            class: "sdk-section legacy-sdk",
            h2 {
                class: "section-title",
                "Legacy SDK"
            }

            if view.legacy_logged_in {
                p {
                    class: "account-status logged-in",
                    "User objectId: {view.legacy_user_id}"
                }
                button {
                    class: "action-button",
                    disabled: view.busy,
                    onclick: move |_| on_intent.call(MigrationIntent::LogOutLegacy),
                    "Logout"
                }
            } else {
                p {
                    class: "account-status logged-out",
                    "Not logged in"
                }
                FormInput {
                    label: "Username".to_string(),
                    value: username(),
                    placeholder: "Username".to_string(),
                    input_type: InputType::Text,
                    disabled: view.busy,
                    on_change: move |value: String| username.set(value)
                }
                FormInput {
                    label: "Password".to_string(),
                    value: password(),
                    placeholder: "Password".to_string(),
                    input_type: InputType::Password,
                    disabled: view.busy,
                    on_change: move |value: String| password.set(value)
                }
                div {
                    class: "button-section",
                    button {
                        class: "action-button",
                        disabled: view.busy || credentials_missing,
                        onclick: move |_| {
                            on_intent.call(MigrationIntent::SignUp {
                                username: username().trim().to_string(),
                                password: password(),
                            });
                        },
                        "Signup"
                    }
                    button {
                        class: "action-button",
                        disabled: view.busy || credentials_missing,
                        onclick: move |_| {
                            on_intent.call(MigrationIntent::LogIn {
                                username: username().trim().to_string(),
                                password: password(),
                            });
                        },
                        "Login"
                    }
                }
            }

            p {
                class: "installation-status",
                "Installation id: {view.legacy_installation_id}"
            }
            button {
                class: "action-button",
                disabled: view.busy,
                onclick: move |_| on_intent.call(MigrationIntent::SaveInstallation),
                "Save Installation"
            }
        }
    }
}
