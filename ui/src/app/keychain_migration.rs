use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use futures::StreamExt;

use crate::components::display::{ErrorBanner, LoadingIndicator, MigrationStatus};
use crate::components::forms::{LegacySdkSection, ModernSdkSection};
use crate::migration::{MigrationController, MigrationIntent, ViewState};
use crate::services::config::AppConfig;
use crate::services::keychain::Keychain;
use crate::utils::platform_name;
use crate::{console_error, console_info};

const KEYCHAIN_MIGRATION_CSS: Asset = asset!("/assets/styling/keychain_migration.css");

const KEYCHAIN_PREFIX: &str = "parse-migrate-keychain";

/// Browser localStorage in the web build, process memory elsewhere.
fn default_keychain() -> Arc<dyn Keychain> {
    #[cfg(target_arch = "wasm32")]
    {
        Arc::new(crate::services::keychain::BrowserKeychain::new(KEYCHAIN_PREFIX))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        console_info!("[KeychainMigration] No browser storage, {} is kept in memory", KEYCHAIN_PREFIX);
        Arc::new(crate::services::keychain::MemoryKeychain::new())
    }
}

fn start_controller(config: AppConfig) -> Result<Rc<MigrationController>, String> {
    if let Err(err) = config.validate() {
        console_error!("[KeychainMigration] Invalid config: {:#}", err);
        return Err(format!("{:#}", err));
    }

    MigrationController::with_parse_sdks(config, default_keychain())
        .map(Rc::new)
        .map_err(|err| {
            console_error!("[KeychainMigration] Failed to start: {}", err);
            err.to_string()
        })
}

#[derive(Props, PartialEq, Clone)]
pub struct KeychainMigrationProps {
    #[props(default)]
    pub config: AppConfig,
}

#[component]
pub fn KeychainMigration(props: KeychainMigrationProps) -> Element {
    let controller = use_hook(move || {
        console_info!(
            "[KeychainMigration] Starting on {} against {}",
            platform_name(),
            props.config.server_url
        );
        start_controller(props.config.clone())
    });

    let startup_view = match &controller {
        Ok(controller) => controller.view(),
        Err(message) => ViewState {
            error_message: message.clone(),
            ..ViewState::default()
        },
    };
    let mut view = use_signal(move || startup_view);
    let username = use_signal(String::new);
    let password = use_signal(String::new);

    // Mirror every published state into the signal
    let watched = controller.clone().ok();
    use_future(move || {
        let controller = watched.clone();
        async move {
            let Some(controller) = controller else {
                return;
            };
            let mut updates = controller.subscribe();
            view.set(updates.borrow_and_update().view.clone());
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().view.clone();
                view.set(next);
            }
        }
    });

    // One intent at a time, in the order the user issued them
    let driver = controller.clone().ok();
    let intents = use_coroutine(move |mut rx: UnboundedReceiver<MigrationIntent>| {
        let controller = driver.clone();
        async move {
            let Some(controller) = controller else {
                return;
            };
            while let Some(intent) = rx.next().await {
                controller.handle(intent).await;
            }
        }
    });

    let on_intent = EventHandler::new(move |intent: MigrationIntent| {
        console_info!("[KeychainMigration] Queued {}", intent.name());
        intents.send(intent);
    });

    rsx! {
        document::Link { rel: "stylesheet", href: KEYCHAIN_MIGRATION_CSS }

        div {
            class: "keychain-migration-container",

            h1 {
                class: "migration-title",
                "Keychain Migration"
            }

            MigrationStatus {
                session_phase: view().session_phase,
                installation_phase: view().installation_phase
            }

            LegacySdkSection {
                view: view(),
                username: username,
                password: password,
                on_intent: on_intent
            }

            ModernSdkSection {
                view: view(),
                on_intent: on_intent
            }

            LoadingIndicator {
                busy: view().busy,
                message: "Waiting for the identity providers...".to_string()
            }

            ErrorBanner {
                message: view().error_message
            }
        }
    }
}
