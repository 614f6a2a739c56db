//! Legacy → modern session and installation migration
//!
//! [`MigrationController`] owns the workflow. It drives both identity
//! providers and publishes a single [`MigrationState`] whose [`ViewState`]
//! is what the UI renders.

pub mod controller;
pub mod intents;
pub mod state_machine;
pub mod types;


pub use controller::MigrationController;
pub use intents::MigrationIntent;
pub use state_machine::{InstallationPhase, SessionEvent, SessionPhase};
pub use types::*;
