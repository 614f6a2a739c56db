//! Moves the current session and this device's installation from the
//! legacy Parse SDK to the modern one, and renders both sides.

pub mod app;
pub use app::KeychainMigration;

pub mod components;
pub mod migration;
pub mod services;
pub mod utils;
