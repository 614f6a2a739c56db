//! Infrastructure Services
//!
//! - **providers**: the legacy (callback) and modern (suspending) identity
//!   provider contracts plus the bridge between the two styles
//! - **sdk**: concrete providers talking to a Parse server
//! - **client**: the Parse REST client
//! - **keychain**: the credential store both SDKs share
//! - **config**: explicit application configuration
//! - **errors**: the error taxonomy surfaced to the view
//!
//! Provider traits are `?Send`, WASM-first; only the legacy completion
//! callbacks must be `Send` because they may fire on any thread.

pub mod client;
pub mod config;
pub mod errors;
pub mod keychain;
pub mod providers;
pub mod sdk;
