//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: timestamped console logging that degrades to `tracing`
//!   off the browser
//! - **platform**: detached task spawning for callback-style providers

pub mod console_macros;
pub mod platform;

pub use platform::*;
