//! Concrete identity providers backed by the Parse REST client and the
//! shared keychain

pub mod legacy_sdk;
pub mod modern_sdk;

pub use legacy_sdk::LegacySdk;
pub use modern_sdk::ModernSdk;
