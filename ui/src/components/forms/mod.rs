pub mod legacy_sdk_section;
pub mod modern_sdk_section;

pub use legacy_sdk_section::*;
pub use modern_sdk_section::*;
