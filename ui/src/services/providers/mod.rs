pub mod bridge;
pub mod traits;
pub mod types;

pub use bridge::{resolve, LegacyBridge};
pub use traits::{Completion, LegacyProvider, ModernProvider};
pub use types::{Account, Installation};
