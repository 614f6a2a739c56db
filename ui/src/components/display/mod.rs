pub mod error_banner;
pub mod loading_indicator;
pub mod migration_status;

pub use error_banner::*;
pub use loading_indicator::*;
pub use migration_status::*;
