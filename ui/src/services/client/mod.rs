//! Parse REST client shared by both SDKs

pub mod errors;
pub mod parse_client;
pub mod types;

pub use errors::{ClientError, ClientResult};
pub use parse_client::ParseClient;
pub use types::{ParseInstallation, ParseUser};
