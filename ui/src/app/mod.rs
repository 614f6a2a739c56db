pub mod keychain_migration;

pub use keychain_migration::{KeychainMigration, KeychainMigrationProps};
