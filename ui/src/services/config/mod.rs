//! Application configuration
//!
//! One explicit value handed to the REST client, both SDKs and the
//! controller. Nothing here is global.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub application_id: String,
    pub client_key: String,
    /// Base URL of the Parse server, e.g. `http://localhost:1337/1`
    pub server_url: String,
    /// Channels written by "save installation"
    pub default_channels: Vec<String>,
    pub user_agent: String,
    /// Log the modern SDK out after every legacy logout
    pub cascade_modern_logout: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            application_id: "applicationId".to_string(),
            client_key: "clientKey".to_string(),
            server_url: "http://localhost:1337/1".to_string(),
            default_channels: vec!["global".to_string()],
            user_agent: "parse-keychain-migration/0.1".to_string(),
            cascade_modern_logout: true,
        }
    }
}

impl AppConfig {
    /// Parse a JSON document and validate it. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: AppConfig =
            serde_json::from_str(json).context("Failed to parse application config")?;
        config.validate().context("Invalid application config")?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.application_id.trim().is_empty() {
            bail!("application_id must not be empty");
        }

        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            bail!("server_url must be an http(s) URL, got '{}'", self.server_url);
        }

        if self.default_channels.is_empty() {
            bail!("default_channels must name at least one channel");
        }

        Ok(())
    }

    /// `server_url` joined with a REST path, without doubled slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.server_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_channels, vec!["global".to_string()]);
        assert!(config.cascade_modern_logout);
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = AppConfig::from_json(r#"{"server_url": "https://parse.example.com/parse/"}"#)
            .unwrap();
        assert_eq!(config.application_id, "applicationId");
        assert_eq!(
            config.endpoint("/users/me"),
            "https://parse.example.com/parse/users/me"
        );
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.server_url = "localhost:1337".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.default_channels.clear();
        assert!(config.validate().is_err());

        assert!(AppConfig::from_json(r#"{"application_id": " "}"#).is_err());
        assert!(AppConfig::from_json("not json").is_err());
    }
}
