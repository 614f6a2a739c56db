use serde::{Deserialize, Serialize};

/// An authenticated account as an identity provider reports it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub object_id: Option<String>,
    pub username: Option<String>,
    /// Proof of an authenticated session, used for the handoff
    pub session_token: Option<String>,
}

impl Account {
    pub fn has_session(&self) -> bool {
        self.session_token
            .as_deref()
            .map(|token| !token.is_empty())
            .unwrap_or(false)
    }
}

/// Per-device registration record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Installation {
    /// Remote identifier, present once the record has been saved
    pub object_id: Option<String>,
    /// Device-local identifier
    pub installation_id: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    pub device_type: Option<String>,
}
