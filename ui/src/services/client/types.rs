//! Parse REST wire types

use serde::{Deserialize, Serialize};

use crate::services::providers::{Account, Installation};

#[derive(Debug, Serialize)]
pub struct CredentialsBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// User object as returned by `login` and `users/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseUser {
    pub object_id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub session_token: Option<String>,
}

impl From<ParseUser> for Account {
    fn from(user: ParseUser) -> Self {
        Account {
            object_id: Some(user.object_id),
            username: user.username,
            session_token: user.session_token,
        }
    }
}

/// `POST users` answers with the new id and a session, not the full user
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    pub object_id: String,
    #[serde(default)]
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub object_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseInstallation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
}

impl From<ParseInstallation> for Installation {
    fn from(installation: ParseInstallation) -> Self {
        Installation {
            object_id: installation.object_id,
            installation_id: installation.installation_id,
            channels: installation.channels,
            device_type: installation.device_type,
        }
    }
}

impl From<&Installation> for ParseInstallation {
    fn from(installation: &Installation) -> Self {
        ParseInstallation {
            // objectId travels in the URL, never in the body
            object_id: None,
            installation_id: installation.installation_id.clone(),
            device_type: installation.device_type.clone(),
            channels: installation.channels.clone(),
        }
    }
}

/// `{"code": 101, "error": "Invalid username/password."}`
#[derive(Debug, Clone, Deserialize)]
pub struct ParseErrorBody {
    pub code: i64,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_maps_to_account() {
        let user: ParseUser = serde_json::from_value(json!({
            "objectId": "uK3xE1",
            "username": "alice",
            "sessionToken": "r:abc",
            "createdAt": "2022-09-11T10:00:00.000Z"
        }))
        .unwrap();

        let account = Account::from(user);
        assert_eq!(account.object_id.as_deref(), Some("uK3xE1"));
        assert_eq!(account.username.as_deref(), Some("alice"));
        assert!(account.has_session());
    }

    #[test]
    fn test_installation_body_omits_object_id() {
        let installation = Installation {
            object_id: Some("inst1".to_string()),
            installation_id: Some("device-1".to_string()),
            channels: vec!["global".to_string()],
            device_type: Some("web".to_string()),
        };

        let body = serde_json::to_value(ParseInstallation::from(&installation)).unwrap();
        assert_eq!(
            body,
            json!({
                "installationId": "device-1",
                "deviceType": "web",
                "channels": ["global"]
            })
        );
    }

    #[test]
    fn test_fetched_installation_without_channels() {
        let installation: ParseInstallation = serde_json::from_value(json!({
            "objectId": "inst1",
            "installationId": "device-1"
        }))
        .unwrap();

        let installation = Installation::from(installation);
        assert_eq!(installation.object_id.as_deref(), Some("inst1"));
        assert!(installation.channels.is_empty());
    }
}
