use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{error, info, instrument};

use super::errors::{ClientError, ClientResult};
use super::types::*;
use crate::services::config::AppConfig;

const APPLICATION_ID_HEADER: &str = "X-Parse-Application-Id";
const CLIENT_KEY_HEADER: &str = "X-Parse-Client-Key";
const SESSION_TOKEN_HEADER: &str = "X-Parse-Session-Token";
const INSTALLATION_ID_HEADER: &str = "X-Parse-Installation-Id";

/// Client for the Parse Server REST API
#[derive(Clone)]
pub struct ParseClient {
    http_client: Client,
    config: AppConfig,
}

impl std::fmt::Debug for ParseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseClient")
            .field("server_url", &self.config.server_url)
            .finish_non_exhaustive()
    }
}

impl ParseClient {
    pub fn new(config: AppConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("x-parse-application-id"),
            header_value(APPLICATION_ID_HEADER, &config.application_id)?,
        );
        headers.insert(
            HeaderName::from_static("x-parse-client-key"),
            header_value(CLIENT_KEY_HEADER, &config.client_key)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InvalidConfig {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// `POST users`
    #[instrument(skip(self, password), err)]
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        installation_id: Option<&str>,
    ) -> ClientResult<ParseUser> {
        let request = self
            .with_installation(self.http_client.post(self.config.endpoint("users")), installation_id)
            .json(&CredentialsBody { username, password });

        let created: SignUpResponse = self.send_json(request, "sign up").await?;
        info!("Signed up user {}", created.object_id);

        Ok(ParseUser {
            object_id: created.object_id,
            username: Some(username.to_string()),
            session_token: created.session_token,
        })
    }

    /// `POST login`
    #[instrument(skip(self, password), err)]
    pub async fn log_in(
        &self,
        username: &str,
        password: &str,
        installation_id: Option<&str>,
    ) -> ClientResult<ParseUser> {
        let request = self
            .with_installation(self.http_client.post(self.config.endpoint("login")), installation_id)
            .json(&CredentialsBody { username, password });

        let user: ParseUser = self.send_json(request, "log in").await?;
        info!("Logged in user {}", user.object_id);
        Ok(user)
    }

    /// `POST logout`, revoking `session_token`
    #[instrument(skip(self, session_token), err)]
    pub async fn log_out(&self, session_token: &str) -> ClientResult<()> {
        let request = self
            .http_client
            .post(self.config.endpoint("logout"))
            .header(SESSION_TOKEN_HEADER, session_token)
            .json(&serde_json::json!({}));

        let _: serde_json::Value = self.send_json(request, "log out").await?;
        Ok(())
    }

    /// `GET users/me`: the account that owns `session_token`
    #[instrument(skip(self, session_token), err)]
    pub async fn current_user_for_token(&self, session_token: &str) -> ClientResult<ParseUser> {
        let request = self
            .http_client
            .get(self.config.endpoint("users/me"))
            .header(SESSION_TOKEN_HEADER, session_token);

        let mut user: ParseUser = self.send_json(request, "fetch current user").await?;
        if user.session_token.is_none() {
            user.session_token = Some(session_token.to_string());
        }
        Ok(user)
    }

    /// `POST installations`, returning the new objectId
    #[instrument(skip(self, installation), err)]
    pub async fn create_installation(&self, installation: &ParseInstallation) -> ClientResult<String> {
        let request = self
            .with_installation(
                self.http_client.post(self.config.endpoint("installations")),
                installation.installation_id.as_deref(),
            )
            .json(installation);

        let created: CreatedResponse = self.send_json(request, "create installation").await?;
        info!("Created installation {}", created.object_id);
        Ok(created.object_id)
    }

    /// `PUT installations/{objectId}`
    #[instrument(skip(self, installation), err)]
    pub async fn update_installation(
        &self,
        object_id: &str,
        installation: &ParseInstallation,
    ) -> ClientResult<()> {
        let request = self
            .with_installation(
                self.http_client
                    .put(self.config.endpoint(&format!("installations/{}", object_id))),
                installation.installation_id.as_deref(),
            )
            .json(installation);

        let _: serde_json::Value = self.send_json(request, "update installation").await?;
        Ok(())
    }

    /// `GET installations/{objectId}`
    #[instrument(skip(self), err)]
    pub async fn fetch_installation(&self, object_id: &str) -> ClientResult<ParseInstallation> {
        let request = self
            .http_client
            .get(self.config.endpoint(&format!("installations/{}", object_id)));

        let mut installation: ParseInstallation =
            self.send_json(request, "fetch installation").await?;
        if installation.object_id.is_none() {
            installation.object_id = Some(object_id.to_string());
        }
        Ok(installation)
    }

    fn with_installation(
        &self,
        request: RequestBuilder,
        installation_id: Option<&str>,
    ) -> RequestBuilder {
        match installation_id {
            Some(id) => request.header(INSTALLATION_ID_HEADER, id),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| ClientError::Network {
            message: format!("Failed to {}: {}", operation, e),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::Network {
            message: format!("Failed to read {} response: {}", operation, e),
        })?;

        if status.is_success() {
            Ok(serde_json::from_str(&body)?)
        } else {
            error!("{} failed with status {}: {}", operation, status, body);
            Err(ClientError::from_response(status.as_u16(), &body))
        }
    }
}

fn header_value(name: &str, value: &str) -> ClientResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| ClientError::InvalidConfig {
        message: format!("{} is not a valid header value: {}", name, e),
    })
}
