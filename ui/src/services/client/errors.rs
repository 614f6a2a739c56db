use thiserror::Error;

use super::types::ParseErrorBody;
use crate::services::errors::ProviderError;

/// Parse REST client errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Request never produced a response
    #[error("Network error: {message}")]
    Network { message: String },

    /// Server answered with a Parse error body
    #[error("{message}")]
    Parse { code: i64, message: String },

    /// Server answered with an error status and no Parse error body
    #[error("Server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Invalid client configuration: {message}")]
    InvalidConfig { message: String },
}

impl ClientError {
    /// Decode a non-success response body.
    pub fn from_response(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ParseErrorBody>(body) {
            Ok(parsed) => ClientError::Parse {
                code: parsed.code,
                message: parsed.error,
            },
            Err(_) => ClientError::Http {
                status,
                message: body.trim().to_string(),
            },
        }
    }
}

impl From<ClientError> for ProviderError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Parse { code, message } => ProviderError::Structured { code, message },
            other => ProviderError::opaque(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidResponse {
            message: err.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_body_is_structured() {
        let err = ClientError::from_response(404, r#"{"code":101,"error":"Invalid username/password."}"#);
        assert_eq!(
            err,
            ClientError::Parse {
                code: 101,
                message: "Invalid username/password.".to_string()
            }
        );

        let provider: ProviderError = err.into();
        assert_eq!(provider, ProviderError::structured(101, "Invalid username/password."));
    }

    #[test]
    fn test_plain_error_body_is_opaque() {
        let err = ClientError::from_response(502, "Bad Gateway\n");
        assert_eq!(err.to_string(), "Server returned 502: Bad Gateway");

        let provider: ProviderError = err.into();
        assert_eq!(provider.message(), "Server returned 502: Bad Gateway");
        assert!(matches!(provider, ProviderError::Opaque { .. }));
    }
}
