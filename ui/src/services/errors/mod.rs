use thiserror::Error;

/// Failure reported by one of the identity providers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    /// Server or SDK error that carries its own message
    #[error("{message}")]
    Structured { code: i64, message: String },

    /// Anything else: transport, decoding, a callback that never fired
    #[error("{description}")]
    Opaque { description: String },
}

impl ProviderError {
    pub fn structured(code: i64, message: impl Into<String>) -> Self {
        ProviderError::Structured {
            code,
            message: message.into(),
        }
    }

    pub fn opaque(description: impl Into<String>) -> Self {
        ProviderError::Opaque {
            description: description.into(),
        }
    }

    /// The human-readable text, preferring the structured message.
    pub fn message(&self) -> &str {
        match self {
            ProviderError::Structured { message, .. } => message,
            ProviderError::Opaque { description } => description,
        }
    }
}

/// Operation attempted in a state that does not allow it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PreconditionError {
    #[error("User is already logged in")]
    AlreadyLoggedIn,

    #[error("User is not logged in")]
    NotLoggedIn,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MigrationError {
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl MigrationError {
    /// Text written into `errorMessage`.
    ///
    /// `fallback` replaces a provider error whose message is blank, which is
    /// how the SDKs report "failed without saying why".
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            MigrationError::Precondition(err) => err.to_string(),
            MigrationError::Provider(err) => {
                let message = err.message().trim();
                if message.is_empty() {
                    fallback.to_string()
                } else {
                    message.to_string()
                }
            }
        }
    }
}

pub type MigrationResult<T> = Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_uses_server_message() {
        let err = MigrationError::from(ProviderError::structured(101, "Invalid username/password."));
        assert_eq!(err.user_message("Could not log in"), "Invalid username/password.");
    }

    #[test]
    fn test_opaque_error_uses_description() {
        let err = MigrationError::from(ProviderError::opaque("network down"));
        assert_eq!(err.user_message("Could not sign up"), "network down");
    }

    #[test]
    fn test_blank_provider_message_falls_back() {
        let err = MigrationError::from(ProviderError::opaque("  "));
        assert_eq!(err.user_message("Could not save installation"), "Could not save installation");
    }

    #[test]
    fn test_precondition_ignores_fallback() {
        let err = MigrationError::from(PreconditionError::AlreadyLoggedIn);
        assert_eq!(err.user_message("Could not log in"), "User is already logged in");
        assert_eq!(
            MigrationError::from(PreconditionError::NotLoggedIn).to_string(),
            "User is not logged in"
        );
    }
}
