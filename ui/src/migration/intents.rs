use std::fmt;

/// User intents forwarded by the presentation layer.
#[derive(Clone, PartialEq, Eq)]
pub enum MigrationIntent {
    SignUp { username: String, password: String },
    LogIn { username: String, password: String },
    LogOutLegacy,
    LogOutModern,
    SaveInstallation,
    /// Manual re-run of the modern handoff after a failure
    RetrySessionHandoff,
    Refresh,
}

impl MigrationIntent {
    pub fn name(&self) -> &'static str {
        match self {
            MigrationIntent::SignUp { .. } => "sign up",
            MigrationIntent::LogIn { .. } => "log in",
            MigrationIntent::LogOutLegacy => "legacy log out",
            MigrationIntent::LogOutModern => "modern log out",
            MigrationIntent::SaveInstallation => "save installation",
            MigrationIntent::RetrySessionHandoff => "retry session handoff",
            MigrationIntent::Refresh => "refresh",
        }
    }
}

// Passwords never reach the logs.
impl fmt::Debug for MigrationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MigrationIntent::SignUp { username, .. } => f
                .debug_struct("SignUp")
                .field("username", username)
                .finish_non_exhaustive(),
            MigrationIntent::LogIn { username, .. } => f
                .debug_struct("LogIn")
                .field("username", username)
                .finish_non_exhaustive(),
            other => f.write_str(other.name()),
        }
    }
}
