//! Authentication error types

/// Errors that can occur while creating or using a session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Invalid email or password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The operation needs a session and none was given.
    #[error("No active session")]
    NoSession,

    /// The session expired or was deleted.
    #[error("Session expired: {session_id}")]
    SessionExpired { session_id: String },

    /// The account has no member document attached to it.
    #[error("No member linked to account {account_id}")]
    NoMember { account_id: String },

    /// Network error during authentication.
    #[error("Network error during auth: {0}")]
    Network(#[from] reqwest::Error),

    /// Failed to parse the authentication response.
    #[error("Auth response parse error: {0}")]
    Parse(String),
}
