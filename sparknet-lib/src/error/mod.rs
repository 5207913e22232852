//! Error types

mod api;
mod auth;
mod field;

pub use api::*;
pub use auth::*;
pub use field::*;

/// Top-level error returned by every fallible console operation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backend rejected the request or could not be reached.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Session creation or lookup failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A record could not be mapped to a typed entity.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// The requested document does not exist.
    #[error("Document '{id}' not found in collection '{collection}'")]
    NotFound { collection: String, id: String },

    /// The operation cannot be performed with the given arguments.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Failed to serialize a request body.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failed to build a URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Creates a new not found error.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Returns `true` if this error means the document does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api(api) => api.status_code() == Some(404),
            _ => false,
        }
    }
}
