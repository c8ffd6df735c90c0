use thiserror::Error;

/// Errors surfaced by the API layer. Every variant degrades to a message the
/// caller can render; nothing here is fatal.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Credentials rejected or token expired (HTTP 401).
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Authenticated but not allowed (HTTP 403).
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// HTTP 404.
    #[error("not found: {0}")]
    NotFound(String),

    /// Server-side validation rejected the payload (HTTP 400/422).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// The server-supplied (or fallback) message, suitable for an error
    /// banner next to the failed action.
    pub fn message(&self) -> String {
        match self {
            ApiError::Authentication(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Validation(m) => m.clone(),
            ApiError::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// True when the caller should drop any stored token and fall back to
    /// the login view.
    pub fn is_authentication(&self) -> bool {
        matches!(self, ApiError::Authentication(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
