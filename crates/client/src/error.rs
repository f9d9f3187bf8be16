//! Client error type.

use rehabfit_storage::CacheError;

/// Result alias for client operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors from talking to the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend could not be reached
    #[error("Cannot connect to RehabFit at {url}: {reason}")]
    Connection {
        /// Backend base URL
        url: String,
        /// Transport error text
        reason: String,
    },

    /// 401/403 on a request that carried a token: it is invalid or expired
    #[error("Session expired, please login again.")]
    Unauthorized,

    /// No session token is stored
    #[error("Not logged in. Run `rehabfit login` first.")]
    NotLoggedIn,

    /// Registration with an email that already exists
    #[error("A user with this email already exists.")]
    DuplicateAccount,

    /// Any other non-success status
    #[error("Server error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Server message, or the raw body
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Login succeeded but no token came back
    #[error("Invalid credentials or server error.")]
    MissingToken,

    /// Building the HTTP client failed
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Local cache failure
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl ApiError {
    /// Whether the stored session should be discarded.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::NotLoggedIn)
    }
}
