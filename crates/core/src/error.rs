//! Validation errors for user input.

/// Result alias for validation.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while validating forms before they reach the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Pain, mobility or strength left empty
    #[error("Please fill in pain, mobility, and strength levels")]
    MissingRequiredMetrics,

    /// A numeric field did not parse
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber {
        /// Field name
        field: &'static str,
        /// Raw input
        value: String,
    },

    /// A numeric field outside its scale
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Field name
        field: &'static str,
        /// Parsed value
        value: i64,
        /// Lowest allowed value
        min: u8,
        /// Highest allowed value
        max: u8,
    },

    /// Unknown mood name
    #[error("unknown mood {0:?} (expected excellent, good, fair or poor)")]
    InvalidMood(String),

    /// A required account field left empty
    #[error("Please fill in all required fields")]
    MissingAccountFields,

    /// Password and confirmation differ
    #[error("Passwords don't match")]
    PasswordMismatch,

    /// Password shorter than the minimum length
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}
