use thiserror::Error;

/// Error types for the billing core
#[derive(Error, Debug)]
pub enum BillingError {
    /// A required field was absent or rejected by the active validation mode
    #[error("Missing required fields")]
    Validation,

    /// The referenced bill does not exist
    #[error("Bill not found")]
    BillNotFound(Option<i64>),

    /// Hashing the password failed
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// A writer panicked while holding the store lock
    #[error("Billing state lock poisoned")]
    StatePoisoned,
}

impl BillingError {
    /// Whether the caller can fix this by resubmitting different input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, BillingError::Validation | BillingError::BillNotFound(_))
    }
}

impl From<password_hash::Error> for BillingError {
    fn from(error: password_hash::Error) -> Self {
        BillingError::PasswordHash(error.to_string())
    }
}

/// Type alias for Result with BillingError
pub type Result<T> = std::result::Result<T, BillingError>;
