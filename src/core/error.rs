/// Application-wide Result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Main application error type
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Generic business-rule validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Monetary amount is zero, negative or otherwise unusable
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Installment count outside the accepted range
    #[error("Invalid installment count: {0}")]
    InvalidCount(String),

    /// First due date lies before the reference date
    #[error("Due date in the past: {0}")]
    PastDueDate(String),

    /// Attempted edit of a paid installment
    #[error("Installment locked: {0}")]
    InstallmentLocked(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Referential or uniqueness conflict
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

// Helper functions for common error scenarios
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn invalid_amount(msg: impl Into<String>) -> Self {
        AppError::InvalidAmount(msg.into())
    }

    pub fn invalid_count(msg: impl Into<String>) -> Self {
        AppError::InvalidCount(msg.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::NotFound(resource.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn locked(msg: impl Into<String>) -> Self {
        AppError::InstallmentLocked(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
