use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the lottery backend
#[derive(Error, Debug)]
pub enum LotoError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Business-rule rejections
    #[error("Bet batch total is below the minimum cart value of {minimum}")]
    BelowMinimum { minimum: Decimal },

    #[error("Bet batch is empty")]
    EmptyBatch,

    // Unresolved references
    #[error("Game not found: {0}")]
    GameNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Cart row is missing")]
    CartNotFound,

    // Notification dispatch
    #[error("Notification dispatch failed: {0}")]
    NotificationFailed(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias for LotoError
pub type Result<T> = std::result::Result<T, LotoError>;

impl LotoError {
    /// Whether this failure is a business-rule rejection rather than a defect.
    pub fn is_rejection(&self) -> bool {
        matches!(self, LotoError::BelowMinimum { .. } | LotoError::EmptyBatch)
    }
}
