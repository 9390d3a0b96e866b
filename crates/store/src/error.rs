use domain::{SubscriptionError, SubscriptionId};
use thiserror::Error;

/// Errors that can occur when interacting with the subscription store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No subscription exists with the given ID.
    #[error("Subscription not found: {0}")]
    NotFound(SubscriptionId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row could not be turned back into a valid aggregate.
    #[error("Corrupt stored subscription: {0}")]
    Corrupt(#[from] SubscriptionError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
