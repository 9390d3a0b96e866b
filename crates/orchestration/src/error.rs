//! Orchestration error types.

use domain::{SubscriptionError, SubscriptionId};
use store::StoreError;
use thiserror::Error;

use crate::customer::CustomerClientError;

/// Errors returned by the subscription use cases.
#[derive(Debug, Error)]
pub enum OrchestrationError {
    /// A domain rule rejected the request.
    #[error("{0}")]
    Domain(#[from] SubscriptionError),

    /// The subscription does not exist.
    #[error("Subscription not found: {0}")]
    NotFound(SubscriptionId),

    /// The customer service could not provision a customer.
    #[error("Customer provisioning failed during {operation}: {source}")]
    Provisioning {
        operation: &'static str,
        #[source]
        source: CustomerClientError,
    },

    /// The store rejected a read or write.
    #[error("Persistence failed during {operation}: {source}")]
    Persistence {
        operation: &'static str,
        #[source]
        source: StoreError,
    },
}

impl OrchestrationError {
    /// Maps a store error, surfacing missing rows as [`OrchestrationError::NotFound`].
    pub(crate) fn from_store(operation: &'static str, source: StoreError) -> Self {
        match source {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Persistence {
                operation,
                source: other,
            },
        }
    }
}
