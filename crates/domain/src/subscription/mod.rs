//! Subscription aggregate and related types.

mod aggregate;
mod events;
mod status;
mod value_objects;

pub use aggregate::Subscription;
pub use events::{
    SubscriptionActivatedData, SubscriptionCancelledData, SubscriptionEvent,
    SubscriptionReadyForActivationData, SubscriptionRequestedData, SubscriptionSuspendedData,
};
pub use status::SubscriptionStatus;
pub use value_objects::{CustomerId, PlanId, SubscriptionId};

use thiserror::Error;

/// Errors that can occur during subscription domain operations.
#[derive(Debug, Error)]
pub enum SubscriptionError {
    /// Plan ID is required.
    #[error("Plan ID is required")]
    InvalidPlanId,

    /// An identifier string was empty.
    #[error("{what} must not be empty")]
    EmptyId { what: &'static str },

    /// A stored status string did not match any known status.
    #[error("Unknown subscription status: {value}")]
    UnknownStatus { value: String },

    /// The subscription is not in a state that allows the operation.
    #[error("Invalid status transition: cannot {action} from {status} status")]
    InvalidStatusTransition {
        status: SubscriptionStatus,
        action: &'static str,
    },
}
