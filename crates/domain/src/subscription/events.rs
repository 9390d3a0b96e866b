//! Subscription domain events.

use chrono::{DateTime, Utc};
use common::CorrelationId;
use serde::{Deserialize, Serialize};

use super::{CustomerId, PlanId, SubscriptionId};

/// Events recorded as a side effect of successful subscription operations.
///
/// Events are transient: they live on the aggregate instance for the
/// duration of one request and are discarded after being flushed once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SubscriptionEvent {
    /// A new subscription was requested.
    SubscriptionRequested(SubscriptionRequestedData),

    /// A pending subscription was marked ready for activation.
    SubscriptionReadyForActivation(SubscriptionReadyForActivationData),

    /// The subscription was activated.
    SubscriptionActivated(SubscriptionActivatedData),

    /// The subscription was cancelled.
    SubscriptionCancelled(SubscriptionCancelledData),

    /// The subscription was suspended.
    SubscriptionSuspended(SubscriptionSuspendedData),
}

impl SubscriptionEvent {
    /// Returns the event type tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            SubscriptionEvent::SubscriptionRequested(_) => "SubscriptionRequested",
            SubscriptionEvent::SubscriptionReadyForActivation(_) => {
                "SubscriptionReadyForActivation"
            }
            SubscriptionEvent::SubscriptionActivated(_) => "SubscriptionActivated",
            SubscriptionEvent::SubscriptionCancelled(_) => "SubscriptionCancelled",
            SubscriptionEvent::SubscriptionSuspended(_) => "SubscriptionSuspended",
        }
    }

    /// Returns the ID of the aggregate this event belongs to.
    pub fn aggregate_id(&self) -> &SubscriptionId {
        match self {
            SubscriptionEvent::SubscriptionRequested(data) => &data.aggregate_id,
            SubscriptionEvent::SubscriptionReadyForActivation(data) => &data.aggregate_id,
            SubscriptionEvent::SubscriptionActivated(data) => &data.aggregate_id,
            SubscriptionEvent::SubscriptionCancelled(data) => &data.aggregate_id,
            SubscriptionEvent::SubscriptionSuspended(data) => &data.aggregate_id,
        }
    }

    /// Returns when the event occurred.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            SubscriptionEvent::SubscriptionRequested(data) => data.occurred_at,
            SubscriptionEvent::SubscriptionReadyForActivation(data) => data.occurred_at,
            SubscriptionEvent::SubscriptionActivated(data) => data.occurred_at,
            SubscriptionEvent::SubscriptionCancelled(data) => data.occurred_at,
            SubscriptionEvent::SubscriptionSuspended(data) => data.occurred_at,
        }
    }

    /// Returns the correlation id of the request that produced the event.
    pub fn correlation_id(&self) -> &CorrelationId {
        match self {
            SubscriptionEvent::SubscriptionRequested(data) => &data.correlation_id,
            SubscriptionEvent::SubscriptionReadyForActivation(data) => &data.correlation_id,
            SubscriptionEvent::SubscriptionActivated(data) => &data.correlation_id,
            SubscriptionEvent::SubscriptionCancelled(data) => &data.correlation_id,
            SubscriptionEvent::SubscriptionSuspended(data) => &data.correlation_id,
        }
    }
}

/// Data for SubscriptionRequested.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRequestedData {
    /// The subscription the event belongs to.
    pub aggregate_id: SubscriptionId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// Correlation id of the originating request.
    pub correlation_id: CorrelationId,

    /// The requested plan.
    pub plan_id: PlanId,

    /// The customer the subscription is bound to.
    pub customer_id: CustomerId,
}

/// Data for SubscriptionReadyForActivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionReadyForActivationData {
    /// The subscription the event belongs to.
    pub aggregate_id: SubscriptionId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// Correlation id of the originating request.
    pub correlation_id: CorrelationId,

    /// The subscribed plan.
    pub plan_id: PlanId,

    /// The customer the subscription is bound to.
    pub customer_id: CustomerId,
}

/// Data for SubscriptionActivated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionActivatedData {
    /// The subscription the event belongs to.
    pub aggregate_id: SubscriptionId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// Correlation id of the originating request.
    pub correlation_id: CorrelationId,

    /// The subscribed plan.
    pub plan_id: PlanId,

    /// The customer the subscription is bound to.
    pub customer_id: CustomerId,
}

/// Data for SubscriptionCancelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionCancelledData {
    /// The subscription the event belongs to.
    pub aggregate_id: SubscriptionId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// Correlation id of the originating request.
    pub correlation_id: CorrelationId,

    /// Free-text reason for the cancellation.
    pub reason: String,
}

/// Data for SubscriptionSuspended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionSuspendedData {
    /// The subscription the event belongs to.
    pub aggregate_id: SubscriptionId,

    /// When the event occurred.
    pub occurred_at: DateTime<Utc>,

    /// Correlation id of the originating request.
    pub correlation_id: CorrelationId,

    /// Free-text reason for the suspension.
    pub reason: String,
}

// Convenience constructors for events
impl SubscriptionEvent {
    /// Creates a SubscriptionRequested event.
    pub fn requested(
        aggregate_id: SubscriptionId,
        plan_id: PlanId,
        customer_id: CustomerId,
        correlation_id: CorrelationId,
    ) -> Self {
        SubscriptionEvent::SubscriptionRequested(SubscriptionRequestedData {
            aggregate_id,
            occurred_at: Utc::now(),
            correlation_id,
            plan_id,
            customer_id,
        })
    }

    /// Creates a SubscriptionReadyForActivation event.
    pub fn ready_for_activation(
        aggregate_id: SubscriptionId,
        plan_id: PlanId,
        customer_id: CustomerId,
        correlation_id: CorrelationId,
    ) -> Self {
        SubscriptionEvent::SubscriptionReadyForActivation(SubscriptionReadyForActivationData {
            aggregate_id,
            occurred_at: Utc::now(),
            correlation_id,
            plan_id,
            customer_id,
        })
    }

    /// Creates a SubscriptionActivated event.
    pub fn activated(
        aggregate_id: SubscriptionId,
        plan_id: PlanId,
        customer_id: CustomerId,
        correlation_id: CorrelationId,
    ) -> Self {
        SubscriptionEvent::SubscriptionActivated(SubscriptionActivatedData {
            aggregate_id,
            occurred_at: Utc::now(),
            correlation_id,
            plan_id,
            customer_id,
        })
    }

    /// Creates a SubscriptionCancelled event.
    pub fn cancelled(
        aggregate_id: SubscriptionId,
        reason: impl Into<String>,
        correlation_id: CorrelationId,
    ) -> Self {
        SubscriptionEvent::SubscriptionCancelled(SubscriptionCancelledData {
            aggregate_id,
            occurred_at: Utc::now(),
            correlation_id,
            reason: reason.into(),
        })
    }

    /// Creates a SubscriptionSuspended event.
    pub fn suspended(
        aggregate_id: SubscriptionId,
        reason: impl Into<String>,
        correlation_id: CorrelationId,
    ) -> Self {
        SubscriptionEvent::SubscriptionSuspended(SubscriptionSuspendedData {
            aggregate_id,
            occurred_at: Utc::now(),
            correlation_id,
            reason: reason.into(),
        })
    }
}
