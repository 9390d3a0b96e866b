//! Subscription aggregate implementation.

use chrono::{DateTime, Utc};
use common::CorrelationId;

use super::{
    CustomerId, PlanId, SubscriptionError, SubscriptionEvent, SubscriptionId, SubscriptionStatus,
};

/// Subscription aggregate root.
///
/// Owns the status state machine and records one domain event as a side
/// effect of every successful mutating operation. The event list is
/// in-memory only and is cleared after a successful flush; it is never
/// the source of truth.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: SubscriptionId,
    plan_id: PlanId,
    customer_id: CustomerId,
    status: SubscriptionStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<SubscriptionEvent>,
}

impl Subscription {
    /// Creates a new subscription in `pending` status and records a
    /// `SubscriptionRequested` event.
    ///
    /// An empty `customer_id` generates a random one; this is a
    /// legacy/offline path, the orchestrated creation flow always supplies
    /// the id returned by customer provisioning.
    pub fn new(
        plan_id: &str,
        customer_id: &str,
        correlation_id: &CorrelationId,
    ) -> Result<Self, SubscriptionError> {
        let plan_id = PlanId::new(plan_id)?;
        let customer_id = if customer_id.is_empty() {
            CustomerId::generate()
        } else {
            CustomerId::parse(customer_id)?
        };

        let now = Utc::now();
        let mut subscription = Self {
            id: SubscriptionId::new(),
            plan_id,
            customer_id,
            status: SubscriptionStatus::Pending,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };

        subscription.record(SubscriptionEvent::requested(
            subscription.id.clone(),
            subscription.plan_id.clone(),
            subscription.customer_id.clone(),
            correlation_id.clone(),
        ));

        Ok(subscription)
    }

    /// Rebuilds a subscription from persisted fields.
    ///
    /// Reconstruction is not a domain action: the event list starts empty.
    pub fn reconstruct(
        id: SubscriptionId,
        plan_id: PlanId,
        customer_id: CustomerId,
        status: SubscriptionStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            plan_id,
            customer_id,
            status,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    /// Returns the subscription ID.
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// Returns the plan ID.
    pub fn plan_id(&self) -> &PlanId {
        &self.plan_id
    }

    /// Returns the customer ID.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns the current status.
    pub fn status(&self) -> SubscriptionStatus {
        self.status
    }

    /// Returns when the subscription was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when the subscription was last mutated.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the pending domain events.
    pub fn events(&self) -> &[SubscriptionEvent] {
        &self.events
    }

    /// Clears the pending events, used after a successful flush.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Returns true if the subscription is active.
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Returns true if the subscription is pending.
    pub fn is_pending(&self) -> bool {
        self.status == SubscriptionStatus::Pending
    }

    /// Marks a pending subscription as ready for activation.
    ///
    /// Validates the status and records an event but leaves the status at
    /// `pending`; the observed contract has no intermediate status and one
    /// is deliberately not invented here.
    pub fn mark_as_ready_for_activation(
        &mut self,
        correlation_id: &CorrelationId,
    ) -> Result<(), SubscriptionError> {
        if self.status != SubscriptionStatus::Pending {
            return Err(SubscriptionError::InvalidStatusTransition {
                status: self.status,
                action: "mark as ready for activation",
            });
        }

        self.record(SubscriptionEvent::ready_for_activation(
            self.id.clone(),
            self.plan_id.clone(),
            self.customer_id.clone(),
            correlation_id.clone(),
        ));
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Activates the subscription from `pending` or `suspended`.
    pub fn activate(&mut self, correlation_id: &CorrelationId) -> Result<(), SubscriptionError> {
        if !self.status.can_activate() {
            return Err(SubscriptionError::InvalidStatusTransition {
                status: self.status,
                action: "activate",
            });
        }

        self.status = SubscriptionStatus::Active;
        self.updated_at = Utc::now();

        self.record(SubscriptionEvent::activated(
            self.id.clone(),
            self.plan_id.clone(),
            self.customer_id.clone(),
            correlation_id.clone(),
        ));
        Ok(())
    }

    /// Cancels the subscription. Cancellation is terminal.
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        correlation_id: &CorrelationId,
    ) -> Result<(), SubscriptionError> {
        if !self.status.can_cancel() {
            return Err(SubscriptionError::InvalidStatusTransition {
                status: self.status,
                action: "cancel",
            });
        }

        self.status = SubscriptionStatus::Cancelled;
        self.updated_at = Utc::now();

        self.record(SubscriptionEvent::cancelled(
            self.id.clone(),
            reason,
            correlation_id.clone(),
        ));
        Ok(())
    }

    /// Suspends an active subscription.
    pub fn suspend(
        &mut self,
        reason: impl Into<String>,
        correlation_id: &CorrelationId,
    ) -> Result<(), SubscriptionError> {
        if !self.status.can_suspend() {
            return Err(SubscriptionError::InvalidStatusTransition {
                status: self.status,
                action: "suspend",
            });
        }

        self.status = SubscriptionStatus::Suspended;
        self.updated_at = Utc::now();

        self.record(SubscriptionEvent::suspended(
            self.id.clone(),
            reason,
            correlation_id.clone(),
        ));
        Ok(())
    }

    fn record(&mut self, event: SubscriptionEvent) {
        self.events.push(event);
    }
}
