//! Metrics instrumentation for the subscription service.
//!
//! Composition rather than inheritance: the wrapper owns the service and
//! exposes the same operations, leaving the service itself free of metrics
//! concerns.

use std::time::Instant;

use common::CorrelationId;
use metrics::{counter, histogram};
use store::SubscriptionStore;

use crate::customer::CustomerProvisioning;
use crate::error::OrchestrationError;
use crate::events::EventSink;
use crate::service::{CreateSubscription, SubscriptionService, SubscriptionView};

/// Records operation counts and durations around a [`SubscriptionService`].
pub struct InstrumentedService<S, C, E>
where
    S: SubscriptionStore,
    C: CustomerProvisioning,
    E: EventSink,
{
    inner: SubscriptionService<S, C, E>,
}

impl<S, C, E> InstrumentedService<S, C, E>
where
    S: SubscriptionStore,
    C: CustomerProvisioning,
    E: EventSink,
{
    /// Wraps a subscription service.
    pub fn new(inner: SubscriptionService<S, C, E>) -> Self {
        Self { inner }
    }

    /// Returns the wrapped service.
    pub fn inner(&self) -> &SubscriptionService<S, C, E> {
        &self.inner
    }

    pub async fn create_subscription(
        &self,
        request: CreateSubscription,
        correlation_id: Option<CorrelationId>,
    ) -> Result<SubscriptionView, OrchestrationError> {
        let started = Instant::now();
        let result = self.inner.create_subscription(request, correlation_id).await;
        observe("create_subscription", started, result.is_ok());
        result
    }

    pub async fn get_subscription_by_id(
        &self,
        id: &str,
    ) -> Result<SubscriptionView, OrchestrationError> {
        let started = Instant::now();
        let result = self.inner.get_subscription_by_id(id).await;
        observe("get_subscription_by_id", started, result.is_ok());
        result
    }

    pub async fn get_all_subscriptions(&self) -> Result<Vec<SubscriptionView>, OrchestrationError> {
        let started = Instant::now();
        let result = self.inner.get_all_subscriptions().await;
        observe("get_all_subscriptions", started, result.is_ok());
        result
    }

    pub async fn get_subscriptions_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<SubscriptionView>, OrchestrationError> {
        let started = Instant::now();
        let result = self.inner.get_subscriptions_by_customer(customer_id).await;
        observe("get_subscriptions_by_customer", started, result.is_ok());
        result
    }

    pub async fn activate_subscription(
        &self,
        id: &str,
        correlation_id: Option<CorrelationId>,
    ) -> Result<SubscriptionView, OrchestrationError> {
        let started = Instant::now();
        let result = self.inner.activate_subscription(id, correlation_id).await;
        observe("activate_subscription", started, result.is_ok());
        result
    }
}

fn observe(operation: &'static str, started: Instant, success: bool) {
    counter!("subscription_operations_total", "operation" => operation).increment(1);
    if !success {
        counter!("subscription_operation_failures_total", "operation" => operation).increment(1);
    }
    histogram!("subscription_operation_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}
