//! Subscription use cases.

use common::CorrelationId;
use domain::{CustomerId, Subscription, SubscriptionId};
use serde::{Deserialize, Serialize};
use store::SubscriptionStore;

use crate::customer::{CustomerProvisioning, CustomerRequest};
use crate::error::OrchestrationError;
use crate::events::{EventDispatcher, EventSink};

/// Command to create a subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubscription {
    pub plan_id: String,
    pub customer_name: String,
    pub customer_email: String,
}

/// Read model of a subscription as returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionView {
    pub id: String,
    pub plan_id: String,
    pub customer_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Subscription> for SubscriptionView {
    fn from(subscription: &Subscription) -> Self {
        Self {
            id: subscription.id().to_string(),
            plan_id: subscription.plan_id().to_string(),
            customer_id: subscription.customer_id().to_string(),
            status: subscription.status().as_str().to_string(),
            created_at: subscription.created_at().to_rfc3339(),
            updated_at: subscription.updated_at().to_rfc3339(),
        }
    }
}

/// Coordinates customer provisioning, the aggregate, persistence, and event
/// publication.
///
/// The creation workflow is deliberately not transactional across services:
/// a customer provisioned remotely is not rolled back when the local write
/// fails. Reconciliation is an operational concern, not handled here.
pub struct SubscriptionService<S, C, E>
where
    S: SubscriptionStore,
    C: CustomerProvisioning,
    E: EventSink,
{
    store: S,
    customers: C,
    dispatcher: EventDispatcher<E>,
}

impl<S, C, E> SubscriptionService<S, C, E>
where
    S: SubscriptionStore,
    C: CustomerProvisioning,
    E: EventSink,
{
    /// Creates a new subscription service.
    pub fn new(store: S, customers: C, sink: E) -> Self {
        Self {
            store,
            customers,
            dispatcher: EventDispatcher::new(sink),
        }
    }

    /// Creates a subscription, provisioning its customer first.
    ///
    /// The provisioning call happens before anything local exists; a
    /// provisioning failure therefore leaves no trace. A persistence failure
    /// after provisioning leaves an orphaned remote customer.
    #[tracing::instrument(skip(self, request), fields(plan_id = %request.plan_id))]
    pub async fn create_subscription(
        &self,
        request: CreateSubscription,
        correlation_id: Option<CorrelationId>,
    ) -> Result<SubscriptionView, OrchestrationError> {
        let correlation_id = CorrelationId::ensure(correlation_id, "subscription");

        let customer = self
            .customers
            .create_customer(
                &CustomerRequest {
                    name: request.customer_name,
                    email: request.customer_email,
                },
                &correlation_id,
            )
            .await
            .map_err(|source| OrchestrationError::Provisioning {
                operation: "create subscription",
                source,
            })?;

        let mut subscription = Subscription::new(&request.plan_id, &customer.id, &correlation_id)?;

        self.store
            .create(&subscription)
            .await
            .map_err(|source| OrchestrationError::from_store("create subscription", source))?;

        tracing::info!(
            subscription_id = %subscription.id(),
            customer_id = %customer.id,
            correlation_id = %correlation_id,
            "subscription created"
        );

        self.flush_events(&mut subscription).await;

        Ok(SubscriptionView::from(&subscription))
    }

    /// Returns the subscription with the given id.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscription_by_id(
        &self,
        id: &str,
    ) -> Result<SubscriptionView, OrchestrationError> {
        let id = SubscriptionId::parse(id)?;
        let subscription = self
            .store
            .get_by_id(&id)
            .await
            .map_err(|source| OrchestrationError::from_store("get subscription", source))?;

        Ok(SubscriptionView::from(&subscription))
    }

    /// Returns all subscriptions, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_subscriptions(&self) -> Result<Vec<SubscriptionView>, OrchestrationError> {
        let subscriptions = self
            .store
            .get_all()
            .await
            .map_err(|source| OrchestrationError::from_store("list subscriptions", source))?;

        Ok(subscriptions.iter().map(SubscriptionView::from).collect())
    }

    /// Returns the subscriptions of one customer, newest first.
    #[tracing::instrument(skip(self))]
    pub async fn get_subscriptions_by_customer(
        &self,
        customer_id: &str,
    ) -> Result<Vec<SubscriptionView>, OrchestrationError> {
        let customer_id = CustomerId::parse(customer_id)?;
        let subscriptions = self
            .store
            .get_by_customer_id(&customer_id)
            .await
            .map_err(|source| {
                OrchestrationError::from_store("list customer subscriptions", source)
            })?;

        Ok(subscriptions.iter().map(SubscriptionView::from).collect())
    }

    /// Activates the subscription with the given id.
    // Activation does not flush the recorded event; only the creation
    // workflow publishes. Kept to match the observed contract.
    #[tracing::instrument(skip(self))]
    pub async fn activate_subscription(
        &self,
        id: &str,
        correlation_id: Option<CorrelationId>,
    ) -> Result<SubscriptionView, OrchestrationError> {
        let correlation_id = CorrelationId::ensure(correlation_id, "subscription");
        let id = SubscriptionId::parse(id)?;

        let mut subscription = self
            .store
            .get_by_id(&id)
            .await
            .map_err(|source| OrchestrationError::from_store("activate subscription", source))?;

        subscription.activate(&correlation_id)?;

        self.store
            .update(&subscription)
            .await
            .map_err(|source| OrchestrationError::from_store("activate subscription", source))?;

        tracing::info!(
            subscription_id = %subscription.id(),
            correlation_id = %correlation_id,
            "subscription activated"
        );

        Ok(SubscriptionView::from(&subscription))
    }

    /// Flushes pending events, logging and swallowing sink failures.
    async fn flush_events(&self, subscription: &mut Subscription) {
        if let Err(error) = self.dispatcher.publish_pending(subscription).await {
            tracing::warn!(
                subscription_id = %subscription.id(),
                %error,
                "failed to publish subscription events"
            );
        }
    }
}
