use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{CustomerId, Subscription, SubscriptionId};
use tokio::sync::RwLock;

use crate::{
    Result, StoreError,
    store::SubscriptionStore,
};

#[derive(Debug, Default)]
struct InMemoryState {
    subscriptions: HashMap<SubscriptionId, Subscription>,
    create_calls: usize,
    update_calls: usize,
    fail_on_create: bool,
    fail_on_update: bool,
}

/// In-memory subscription store for testing.
///
/// Provides the same interface as the PostgreSQL implementation, plus
/// failure switches and call counters for exercising partial-failure paths.
#[derive(Clone, Default)]
pub struct InMemorySubscriptionStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemorySubscriptionStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the store to fail on create calls.
    pub async fn set_fail_on_create(&self, fail: bool) {
        self.state.write().await.fail_on_create = fail;
    }

    /// Configures the store to fail on update calls.
    pub async fn set_fail_on_update(&self, fail: bool) {
        self.state.write().await.fail_on_update = fail;
    }

    /// Returns how many times `create` was invoked.
    pub async fn create_calls(&self) -> usize {
        self.state.read().await.create_calls
    }

    /// Returns how many times `update` was invoked.
    pub async fn update_calls(&self) -> usize {
        self.state.read().await.update_calls
    }

    /// Returns the number of stored subscriptions.
    pub async fn subscription_count(&self) -> usize {
        self.state.read().await.subscriptions.len()
    }

    fn injected_failure() -> StoreError {
        StoreError::Database(sqlx::Error::Protocol("injected store failure".into()))
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn create(&self, subscription: &Subscription) -> Result<()> {
        let mut state = self.state.write().await;
        state.create_calls += 1;

        if state.fail_on_create {
            return Err(Self::injected_failure());
        }

        state
            .subscriptions
            .insert(subscription.id().clone(), subscription.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: &SubscriptionId) -> Result<Subscription> {
        let state = self.state.read().await;
        state
            .subscriptions
            .get(id)
            .map(reloaded)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    async fn get_by_customer_id(&self, customer_id: &CustomerId) -> Result<Vec<Subscription>> {
        let state = self.state.read().await;
        let mut subscriptions: Vec<Subscription> = state
            .subscriptions
            .values()
            .filter(|s| s.customer_id() == customer_id)
            .map(reloaded)
            .collect();
        subscriptions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(subscriptions)
    }

    async fn update(&self, subscription: &Subscription) -> Result<()> {
        let mut state = self.state.write().await;
        state.update_calls += 1;

        if state.fail_on_update {
            return Err(Self::injected_failure());
        }

        if !state.subscriptions.contains_key(subscription.id()) {
            return Err(StoreError::NotFound(subscription.id().clone()));
        }

        state
            .subscriptions
            .insert(subscription.id().clone(), subscription.clone());
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Subscription>> {
        let state = self.state.read().await;
        let mut subscriptions: Vec<Subscription> =
            state.subscriptions.values().map(reloaded).collect();
        subscriptions.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(subscriptions)
    }
}

// A loaded aggregate starts with an empty event list, exactly as the
// Postgres implementation reconstructs rows.
fn reloaded(subscription: &Subscription) -> Subscription {
    Subscription::reconstruct(
        subscription.id().clone(),
        subscription.plan_id().clone(),
        subscription.customer_id().clone(),
        subscription.status(),
        subscription.created_at(),
        subscription.updated_at(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use common::CorrelationId;
    use domain::{PlanId, SubscriptionStatus};

    fn corr() -> CorrelationId {
        CorrelationId::new("corr-test")
    }

    fn subscription(customer: &str) -> Subscription {
        Subscription::new("plan-gold", customer, &corr()).unwrap()
    }

    #[tokio::test]
    async fn create_and_get_by_id() {
        let store = InMemorySubscriptionStore::new();
        let sub = subscription("cust-1");

        store.create(&sub).await.unwrap();

        let loaded = store.get_by_id(sub.id()).await.unwrap();
        assert_eq!(loaded.id(), sub.id());
        assert_eq!(loaded.plan_id(), sub.plan_id());
        assert_eq!(loaded.status(), SubscriptionStatus::Pending);
        assert!(loaded.events().is_empty());
    }

    #[tokio::test]
    async fn get_by_id_missing_returns_not_found() {
        let store = InMemorySubscriptionStore::new();
        let result = store.get_by_id(&SubscriptionId::new()).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn get_by_customer_id_filters_and_sorts_newest_first() {
        let store = InMemorySubscriptionStore::new();
        let customer = CustomerId::parse("cust-1").unwrap();
        let now = Utc::now();

        for (idx, offset) in [60i64, 30, 90].iter().enumerate() {
            let sub = Subscription::reconstruct(
                SubscriptionId::parse(format!("sub-{idx}")).unwrap(),
                PlanId::new("plan-gold").unwrap(),
                customer.clone(),
                SubscriptionStatus::Pending,
                now - Duration::seconds(*offset),
                now,
            );
            store.create(&sub).await.unwrap();
        }
        store.create(&subscription("cust-2")).await.unwrap();

        let subs = store.get_by_customer_id(&customer).await.unwrap();
        assert_eq!(subs.len(), 3);
        assert!(subs.windows(2).all(|w| w[0].created_at() >= w[1].created_at()));
    }

    #[tokio::test]
    async fn update_replaces_stored_state() {
        let store = InMemorySubscriptionStore::new();
        let mut sub = subscription("cust-1");
        store.create(&sub).await.unwrap();

        sub.activate(&corr()).unwrap();
        store.update(&sub).await.unwrap();

        let loaded = store.get_by_id(sub.id()).await.unwrap();
        assert_eq!(loaded.status(), SubscriptionStatus::Active);
    }

    #[tokio::test]
    async fn update_missing_returns_not_found() {
        let store = InMemorySubscriptionStore::new();
        let sub = subscription("cust-1");

        let result = store.update(&sub).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn fail_switches_and_call_counters() {
        let store = InMemorySubscriptionStore::new();
        store.set_fail_on_create(true).await;

        let result = store.create(&subscription("cust-1")).await;
        assert!(matches!(result, Err(StoreError::Database(_))));
        assert_eq!(store.create_calls().await, 1);
        assert_eq!(store.subscription_count().await, 0);
    }

    #[tokio::test]
    async fn get_all_sorts_newest_first() {
        let store = InMemorySubscriptionStore::new();
        let now = Utc::now();

        for (idx, offset) in [10i64, 5, 20].iter().enumerate() {
            let sub = Subscription::reconstruct(
                SubscriptionId::parse(format!("sub-{idx}")).unwrap(),
                PlanId::new("plan-gold").unwrap(),
                CustomerId::parse("cust-1").unwrap(),
                SubscriptionStatus::Pending,
                now - Duration::seconds(*offset),
                now,
            );
            store.create(&sub).await.unwrap();
        }

        let subs = store.get_all().await.unwrap();
        assert_eq!(subs.len(), 3);
        assert!(subs.windows(2).all(|w| w[0].created_at() >= w[1].created_at()));
    }
}
