use async_trait::async_trait;
use domain::{CustomerId, Subscription, SubscriptionId};

use crate::Result;

/// Core trait for subscription persistence.
///
/// The store is the only shared mutable resource across requests; it must
/// serialize conflicting writes at the storage layer (row-level transactions,
/// unique constraint on the aggregate id). All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Persists a new subscription.
    async fn create(&self, subscription: &Subscription) -> Result<()>;

    /// Loads a subscription by ID.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) when
    /// no row exists. Loaded aggregates start with an empty event list.
    async fn get_by_id(&self, id: &SubscriptionId) -> Result<Subscription>;

    /// Loads all subscriptions for a customer, newest first.
    async fn get_by_customer_id(&self, customer_id: &CustomerId) -> Result<Vec<Subscription>>;

    /// Updates an existing subscription.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) when
    /// the update affects zero rows.
    async fn update(&self, subscription: &Subscription) -> Result<()>;

    /// Loads all subscriptions, newest first.
    async fn get_all(&self) -> Result<Vec<Subscription>>;
}
