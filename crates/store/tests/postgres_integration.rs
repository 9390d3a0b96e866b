//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use common::CorrelationId;
use domain::{CustomerId, PlanId, Subscription, SubscriptionId, SubscriptionStatus};
use sqlx::PgPool;
use store::{PostgresSubscriptionStore, StoreError, SubscriptionStore};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_subscriptions_table.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresSubscriptionStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE subscriptions")
        .execute(&pool)
        .await
        .unwrap();

    PostgresSubscriptionStore::new(pool)
}

fn corr() -> CorrelationId {
    CorrelationId::new("corr-test")
}

fn subscription(customer: &str) -> Subscription {
    Subscription::new("plan-gold", customer, &corr()).unwrap()
}

#[tokio::test]
async fn test_create_and_get_by_id() {
    let store = get_test_store().await;
    let sub = subscription("cust-1");

    store.create(&sub).await.unwrap();

    let loaded = store.get_by_id(sub.id()).await.unwrap();
    assert_eq!(loaded.id(), sub.id());
    assert_eq!(loaded.plan_id().as_str(), "plan-gold");
    assert_eq!(loaded.customer_id().as_str(), "cust-1");
    assert_eq!(loaded.status(), SubscriptionStatus::Pending);
    assert!(loaded.events().is_empty());

    // Postgres stores timestamps at microsecond precision
    assert_eq!(
        loaded.created_at().timestamp_micros(),
        sub.created_at().timestamp_micros()
    );
    assert_eq!(
        loaded.updated_at().timestamp_micros(),
        sub.updated_at().timestamp_micros()
    );
}

#[tokio::test]
async fn test_get_by_id_missing_returns_not_found() {
    let store = get_test_store().await;

    let result = store.get_by_id(&SubscriptionId::new()).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_duplicate_create_violates_unique_id() {
    let store = get_test_store().await;
    let sub = subscription("cust-1");

    store.create(&sub).await.unwrap();

    let result = store.create(&sub).await;
    assert!(matches!(result, Err(StoreError::Database(_))));
}

#[tokio::test]
async fn test_update_persists_status_change() {
    let store = get_test_store().await;
    let mut sub = subscription("cust-1");
    store.create(&sub).await.unwrap();

    sub.activate(&corr()).unwrap();
    store.update(&sub).await.unwrap();

    let loaded = store.get_by_id(sub.id()).await.unwrap();
    assert_eq!(loaded.status(), SubscriptionStatus::Active);
}

#[tokio::test]
async fn test_update_missing_returns_not_found() {
    let store = get_test_store().await;
    let sub = subscription("cust-1");

    let result = store.update(&sub).await;
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn test_get_by_customer_id_filters_and_orders_newest_first() {
    let store = get_test_store().await;
    let customer = CustomerId::parse("cust-1").unwrap();
    let now = chrono::Utc::now();

    for (idx, offset_secs) in [60i64, 30, 90].iter().enumerate() {
        let sub = Subscription::reconstruct(
            SubscriptionId::parse(format!("sub-{idx}")).unwrap(),
            PlanId::new("plan-gold").unwrap(),
            customer.clone(),
            SubscriptionStatus::Pending,
            now - chrono::Duration::seconds(*offset_secs),
            now,
        );
        store.create(&sub).await.unwrap();
    }
    store.create(&subscription("cust-2")).await.unwrap();

    let subs = store.get_by_customer_id(&customer).await.unwrap();
    assert_eq!(subs.len(), 3);
    assert!(
        subs.windows(2)
            .all(|w| w[0].created_at() >= w[1].created_at())
    );
    assert!(subs.iter().all(|s| s.customer_id() == &customer));
}

#[tokio::test]
async fn test_get_all_orders_newest_first() {
    let store = get_test_store().await;
    let now = chrono::Utc::now();

    for (idx, offset_secs) in [10i64, 5, 20].iter().enumerate() {
        let sub = Subscription::reconstruct(
            SubscriptionId::parse(format!("sub-{idx}")).unwrap(),
            PlanId::new("plan-gold").unwrap(),
            CustomerId::parse("cust-1").unwrap(),
            SubscriptionStatus::Pending,
            now - chrono::Duration::seconds(*offset_secs),
            now,
        );
        store.create(&sub).await.unwrap();
    }

    let subs = store.get_all().await.unwrap();
    assert_eq!(subs.len(), 3);
    assert_eq!(subs[0].id().as_str(), "sub-1");
    assert_eq!(subs[1].id().as_str(), "sub-0");
    assert_eq!(subs[2].id().as_str(), "sub-2");
}

#[tokio::test]
async fn test_round_trip_preserves_every_field() {
    let store = get_test_store().await;
    let mut sub = subscription("cust-1");
    sub.activate(&corr()).unwrap();
    sub.suspend("fraud review", &corr()).unwrap();
    store.create(&sub).await.unwrap();

    let loaded = store.get_by_id(sub.id()).await.unwrap();
    assert_eq!(loaded.id(), sub.id());
    assert_eq!(loaded.plan_id(), sub.plan_id());
    assert_eq!(loaded.customer_id(), sub.customer_id());
    assert_eq!(loaded.status(), SubscriptionStatus::Suspended);
    assert!(loaded.events().is_empty());
}
