use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{CustomerId, PlanId, Subscription, SubscriptionId, SubscriptionStatus};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{Result, StoreError, store::SubscriptionStore};

/// PostgreSQL-backed subscription store.
#[derive(Clone)]
pub struct PostgresSubscriptionStore {
    pool: PgPool,
}

impl PostgresSubscriptionStore {
    /// Creates a new PostgreSQL subscription store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects to the database and returns a store over a fresh pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_subscription(row: PgRow) -> Result<Subscription> {
        let id = SubscriptionId::parse(row.try_get::<String, _>("id")?)?;
        let plan_id = PlanId::new(row.try_get::<String, _>("plan_id")?)?;
        let customer_id = CustomerId::parse(row.try_get::<String, _>("customer_id")?)?;
        let status: SubscriptionStatus = row.try_get::<String, _>("status")?.parse()?;
        let created_at: DateTime<Utc> = row.try_get("created_at")?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at")?;

        Ok(Subscription::reconstruct(
            id,
            plan_id,
            customer_id,
            status,
            created_at,
            updated_at,
        ))
    }
}

#[async_trait]
impl SubscriptionStore for PostgresSubscriptionStore {
    async fn create(&self, subscription: &Subscription) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (id, plan_id, customer_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(subscription.id().as_str())
        .bind(subscription.plan_id().as_str())
        .bind(subscription.customer_id().as_str())
        .bind(subscription.status().as_str())
        .bind(subscription.created_at())
        .bind(subscription.updated_at())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_by_id(&self, id: &SubscriptionId) -> Result<Subscription> {
        let row = sqlx::query(
            r#"
            SELECT id, plan_id, customer_id, status, created_at, updated_at
            FROM subscriptions
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        Self::row_to_subscription(row)
    }

    async fn get_by_customer_id(&self, customer_id: &CustomerId) -> Result<Vec<Subscription>> {
        let rows = sqlx::query(
            r#"
            SELECT id, plan_id, customer_id, status, created_at, updated_at
            FROM subscriptions
            WHERE customer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(customer_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_subscription).collect()
    }

    async fn update(&self, subscription: &Subscription) -> Result<()> {
        // Row-level transaction; conflicting writers serialize on the row lock.
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE subscriptions
            SET plan_id = $1, customer_id = $2, status = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(subscription.plan_id().as_str())
        .bind(subscription.customer_id().as_str())
        .bind(subscription.status().as_str())
        .bind(subscription.updated_at())
        .bind(subscription.id().as_str())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(subscription.id().clone()));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<Subscription>> {
        let rows = sqlx::query(
            r#"
            SELECT id, plan_id, customer_id, status, created_at, updated_at
            FROM subscriptions
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_subscription).collect()
    }
}
