//! Persistence layer for subscription aggregates.
//!
//! Provides the [`SubscriptionStore`] trait together with a PostgreSQL
//! implementation and an in-memory implementation for testing.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError};
pub use memory::InMemorySubscriptionStore;
pub use postgres::PostgresSubscriptionStore;
pub use store::SubscriptionStore;
