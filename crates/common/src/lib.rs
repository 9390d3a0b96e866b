//! Shared types used across the subscription service crates.

pub mod types;

pub use types::CorrelationId;
