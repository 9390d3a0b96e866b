//! Domain layer for the subscription service.
//!
//! This crate provides the Subscription aggregate root together with:
//! - Validated identifier value objects (subscription, plan, customer)
//! - The subscription status state machine
//! - Domain events recorded as a side effect of each transition

pub mod subscription;

pub use subscription::{
    CustomerId, PlanId, Subscription, SubscriptionError, SubscriptionEvent, SubscriptionId,
    SubscriptionStatus,
};
