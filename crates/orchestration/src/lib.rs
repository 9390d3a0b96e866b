//! Subscription orchestration: the only crate with business-process logic.
//!
//! Coordinates customer provisioning, aggregate construction, persistence,
//! and best-effort event publication for the subscription use cases.

pub mod customer;
pub mod error;
pub mod events;
pub mod instrument;
pub mod service;

pub use customer::{
    CustomerClientError, CustomerProvisioning, CustomerRequest, HttpCustomerClient,
    HttpCustomerClientConfig, InMemoryCustomerService, ProvisionedCustomer,
};
pub use error::OrchestrationError;
pub use events::{
    EventDispatcher, EventSink, EventSinkError, InMemoryEventSink, LoggingEventSink,
};
pub use instrument::InstrumentedService;
pub use service::{CreateSubscription, SubscriptionService, SubscriptionView};
