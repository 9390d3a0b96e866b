//! Event sink collaborator and pending-event dispatch.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{Subscription, SubscriptionEvent};
use thiserror::Error;

/// Errors that can occur while publishing a domain event.
#[derive(Debug, Error)]
pub enum EventSinkError {
    /// The event could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sink rejected the event.
    #[error("Event sink rejected {event_type}: {reason}")]
    Rejected {
        event_type: &'static str,
        reason: String,
    },
}

/// Trait for event sink implementations.
///
/// A sink either enqueues the event for reliable delivery or writes it to a
/// durable log. Failures here never unwind the caller's business
/// transaction; callers treat publication as fire-and-forget.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Publishes a single domain event.
    async fn publish(&self, event: &SubscriptionEvent) -> Result<(), EventSinkError>;
}

/// Event sink that writes each event to the structured log.
///
/// Stands in for a message broker: the serialized event lands in the log
/// stream where it can be shipped by the log pipeline.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventSink;

impl LoggingEventSink {
    /// Creates a new logging event sink.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for LoggingEventSink {
    async fn publish(&self, event: &SubscriptionEvent) -> Result<(), EventSinkError> {
        let payload = serde_json::to_string(event)?;

        tracing::info!(
            event_type = event.event_type(),
            aggregate_id = %event.aggregate_id(),
            correlation_id = %event.correlation_id(),
            %payload,
            "domain event published"
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemorySinkState {
    published: Vec<SubscriptionEvent>,
    fail_on_publish: bool,
}

/// In-memory event sink for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventSink {
    state: Arc<RwLock<InMemorySinkState>>,
}

impl InMemoryEventSink {
    /// Creates a new in-memory event sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the sink to reject publishes.
    pub fn set_fail_on_publish(&self, fail: bool) {
        self.state.write().unwrap().fail_on_publish = fail;
    }

    /// Returns the events published so far.
    pub fn published(&self) -> Vec<SubscriptionEvent> {
        self.state.read().unwrap().published.clone()
    }

    /// Returns the number of events published so far.
    pub fn published_count(&self) -> usize {
        self.state.read().unwrap().published.len()
    }
}

#[async_trait]
impl EventSink for InMemoryEventSink {
    async fn publish(&self, event: &SubscriptionEvent) -> Result<(), EventSinkError> {
        let mut state = self.state.write().unwrap();

        if state.fail_on_publish {
            return Err(EventSinkError::Rejected {
                event_type: event.event_type(),
                reason: "injected sink failure".to_string(),
            });
        }

        state.published.push(event.clone());
        Ok(())
    }
}

/// Flushes an aggregate's pending events to a sink.
///
/// Events are cleared only after every pending event was accepted; a
/// rejected event leaves the remaining list intact.
#[derive(Debug, Clone)]
pub struct EventDispatcher<E: EventSink> {
    sink: E,
}

impl<E: EventSink> EventDispatcher<E> {
    /// Creates a new dispatcher over the given sink.
    pub fn new(sink: E) -> Self {
        Self { sink }
    }

    /// Publishes all pending events of the subscription, then clears them.
    pub async fn publish_pending(
        &self,
        subscription: &mut Subscription,
    ) -> Result<(), EventSinkError> {
        if subscription.events().is_empty() {
            return Ok(());
        }

        for event in subscription.events() {
            self.sink.publish(event).await?;
        }

        subscription.clear_events();
        Ok(())
    }
}
