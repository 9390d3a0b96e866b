//! Identifier value objects for the subscription domain.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SubscriptionError;

/// Unique identifier for a subscription aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(String);

impl SubscriptionId {
    /// Creates a new random subscription ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates a subscription ID from an existing string.
    ///
    /// Fails when the string is empty.
    pub fn parse(id: impl Into<String>) -> Result<Self, SubscriptionError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SubscriptionError::EmptyId {
                what: "subscription ID",
            });
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SubscriptionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of the plan a subscription is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Creates a plan ID from a string.
    ///
    /// Fails when the string is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, SubscriptionError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SubscriptionError::InvalidPlanId);
        }
        Ok(Self(id))
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PlanId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reference to a customer owned by the customer service.
///
/// In the orchestrated creation path this always comes back from customer
/// provisioning; [`CustomerId::generate`] exists only for legacy/offline
/// paths that have no provisioned customer yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Creates a customer ID from an existing string.
    ///
    /// Fails when the string is empty.
    pub fn parse(id: impl Into<String>) -> Result<Self, SubscriptionError> {
        let id = id.into();
        if id.is_empty() {
            return Err(SubscriptionError::EmptyId {
                what: "customer ID",
            });
        }
        Ok(Self(id))
    }

    /// Generates a fresh random customer ID.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_id_new_creates_unique_ids() {
        let id1 = SubscriptionId::new();
        let id2 = SubscriptionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn subscription_id_parse_preserves_value() {
        let id = SubscriptionId::parse("sub-123").unwrap();
        assert_eq!(id.as_str(), "sub-123");
    }

    #[test]
    fn subscription_id_parse_rejects_empty() {
        let result = SubscriptionId::parse("");
        assert!(matches!(result, Err(SubscriptionError::EmptyId { .. })));
    }

    #[test]
    fn plan_id_rejects_empty() {
        let result = PlanId::new("");
        assert!(matches!(result, Err(SubscriptionError::InvalidPlanId)));
    }

    #[test]
    fn plan_id_preserves_value() {
        let id = PlanId::new("plan-gold").unwrap();
        assert_eq!(id.as_str(), "plan-gold");
        assert_eq!(id.to_string(), "plan-gold");
    }

    #[test]
    fn customer_id_parse_rejects_empty() {
        let result = CustomerId::parse("");
        assert!(matches!(result, Err(SubscriptionError::EmptyId { .. })));
    }

    #[test]
    fn customer_id_generate_creates_unique_ids() {
        let id1 = CustomerId::generate();
        let id2 = CustomerId::generate();
        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn id_serialization_is_transparent() {
        let id = PlanId::new("plan-gold").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"plan-gold\"");
        let deserialized: PlanId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
