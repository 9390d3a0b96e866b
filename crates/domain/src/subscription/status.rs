//! Subscription status state machine.

use serde::{Deserialize, Serialize};

use super::SubscriptionError;

/// The status of a subscription in its lifecycle.
///
/// Status transitions:
/// ```text
/// Pending ──► Active ◄──► Suspended
///    │           │            │
///    └───────────┴────────────┴──► Cancelled
/// ```
///
/// `Inactive` is representable because storage may contain it, but no
/// transition in the state machine produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    /// Subscription was requested and awaits activation.
    #[default]
    Pending,

    /// Subscription is active.
    Active,

    /// Subscription is inactive.
    Inactive,

    /// Subscription was cancelled (terminal status).
    Cancelled,

    /// Subscription is suspended and can be re-activated.
    Suspended,
}

impl SubscriptionStatus {
    /// Returns true if the subscription can be activated from this status.
    pub fn can_activate(&self) -> bool {
        matches!(
            self,
            SubscriptionStatus::Pending | SubscriptionStatus::Suspended
        )
    }

    /// Returns true if the subscription can be suspended from this status.
    pub fn can_suspend(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    /// Returns true if the subscription can be cancelled from this status.
    pub fn can_cancel(&self) -> bool {
        !matches!(self, SubscriptionStatus::Cancelled)
    }

    /// Returns true if this is a terminal status (no further transitions).
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubscriptionStatus::Cancelled)
    }

    /// Returns the status name in its lowercase storage/wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Pending => "pending",
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
            SubscriptionStatus::Cancelled => "cancelled",
            SubscriptionStatus::Suspended => "suspended",
        }
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SubscriptionStatus {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(SubscriptionStatus::Pending),
            "active" => Ok(SubscriptionStatus::Active),
            "inactive" => Ok(SubscriptionStatus::Inactive),
            "cancelled" => Ok(SubscriptionStatus::Cancelled),
            "suspended" => Ok(SubscriptionStatus::Suspended),
            other => Err(SubscriptionError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_status_is_pending() {
        assert_eq!(SubscriptionStatus::default(), SubscriptionStatus::Pending);
    }

    #[test]
    fn pending_and_suspended_can_activate() {
        assert!(SubscriptionStatus::Pending.can_activate());
        assert!(SubscriptionStatus::Suspended.can_activate());
        assert!(!SubscriptionStatus::Active.can_activate());
        assert!(!SubscriptionStatus::Inactive.can_activate());
        assert!(!SubscriptionStatus::Cancelled.can_activate());
    }

    #[test]
    fn only_active_can_suspend() {
        assert!(SubscriptionStatus::Active.can_suspend());
        assert!(!SubscriptionStatus::Pending.can_suspend());
        assert!(!SubscriptionStatus::Inactive.can_suspend());
        assert!(!SubscriptionStatus::Cancelled.can_suspend());
        assert!(!SubscriptionStatus::Suspended.can_suspend());
    }

    #[test]
    fn cancelled_cannot_cancel_again() {
        assert!(SubscriptionStatus::Pending.can_cancel());
        assert!(SubscriptionStatus::Active.can_cancel());
        assert!(SubscriptionStatus::Inactive.can_cancel());
        assert!(SubscriptionStatus::Suspended.can_cancel());
        assert!(!SubscriptionStatus::Cancelled.can_cancel());
    }

    #[test]
    fn cancelled_is_the_only_terminal_status() {
        assert!(SubscriptionStatus::Cancelled.is_terminal());
        assert!(!SubscriptionStatus::Pending.is_terminal());
        assert!(!SubscriptionStatus::Active.is_terminal());
        assert!(!SubscriptionStatus::Inactive.is_terminal());
        assert!(!SubscriptionStatus::Suspended.is_terminal());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(SubscriptionStatus::Pending.to_string(), "pending");
        assert_eq!(SubscriptionStatus::Active.to_string(), "active");
        assert_eq!(SubscriptionStatus::Inactive.to_string(), "inactive");
        assert_eq!(SubscriptionStatus::Cancelled.to_string(), "cancelled");
        assert_eq!(SubscriptionStatus::Suspended.to_string(), "suspended");
    }

    #[test]
    fn from_str_roundtrip() {
        for status in [
            SubscriptionStatus::Pending,
            SubscriptionStatus::Active,
            SubscriptionStatus::Inactive,
            SubscriptionStatus::Cancelled,
            SubscriptionStatus::Suspended,
        ] {
            let parsed: SubscriptionStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn from_str_rejects_unknown_value() {
        let result: Result<SubscriptionStatus, _> = "paused".parse();
        assert!(matches!(
            result,
            Err(SubscriptionError::UnknownStatus { .. })
        ));
    }

    #[test]
    fn serialization_is_lowercase() {
        let json = serde_json::to_string(&SubscriptionStatus::Suspended).unwrap();
        assert_eq!(json, "\"suspended\"");
        let deserialized: SubscriptionStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, SubscriptionStatus::Suspended);
    }
}
