use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Opaque identifier threaded through one logical business operation and
/// every outbound call it makes, for cross-component diagnostic linkage.
///
/// Wraps a string to prevent mixing correlation ids up with other
/// string-based identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Creates a correlation id from an existing string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh correlation id for the given service tag.
    ///
    /// Format: `{service}-{YYYYMMDDHHMMSS}-{4 random bytes as hex}`.
    pub fn generate(service: &str) -> Self {
        let timestamp = chrono::Utc::now().format("%Y%m%d%H%M%S");

        let mut random_bytes = [0u8; 4];
        rand::rng().fill_bytes(&mut random_bytes);
        let random_hex = random_bytes
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>();

        Self(format!("{service}-{timestamp}-{random_hex}"))
    }

    /// Returns the supplied id when present, otherwise generates a new one.
    pub fn ensure(supplied: Option<CorrelationId>, service: &str) -> Self {
        match supplied {
            Some(id) if !id.0.is_empty() => id,
            _ => Self::generate(service),
        }
    }

    /// Returns the correlation id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CorrelationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CorrelationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_uses_service_tag_prefix() {
        let id = CorrelationId::generate("subscription");
        assert!(id.as_str().starts_with("subscription-"));
    }

    #[test]
    fn generate_creates_unique_ids() {
        let id1 = CorrelationId::generate("subscription");
        let id2 = CorrelationId::generate("subscription");
        assert_ne!(id1, id2);
    }

    #[test]
    fn generate_has_expected_shape() {
        let id = CorrelationId::generate("svc");
        let parts: Vec<&str> = id.as_str().splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "svc");
        assert_eq!(parts[1].len(), 14);
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn ensure_keeps_supplied_id() {
        let supplied = CorrelationId::new("req-42");
        let id = CorrelationId::ensure(Some(supplied.clone()), "subscription");
        assert_eq!(id, supplied);
    }

    #[test]
    fn ensure_generates_when_absent() {
        let id = CorrelationId::ensure(None, "subscription");
        assert!(id.as_str().starts_with("subscription-"));
    }

    #[test]
    fn ensure_generates_when_empty() {
        let id = CorrelationId::ensure(Some(CorrelationId::new("")), "subscription");
        assert!(id.as_str().starts_with("subscription-"));
    }

    #[test]
    fn serialization_roundtrip() {
        let id = CorrelationId::new("subscription-20240101000000-deadbeef");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"subscription-20240101000000-deadbeef\"");
        let deserialized: CorrelationId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
