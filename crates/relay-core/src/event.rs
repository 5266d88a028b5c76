//! # Webhook Events
//!
//! Typed view of a verified provider event. Events are consumed once and
//! never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Tag the provider uses for a completed checkout
pub const CHECKOUT_SESSION_COMPLETED: &str = "checkout.session.completed";

/// Event type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// `checkout.session.completed`
    CheckoutSessionCompleted,
    /// Any other event type, kept verbatim
    Other(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::CheckoutSessionCompleted => CHECKOUT_SESSION_COMPLETED,
            EventType::Other(other) => other,
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        if value == CHECKOUT_SESSION_COMPLETED {
            EventType::CheckoutSessionCompleted
        } else {
            EventType::Other(value)
        }
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::CheckoutSessionCompleted => CHECKOUT_SESSION_COMPLETED.to_string(),
            EventType::Other(other) => other,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A verified webhook event
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    /// Provider event ID (evt_...)
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type")]
    pub event_type: EventType,

    /// When the provider created the event
    #[serde(default = "Utc::now", deserialize_with = "unix_timestamp")]
    pub created: DateTime<Utc>,

    /// Absent on some event types; only completed checkouts read it
    #[serde(default)]
    pub data: EventData,
}

/// Payload of an event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    /// The object the event is about (a checkout session for
    /// `checkout.session.completed`), `Null` when missing
    #[serde(default)]
    pub object: serde_json::Value,
}

impl WebhookEvent {
    pub fn is_checkout_completed(&self) -> bool {
        self.event_type == EventType::CheckoutSessionCompleted
    }

    /// ID of the nested object, if it has one
    pub fn object_id(&self) -> Option<&str> {
        self.data.object.get("id").and_then(|v| v.as_str())
    }
}

fn unix_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let secs = i64::deserialize(deserializer)?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {}", secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_checkout_completed() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "id": "evt_test_1",
            "type": "checkout.session.completed",
            "created": 1_700_000_000,
            "data": { "object": { "id": "cs_test_123", "object": "checkout.session" } }
        }))
        .unwrap();

        assert!(event.is_checkout_completed());
        assert_eq!(event.object_id(), Some("cs_test_123"));
        assert_eq!(event.created.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_other_event_type_is_kept() {
        let event: WebhookEvent = serde_json::from_value(json!({
            "id": "evt_test_2",
            "type": "payment_intent.succeeded",
            "created": 1_700_000_000,
            "data": { "object": { "id": "pi_test_1" } }
        }))
        .unwrap();

        assert!(!event.is_checkout_completed());
        assert_eq!(
            event.event_type,
            EventType::Other("payment_intent.succeeded".to_string())
        );
        assert_eq!(event.event_type.to_string(), "payment_intent.succeeded");
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let result = serde_json::from_value::<WebhookEvent>(json!({
            "id": "evt_test_3",
            "data": { "object": {} }
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_event_without_data() {
        let event: WebhookEvent =
            serde_json::from_slice(br#"{"id":"evt_1","type":"ping"}"#).unwrap();

        assert_eq!(event.event_type, EventType::Other("ping".to_string()));
        assert!(event.data.object.is_null());
        assert_eq!(event.object_id(), None);
    }
}
