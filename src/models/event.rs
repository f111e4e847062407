use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Push-channel event types. Wire names are snake_case to match the
/// dashboard's socket protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    SoilReadingAdded,
    SoilReadingUpdated,
    SoilReadingDeleted,
    HealthScoreUpdated,
    Alert,
    Notification,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::SoilReadingAdded => "soil_reading_added",
            EventType::SoilReadingUpdated => "soil_reading_updated",
            EventType::SoilReadingDeleted => "soil_reading_deleted",
            EventType::HealthScoreUpdated => "health_score_updated",
            EventType::Alert => "alert",
            EventType::Notification => "notification",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Envelope pushed to connected dashboard clients after a CRUD or
/// analysis event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub data: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(event_type: EventType, data: serde_json::Value) -> Self {
        Self {
            event_type,
            data,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_type_wire_names() {
        assert_eq!(EventType::SoilReadingAdded.as_str(), "soil_reading_added");
        assert_eq!(EventType::HealthScoreUpdated.as_str(), "health_score_updated");
        assert_eq!(EventType::Alert.as_str(), "alert");
    }

    #[test]
    fn event_serializes_with_type_field() {
        let event = NotificationEvent::new(
            EventType::SoilReadingAdded,
            json!({"farm_id": "f1", "ph": 6.5}),
        );
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], "soil_reading_added");
        assert_eq!(value["data"]["ph"], 6.5);
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn event_type_round_trips_through_serde() {
        for event_type in [
            EventType::SoilReadingAdded,
            EventType::SoilReadingUpdated,
            EventType::SoilReadingDeleted,
            EventType::HealthScoreUpdated,
            EventType::Alert,
            EventType::Notification,
        ] {
            let json = serde_json::to_string(&event_type).unwrap();
            assert_eq!(json, format!("\"{}\"", event_type.as_str()));
            let back: EventType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, event_type);
        }
    }
}
