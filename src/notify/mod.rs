pub mod registry;

pub use registry::ConnectionRegistry;

use crate::error::Result;
use crate::models::{EventType, FarmReport, NotificationEvent, SoilReading};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Builds and publishes push events for the CRUD and analysis
/// lifecycle. Holds the registry by `Arc` so controllers share one
/// instance through injection.
#[derive(Clone)]
pub struct Notifier {
    registry: Arc<ConnectionRegistry>,
}

impl Notifier {
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub async fn reading_added(
        &self,
        user_id: &str,
        farm_id: Uuid,
        reading: &SoilReading,
    ) -> Result<usize> {
        self.send_reading_event(EventType::SoilReadingAdded, user_id, farm_id, reading)
            .await
    }

    pub async fn reading_updated(
        &self,
        user_id: &str,
        farm_id: Uuid,
        reading: &SoilReading,
    ) -> Result<usize> {
        self.send_reading_event(EventType::SoilReadingUpdated, user_id, farm_id, reading)
            .await
    }

    pub async fn reading_deleted(&self, user_id: &str, farm_id: Uuid) -> Result<usize> {
        let event = NotificationEvent::new(
            EventType::SoilReadingDeleted,
            json!({ "farm_id": farm_id }),
        );
        Ok(self.registry.publish(user_id, event).await)
    }

    /// Push the freshly computed score after a reading changes.
    pub async fn health_score_updated(&self, user_id: &str, report: &FarmReport) -> Result<usize> {
        let event = NotificationEvent::new(
            EventType::HealthScoreUpdated,
            serde_json::to_value(report)?,
        );
        Ok(self.registry.publish(user_id, event).await)
    }

    pub async fn alert(&self, user_id: &str, message: &str) -> Result<usize> {
        let event = NotificationEvent::new(EventType::Alert, json!({ "message": message }));
        Ok(self.registry.publish(user_id, event).await)
    }

    async fn send_reading_event(
        &self,
        event_type: EventType,
        user_id: &str,
        farm_id: Uuid,
        reading: &SoilReading,
    ) -> Result<usize> {
        let event = NotificationEvent::new(
            event_type,
            json!({
                "farm_id": farm_id,
                "reading": serde_json::to_value(reading)?,
            }),
        );
        Ok(self.registry.publish(user_id, event).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::SoilAnalyzer;
    use crate::models::Farm;

    fn notifier() -> (Notifier, Arc<ConnectionRegistry>) {
        let registry = Arc::new(ConnectionRegistry::new());
        (Notifier::new(registry.clone()), registry)
    }

    #[tokio::test]
    async fn reading_added_event_shape() {
        let (notifier, registry) = notifier();
        let (_, mut rx) = registry.register("alice").await;

        let farm_id = Uuid::new_v4();
        let reading = SoilReading::new(6.5, 60.0, 40.0, 60.0, 50.0);
        let delivered = notifier
            .reading_added("alice", farm_id, &reading)
            .await
            .unwrap();
        assert_eq!(delivered, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::SoilReadingAdded);
        assert_eq!(event.data["farm_id"], json!(farm_id));
        assert_eq!(event.data["reading"]["ph"], 6.5);
    }

    #[tokio::test]
    async fn health_score_event_carries_the_report() {
        let (notifier, registry) = notifier();
        let (_, mut rx) = registry.register("alice").await;

        let farm = Farm::new("alice", "North Field", crate::models::CropType::Mixed);
        let readings = vec![SoilReading::new(6.5, 60.0, 40.0, 60.0, 50.0)];
        let report = SoilAnalyzer::new().report(&farm, &readings);

        notifier
            .health_score_updated("alice", &report)
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, EventType::HealthScoreUpdated);
        assert_eq!(event.data["health_score"], 100);
    }

    #[tokio::test]
    async fn alert_to_user_without_connections_is_dropped() {
        let (notifier, _) = notifier();
        let delivered = notifier.alert("nobody", "pH critical").await.unwrap();
        assert_eq!(delivered, 0);
    }
}
