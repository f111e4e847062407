use crate::models::NotificationEvent;
use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Per-user registry of live push connections.
///
/// Lifecycle: `register` on handshake, `deregister` on close. A sender
/// whose receiver has gone away is pruned on the next publish to that
/// user, so a missed close event cannot leak entries forever. Shared
/// through an `Arc` and injected into call sites; there is no global
/// instance.
#[derive(Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<String, HashMap<Uuid, UnboundedSender<NotificationEvent>>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection for a user. Returns the connection id and
    /// the receiving end the transport layer forwards from.
    pub async fn register(&self, user_id: &str) -> (Uuid, UnboundedReceiver<NotificationEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let connection_id = Uuid::new_v4();

        let mut connections = self.connections.write().await;
        connections
            .entry(user_id.to_string())
            .or_default()
            .insert(connection_id, tx);

        tracing::debug!(user = user_id, connection = %connection_id, "connection registered");
        (connection_id, rx)
    }

    /// Remove one connection. Drops the user's entry entirely when it
    /// was the last one.
    pub async fn deregister(&self, user_id: &str, connection_id: Uuid) {
        let mut connections = self.connections.write().await;
        if let Some(user_connections) = connections.get_mut(user_id) {
            user_connections.remove(&connection_id);
            if user_connections.is_empty() {
                connections.remove(user_id);
            }
        }
        tracing::debug!(user = user_id, connection = %connection_id, "connection deregistered");
    }

    /// Send an event to every live connection of one user. Dead senders
    /// are removed as they are found. Returns the delivered count.
    pub async fn publish(&self, user_id: &str, event: NotificationEvent) -> usize {
        let mut connections = self.connections.write().await;
        let Some(user_connections) = connections.get_mut(user_id) else {
            return 0;
        };

        let mut delivered = 0;
        user_connections.retain(|connection_id, tx| match tx.send(event.clone()) {
            Ok(()) => {
                delivered += 1;
                true
            }
            Err(_) => {
                tracing::debug!(user = user_id, connection = %connection_id, "pruning dead connection");
                false
            }
        });

        if user_connections.is_empty() {
            connections.remove(user_id);
        }
        delivered
    }

    /// Send an event to every connection of every user.
    pub async fn broadcast(&self, event: NotificationEvent) -> usize {
        let users: Vec<String> = {
            let connections = self.connections.read().await;
            connections.keys().cloned().collect()
        };

        let mut delivered = 0;
        for user in users {
            delivered += self.publish(&user, event.clone()).await;
        }
        delivered
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.values().map(HashMap::len).sum()
    }

    pub async fn user_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}
