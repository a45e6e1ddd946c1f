use dashmap::DashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use uuid::Uuid;
use vocab_types::ServerMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub connected_at: Instant,
    pub last_activity: Instant,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let now = Instant::now();

        let connection = Self {
            id,
            connected_at: now,
            last_activity: now,
            sender,
        };

        (connection, receiver)
    }

    pub fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .map_err(|_| "Connection closed".to_string())
    }

    pub fn is_inactive(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

/// Open door-game websocket sessions.
///
/// Lookups never await, so game event handlers can fan out to every
/// client from synchronous code.
#[derive(Default)]
pub struct ConnectionManager {
    connections: DashMap<ConnectionId, Connection>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn create_connection(&self, id: ConnectionId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (conn, receiver) = Connection::new(id);
        self.connections.insert(id, conn);
        receiver
    }

    pub fn remove_connection(&self, id: ConnectionId) {
        self.connections.remove(&id);
    }

    pub fn update_activity(&self, id: ConnectionId) {
        if let Some(mut connection) = self.connections.get_mut(&id) {
            connection.last_activity = Instant::now();
        }
    }

    pub fn send_to_connection(&self, id: ConnectionId, message: ServerMessage) -> Result<(), String> {
        match self.connections.get(&id) {
            Some(connection) => connection.send_message(message),
            None => Err("Connection not found".to_string()),
        }
    }

    /// Deliver to every open connection, skipping ones whose socket closed
    pub fn broadcast(&self, message: &ServerMessage) {
        for connection in self.connections.iter() {
            let _ = connection.send_message(message.clone());
        }
    }

    pub fn cleanup_inactive_connections(&self, timeout: Duration) {
        let before = self.connections.len();
        self.connections.retain(|id, conn| {
            let keep = !conn.is_inactive(timeout);
            if !keep {
                tracing::info!("Removing inactive connection: {}", id);
            }
            keep
        });
        let removed = before.saturating_sub(self.connections.len());
        if removed > 0 {
            tracing::debug!("Removed {} inactive connections", removed);
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_creation_and_removal() {
        let manager = ConnectionManager::new();
        let conn_id = ConnectionId::new();

        let _receiver = manager.create_connection(conn_id);
        assert_eq!(manager.connection_count(), 1);

        manager.remove_connection(conn_id);
        assert_eq!(manager.connection_count(), 0);
    }

    #[test]
    fn test_message_sending_to_nonexistent_connection() {
        let manager = ConnectionManager::new();

        let result = manager.send_to_connection(ConnectionId::new(), ServerMessage::HeartbeatAck);
        assert_eq!(result.unwrap_err(), "Connection not found");
    }

    #[test]
    fn test_message_sending_after_connection_close() {
        let manager = ConnectionManager::new();
        let conn_id = ConnectionId::new();

        let receiver = manager.create_connection(conn_id);
        drop(receiver);

        let result = manager.send_to_connection(conn_id, ServerMessage::HeartbeatAck);
        assert_eq!(result.unwrap_err(), "Connection closed");
    }

    #[test]
    fn test_broadcast_reaches_every_connection() {
        let manager = ConnectionManager::new();
        let mut receiver1 = manager.create_connection(ConnectionId::new());
        let mut receiver2 = manager.create_connection(ConnectionId::new());

        // A closed socket must not stop delivery to the others
        drop(manager.create_connection(ConnectionId::new()));

        manager.broadcast(&ServerMessage::ChoosingStarted { seconds: 8 });

        assert!(matches!(
            receiver1.try_recv(),
            Ok(ServerMessage::ChoosingStarted { seconds: 8 })
        ));
        assert!(receiver2.try_recv().is_ok());
    }

    #[tokio::test]
    async fn test_inactive_connections_are_cleaned_up() {
        let manager = ConnectionManager::new();
        let _receiver = manager.create_connection(ConnectionId::new());

        let short_timeout = Duration::from_millis(10);
        manager.cleanup_inactive_connections(short_timeout);
        assert_eq!(manager.connection_count(), 1);

        tokio::time::sleep(Duration::from_millis(20)).await;
        manager.cleanup_inactive_connections(short_timeout);
        assert_eq!(manager.connection_count(), 0);
    }
}
