use std::sync::Arc;
use tracing::{debug, info};

use crate::door_service::DoorService;
use crate::websocket::connection::{ConnectionId, ConnectionManager};
use vocab_types::{ClientMessage, ServerMessage};

#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    doors: DoorService,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        doors: DoorService,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            doors,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), String> {
        self.connection_manager.update_activity(self.connection_id);

        let result = match message {
            ClientMessage::StartDoorGame {
                difficulty,
                total_rounds,
            } => {
                info!(
                    "Connection {} starting door game ({}, {} rounds)",
                    self.connection_id, difficulty, total_rounds
                );
                self.doors.start(difficulty, Some(total_rounds)).await
            }
            ClientMessage::SelectDoor { index } => self.doors.select_door(index).await,
            ClientMessage::NextRound => self.doors.next_round().await,
            ClientMessage::ResetDoorGame => self.doors.reset().await,
            ClientMessage::Heartbeat => {
                debug!("Heartbeat from {}", self.connection_id);
                return self.send_message(ServerMessage::HeartbeatAck);
            }
        };

        let state = result.map_err(|e| e.to_string())?;
        self.send_message(ServerMessage::DoorGameState { state })
    }

    /// Current game for a client that just connected
    pub async fn send_state(&self) -> Result<(), String> {
        let state = self.doors.state().await;
        self.send_message(ServerMessage::DoorGameState { state })
    }

    pub fn send_error(&self, message: String) -> Result<(), String> {
        self.send_message(ServerMessage::Error { message })
    }

    fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.connection_manager
            .send_to_connection(self.connection_id, message)
    }
}
