use std::sync::{Arc, Mutex};

use tracing::{debug, info};
use vocab_core::{GameEvent, GameEventBus, GameEventHandler};
use vocab_types::ServerMessage;

use crate::websocket::ConnectionManager;

/// Wire message a door game event is pushed to websocket clients as
pub fn door_event_message(event: &GameEvent) -> Option<ServerMessage> {
    match event {
        GameEvent::RoundStarted {
            round,
            memorize_seconds,
        } => Some(ServerMessage::RoundStarted {
            round: round.clone(),
            memorize_seconds: *memorize_seconds,
        }),
        GameEvent::TimerTick {
            phase,
            seconds_remaining,
        } => Some(ServerMessage::TimerTick {
            phase: *phase,
            seconds_remaining: *seconds_remaining,
        }),
        GameEvent::MemorizeFinished { choosing_seconds } => Some(ServerMessage::ChoosingStarted {
            seconds: *choosing_seconds,
        }),
        GameEvent::DoorSelected {
            is_correct,
            correct_door_index,
            score,
            high_score,
            ..
        } => Some(ServerMessage::RoundResult {
            is_correct: *is_correct,
            timed_out: false,
            correct_door_index: *correct_door_index,
            score: *score,
            high_score: *high_score,
        }),
        GameEvent::TimeExpired {
            correct_door_index,
            score,
            high_score,
        } => Some(ServerMessage::RoundResult {
            is_correct: false,
            timed_out: true,
            correct_door_index: *correct_door_index,
            score: *score,
            high_score: *high_score,
        }),
        GameEvent::GameCompleted {
            score,
            high_score,
            total_rounds,
        } => Some(ServerMessage::GameCompleted {
            score: *score,
            high_score: *high_score,
            total_rounds: *total_rounds,
        }),
        _ => None,
    }
}

pub struct LoggingHandler;

impl GameEventHandler for LoggingHandler {
    fn handle_event(&mut self, event: GameEvent) {
        match &event {
            GameEvent::TimerTick { .. } => {}
            GameEvent::QuizCompleted { list_id, result } => {
                info!(
                    "Quiz on list {} finished: {}% ({}/{})",
                    list_id, result.score, result.correct_answers, result.total_questions
                );
            }
            GameEvent::LevelCompleted {
                difficulty,
                level_id,
                correct_count,
            } => {
                info!(
                    "Story level {} ({}) passed with {} correct",
                    level_id, difficulty, correct_count
                );
            }
            other => debug!("Game event: {}", other.name()),
        }
    }
}

/// Pushes door game events to every websocket client
pub struct ForwardingHandler {
    connections: Arc<ConnectionManager>,
}

impl ForwardingHandler {
    pub fn new(connections: Arc<ConnectionManager>) -> Self {
        Self { connections }
    }
}

impl GameEventHandler for ForwardingHandler {
    fn handle_event(&mut self, event: GameEvent) {
        if let Some(message) = door_event_message(&event) {
            self.connections.broadcast(&message);
        }
    }
}

/// Event bus shared by the services. Publishing never awaits.
pub struct EventPublisher {
    bus: Mutex<GameEventBus>,
}

impl EventPublisher {
    pub fn new(bus: GameEventBus) -> Self {
        Self {
            bus: Mutex::new(bus),
        }
    }

    /// Bus with logging plus websocket forwarding
    pub fn with_default_handlers(connections: Arc<ConnectionManager>) -> Self {
        let mut bus = GameEventBus::new();
        bus.add_handler(Box::new(LoggingHandler));
        bus.add_handler(Box::new(ForwardingHandler::new(connections)));
        Self::new(bus)
    }

    pub fn publish_all(&self, events: impl IntoIterator<Item = GameEvent>) {
        let mut bus = self.bus.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        bus.publish_all(events);
    }

    pub fn publish(&self, event: GameEvent) {
        self.publish_all(std::iter::once(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::connection::ConnectionId;
    use vocab_types::DoorGamePhase;

    #[test]
    fn test_timeout_becomes_timed_out_round_result() {
        let message = door_event_message(&GameEvent::TimeExpired {
            correct_door_index: 2,
            score: 1,
            high_score: 4,
        });

        match message {
            Some(ServerMessage::RoundResult {
                is_correct,
                timed_out,
                correct_door_index,
                ..
            }) => {
                assert!(!is_correct);
                assert!(timed_out);
                assert_eq!(correct_door_index, 2);
            }
            other => panic!("Expected RoundResult, got {:?}", other),
        }
    }

    #[test]
    fn test_non_door_events_are_not_forwarded() {
        assert!(door_event_message(&GameEvent::HighScoreUpdated { high_score: 2 }).is_none());
    }

    #[test]
    fn test_publisher_forwards_to_connections() {
        let connections = Arc::new(ConnectionManager::new());
        let mut receiver = connections.create_connection(ConnectionId::new());
        let publisher = EventPublisher::with_default_handlers(connections);

        publisher.publish(GameEvent::TimerTick {
            phase: DoorGamePhase::Choosing,
            seconds_remaining: 3,
        });

        assert!(matches!(
            receiver.try_recv(),
            Ok(ServerMessage::TimerTick {
                phase: DoorGamePhase::Choosing,
                seconds_remaining: 3
            })
        ));
    }
}
