use vocab_types::{Difficulty, DoorGamePhase, GameRound, ListId, QuizResult};

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    QuizCompleted {
        list_id: ListId,
        result: QuizResult,
    },
    LevelCompleted {
        difficulty: Difficulty,
        level_id: u8,
        correct_count: u32,
    },
    LevelFailed {
        difficulty: Difficulty,
        level_id: u8,
        correct_count: u32,
    },
    RoundStarted {
        round: GameRound,
        memorize_seconds: u32,
    },
    TimerTick {
        phase: DoorGamePhase,
        seconds_remaining: u32,
    },
    MemorizeFinished {
        choosing_seconds: u32,
    },
    DoorSelected {
        index: usize,
        is_correct: bool,
        correct_door_index: usize,
        score: u32,
        high_score: u32,
    },
    TimeExpired {
        correct_door_index: usize,
        score: u32,
        high_score: u32,
    },
    GameCompleted {
        score: u32,
        high_score: u32,
        total_rounds: u32,
    },
    HighScoreUpdated {
        high_score: u32,
    },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::QuizCompleted { .. } => "quiz_completed",
            GameEvent::LevelCompleted { .. } => "level_completed",
            GameEvent::LevelFailed { .. } => "level_failed",
            GameEvent::RoundStarted { .. } => "round_started",
            GameEvent::TimerTick { .. } => "timer_tick",
            GameEvent::MemorizeFinished { .. } => "memorize_finished",
            GameEvent::DoorSelected { .. } => "door_selected",
            GameEvent::TimeExpired { .. } => "time_expired",
            GameEvent::GameCompleted { .. } => "game_completed",
            GameEvent::HighScoreUpdated { .. } => "high_score_updated",
        }
    }

    /// Events produced by the door game engine
    pub fn is_door_event(&self) -> bool {
        !matches!(
            self,
            GameEvent::QuizCompleted { .. }
                | GameEvent::LevelCompleted { .. }
                | GameEvent::LevelFailed { .. }
        )
    }
}

/// Event handler trait for processing game events
pub trait GameEventHandler: Send {
    fn handle_event(&mut self, event: GameEvent);
}

/// Simple event bus for distributing game events
pub struct GameEventBus {
    handlers: Vec<Box<dyn GameEventHandler>>,
}

impl GameEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn GameEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: GameEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn publish_all(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.publish(event);
        }
    }
}

impl Default for GameEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct RecordingHandler {
        events: Arc<Mutex<Vec<GameEvent>>>,
    }

    impl GameEventHandler for RecordingHandler {
        fn handle_event(&mut self, event: GameEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    #[test]
    fn test_event_bus_delivers_to_every_handler() {
        let first = Arc::new(Mutex::new(Vec::new()));
        let second = Arc::new(Mutex::new(Vec::new()));

        let mut bus = GameEventBus::new();
        bus.add_handler(Box::new(RecordingHandler {
            events: first.clone(),
        }));
        bus.add_handler(Box::new(RecordingHandler {
            events: second.clone(),
        }));

        bus.publish_all(vec![
            GameEvent::HighScoreUpdated { high_score: 3 },
            GameEvent::MemorizeFinished {
                choosing_seconds: 8,
            },
        ]);

        assert_eq!(first.lock().unwrap().len(), 2);
        assert_eq!(second.lock().unwrap().len(), 2);
        assert_eq!(first.lock().unwrap()[0].name(), "high_score_updated");
    }

    #[test]
    fn test_door_event_classification() {
        assert!(GameEvent::HighScoreUpdated { high_score: 1 }.is_door_event());
        assert!(
            !GameEvent::LevelFailed {
                difficulty: Difficulty::Easy,
                level_id: 1,
                correct_count: 0
            }
            .is_door_event()
        );
    }
}
