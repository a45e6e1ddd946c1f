pub mod distractors;
pub mod door_content;
pub mod door_game;
pub mod game_events;
pub mod library;
pub mod quiz;
pub mod sampler;
pub mod scoring;
pub mod story;
pub mod story_content;

// Re-export main components
pub use distractors::*;
pub use door_game::*;
pub use game_events::*;
pub use library::*;
pub use quiz::*;
pub use sampler::*;
pub use scoring::*;
pub use story::*;
