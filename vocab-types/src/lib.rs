pub mod door;
pub mod errors;
pub mod messages;
pub mod progress;
pub mod quiz;
pub mod settings;
pub mod snapshots;
pub mod story;
pub mod words;

// Re-export all types
pub use door::*;
pub use errors::*;
pub use messages::*;
pub use progress::*;
pub use quiz::*;
pub use settings::*;
pub use snapshots::*;
pub use story::*;
pub use words::*;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub type ListId = uuid::Uuid;
pub type WordId = uuid::Uuid;

/// Difficulty tier shared by both mini-games and the quiz settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
