use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::Difficulty;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppSettings {
    pub theme: Theme,
    pub notifications: bool,
    pub sound_effects: bool,
    pub haptic_feedback: bool,
    pub auto_save: bool,
    pub default_language: String,
    pub quiz_difficulty: Difficulty,
    pub session_reminders: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            notifications: true,
            sound_effects: true,
            haptic_feedback: true,
            auto_save: true,
            default_language: "Turkish".to_string(),
            quiz_difficulty: Difficulty::Medium,
            session_reminders: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SettingsUpdate {
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
    pub sound_effects: Option<bool>,
    pub haptic_feedback: Option<bool>,
    pub auto_save: Option<bool>,
    pub default_language: Option<String>,
    pub quiz_difficulty: Option<Difficulty>,
    pub session_reminders: Option<bool>,
}

impl AppSettings {
    pub fn apply(&mut self, update: SettingsUpdate) {
        if let Some(theme) = update.theme {
            self.theme = theme;
        }
        if let Some(notifications) = update.notifications {
            self.notifications = notifications;
        }
        if let Some(sound_effects) = update.sound_effects {
            self.sound_effects = sound_effects;
        }
        if let Some(haptic_feedback) = update.haptic_feedback {
            self.haptic_feedback = haptic_feedback;
        }
        if let Some(auto_save) = update.auto_save {
            self.auto_save = auto_save;
        }
        if let Some(default_language) = update.default_language {
            self.default_language = default_language;
        }
        if let Some(quiz_difficulty) = update.quiz_difficulty {
            self.quiz_difficulty = quiz_difficulty;
        }
        if let Some(session_reminders) = update.session_reminders {
            self.session_reminders = session_reminders;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_update_keeps_other_fields() {
        let mut settings = AppSettings::default();
        settings.apply(SettingsUpdate {
            theme: Some(Theme::Dark),
            quiz_difficulty: Some(Difficulty::Hard),
            ..Default::default()
        });

        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.quiz_difficulty, Difficulty::Hard);
        assert_eq!(settings.default_language, "Turkish");
        assert!(settings.notifications);
    }
}
