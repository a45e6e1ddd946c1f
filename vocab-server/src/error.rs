use vocab_types::ExerciseError;
use warp::http::StatusCode;
use warp::reply::{Json, WithStatus};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Exercise(#[from] ExerciseError),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Library operations report missing lists and words by message
    pub fn from_library(error: anyhow::Error) -> Self {
        let message = error.to_string();
        if message.ends_with("not found") {
            ApiError::NotFound(message)
        } else {
            ApiError::BadRequest(message)
        }
    }

    pub fn storage(error: anyhow::Error) -> Self {
        tracing::error!("Storage failure: {:#}", error);
        ApiError::Internal("Failed to save changes".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Exercise(error) => match error {
                ExerciseError::InsufficientPoolSize { .. }
                | ExerciseError::InsufficientDistractors { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                ExerciseError::LevelLocked { .. } => StatusCode::FORBIDDEN,
                ExerciseError::LevelNotFound { .. } => StatusCode::NOT_FOUND,
                ExerciseError::InvalidChoice { .. } => StatusCode::BAD_REQUEST,
                ExerciseError::InvalidPhase { .. } => StatusCode::CONFLICT,
                ExerciseError::EnrichmentUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            },
        }
    }

    pub fn into_reply(self) -> WithStatus<Json> {
        let body = match &self {
            ApiError::Exercise(error) if error.is_content_shortage() => serde_json::json!({
                "error": "Not enough words",
                "details": error,
            }),
            ApiError::Exercise(error) => serde_json::json!({
                "error": error.to_string(),
                "details": error,
            }),
            other => serde_json::json!({ "error": other.to_string() }),
        };
        warp::reply::with_status(warp::reply::json(&body), self.status())
    }
}

/// JSON reply for a service result, mapping errors onto status codes
pub fn reply<T: serde::Serialize>(result: Result<T, ApiError>, success: StatusCode) -> WithStatus<Json> {
    match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), success),
        Err(error) => error.into_reply(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_errors_map_by_message() {
        let missing = ApiError::from_library(anyhow::anyhow!("List not found"));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid = ApiError::from_library(anyhow::anyhow!("Word term cannot be empty"));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_exercise_error_statuses() {
        let shortage = ApiError::from(ExerciseError::InsufficientPoolSize {
            required: 4,
            available: 2,
        });
        assert_eq!(shortage.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let locked = ApiError::from(ExerciseError::LevelLocked { level_id: 3 });
        assert_eq!(locked.status(), StatusCode::FORBIDDEN);
    }
}
