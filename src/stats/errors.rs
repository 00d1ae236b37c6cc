use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::shared::AppError;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Some per-user result writes failed; the remaining predictions were still scored
    #[error(
        "Failed to reconcile {} prediction(s) for game {game_id}",
        .failed_user_ids.len()
    )]
    PartialFailure {
        game_id: String,
        failed_user_ids: Vec<String>,
    },
}

impl From<AppError> for StatsError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::NotFound(msg) => StatsError::NotFound(msg),
            AppError::Validation(msg) | AppError::Conflict(msg) => StatsError::Validation(msg),
            AppError::DatabaseError(msg) => StatsError::StorageUnavailable(msg),
            AppError::Internal => {
                StatsError::StorageUnavailable("Internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            StatsError::NotFound(_) => (StatusCode::NOT_FOUND, json!({ "error": message })),
            StatsError::Validation(_) => (StatusCode::BAD_REQUEST, json!({ "error": message })),
            StatsError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, json!({ "error": message }))
            }
            StatsError::PartialFailure {
                game_id,
                failed_user_ids,
            } => (
                StatusCode::MULTI_STATUS,
                json!({
                    "error": message,
                    "game_id": game_id,
                    "failed_user_ids": failed_user_ids,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
