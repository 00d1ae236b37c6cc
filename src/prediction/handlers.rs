use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::PredictionModel,
    service::PredictionService,
    types::{
        GamePredictionsQuery, SubmitBulkPredictionsRequest, SubmitPredictionRequest,
        UserPredictionsQuery,
    },
};
use crate::shared::{AppError, AppState};

fn prediction_service(state: &AppState) -> PredictionService {
    PredictionService::new(
        Arc::clone(&state.prediction_repository),
        Arc::clone(&state.game_repository),
        Arc::clone(&state.user_repository),
    )
}

/// HTTP handler for submitting one prediction
///
/// POST /predictions
#[instrument(name = "create_prediction", skip(state))]
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(request): Json<SubmitPredictionRequest>,
) -> Result<(StatusCode, Json<PredictionModel>), AppError> {
    let prediction = prediction_service(&state)
        .submit_prediction(request)
        .await?;

    Ok((StatusCode::CREATED, Json(prediction)))
}

/// HTTP handler for submitting a batch of predictions
///
/// POST /predictions/bulk
#[instrument(name = "create_bulk_predictions", skip(state, request))]
pub async fn create_bulk_predictions(
    State(state): State<AppState>,
    Json(request): Json<SubmitBulkPredictionsRequest>,
) -> Result<(StatusCode, Json<Vec<PredictionModel>>), AppError> {
    let predictions = prediction_service(&state)
        .submit_bulk_predictions(request)
        .await?;

    Ok((StatusCode::CREATED, Json(predictions)))
}

/// GET /predictions?user_id=...
#[instrument(name = "get_predictions_by_user", skip(state))]
pub async fn get_predictions_by_user(
    State(state): State<AppState>,
    Query(query): Query<UserPredictionsQuery>,
) -> Result<Json<Vec<PredictionModel>>, AppError> {
    let predictions = prediction_service(&state)
        .get_user_predictions(&query.user_id)
        .await?;

    info!(count = predictions.len(), "User predictions listed");
    Ok(Json(predictions))
}

/// GET /predictions/game?game_id=...
#[instrument(name = "get_predictions_by_game", skip(state))]
pub async fn get_predictions_by_game(
    State(state): State<AppState>,
    Query(query): Query<GamePredictionsQuery>,
) -> Result<Json<Vec<PredictionModel>>, AppError> {
    let predictions = prediction_service(&state)
        .get_game_predictions(&query.game_id)
        .await?;

    info!(count = predictions.len(), "Game predictions listed");
    Ok(Json(predictions))
}
