use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::PredictionModel,
    repository::PredictionRepository,
    types::{PredictionEntry, SubmitBulkPredictionsRequest, SubmitPredictionRequest},
};
use crate::{game::repository::GameRepository, shared::AppError, user::repository::UserRepository};

/// Service for accepting and looking up pre-game predictions
pub struct PredictionService {
    prediction_repository: Arc<dyn PredictionRepository + Send + Sync>,
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    user_repository: Arc<dyn UserRepository + Send + Sync>,
}

impl PredictionService {
    pub fn new(
        prediction_repository: Arc<dyn PredictionRepository + Send + Sync>,
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        user_repository: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        Self {
            prediction_repository,
            game_repository,
            user_repository,
        }
    }

    /// Validates and stores one prediction
    #[instrument(skip(self))]
    pub async fn submit_prediction(
        &self,
        request: SubmitPredictionRequest,
    ) -> Result<PredictionModel, AppError> {
        self.ensure_user_exists(&request.user_id).await?;

        let prediction = self
            .validated_prediction(&request.user_id, request.prediction, Utc::now())
            .await?;
        self.prediction_repository
            .create_prediction(&prediction)
            .await?;

        info!(
            user_id = %prediction.user_id,
            game_id = %prediction.game_id,
            "Prediction submitted"
        );
        Ok(prediction)
    }

    /// Validates every entry first; any invalid entry rejects the whole batch
    #[instrument(skip(self, request), fields(user_id = %request.user_id, count = request.predictions.len()))]
    pub async fn submit_bulk_predictions(
        &self,
        request: SubmitBulkPredictionsRequest,
    ) -> Result<Vec<PredictionModel>, AppError> {
        if request.predictions.is_empty() {
            return Err(AppError::Validation(
                "At least one prediction is required".to_string(),
            ));
        }
        self.ensure_user_exists(&request.user_id).await?;

        {
            let mut seen_games = HashSet::new();
            for entry in &request.predictions {
                if !seen_games.insert(entry.game_id.as_str()) {
                    return Err(AppError::Validation(format!(
                        "Duplicate prediction for game {}",
                        entry.game_id
                    )));
                }
            }
        }

        let now = Utc::now();
        let mut predictions = Vec::with_capacity(request.predictions.len());
        for entry in request.predictions {
            predictions.push(
                self.validated_prediction(&request.user_id, entry, now)
                    .await?,
            );
        }

        self.prediction_repository
            .batch_create_predictions(&predictions)
            .await?;

        info!(count = predictions.len(), "Prediction batch submitted");
        Ok(predictions)
    }

    #[instrument(skip(self))]
    pub async fn get_user_predictions(
        &self,
        user_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        self.prediction_repository
            .get_predictions_by_user(user_id)
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_game_predictions(
        &self,
        game_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        self.prediction_repository
            .get_predictions_by_game(game_id)
            .await
    }

    async fn ensure_user_exists(&self, user_id: &str) -> Result<(), AppError> {
        if user_id.trim().is_empty() {
            return Err(AppError::Validation("User id is required".to_string()));
        }

        match self.user_repository.get_user(user_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::NotFound(format!("User {} not found", user_id))),
        }
    }

    async fn validated_prediction(
        &self,
        user_id: &str,
        entry: PredictionEntry,
        now: DateTime<Utc>,
    ) -> Result<PredictionModel, AppError> {
        if entry.game_id.trim().is_empty() || entry.predicted_winner_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Game id and predicted winner are required".to_string(),
            ));
        }
        validate_values(&entry)?;

        let game = self
            .game_repository
            .get_game(&entry.game_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Game {} not found", entry.game_id)))?;

        if !game.accepts_predictions_at(now) {
            warn!(game_id = %game.game_id, status = %game.status, "Prediction rejected for started game");
            return Err(AppError::Validation(format!(
                "Cannot predict for games that have started: {}",
                game.game_id
            )));
        }
        if !game.has_team(&entry.predicted_winner_id) {
            return Err(AppError::Validation(format!(
                "Invalid predicted winner for game: {}",
                game.game_id
            )));
        }

        debug!(game_id = %game.game_id, "Prediction entry validated");

        Ok(PredictionModel {
            user_id: user_id.to_string(),
            game_id: entry.game_id,
            home_score_predicted: entry.home_score_predicted,
            away_score_predicted: entry.away_score_predicted,
            total_score_predicted: entry.total_score_predicted,
            confidence: entry.confidence,
            predicted_winner_id: entry.predicted_winner_id,
            submitted_at: now,
            result: None,
        })
    }
}

fn validate_values(entry: &PredictionEntry) -> Result<(), AppError> {
    let scores = [
        ("home_score_predicted", entry.home_score_predicted),
        ("away_score_predicted", entry.away_score_predicted),
        ("total_score_predicted", entry.total_score_predicted),
    ];
    for (field, value) in scores {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::Validation(format!(
                "{} must be a non-negative number",
                field
            )));
        }
    }

    if !entry.confidence.is_finite() || !(0.0..=1.0).contains(&entry.confidence) {
        return Err(AppError::Validation(
            "confidence must be between 0 and 1".to_string(),
        ));
    }

    Ok(())
}
