use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::{PredictionModel, ScoreResult};
use crate::shared::AppError;

/// Trait for prediction repository operations.
/// Predictions are keyed by (user_id, game_id) with a secondary lookup path by game_id.
#[async_trait]
pub trait PredictionRepository {
    /// Fails with `Conflict` if the user already predicted this game
    async fn create_prediction(&self, prediction: &PredictionModel) -> Result<(), AppError>;

    /// Stores every prediction or none of them
    async fn batch_create_predictions(&self, predictions: &[PredictionModel])
        -> Result<(), AppError>;

    async fn get_prediction(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<PredictionModel>, AppError>;

    /// All predictions for a user, ordered by game_id
    async fn get_predictions_by_user(&self, user_id: &str)
        -> Result<Vec<PredictionModel>, AppError>;

    /// All predictions for a game, ordered by user_id
    async fn get_predictions_by_game(&self, game_id: &str)
        -> Result<Vec<PredictionModel>, AppError>;

    /// Replaces the scored outcome of one prediction
    async fn put_prediction_result(
        &self,
        user_id: &str,
        game_id: &str,
        result: &ScoreResult,
    ) -> Result<(), AppError>;
}

type PredictionKey = (String, String);

#[derive(Default)]
struct PredictionStore {
    by_key: BTreeMap<PredictionKey, PredictionModel>,
    // game_id -> user_ids
    by_game: HashMap<String, BTreeSet<String>>,
}

impl PredictionStore {
    fn contains(&self, user_id: &str, game_id: &str) -> bool {
        self.by_key
            .contains_key(&(user_id.to_string(), game_id.to_string()))
    }

    fn insert(&mut self, prediction: PredictionModel) {
        self.by_game
            .entry(prediction.game_id.clone())
            .or_default()
            .insert(prediction.user_id.clone());
        self.by_key.insert(
            (prediction.user_id.clone(), prediction.game_id.clone()),
            prediction,
        );
    }
}

/// In-memory implementation of PredictionRepository for development and testing
pub struct InMemoryPredictionRepository {
    store: Mutex<PredictionStore>,
}

impl Default for InMemoryPredictionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPredictionRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(PredictionStore::default()),
        }
    }

    /// Creates an in-memory repository with pre-populated predictions
    pub fn with_predictions(predictions: Vec<PredictionModel>) -> Self {
        let mut store = PredictionStore::default();
        for prediction in predictions {
            store.insert(prediction);
        }

        Self {
            store: Mutex::new(store),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, PredictionStore>, AppError> {
        self.store
            .lock()
            .map_err(|_| AppError::DatabaseError("Prediction store lock poisoned".to_string()))
    }
}

#[async_trait]
impl PredictionRepository for InMemoryPredictionRepository {
    #[instrument(skip(self, prediction))]
    async fn create_prediction(&self, prediction: &PredictionModel) -> Result<(), AppError> {
        debug!(
            user_id = %prediction.user_id,
            game_id = %prediction.game_id,
            "Creating prediction in memory"
        );

        let mut store = self.lock()?;
        if store.contains(&prediction.user_id, &prediction.game_id) {
            warn!(
                user_id = %prediction.user_id,
                game_id = %prediction.game_id,
                "Prediction already exists in memory"
            );
            return Err(AppError::Conflict(format!(
                "Prediction for game {} already exists",
                prediction.game_id
            )));
        }
        store.insert(prediction.clone());

        Ok(())
    }

    #[instrument(skip(self, predictions))]
    async fn batch_create_predictions(
        &self,
        predictions: &[PredictionModel],
    ) -> Result<(), AppError> {
        debug!(count = predictions.len(), "Creating prediction batch in memory");

        let mut store = self.lock()?;
        let mut seen = BTreeSet::new();
        for prediction in predictions {
            let key = (prediction.user_id.as_str(), prediction.game_id.as_str());
            if store.contains(key.0, key.1) || !seen.insert(key) {
                warn!(
                    user_id = %prediction.user_id,
                    game_id = %prediction.game_id,
                    "Duplicate prediction in batch"
                );
                return Err(AppError::Conflict(format!(
                    "Prediction for game {} already exists",
                    prediction.game_id
                )));
            }
        }

        for prediction in predictions {
            store.insert(prediction.clone());
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_prediction(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<PredictionModel>, AppError> {
        let store = self.lock()?;
        Ok(store
            .by_key
            .get(&(user_id.to_string(), game_id.to_string()))
            .cloned())
    }

    #[instrument(skip(self))]
    async fn get_predictions_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        debug!(user_id = %user_id, "Fetching user predictions from memory");

        let store = self.lock()?;
        let predictions = store
            .by_key
            .range((user_id.to_string(), String::new())..)
            .take_while(|(key, _)| key.0 == user_id)
            .map(|(_, prediction)| prediction.clone())
            .collect();

        Ok(predictions)
    }

    #[instrument(skip(self))]
    async fn get_predictions_by_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        debug!(game_id = %game_id, "Fetching game predictions from memory");

        let store = self.lock()?;
        let predictions = match store.by_game.get(game_id) {
            Some(user_ids) => user_ids
                .iter()
                .filter_map(|user_id| {
                    store
                        .by_key
                        .get(&(user_id.clone(), game_id.to_string()))
                        .cloned()
                })
                .collect(),
            None => Vec::new(),
        };

        Ok(predictions)
    }

    #[instrument(skip(self, result))]
    async fn put_prediction_result(
        &self,
        user_id: &str,
        game_id: &str,
        result: &ScoreResult,
    ) -> Result<(), AppError> {
        debug!(user_id = %user_id, game_id = %game_id, "Storing prediction result in memory");

        let mut store = self.lock()?;
        let prediction = store
            .by_key
            .get_mut(&(user_id.to_string(), game_id.to_string()))
            .ok_or_else(|| {
                warn!(user_id = %user_id, game_id = %game_id, "Prediction not found for result update");
                AppError::NotFound(format!(
                    "Prediction for user {} on game {} not found",
                    user_id, game_id
                ))
            })?;
        prediction.result = Some(result.clone());

        Ok(())
    }
}

/// PostgreSQL implementation of prediction repository
pub struct PostgresPredictionRepository {
    pool: PgPool,
}

impl PostgresPredictionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PREDICTION_COLUMNS: &str = "user_id, game_id, home_score_predicted, away_score_predicted, total_score_predicted, confidence, predicted_winner_id, submitted_at, actual_winner_id, winner_correct, home_score_error, away_score_error, total_score_error";

const INSERT_PREDICTION: &str = "INSERT INTO predictions (user_id, game_id, home_score_predicted, away_score_predicted, total_score_predicted, confidence, predicted_winner_id, submitted_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

fn prediction_from_row(row: &PgRow) -> Result<PredictionModel, AppError> {
    let actual_winner_id: Option<String> = row.try_get("actual_winner_id")?;
    let winner_correct: Option<bool> = row.try_get("winner_correct")?;
    let home_score_error: Option<f64> = row.try_get("home_score_error")?;
    let away_score_error: Option<f64> = row.try_get("away_score_error")?;
    let total_score_error: Option<f64> = row.try_get("total_score_error")?;

    let result = match (
        actual_winner_id,
        winner_correct,
        home_score_error,
        away_score_error,
        total_score_error,
    ) {
        (
            Some(actual_winner_id),
            Some(winner_correct),
            Some(home_score_error),
            Some(away_score_error),
            Some(total_score_error),
        ) => Some(ScoreResult {
            actual_winner_id,
            winner_correct,
            home_score_error,
            away_score_error,
            total_score_error,
        }),
        (None, None, None, None, None) => None,
        _ => {
            return Err(AppError::DatabaseError(
                "Prediction row is partially scored".to_string(),
            ))
        }
    };

    Ok(PredictionModel {
        user_id: row.try_get("user_id")?,
        game_id: row.try_get("game_id")?,
        home_score_predicted: row.try_get("home_score_predicted")?,
        away_score_predicted: row.try_get("away_score_predicted")?,
        total_score_predicted: row.try_get("total_score_predicted")?,
        confidence: row.try_get("confidence")?,
        predicted_winner_id: row.try_get("predicted_winner_id")?,
        submitted_at: row.try_get("submitted_at")?,
        result,
    })
}

#[async_trait]
impl PredictionRepository for PostgresPredictionRepository {
    #[instrument(skip(self, prediction))]
    async fn create_prediction(&self, prediction: &PredictionModel) -> Result<(), AppError> {
        debug!(
            user_id = %prediction.user_id,
            game_id = %prediction.game_id,
            "Creating prediction in database"
        );

        sqlx::query(INSERT_PREDICTION)
            .bind(&prediction.user_id)
            .bind(&prediction.game_id)
            .bind(prediction.home_score_predicted)
            .bind(prediction.away_score_predicted)
            .bind(prediction.total_score_predicted)
            .bind(prediction.confidence)
            .bind(&prediction.predicted_winner_id)
            .bind(prediction.submitted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to create prediction in database");
                AppError::from(e)
            })?;

        Ok(())
    }

    #[instrument(skip(self, predictions))]
    async fn batch_create_predictions(
        &self,
        predictions: &[PredictionModel],
    ) -> Result<(), AppError> {
        debug!(count = predictions.len(), "Creating prediction batch in database");

        let mut tx = self.pool.begin().await?;
        for prediction in predictions {
            sqlx::query(INSERT_PREDICTION)
                .bind(&prediction.user_id)
                .bind(&prediction.game_id)
                .bind(prediction.home_score_predicted)
                .bind(prediction.away_score_predicted)
                .bind(prediction.total_score_predicted)
                .bind(prediction.confidence)
                .bind(&prediction.predicted_winner_id)
                .bind(prediction.submitted_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    warn!(error = %e, game_id = %prediction.game_id, "Failed to insert prediction in batch");
                    AppError::from(e)
                })?;
        }
        tx.commit().await?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_prediction(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<PredictionModel>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM predictions WHERE user_id = $1 AND game_id = $2",
            PREDICTION_COLUMNS
        ))
        .bind(user_id)
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(prediction_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn get_predictions_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        debug!(user_id = %user_id, "Fetching user predictions from database");

        let rows = sqlx::query(&format!(
            "SELECT {} FROM predictions WHERE user_id = $1 ORDER BY game_id",
            PREDICTION_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user_id, "Failed to fetch user predictions");
            AppError::from(e)
        })?;

        rows.iter().map(prediction_from_row).collect()
    }

    #[instrument(skip(self))]
    async fn get_predictions_by_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        debug!(game_id = %game_id, "Fetching game predictions from database");

        // served by predictions_game_id_idx
        let rows = sqlx::query(&format!(
            "SELECT {} FROM predictions WHERE game_id = $1 ORDER BY user_id",
            PREDICTION_COLUMNS
        ))
        .bind(game_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id = %game_id, "Failed to fetch game predictions");
            AppError::from(e)
        })?;

        rows.iter().map(prediction_from_row).collect()
    }

    #[instrument(skip(self, result))]
    async fn put_prediction_result(
        &self,
        user_id: &str,
        game_id: &str,
        result: &ScoreResult,
    ) -> Result<(), AppError> {
        debug!(user_id = %user_id, game_id = %game_id, "Storing prediction result in database");

        let outcome = sqlx::query(
            "UPDATE predictions SET actual_winner_id = $3, winner_correct = $4, home_score_error = $5, away_score_error = $6, total_score_error = $7 WHERE user_id = $1 AND game_id = $2",
        )
        .bind(user_id)
        .bind(game_id)
        .bind(&result.actual_winner_id)
        .bind(result.winner_correct)
        .bind(result.home_score_error)
        .bind(result.away_score_error)
        .bind(result.total_score_error)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, user_id = %user_id, game_id = %game_id, "Failed to store prediction result");
            AppError::from(e)
        })?;

        if outcome.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Prediction for user {} on game {} not found",
                user_id, game_id
            )));
        }

        Ok(())
    }
}
