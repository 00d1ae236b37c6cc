use futures::future;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::{models::LeaderboardEntry, ranker, StatsError};
use crate::prediction::{models::PredictionModel, repository::PredictionRepository};
use crate::user::{models::UserModel, repository::UserRepository};

/// Recomputes standings from stored predictions on every read
pub struct LeaderboardService {
    user_repository: Arc<dyn UserRepository + Send + Sync>,
    prediction_repository: Arc<dyn PredictionRepository + Send + Sync>,
}

impl LeaderboardService {
    pub fn new(
        user_repository: Arc<dyn UserRepository + Send + Sync>,
        prediction_repository: Arc<dyn PredictionRepository + Send + Sync>,
    ) -> Self {
        Self {
            user_repository,
            prediction_repository,
        }
    }

    /// Ranks every registered user. A failed prediction fetch for one user
    /// reports that user with zeroed stats instead of failing the whole board.
    #[instrument(skip(self))]
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>, StatsError> {
        let users = self.user_repository.list_users().await.map_err(|e| {
            error!(error = %e, "Failed to list users for leaderboard");
            StatsError::StorageUnavailable(e.to_string())
        })?;

        let predictions_by_user = self.predictions_by_user(&users).await;
        let entries = ranker::rank(&users, &predictions_by_user);

        info!(users = entries.len(), "Leaderboard computed");
        Ok(entries)
    }

    /// Returns one user's leaderboard entry. Users with no prediction records are unranked (rank 0).
    #[instrument(skip(self))]
    pub async fn get_user_stats(&self, user_id: &str) -> Result<LeaderboardEntry, StatsError> {
        if user_id.trim().is_empty() {
            return Err(StatsError::Validation("User id is required".to_string()));
        }

        self.user_repository
            .get_user(user_id)
            .await?
            .ok_or_else(|| StatsError::NotFound(format!("User {} not found", user_id)))?;

        // rank is relative, so the whole board is needed
        let users = self.user_repository.list_users().await?;
        let predictions_by_user = self.predictions_by_user(&users).await;
        let has_predictions = predictions_by_user
            .get(user_id)
            .is_some_and(|predictions| !predictions.is_empty());

        let mut entry = ranker::rank(&users, &predictions_by_user)
            .into_iter()
            .find(|entry| entry.user_id == user_id)
            .ok_or_else(|| StatsError::NotFound(format!("User {} not found", user_id)))?;

        if !has_predictions {
            entry.rank = 0;
        }

        debug!(user_id = %user_id, rank = entry.rank, "User stats computed");
        Ok(entry)
    }

    async fn predictions_by_user(&self, users: &[UserModel]) -> HashMap<String, Vec<PredictionModel>> {
        let repository = &self.prediction_repository;
        let fetches = users.iter().map(|user| async move {
            let predictions = match repository.get_predictions_by_user(&user.user_id).await {
                Ok(predictions) => predictions,
                Err(e) => {
                    warn!(error = %e, user_id = %user.user_id, "Failed to fetch predictions, using zeroed stats");
                    Vec::new()
                }
            };
            (user.user_id.clone(), predictions)
        });

        future::join_all(fetches).await.into_iter().collect()
    }
}
