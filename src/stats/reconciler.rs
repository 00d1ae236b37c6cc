use futures::future;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

use super::{models::ReconciliationSummary, scoring, StatsError};
use crate::game::{models::FinalScore, repository::GameRepository, GameModel};
use crate::prediction::repository::PredictionRepository;

/// Upper bound on one team's runs in a single game
const MAX_RUNS: i32 = 99;

/// Closes out completed games and scores every prediction that references them
pub struct ResultReconciler {
    game_repository: Arc<dyn GameRepository + Send + Sync>,
    prediction_repository: Arc<dyn PredictionRepository + Send + Sync>,
}

impl ResultReconciler {
    pub fn new(
        game_repository: Arc<dyn GameRepository + Send + Sync>,
        prediction_repository: Arc<dyn PredictionRepository + Send + Sync>,
    ) -> Self {
        Self {
            game_repository,
            prediction_repository,
        }
    }

    /// Records the final result and scores all predictions for the game.
    ///
    /// Re-running with the same inputs overwrites the stored values with identical
    /// ones, so a `PartialFailure` is retried by calling this again.
    #[instrument(skip(self))]
    pub async fn complete_game(
        &self,
        game_id: &str,
        home_score: i32,
        away_score: i32,
        winner_id: &str,
    ) -> Result<ReconciliationSummary, StatsError> {
        validate_input(game_id, home_score, away_score, winner_id)?;

        let game = self
            .game_repository
            .get_game(game_id)
            .await?
            .ok_or_else(|| StatsError::NotFound(format!("Game {} not found", game_id)))?;

        let final_score = FinalScore {
            home_score,
            away_score,
            winner_id: winner_id.to_string(),
        };
        validate_against_game(&game, &final_score)?;

        if game.is_completed() {
            warn!(game_id = %game_id, "Game already completed, overwriting stored result");
        }

        self.game_repository
            .put_game_result(game_id, &final_score)
            .await?;
        info!(game_id = %game_id, home_score, away_score, winner_id = %winner_id, "Game result stored");

        let predictions = self
            .prediction_repository
            .get_predictions_by_game(game_id)
            .await
            .map_err(|e| {
                error!(error = %e, game_id = %game_id, "Failed to fetch predictions for game");
                StatsError::StorageUnavailable(e.to_string())
            })?;
        debug!(game_id = %game_id, count = predictions.len(), "Scoring predictions");

        // rows are independent, so writes run concurrently
        let repository = &self.prediction_repository;
        let final_score = &final_score;
        let writes = predictions.iter().map(|prediction| async move {
            let result = scoring::score_prediction(prediction, final_score);
            let outcome = repository
                .put_prediction_result(&prediction.user_id, &prediction.game_id, &result)
                .await;
            (prediction.user_id.as_str(), outcome)
        });
        let outcomes = future::join_all(writes).await;

        let mut failed_user_ids = Vec::new();
        for (user_id, outcome) in outcomes {
            if let Err(e) = outcome {
                warn!(error = %e, game_id = %game_id, user_id = %user_id, "Failed to store prediction result");
                failed_user_ids.push(user_id.to_string());
            }
        }

        if !failed_user_ids.is_empty() {
            failed_user_ids.sort();
            error!(
                game_id = %game_id,
                failed = failed_user_ids.len(),
                total = predictions.len(),
                "Game completion partially failed"
            );
            return Err(StatsError::PartialFailure {
                game_id: game_id.to_string(),
                failed_user_ids,
            });
        }

        info!(game_id = %game_id, predictions_scored = predictions.len(), "Game reconciled");
        Ok(ReconciliationSummary {
            game_id: game_id.to_string(),
            predictions_scored: predictions.len(),
        })
    }
}

fn validate_input(
    game_id: &str,
    home_score: i32,
    away_score: i32,
    winner_id: &str,
) -> Result<(), StatsError> {
    if game_id.trim().is_empty() {
        return Err(StatsError::Validation("Game id is required".to_string()));
    }
    if winner_id.trim().is_empty() {
        return Err(StatsError::Validation("Winner id is required".to_string()));
    }
    if home_score < 0 || away_score < 0 {
        return Err(StatsError::Validation(
            "Scores must be non-negative".to_string(),
        ));
    }
    if home_score > MAX_RUNS || away_score > MAX_RUNS {
        return Err(StatsError::Validation(format!(
            "Scores above {} runs are not plausible",
            MAX_RUNS
        )));
    }
    Ok(())
}

/// Winner must be one of the two teams and must hold the higher score
fn validate_against_game(game: &GameModel, final_score: &FinalScore) -> Result<(), StatsError> {
    if !game.has_team(&final_score.winner_id) {
        return Err(StatsError::Validation(format!(
            "Winner {} did not play in game {}",
            final_score.winner_id, game.game_id
        )));
    }

    let expected_winner = match final_score.home_score.cmp(&final_score.away_score) {
        std::cmp::Ordering::Greater => &game.home_team_id,
        std::cmp::Ordering::Less => &game.away_team_id,
        std::cmp::Ordering::Equal => {
            return Err(StatsError::Validation(
                "A completed game cannot end tied".to_string(),
            ))
        }
    };
    if *expected_winner != final_score.winner_id {
        return Err(StatsError::Validation(format!(
            "Winner {} does not match the final score",
            final_score.winner_id
        )));
    }

    Ok(())
}
