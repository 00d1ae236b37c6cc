use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome fields attached to a prediction once its game completes.
/// Stored and replaced as a unit, so a prediction is either fully scored or not at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub actual_winner_id: String,
    pub winner_correct: bool,
    pub home_score_error: f64,
    pub away_score_error: f64,
    pub total_score_error: f64,
}

/// Storage model for the predictions table, keyed by (user_id, game_id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionModel {
    pub user_id: String,
    pub game_id: String,
    pub home_score_predicted: f64,
    pub away_score_predicted: f64,
    /// Submitted independently, not derived from the home and away predictions
    pub total_score_predicted: f64,
    pub confidence: f64,
    pub predicted_winner_id: String,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ScoreResult>,
}

impl PredictionModel {
    pub fn is_scored(&self) -> bool {
        self.result.is_some()
    }
}
