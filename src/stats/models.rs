use serde::{Deserialize, Serialize};

/// Accumulated statistics over a user's scored predictions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PredictionSummary {
    pub total_scored: u32,
    pub total_winners_correct: u32,
    /// Sum of home and away score errors
    pub total_score_error: f64,
    /// Sum of errors against the separately submitted total score
    pub total_runs_error: f64,
    pub winner_accuracy: f64,
}

/// One leaderboard row, recomputed on every read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub total_winners_correct: u32,
    pub winner_accuracy: f64,
    pub total_score_error: f64,
    pub total_runs_error: f64,
    /// 1-based competition rank; 0 means unranked
    pub rank: u32,
}

impl LeaderboardEntry {
    pub fn from_summary(user_id: String, username: String, summary: &PredictionSummary) -> Self {
        Self {
            user_id,
            username,
            total_winners_correct: summary.total_winners_correct,
            winner_accuracy: summary.winner_accuracy,
            total_score_error: summary.total_score_error,
            total_runs_error: summary.total_runs_error,
            rank: 0,
        }
    }
}

/// Outcome of a fully successful game completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub game_id: String,
    pub predictions_scored: usize,
}
