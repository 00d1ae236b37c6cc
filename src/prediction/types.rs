use serde::Deserialize;

/// One predicted game outcome as submitted by a user
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionEntry {
    pub game_id: String,
    pub home_score_predicted: f64,
    pub away_score_predicted: f64,
    pub total_score_predicted: f64,
    pub confidence: f64,
    pub predicted_winner_id: String,
}

/// Request payload for submitting a single prediction
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitPredictionRequest {
    pub user_id: String,
    #[serde(flatten)]
    pub prediction: PredictionEntry,
}

/// Request payload for submitting several predictions at once
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitBulkPredictionsRequest {
    pub user_id: String,
    pub predictions: Vec<PredictionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UserPredictionsQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct GamePredictionsQuery {
    pub game_id: String,
}
