use serde::Deserialize;

/// Request payload for closing out a game with its final result
#[derive(Debug, Deserialize)]
pub struct CompleteGameRequest {
    pub home_score: i32,
    pub away_score: i32,
    pub winner_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UserStatsQuery {
    pub user_id: String,
}
