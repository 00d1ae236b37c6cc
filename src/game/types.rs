use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::models::GameStatus;

/// Request payload for seeding a scheduled game
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    pub game_id: String,
    pub start_time: DateTime<Utc>,
    pub home_team_id: String,
    pub home_team: String,
    pub away_team_id: String,
    pub away_team: String,
}

/// Query parameters for listing games, defaults to upcoming games
#[derive(Debug, Deserialize)]
pub struct GameListQuery {
    pub status: Option<GameStatus>,
}
