use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Lifecycle of a scheduled game.
/// `InProgress` is accepted from upstream feeds but does not change scoring behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    Upcoming,
    InProgress,
    Completed,
}

/// Final score recorded when a game is completed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalScore {
    pub home_score: i32,
    pub away_score: i32,
    pub winner_id: String,
}

impl FinalScore {
    /// Widened to f64 so the sum cannot overflow
    pub fn combined_score(&self) -> f64 {
        f64::from(self.home_score) + f64::from(self.away_score)
    }
}

/// Storage model for the games table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameModel {
    pub game_id: String,
    pub start_time: DateTime<Utc>,
    pub home_team_id: String,
    pub home_team: String,
    pub away_team_id: String,
    pub away_team: String,
    pub status: GameStatus,
    /// Present only once the game is completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<FinalScore>,
}

impl GameModel {
    /// Creates an upcoming game with no result
    pub fn new(
        game_id: String,
        start_time: DateTime<Utc>,
        home_team_id: String,
        home_team: String,
        away_team_id: String,
        away_team: String,
    ) -> Self {
        Self {
            game_id,
            start_time,
            home_team_id,
            home_team,
            away_team_id,
            away_team,
            status: GameStatus::Upcoming,
            final_score: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Check if a team plays in this game (by team id)
    pub fn has_team(&self, team_id: &str) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Predictions are only accepted for upcoming games that haven't started yet
    pub fn accepts_predictions_at(&self, now: DateTime<Utc>) -> bool {
        self.status == GameStatus::Upcoming && now < self.start_time
    }

    /// Marks the game completed with the given result, replacing any earlier result
    pub fn complete(&mut self, final_score: FinalScore) {
        self.status = GameStatus::Completed;
        self.final_score = Some(final_score);
    }
}
