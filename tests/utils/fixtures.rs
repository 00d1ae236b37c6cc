use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};

// ============================================================================
// Request Body Fixtures
// ============================================================================

pub struct GameFixture {
    game_id: String,
    start_time: DateTime<Utc>,
    home: (String, String),
    away: (String, String),
}

impl GameFixture {
    /// Yankees host the Red Sox tomorrow
    pub fn new(game_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            start_time: Utc::now() + Duration::days(1),
            home: ("NYY".to_string(), "New York Yankees".to_string()),
            away: ("BOS".to_string(), "Boston Red Sox".to_string()),
        }
    }

    pub fn with_teams(mut self, home_id: &str, away_id: &str) -> Self {
        self.home = (home_id.to_string(), format!("{} Home", home_id));
        self.away = (away_id.to_string(), format!("{} Away", away_id));
        self
    }

    pub fn starting_at(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = start_time;
        self
    }

    pub fn body(&self) -> Value {
        json!({
            "game_id": self.game_id,
            "start_time": self.start_time,
            "home_team_id": self.home.0,
            "home_team": self.home.1,
            "away_team_id": self.away.0,
            "away_team": self.away.1,
        })
    }
}

pub struct PredictionFixture {
    game_id: String,
    home: f64,
    away: f64,
    total: f64,
    confidence: f64,
    winner_id: String,
}

impl PredictionFixture {
    pub fn new(game_id: &str, home: f64, away: f64, total: f64, winner_id: &str) -> Self {
        Self {
            game_id: game_id.to_string(),
            home,
            away,
            total,
            confidence: 0.5,
            winner_id: winner_id.to_string(),
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Entry shape used inside a bulk submission
    pub fn entry(&self) -> Value {
        json!({
            "game_id": self.game_id,
            "home_score_predicted": self.home,
            "away_score_predicted": self.away,
            "total_score_predicted": self.total,
            "confidence": self.confidence,
            "predicted_winner_id": self.winner_id,
        })
    }

    pub fn body_for(&self, user_id: &str) -> Value {
        let mut body = self.entry();
        body["user_id"] = json!(user_id);
        body
    }
}
