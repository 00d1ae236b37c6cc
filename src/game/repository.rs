use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::{FinalScore, GameModel, GameStatus};
use crate::shared::AppError;

/// Trait for game repository operations
#[async_trait]
pub trait GameRepository {
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError>;
    async fn get_game(&self, game_id: &str) -> Result<Option<GameModel>, AppError>;
    async fn list_games_by_status(&self, status: GameStatus) -> Result<Vec<GameModel>, AppError>;

    /// Stores the final score and flips the game to completed.
    /// Overwrites any previously stored result.
    async fn put_game_result(&self, game_id: &str, final_score: &FinalScore)
        -> Result<(), AppError>;
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, GameModel>>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Mutex::new(HashMap::new()),
        }
    }

    /// Creates an in-memory repository with pre-populated games
    pub fn with_games(games: Vec<GameModel>) -> Self {
        let game_map = games
            .into_iter()
            .map(|game| (game.game_id.clone(), game))
            .collect();

        Self {
            games: Mutex::new(game_map),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, GameModel>>, AppError> {
        self.games
            .lock()
            .map_err(|_| AppError::DatabaseError("Game store lock poisoned".to_string()))
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError> {
        debug!(game_id = %game.game_id, "Creating game in memory");

        let mut games = self.lock()?;
        if games.contains_key(&game.game_id) {
            warn!(game_id = %game.game_id, "Game already exists in memory");
            return Err(AppError::Conflict(format!(
                "Game {} already exists",
                game.game_id
            )));
        }
        games.insert(game.game_id.clone(), game.clone());

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Result<Option<GameModel>, AppError> {
        debug!(game_id = %game_id, "Fetching game from memory");

        let games = self.lock()?;
        Ok(games.get(game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn list_games_by_status(&self, status: GameStatus) -> Result<Vec<GameModel>, AppError> {
        debug!(%status, "Listing games by status in memory");

        let games = self.lock()?;
        let mut matching: Vec<GameModel> = games
            .values()
            .filter(|game| game.status == status)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.game_id.cmp(&b.game_id))
        });

        Ok(matching)
    }

    #[instrument(skip(self, final_score))]
    async fn put_game_result(
        &self,
        game_id: &str,
        final_score: &FinalScore,
    ) -> Result<(), AppError> {
        debug!(game_id = %game_id, "Storing game result in memory");

        let mut games = self.lock()?;
        let game = games.get_mut(game_id).ok_or_else(|| {
            warn!(game_id = %game_id, "Game not found for result update");
            AppError::NotFound(format!("Game {} not found", game_id))
        })?;
        game.complete(final_score.clone());

        Ok(())
    }
}

/// PostgreSQL implementation of game repository
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const GAME_COLUMNS: &str = "game_id, start_time, home_team_id, home_team, away_team_id, away_team, status, home_score, away_score, winner_id";

fn game_from_row(row: &PgRow) -> Result<GameModel, AppError> {
    let status_text: String = row.try_get("status")?;
    let status = GameStatus::from_str(&status_text)
        .map_err(|_| AppError::DatabaseError(format!("Unknown game status: {}", status_text)))?;

    let home_score: Option<i32> = row.try_get("home_score")?;
    let away_score: Option<i32> = row.try_get("away_score")?;
    let winner_id: Option<String> = row.try_get("winner_id")?;

    let final_score = match (home_score, away_score, winner_id) {
        (Some(home_score), Some(away_score), Some(winner_id)) => Some(FinalScore {
            home_score,
            away_score,
            winner_id,
        }),
        (None, None, None) => None,
        _ => {
            return Err(AppError::DatabaseError(
                "Game row has a partially stored result".to_string(),
            ))
        }
    };

    Ok(GameModel {
        game_id: row.try_get("game_id")?,
        start_time: row.try_get("start_time")?,
        home_team_id: row.try_get("home_team_id")?,
        home_team: row.try_get("home_team")?,
        away_team_id: row.try_get("away_team_id")?,
        away_team: row.try_get("away_team")?,
        status,
        final_score,
    })
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &GameModel) -> Result<(), AppError> {
        debug!(game_id = %game.game_id, "Creating game in database");

        sqlx::query(
            "INSERT INTO games (game_id, start_time, home_team_id, home_team, away_team_id, away_team, status) VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(&game.game_id)
        .bind(game.start_time)
        .bind(&game.home_team_id)
        .bind(&game.home_team)
        .bind(&game.away_team_id)
        .bind(&game.away_team)
        .bind(game.status.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id = %game.game_id, "Failed to create game in database");
            AppError::from(e)
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: &str) -> Result<Option<GameModel>, AppError> {
        debug!(game_id = %game_id, "Fetching game from database");

        let row = sqlx::query(&format!("SELECT {} FROM games WHERE game_id = $1", GAME_COLUMNS))
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, game_id = %game_id, "Failed to fetch game from database");
                AppError::from(e)
            })?;

        row.as_ref().map(game_from_row).transpose()
    }

    #[instrument(skip(self))]
    async fn list_games_by_status(&self, status: GameStatus) -> Result<Vec<GameModel>, AppError> {
        debug!(%status, "Listing games by status from database");

        let rows = sqlx::query(&format!(
            "SELECT {} FROM games WHERE status = $1 ORDER BY start_time, game_id",
            GAME_COLUMNS
        ))
        .bind(status.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list games from database");
            AppError::from(e)
        })?;

        rows.iter().map(game_from_row).collect()
    }

    #[instrument(skip(self, final_score))]
    async fn put_game_result(
        &self,
        game_id: &str,
        final_score: &FinalScore,
    ) -> Result<(), AppError> {
        debug!(game_id = %game_id, "Storing game result in database");

        let result = sqlx::query(
            "UPDATE games SET status = $2, home_score = $3, away_score = $4, winner_id = $5 WHERE game_id = $1",
        )
        .bind(game_id)
        .bind(GameStatus::Completed.as_ref())
        .bind(final_score.home_score)
        .bind(final_score.away_score)
        .bind(&final_score.winner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id = %game_id, "Failed to store game result in database");
            AppError::from(e)
        })?;

        if result.rows_affected() == 0 {
            warn!(game_id = %game_id, "Game not found for result update");
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        }

        Ok(())
    }
}
