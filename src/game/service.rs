use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{GameModel, GameStatus},
    repository::GameRepository,
    types::CreateGameRequest,
};
use crate::shared::AppError;

/// Service for handling game schedule business logic
pub struct GameService {
    repository: Arc<dyn GameRepository + Send + Sync>,
}

impl GameService {
    pub fn new(repository: Arc<dyn GameRepository + Send + Sync>) -> Self {
        Self { repository }
    }

    /// Stores a new upcoming game
    #[instrument(skip(self))]
    pub async fn create_game(&self, request: CreateGameRequest) -> Result<GameModel, AppError> {
        if request.game_id.trim().is_empty() {
            return Err(AppError::Validation("Game id is required".to_string()));
        }
        if request.home_team_id.trim().is_empty() || request.away_team_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Home and away team ids are required".to_string(),
            ));
        }
        if request.home_team_id == request.away_team_id {
            return Err(AppError::Validation(
                "Home and away teams must differ".to_string(),
            ));
        }

        let game = GameModel::new(
            request.game_id,
            request.start_time,
            request.home_team_id,
            request.home_team,
            request.away_team_id,
            request.away_team,
        );
        self.repository.create_game(&game).await?;

        info!(game_id = %game.game_id, start_time = %game.start_time, "Game scheduled");
        Ok(game)
    }

    #[instrument(skip(self))]
    pub async fn get_game(&self, game_id: &str) -> Result<GameModel, AppError> {
        self.repository
            .get_game(game_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Game {} not found", game_id)))
    }

    #[instrument(skip(self))]
    pub async fn list_games(&self, status: GameStatus) -> Result<Vec<GameModel>, AppError> {
        let games = self.repository.list_games_by_status(status).await?;
        debug!(%status, game_count = games.len(), "Games listed");
        Ok(games)
    }
}
