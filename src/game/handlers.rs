use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{GameModel, GameStatus},
    service::GameService,
    types::{CreateGameRequest, GameListQuery},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for scheduling a game
///
/// POST /games
#[instrument(name = "create_game", skip(state))]
pub async fn create_game(
    State(state): State<AppState>,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<GameModel>), AppError> {
    info!(game_id = %request.game_id, "Scheduling game");

    let service = GameService::new(Arc::clone(&state.game_repository));
    let game = service.create_game(request).await?;

    Ok((StatusCode::CREATED, Json(game)))
}

/// HTTP handler for listing games by status
///
/// GET /games?status=upcoming
#[instrument(name = "list_games", skip(state))]
pub async fn list_games(
    State(state): State<AppState>,
    Query(query): Query<GameListQuery>,
) -> Result<Json<Vec<GameModel>>, AppError> {
    let status = query.status.unwrap_or(GameStatus::Upcoming);

    let service = GameService::new(Arc::clone(&state.game_repository));
    let games = service.list_games(status).await?;

    info!(%status, game_count = games.len(), "Games listed successfully");
    Ok(Json(games))
}

/// HTTP handler for a single game
///
/// GET /games/:game_id
#[instrument(name = "get_game", skip(state))]
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<GameModel>, AppError> {
    let service = GameService::new(Arc::clone(&state.game_repository));
    let game = service.get_game(&game_id).await?;

    Ok(Json(game))
}
