use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{
    models::{LeaderboardEntry, ReconciliationSummary},
    reconciler::ResultReconciler,
    service::LeaderboardService,
    types::{CompleteGameRequest, UserStatsQuery},
    StatsError,
};
use crate::shared::AppState;

fn leaderboard_service(state: &AppState) -> LeaderboardService {
    LeaderboardService::new(
        Arc::clone(&state.user_repository),
        Arc::clone(&state.prediction_repository),
    )
}

/// GET /leaderboard
#[instrument(name = "get_leaderboard", skip(state))]
pub async fn get_leaderboard(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, StatsError> {
    let entries = leaderboard_service(&state).get_leaderboard().await?;
    Ok(Json(entries))
}

/// GET /users/stats?user_id=...
#[instrument(name = "get_user_stats", skip(state))]
pub async fn get_user_stats(
    State(state): State<AppState>,
    Query(query): Query<UserStatsQuery>,
) -> Result<Json<LeaderboardEntry>, StatsError> {
    let entry = leaderboard_service(&state)
        .get_user_stats(&query.user_id)
        .await?;
    Ok(Json(entry))
}

/// Admin handler recording a game's final result and scoring its predictions
///
/// POST /admin/games/:game_id/complete
#[instrument(name = "complete_game", skip(state))]
pub async fn complete_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    Json(request): Json<CompleteGameRequest>,
) -> Result<Json<ReconciliationSummary>, StatsError> {
    info!(game_id = %game_id, "Completing game");

    let reconciler = ResultReconciler::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.prediction_repository),
    );
    let summary = reconciler
        .complete_game(
            &game_id,
            request.home_score,
            request.away_score,
            &request.winner_id,
        )
        .await?;

    Ok(Json(summary))
}
