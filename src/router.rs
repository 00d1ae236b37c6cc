use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{game, health, prediction, shared::AppState, stats, user};

/// Builds the full HTTP surface over the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/users", post(user::create_user).get(user::get_user))
        .route("/users/list", get(user::list_users))
        .route("/users/stats", get(stats::get_user_stats))
        .route("/games", post(game::create_game).get(game::list_games))
        .route("/games/:game_id", get(game::get_game))
        .route(
            "/predictions",
            post(prediction::create_prediction).get(prediction::get_predictions_by_user),
        )
        .route(
            "/predictions/bulk",
            post(prediction::create_bulk_predictions),
        )
        .route(
            "/predictions/game",
            get(prediction::get_predictions_by_game),
        )
        .route("/leaderboard", get(stats::get_leaderboard))
        .route(
            "/admin/games/:game_id/complete",
            post(stats::complete_game),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
