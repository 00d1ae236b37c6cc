pub mod aggregator;
pub mod ranker;
pub mod reconciler;
pub mod scoring;
pub mod service;

mod errors;
mod handlers;
pub mod models;
pub mod types;

pub use errors::StatsError;
pub use handlers::{complete_game, get_leaderboard, get_user_stats};
pub use models::*;
pub use reconciler::ResultReconciler;
pub use service::LeaderboardService;
