// Library crate for the prediction pool server
// Exposes the public API for integration tests

pub mod config;
pub mod game;
pub mod health;
pub mod prediction;
pub mod router;
pub mod shared;
pub mod stats;
pub mod user;

pub use config::{AppConfig, ConfigError};
pub use game::{GameModel, GameStatus};
pub use prediction::{PredictionModel, ScoreResult};
pub use router::build_router;
pub use shared::{AppError, AppState};
pub use stats::{LeaderboardEntry, LeaderboardService, ResultReconciler, StatsError};
pub use user::UserModel;
