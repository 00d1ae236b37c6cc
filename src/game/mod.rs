// Public API - what other modules can use
pub use handlers::{create_game, get_game, list_games};
pub use models::{FinalScore, GameModel, GameStatus};
pub use service::GameService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
