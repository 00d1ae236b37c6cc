// Public API - what other modules can use
pub use handlers::{
    create_bulk_predictions, create_prediction, get_predictions_by_game, get_predictions_by_user,
};
pub use models::{PredictionModel, ScoreResult};
pub use service::PredictionService;

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
mod service;
pub mod types;
