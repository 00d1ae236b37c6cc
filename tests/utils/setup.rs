use axum::Router;
use std::sync::Arc;

use prediction_pool::{
    build_router,
    game::repository::InMemoryGameRepository,
    prediction::repository::{InMemoryPredictionRepository, PredictionRepository},
    user::repository::InMemoryUserRepository,
    AppState,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
}

pub struct TestSetupBuilder {
    prediction_repository: Option<Arc<dyn PredictionRepository + Send + Sync>>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            prediction_repository: None,
        }
    }

    pub fn with_prediction_repository(
        mut self,
        repository: Arc<dyn PredictionRepository + Send + Sync>,
    ) -> Self {
        self.prediction_repository = Some(repository);
        self
    }

    pub fn build(self) -> TestSetup {
        let prediction_repository = self
            .prediction_repository
            .unwrap_or_else(|| Arc::new(InMemoryPredictionRepository::new()));

        let state = AppState::new(
            Arc::new(InMemoryGameRepository::new()),
            prediction_repository,
            Arc::new(InMemoryUserRepository::new()),
        );

        TestSetup {
            app: build_router(state),
        }
    }
}
