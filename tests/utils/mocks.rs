use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use prediction_pool::{
    prediction::repository::{InMemoryPredictionRepository, PredictionRepository},
    AppError, PredictionModel, ScoreResult,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// In-memory prediction store whose result writes can be made to fail per user
#[derive(Clone)]
pub struct FlakyPredictionRepository {
    inner: Arc<InMemoryPredictionRepository>,
    failing_writes: Arc<Mutex<HashSet<String>>>,
    fail_reads: Arc<AtomicBool>,
}

impl FlakyPredictionRepository {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemoryPredictionRepository::new()),
            failing_writes: Arc::new(Mutex::new(HashSet::new())),
            fail_reads: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn fail_writes_for(&self, user_id: &str) {
        self.failing_writes
            .lock()
            .unwrap()
            .insert(user_id.to_string());
    }

    /// Lets every subsequent write succeed again
    pub fn heal(&self) {
        self.failing_writes.lock().unwrap().clear();
        self.fail_reads.store(false, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn should_fail_write(&self, user_id: &str) -> bool {
        self.failing_writes.lock().unwrap().contains(user_id)
    }

    fn read_guard(&self) -> Result<(), AppError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("read timeout".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PredictionRepository for FlakyPredictionRepository {
    async fn create_prediction(&self, prediction: &PredictionModel) -> Result<(), AppError> {
        self.inner.create_prediction(prediction).await
    }

    async fn batch_create_predictions(
        &self,
        predictions: &[PredictionModel],
    ) -> Result<(), AppError> {
        self.inner.batch_create_predictions(predictions).await
    }

    async fn get_prediction(
        &self,
        user_id: &str,
        game_id: &str,
    ) -> Result<Option<PredictionModel>, AppError> {
        self.inner.get_prediction(user_id, game_id).await
    }

    async fn get_predictions_by_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        self.read_guard()?;
        self.inner.get_predictions_by_user(user_id).await
    }

    async fn get_predictions_by_game(
        &self,
        game_id: &str,
    ) -> Result<Vec<PredictionModel>, AppError> {
        self.read_guard()?;
        self.inner.get_predictions_by_game(game_id).await
    }

    async fn put_prediction_result(
        &self,
        user_id: &str,
        game_id: &str,
        result: &ScoreResult,
    ) -> Result<(), AppError> {
        if self.should_fail_write(user_id) {
            return Err(AppError::DatabaseError("write throttled".to_string()));
        }
        self.inner
            .put_prediction_result(user_id, game_id, result)
            .await
    }
}
