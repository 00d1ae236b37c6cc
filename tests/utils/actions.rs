use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use super::{
    fixtures::{GameFixture, PredictionFixture},
    setup::TestSetup,
};

// ============================================================================
// HTTP Actions
// ============================================================================

impl TestSetup {
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    /// Registers a user and returns the generated user id
    pub async fn register_user(&self, username: &str) -> String {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registering {}: {}", username, body);
        body["user_id"].as_str().unwrap().to_string()
    }

    pub async fn schedule_game(&self, game: GameFixture) {
        let (status, body) = self.post("/games", game.body()).await;
        assert_eq!(status, StatusCode::CREATED, "scheduling game: {}", body);
    }

    pub async fn predict(&self, user_id: &str, prediction: PredictionFixture) {
        let (status, body) = self
            .post("/predictions", prediction.body_for(user_id))
            .await;
        assert_eq!(status, StatusCode::CREATED, "submitting prediction: {}", body);
    }

    pub async fn complete_game(
        &self,
        game_id: &str,
        home_score: i32,
        away_score: i32,
        winner_id: &str,
    ) -> (StatusCode, Value) {
        self.post(
            &format!("/admin/games/{}/complete", game_id),
            serde_json::json!({
                "home_score": home_score,
                "away_score": away_score,
                "winner_id": winner_id,
            }),
        )
        .await
    }
}
