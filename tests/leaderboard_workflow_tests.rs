mod utils;
use axum::http::StatusCode;
use serde_json::{json, Value};
use std::sync::Arc;
use utils::{FlakyPredictionRepository, GameFixture, PredictionFixture, TestSetupBuilder};

fn entry_for<'a>(board: &'a Value, user_id: &str) -> &'a Value {
    board
        .as_array()
        .unwrap()
        .iter()
        .find(|entry| entry["user_id"] == user_id)
        .unwrap_or_else(|| panic!("user {} missing from leaderboard", user_id))
}

#[tokio::test]
async fn leaderboard_ranks_users_after_games_complete() {
    let setup = TestSetupBuilder::new().build();

    let alice = setup.register_user("alice").await;
    let bob = setup.register_user("bob").await;
    let carol = setup.register_user("carol").await;
    let dave = setup.register_user("dave").await;

    setup.schedule_game(GameFixture::new("G1")).await;
    setup
        .schedule_game(GameFixture::new("G2").with_teams("LAD", "SF"))
        .await;

    // alice and bob submit identical picks
    for user_id in [&alice, &bob] {
        setup
            .predict(user_id, PredictionFixture::new("G1", 4.0, 3.0, 7.0, "NYY"))
            .await;
        setup
            .predict(user_id, PredictionFixture::new("G2", 2.0, 5.0, 7.0, "SF"))
            .await;
    }
    setup
        .predict(&carol, PredictionFixture::new("G1", 6.0, 1.0, 9.0, "NYY"))
        .await;

    let (status, _) = setup.complete_game("G1", 5, 3, "NYY").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = setup.complete_game("G2", 6, 2, "LAD").await;
    assert_eq!(status, StatusCode::OK);

    let (status, board) = setup.get("/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board.as_array().unwrap().len(), 4);

    // carol: 1 of 1 correct
    assert_eq!(board[0]["user_id"], carol.as_str());
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[0]["winner_accuracy"], 1.0);
    assert_eq!(board[0]["total_score_error"], 3.0);
    assert_eq!(board[0]["total_runs_error"], 1.0);

    // alice and bob tie on every key and share rank 2
    let tied: Vec<&str> = vec![
        board[1]["user_id"].as_str().unwrap(),
        board[2]["user_id"].as_str().unwrap(),
    ];
    assert!(tied.contains(&alice.as_str()));
    assert!(tied.contains(&bob.as_str()));
    for user_id in [&alice, &bob] {
        let entry = entry_for(&board, user_id);
        assert_eq!(entry["rank"], 2);
        assert_eq!(entry["total_winners_correct"], 1);
        assert_eq!(entry["winner_accuracy"], 0.5);
        assert_eq!(entry["total_score_error"], 8.0);
        assert_eq!(entry["total_runs_error"], 2.0);
    }

    // competition ranking leaves a gap after the tie
    assert_eq!(board[3]["user_id"], dave.as_str());
    assert_eq!(board[3]["rank"], 4);
    assert_eq!(board[3]["username"], "dave");
}

#[tokio::test]
async fn pending_predictions_do_not_affect_leaderboard() {
    let setup = TestSetupBuilder::new().build();
    let alice = setup.register_user("alice").await;
    let bob = setup.register_user("bob").await;

    setup.schedule_game(GameFixture::new("G1")).await;
    setup
        .predict(&alice, PredictionFixture::new("G1", 4.0, 3.0, 7.0, "NYY"))
        .await;

    let (status, board) = setup.get("/leaderboard").await;
    assert_eq!(status, StatusCode::OK);

    for user_id in [&alice, &bob] {
        let entry = entry_for(&board, user_id);
        assert_eq!(entry["rank"], 1);
        assert_eq!(entry["winner_accuracy"], 0.0);
        assert_eq!(entry["total_winners_correct"], 0);
        assert_eq!(entry["total_score_error"], 0.0);
    }
}

#[tokio::test]
async fn user_stats_reports_rank_or_unranked() {
    let setup = TestSetupBuilder::new().build();
    let alice = setup.register_user("alice").await;
    let bob = setup.register_user("bob").await;
    let newbie = setup.register_user("newbie").await;

    setup.schedule_game(GameFixture::new("G1")).await;
    setup
        .predict(&alice, PredictionFixture::new("G1", 5.0, 3.0, 8.0, "NYY"))
        .await;
    setup
        .predict(&bob, PredictionFixture::new("G1", 2.0, 3.0, 5.0, "BOS"))
        .await;
    setup.complete_game("G1", 5, 3, "NYY").await;

    let (status, stats) = setup
        .get(&format!("/users/stats?user_id={}", bob))
        .await;
    assert_eq!(status, StatusCode::OK);
    // newbie's zeroed errors sort ahead of bob's under the secondary keys
    assert_eq!(stats["rank"], 3);
    assert_eq!(stats["total_winners_correct"], 0);
    assert_eq!(stats["total_score_error"], 3.0);
    assert_eq!(stats["total_runs_error"], 3.0);

    let (status, stats) = setup
        .get(&format!("/users/stats?user_id={}", newbie))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["rank"], 0);
    assert_eq!(stats["winner_accuracy"], 0.0);
    assert_eq!(stats["total_winners_correct"], 0);

    let (status, _) = setup.get("/users/stats?user_id=ghost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bulk_predictions_are_scored_like_single_ones() {
    let setup = TestSetupBuilder::new().build();
    let alice = setup.register_user("alice").await;

    setup.schedule_game(GameFixture::new("G1")).await;
    setup
        .schedule_game(GameFixture::new("G2").with_teams("LAD", "SF"))
        .await;

    let (status, created) = setup
        .post(
            "/predictions/bulk",
            json!({
                "user_id": alice,
                "predictions": [
                    PredictionFixture::new("G1", 5.0, 3.0, 8.0, "NYY").with_confidence(0.9).entry(),
                    PredictionFixture::new("G2", 1.0, 4.0, 5.0, "SF").entry(),
                ],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.as_array().unwrap().len(), 2);

    setup.complete_game("G1", 5, 3, "NYY").await;
    setup.complete_game("G2", 1, 4, "SF").await;

    let (_, stats) = setup
        .get(&format!("/users/stats?user_id={}", alice))
        .await;
    assert_eq!(stats["rank"], 1);
    assert_eq!(stats["total_winners_correct"], 2);
    assert_eq!(stats["winner_accuracy"], 1.0);
    assert_eq!(stats["total_score_error"], 0.0);
    assert_eq!(stats["total_runs_error"], 0.0);
}

#[tokio::test]
async fn leaderboard_survives_prediction_read_failures() {
    let predictions = FlakyPredictionRepository::new();
    let setup = TestSetupBuilder::new()
        .with_prediction_repository(Arc::new(predictions.clone()))
        .build();
    let alice = setup.register_user("alice").await;
    let bob = setup.register_user("bob").await;

    setup.schedule_game(GameFixture::new("G1")).await;
    setup
        .predict(&alice, PredictionFixture::new("G1", 5.0, 3.0, 8.0, "NYY"))
        .await;
    setup.complete_game("G1", 5, 3, "NYY").await;

    predictions.fail_reads();
    let (status, board) = setup.get("/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board.as_array().unwrap().len(), 2);
    for user_id in [&alice, &bob] {
        let entry = entry_for(&board, user_id);
        assert_eq!(entry["total_winners_correct"], 0);
        assert_eq!(entry["rank"], 1);
    }

    predictions.heal();
    let (_, board) = setup.get("/leaderboard").await;
    assert_eq!(board[0]["user_id"], alice.as_str());
    assert_eq!(board[0]["total_winners_correct"], 1);
}

#[tokio::test]
async fn health_check() {
    let setup = TestSetupBuilder::new().build();

    let (status, body) = setup.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}
