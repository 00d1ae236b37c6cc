use crate::game::models::FinalScore;
use crate::prediction::models::{PredictionModel, ScoreResult};

/// Absolute distance between a predicted and an actual value
pub fn score(predicted: f64, actual: f64) -> f64 {
    (predicted - actual).abs()
}

pub fn winner_correct(predicted_winner_id: &str, actual_winner_id: &str) -> bool {
    predicted_winner_id == actual_winner_id
}

/// Scores one prediction against a final result.
/// The predicted total is compared with the actual combined score on its own,
/// independent of the predicted home and away values.
pub fn score_prediction(prediction: &PredictionModel, final_score: &FinalScore) -> ScoreResult {
    ScoreResult {
        actual_winner_id: final_score.winner_id.clone(),
        winner_correct: winner_correct(&prediction.predicted_winner_id, &final_score.winner_id),
        home_score_error: score(
            prediction.home_score_predicted,
            f64::from(final_score.home_score),
        ),
        away_score_error: score(
            prediction.away_score_predicted,
            f64::from(final_score.away_score),
        ),
        total_score_error: score(prediction.total_score_predicted, final_score.combined_score()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn prediction(home: f64, away: f64, total: f64, winner: &str) -> PredictionModel {
        PredictionModel {
            user_id: "user".to_string(),
            game_id: "G1".to_string(),
            home_score_predicted: home,
            away_score_predicted: away,
            total_score_predicted: total,
            confidence: 0.5,
            predicted_winner_id: winner.to_string(),
            submitted_at: Utc::now(),
            result: None,
        }
    }

    fn final_score(home: i32, away: i32, winner: &str) -> FinalScore {
        FinalScore {
            home_score: home,
            away_score: away,
            winner_id: winner.to_string(),
        }
    }

    #[rstest]
    #[case(4.0, 5.0, 1.0)]
    #[case(5.0, 4.0, 1.0)]
    #[case(3.5, 3.0, 0.5)]
    #[case(0.0, 0.0, 0.0)]
    #[case(0.0, 12.0, 12.0)]
    fn test_score_is_symmetric_absolute_difference(
        #[case] predicted: f64,
        #[case] actual: f64,
        #[case] expected: f64,
    ) {
        assert_eq!(score(predicted, actual), expected);
        assert_eq!(score(actual, predicted), expected);
        assert!(score(predicted, actual) >= 0.0);
    }

    #[rstest]
    #[case("TEAM_H", "TEAM_H", true)]
    #[case("TEAM_A", "TEAM_H", false)]
    #[case("team_h", "TEAM_H", false)]
    fn test_winner_correct_is_exact_match(
        #[case] predicted: &str,
        #[case] actual: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(winner_correct(predicted, actual), expected);
    }

    #[test]
    fn test_score_prediction_home_team_win() {
        let result = score_prediction(
            &prediction(4.0, 3.0, 7.0, "TEAM_H"),
            &final_score(5, 3, "TEAM_H"),
        );

        assert_eq!(
            result,
            ScoreResult {
                actual_winner_id: "TEAM_H".to_string(),
                winner_correct: true,
                home_score_error: 1.0,
                away_score_error: 0.0,
                total_score_error: 1.0,
            }
        );
    }

    #[test]
    fn test_total_error_uses_submitted_total_not_component_sum() {
        // components sum to 7 which would be off by 1; the submitted total of 10 is off by 2
        let result = score_prediction(
            &prediction(4.0, 3.0, 10.0, "TEAM_A"),
            &final_score(5, 3, "TEAM_H"),
        );

        assert_eq!(result.total_score_error, 2.0);
        assert!(!result.winner_correct);
        assert_eq!(result.actual_winner_id, "TEAM_H");
    }

    #[test]
    fn test_score_prediction_with_extreme_scores_does_not_overflow() {
        let result = score_prediction(
            &prediction(0.0, 0.0, 0.0, "TEAM_H"),
            &final_score(i32::MAX, i32::MAX, "TEAM_H"),
        );

        assert_eq!(result.total_score_error, 2.0 * f64::from(i32::MAX));
        assert!(result.total_score_error.is_finite());
    }
}
