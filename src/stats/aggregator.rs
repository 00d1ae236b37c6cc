use super::models::PredictionSummary;
use crate::prediction::models::PredictionModel;

/// Folds a user's predictions into summary statistics.
/// Unscored predictions contribute nothing, and accuracy is 0 when nothing is scored.
pub fn summarize(predictions: &[PredictionModel]) -> PredictionSummary {
    let mut summary = predictions
        .iter()
        .filter_map(|prediction| prediction.result.as_ref())
        .fold(PredictionSummary::default(), |mut acc, result| {
            acc.total_scored += 1;
            if result.winner_correct {
                acc.total_winners_correct += 1;
            }
            acc.total_score_error += result.home_score_error + result.away_score_error;
            acc.total_runs_error += result.total_score_error;
            acc
        });

    if summary.total_scored > 0 {
        summary.winner_accuracy =
            f64::from(summary.total_winners_correct) / f64::from(summary.total_scored);
    }

    summary
}
