use std::cmp::Ordering;
use std::collections::HashMap;

use super::{aggregator, models::LeaderboardEntry};
use crate::prediction::models::PredictionModel;
use crate::user::models::UserModel;

/// Leaderboard order: accuracy desc, winners correct desc, score error asc, runs error asc.
/// `Ordering::Equal` means the two entries share a rank.
pub fn compare_entries(a: &LeaderboardEntry, b: &LeaderboardEntry) -> Ordering {
    b.winner_accuracy
        .total_cmp(&a.winner_accuracy)
        .then_with(|| b.total_winners_correct.cmp(&a.total_winners_correct))
        .then_with(|| a.total_score_error.total_cmp(&b.total_score_error))
        .then_with(|| a.total_runs_error.total_cmp(&b.total_runs_error))
}

/// Builds one entry per user and assigns competition ranks (1, 1, 3, ...).
/// Users missing from `predictions_by_user` are ranked with zeroed stats.
pub fn rank(
    users: &[UserModel],
    predictions_by_user: &HashMap<String, Vec<PredictionModel>>,
) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = users
        .iter()
        .map(|user| {
            let predictions = predictions_by_user
                .get(&user.user_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let summary = aggregator::summarize(predictions);
            LeaderboardEntry::from_summary(user.user_id.clone(), user.username.clone(), &summary)
        })
        .collect();

    // user_id only orders entries inside a tie group, it never affects rank
    entries.sort_by(|a, b| compare_entries(a, b).then_with(|| a.user_id.cmp(&b.user_id)));
    assign_ranks(&mut entries);

    entries
}

/// Expects `entries` already sorted by `compare_entries`
fn assign_ranks(entries: &mut [LeaderboardEntry]) {
    for index in 0..entries.len() {
        let rank = match index.checked_sub(1) {
            Some(prev) if compare_entries(&entries[prev], &entries[index]).is_eq() => {
                entries[prev].rank
            }
            _ => u32::try_from(index + 1).unwrap_or(u32::MAX),
        };
        entries[index].rank = rank;
    }
}
