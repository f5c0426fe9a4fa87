//! Rank candidate windows by total weight.

use crate::scanner::CandidateWindow;

/// Sort windows by descending total weight.
///
/// The sort is stable: windows with equal weight keep their incoming
/// (chronological) order.
pub fn rank(mut windows: Vec<CandidateWindow>) -> Vec<CandidateWindow> {
    windows.sort_by(|a, b| b.total_weight.total_cmp(&a.total_weight));
    windows
}
