use serde::{Deserialize, Serialize};

use crate::analytics::metrics::compute_metrics;
use crate::models::Trade;

/// High-adherence subset measured against every completed trade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AdherenceComparison {
    pub threshold: f64,
    pub filtered_trades: usize,
    pub filtered_win_rate: f64,
    pub filtered_pl: f64,
    pub all_trades: usize,
    pub all_win_rate: f64,
    pub all_pl: f64,
    pub win_rate_delta: f64,
    pub pl_delta: f64,
}

/// Pass the unscoped trade collection: the "all" side always covers the
/// full completed population.
pub fn compute_adherence_comparison(trades: &[Trade], threshold: f64) -> AdherenceComparison {
    let all = compute_metrics(trades);
    let filtered = compute_metrics(
        trades
            .iter()
            .filter(|t| t.adherence_score.is_some_and(|s| s >= threshold)),
    );

    AdherenceComparison {
        threshold,
        filtered_trades: filtered.total_trades,
        filtered_win_rate: filtered.win_rate,
        filtered_pl: filtered.total_pl,
        all_trades: all.total_trades,
        all_win_rate: all.win_rate,
        all_pl: all.total_pl,
        win_rate_delta: filtered.win_rate - all.win_rate,
        pl_delta: filtered.total_pl - all.total_pl,
    }
}
