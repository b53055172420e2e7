use serde::{Deserialize, Serialize};

use crate::core::outcome;
use crate::models::Trade;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_trades: usize,
    pub total_wins: usize,
    pub total_losses: usize,
    /// Percent, 0-100.
    pub win_rate: f64,
    pub total_pl: f64,
    pub avg_pl: f64,
    pub avg_r: f64,
    /// +inf when there are profits and no losses.
    pub profit_factor: f64,
    pub avg_win: f64,
    /// Positive magnitude of the mean losing trade.
    pub avg_loss: f64,
    pub gross_profit: f64,
    pub gross_loss: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    pub payoff_ratio: f64,
}

/// Reduces the completed trades of `trades` to aggregate metrics. Open
/// trades are skipped, so unfiltered input is fine.
pub fn compute_metrics<'a, I>(trades: I) -> PerformanceMetrics
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut m = PerformanceMetrics::default();
    let mut total_r = 0.0;
    let mut best = f64::NEG_INFINITY;
    let mut worst = f64::INFINITY;

    for trade in trades.into_iter().filter(|t| t.is_completed) {
        let o = outcome::reduce(trade);
        m.total_trades += 1;
        m.total_pl += o.pl;
        total_r += o.rr;
        best = best.max(o.pl);
        worst = worst.min(o.pl);

        if o.is_winner {
            m.total_wins += 1;
            m.gross_profit += o.pl;
        } else if o.is_loser() {
            m.total_losses += 1;
            m.gross_loss += o.pl.abs();
        }
    }

    if m.total_trades == 0 {
        return PerformanceMetrics::default();
    }

    let n = m.total_trades as f64;
    m.win_rate = m.total_wins as f64 / n * 100.0;
    m.avg_pl = m.total_pl / n;
    m.avg_r = total_r / n;
    m.best_trade = best;
    m.worst_trade = worst;

    m.avg_win = if m.total_wins > 0 {
        m.gross_profit / m.total_wins as f64
    } else {
        0.0
    };
    m.avg_loss = if m.total_losses > 0 {
        m.gross_loss / m.total_losses as f64
    } else {
        0.0
    };

    m.profit_factor = profit_factor(m.gross_profit, m.gross_loss);
    m.payoff_ratio = if m.avg_loss > 0.0 {
        m.avg_win / m.avg_loss
    } else {
        0.0
    };

    m
}

pub fn profit_factor(gross_profit: f64, gross_loss: f64) -> f64 {
    if gross_loss > 0.0 {
        gross_profit / gross_loss
    } else if gross_profit > 0.0 {
        f64::INFINITY
    } else {
        0.0
    }
}
