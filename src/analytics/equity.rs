use chrono::{DateTime, Utc};
use std::iter;
use serde::{Deserialize, Serialize};

use crate::core::outcome;
use crate::models::{completed, Trade};

/// One closed trade on the relative equity curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 1-based position in chronological order.
    pub index: usize,
    pub equity: f64,
    pub date: DateTime<Utc>,
}

/// End-of-day account balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub date: String,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    pub max_drawdown: f64,
    /// Percent of the peak the deepest drawdown was measured from.
    pub max_drawdown_pct: f64,
}

/// Completed trades, stable-sorted by `created_at`.
fn chronological(trades: &[Trade]) -> Vec<&Trade> {
    let mut closed: Vec<&Trade> = completed(trades).collect();
    closed.sort_by_key(|t| t.created_at);
    closed
}

/// Cumulative P/L starting from zero.
pub fn compute_equity_curve(trades: &[Trade]) -> Vec<EquityPoint> {
    let mut equity = 0.0;
    chronological(trades)
        .into_iter()
        .enumerate()
        .map(|(i, t)| {
            equity += outcome::reduce(t).pl;
            EquityPoint {
                index: i + 1,
                equity,
                date: t.created_at_utc(),
            }
        })
        .collect()
}

/// Account balance seeded at `initial_balance`, one point per UTC day that
/// had closed trades.
pub fn compute_balance_curve(trades: &[Trade], initial_balance: f64) -> Vec<BalancePoint> {
    let mut balance = initial_balance;
    let mut points: Vec<BalancePoint> = Vec::new();

    for t in chronological(trades) {
        balance += outcome::reduce(t).pl;
        let date = t.date_key();
        match points.last_mut() {
            Some(last) if last.date == date => last.balance = balance,
            _ => points.push(BalancePoint { date, balance }),
        }
    }
    points
}

/// Measured from the zero origin, so a losing first trade counts.
pub fn compute_max_drawdown(curve: &[EquityPoint]) -> f64 {
    drawdown_of(iter::once(0.0).chain(curve.iter().map(|p| p.equity))).max_drawdown
}

/// Measured from `initial_balance`, the point the curve was seeded at.
pub fn balance_drawdown(curve: &[BalancePoint], initial_balance: f64) -> Drawdown {
    drawdown_of(iter::once(initial_balance).chain(curve.iter().map(|p| p.balance)))
}

/// Single pass with a running peak seeded by the first value.
pub fn drawdown_of<I>(values: I) -> Drawdown
where
    I: IntoIterator<Item = f64>,
{
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return Drawdown::default();
    };

    let mut peak = first;
    let mut result = Drawdown::default();
    for v in values {
        if v > peak {
            peak = v;
        }
        let dd = peak - v;
        if dd > result.max_drawdown {
            result.max_drawdown = dd;
            result.max_drawdown_pct = if peak > 0.0 { dd / peak * 100.0 } else { 0.0 };
        }
    }
    result
}
