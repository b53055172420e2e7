//! Forward equity simulation by resampling realized R-multiples.
//!
//! Every run draws `trades_per_run` R-multiples uniformly, with replacement,
//! from the completed trades and accumulates them from zero. The summary
//! keeps the worst and best runs whole and averages the rest step by step.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::outcome;
use crate::models::{completed, Trade};

pub const MIN_TRADES: usize = 5;
pub const DEFAULT_RUNS: usize = 100;
pub const DEFAULT_TRADES_PER_RUN: usize = 200;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub runs: usize,
    pub trades_per_run: usize,
    pub min_path: Vec<f64>,
    pub avg_path: Vec<f64>,
    pub max_path: Vec<f64>,
    pub min_equity: f64,
    pub avg_equity: f64,
    pub max_equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonteCarloOutcome {
    /// Fewer than [`MIN_TRADES`] completed trades.
    InsufficientData { completed_trades: usize },
    Simulated(MonteCarloSummary),
}

impl MonteCarloOutcome {
    pub fn summary(&self) -> Option<&MonteCarloSummary> {
        match self {
            MonteCarloOutcome::Simulated(s) => Some(s),
            MonteCarloOutcome::InsufficientData { .. } => None,
        }
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, MonteCarloOutcome::InsufficientData { .. })
    }

    pub fn min_path(&self) -> &[f64] {
        self.summary()
            .map(|s| s.min_path.as_slice())
            .unwrap_or_default()
    }

    pub fn avg_path(&self) -> &[f64] {
        self.summary()
            .map(|s| s.avg_path.as_slice())
            .unwrap_or_default()
    }

    pub fn max_path(&self) -> &[f64] {
        self.summary()
            .map(|s| s.max_path.as_slice())
            .unwrap_or_default()
    }
}

/// Unseeded simulation on the thread-local generator.
pub fn run_monte_carlo_simulation(
    trades: &[Trade],
    runs: usize,
    trades_per_run: usize,
) -> MonteCarloOutcome {
    run_monte_carlo_with_rng(trades, runs, trades_per_run, &mut rand::thread_rng())
}

pub fn run_monte_carlo_with_rng<R>(
    trades: &[Trade],
    runs: usize,
    trades_per_run: usize,
    rng: &mut R,
) -> MonteCarloOutcome
where
    R: Rng + ?Sized,
{
    let distribution: Vec<f64> = completed(trades).map(|t| outcome::reduce(t).rr).collect();

    if distribution.len() < MIN_TRADES {
        return MonteCarloOutcome::InsufficientData {
            completed_trades: distribution.len(),
        };
    }

    let paths: Vec<Vec<f64>> = (0..runs)
        .map(|_| simulate_path(&distribution, trades_per_run, rng))
        .collect();

    MonteCarloOutcome::Simulated(summarize(&paths, runs, trades_per_run))
}

fn simulate_path<R: Rng + ?Sized>(distribution: &[f64], steps: usize, rng: &mut R) -> Vec<f64> {
    let mut path = Vec::with_capacity(steps + 1);
    let mut equity = 0.0;
    path.push(equity);
    for _ in 0..steps {
        equity += distribution[rng.gen_range(0..distribution.len())];
        path.push(equity);
    }
    path
}

fn summarize(paths: &[Vec<f64>], runs: usize, trades_per_run: usize) -> MonteCarloSummary {
    let finals: Vec<f64> = paths.iter().filter_map(|p| p.last().copied()).collect();
    if finals.is_empty() {
        return MonteCarloSummary {
            runs,
            trades_per_run,
            ..MonteCarloSummary::default()
        };
    }

    // first run wins ties
    let mut min_idx = 0;
    let mut max_idx = 0;
    for (i, &v) in finals.iter().enumerate() {
        if v < finals[min_idx] {
            min_idx = i;
        }
        if v > finals[max_idx] {
            max_idx = i;
        }
    }

    let avg_path: Vec<f64> = (0..=trades_per_run)
        .map(|step| bounded_mean(paths.iter().map(|p| p[step])))
        .collect();

    MonteCarloSummary {
        runs,
        trades_per_run,
        min_path: paths[min_idx].clone(),
        avg_path,
        max_path: paths[max_idx].clone(),
        min_equity: finals[min_idx],
        avg_equity: bounded_mean(finals.iter().copied()),
        max_equity: finals[max_idx],
    }
}

/// Mean held inside the observed range; summing equal values can round one
/// ulp past them.
fn bounded_mean(values: impl Iterator<Item = f64>) -> f64 {
    let (mut sum, mut n) = (0.0, 0usize);
    let (mut lo, mut hi) = (f64::INFINITY, f64::NEG_INFINITY);
    for v in values {
        sum += v;
        n += 1;
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if n == 0 {
        return 0.0;
    }
    (sum / n as f64).clamp(lo, hi)
}
