//! Stop-distance volatility buckets.
//!
//! The stop-distance ratio `|entry - stop| / entry` of every trade in the
//! current set is sorted and cut at the 33rd and 66th percentile. A ratio at
//! or below the first cut is `Low`, at or below the second is `Medium`,
//! anything above is `High`. Cut points are recomputed per trade set, so the
//! buckets always describe volatility relative to the trader's own history.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Trade;

const LOW_PERCENTILE: f64 = 0.33;
const HIGH_PERCENTILE: f64 = 0.66;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VolatilityBucket {
    Low,
    Medium,
    High,
}

impl fmt::Display for VolatilityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VolatilityBucket::Low => write!(f, "Low"),
            VolatilityBucket::Medium => write!(f, "Medium"),
            VolatilityBucket::High => write!(f, "High"),
        }
    }
}

impl VolatilityBucket {
    pub const ALL: [VolatilityBucket; 3] = [
        VolatilityBucket::Low,
        VolatilityBucket::Medium,
        VolatilityBucket::High,
    ];
}

/// `None` when the entry price cannot serve as a basis.
pub fn stop_distance_ratio(trade: &Trade) -> Option<f64> {
    let bo = &trade.bracket_order;
    if !(bo.entry_price > 0.0) || !bo.stop_loss.is_finite() {
        return None;
    }
    Some((bo.entry_price - bo.stop_loss).abs() / bo.entry_price)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolatilityCutoffs {
    pub low: f64,
    pub high: f64,
}

impl VolatilityCutoffs {
    /// Tercile cut points of the given trades. `None` when no trade has a
    /// usable ratio.
    pub fn from_trades<'a, I>(trades: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Trade>,
    {
        let mut ratios: Vec<f64> = trades.into_iter().filter_map(stop_distance_ratio).collect();
        if ratios.is_empty() {
            return None;
        }
        ratios.sort_by(f64::total_cmp);
        Some(Self {
            low: percentile(&ratios, LOW_PERCENTILE),
            high: percentile(&ratios, HIGH_PERCENTILE),
        })
    }

    pub fn bucket(&self, ratio: f64) -> VolatilityBucket {
        if ratio <= self.low {
            VolatilityBucket::Low
        } else if ratio <= self.high {
            VolatilityBucket::Medium
        } else {
            VolatilityBucket::High
        }
    }

    pub fn classify(&self, trade: &Trade) -> Option<VolatilityBucket> {
        stop_distance_ratio(trade).map(|r| self.bucket(r))
    }
}

/// Nearest-rank on an ascending slice: element at `floor(len * p)`.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let idx = ((sorted.len() as f64 * p).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}
