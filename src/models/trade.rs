use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Direction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketOrder {
    pub entry_price: f64,
    pub stop_loss: f64,
    #[serde(default)]
    pub take_profits: Vec<f64>,
}

impl BracketOrder {
    /// Take-profit price for a bracket level. Levels beyond the configured
    /// targets fall back to the last target.
    pub fn take_profit_for_level(&self, level: usize) -> Option<f64> {
        self.take_profits
            .get(level)
            .or_else(|| self.take_profits.last())
            .copied()
    }
}

/// Summary outcome written when the trade is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BracketOrderOutcome {
    pub final_pl_usd: f64,
    pub rr: f64,
}

/// One executed bracket level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeLevel {
    pub execution_price: f64,
    pub closure_price: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub asset: String,
    pub direction: Direction,
    #[serde(default)]
    pub model_id: Option<String>,
    /// Nanoseconds since the Unix epoch, UTC.
    pub created_at: i64,
    #[serde(default)]
    pub is_completed: bool,
    pub bracket_order: BracketOrder,
    #[serde(default)]
    pub bracket_order_outcome: Option<BracketOrderOutcome>,
    #[serde(default)]
    pub bracket_order_outcomes: Vec<OutcomeLevel>,
    #[serde(default)]
    pub adherence_score: Option<f64>,
}

impl Trade {
    pub fn created_at_utc(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_nanos(self.created_at)
    }

    /// UTC calendar date, `YYYY-MM-DD`.
    pub fn date_key(&self) -> String {
        self.created_at_utc().format("%Y-%m-%d").to_string()
    }

    pub fn total_size(&self) -> f64 {
        self.bracket_order_outcomes.iter().map(|o| o.size).sum()
    }
}

/// Completed trades only, input order kept.
pub fn completed(trades: &[Trade]) -> impl Iterator<Item = &Trade> {
    trades.iter().filter(|t| t.is_completed)
}
