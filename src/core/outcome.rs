use serde::{Deserialize, Serialize};

use crate::models::{OutcomeLevel, Trade};

/// Realized result of one trade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeOutcome {
    pub pl: f64,
    pub rr: f64,
    pub is_winner: bool,
}

impl TradeOutcome {
    pub fn new(pl: f64, rr: f64) -> Self {
        Self {
            pl,
            rr,
            is_winner: pl > 0.0,
        }
    }

    pub fn is_loser(&self) -> bool {
        self.pl < 0.0
    }
}

/// How a bracket level closed relative to its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelHit {
    TakeProfit,
    StopLoss,
    Neither,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelOutcome {
    pub level: usize,
    pub pl: f64,
    pub realized_r: f64,
    pub hit: LevelHit,
}

/// Summary outcome when the trade carries one, otherwise the per-level
/// reduction.
pub fn reduce(trade: &Trade) -> TradeOutcome {
    match trade.bracket_order_outcome {
        Some(o) => TradeOutcome::new(o.final_pl_usd, o.rr),
        None => reduce_from_levels(trade),
    }
}

/// P/L and R rebuilt from `bracket_order_outcomes`. R is P/L over the
/// currency risked to the primary stop across all levels.
pub fn reduce_from_levels(trade: &Trade) -> TradeOutcome {
    let sign = trade.direction.sign();
    let stop = trade.bracket_order.stop_loss;

    let (pl, risk) = trade
        .bracket_order_outcomes
        .iter()
        .fold((0.0, 0.0), |(pl, risk), o| {
            (
                pl + level_pl(o, sign),
                risk + (o.execution_price - stop).abs() * o.size,
            )
        });

    let rr = if risk > 0.0 { pl / risk } else { 0.0 };
    TradeOutcome::new(pl, rr)
}

pub fn reduce_level(trade: &Trade, level: usize) -> Option<LevelOutcome> {
    let o = trade.bracket_order_outcomes.get(level)?;
    let sign = trade.direction.sign();
    let stop = trade.bracket_order.stop_loss;

    let risk_per_unit = (o.execution_price - stop).abs();
    let realized_r = if risk_per_unit > 0.0 {
        (o.closure_price - o.execution_price) * sign / risk_per_unit
    } else {
        0.0
    };

    let take_profit = trade.bracket_order.take_profit_for_level(level);
    let hit = match take_profit {
        Some(tp) if (o.closure_price - tp) * sign >= 0.0 => LevelHit::TakeProfit,
        _ if (o.closure_price - stop) * sign <= 0.0 => LevelHit::StopLoss,
        _ => LevelHit::Neither,
    };

    Some(LevelOutcome {
        level,
        pl: level_pl(o, sign),
        realized_r,
        hit,
    })
}

fn level_pl(o: &OutcomeLevel, sign: f64) -> f64 {
    (o.closure_price - o.execution_price) * o.size * sign
}
