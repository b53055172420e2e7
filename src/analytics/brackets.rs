use serde::{Deserialize, Serialize};

use crate::analytics::grouping::{partition, Classifier};
use crate::core::outcome::{reduce_level, LevelHit, LevelOutcome};
use crate::models::{completed, Trade};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketLevelStats {
    /// 0-based position in `bracket_order_outcomes`.
    pub level: usize,
    pub label: String,
    pub sample_size: usize,
    /// Fractions, 0-1.
    pub tp_hit_rate: f64,
    pub sl_hit_rate: f64,
    pub avg_realized_r: f64,
    pub total_pl: f64,
}

/// Puts a trade in every bracket level it executed.
#[derive(Debug, Clone, Copy)]
pub struct BracketLevelClassifier {
    depth: usize,
}

impl BracketLevelClassifier {
    /// Levels run up to the deepest one any completed trade reached.
    pub fn from_trades(trades: &[Trade]) -> Self {
        Self {
            depth: completed(trades)
                .map(|t| t.bracket_order_outcomes.len())
                .max()
                .unwrap_or(0),
        }
    }
}

impl Classifier for BracketLevelClassifier {
    type Category = usize;

    fn classify(&self, trade: &Trade) -> Vec<usize> {
        (0..trade.bracket_order_outcomes.len()).collect()
    }

    fn categories(&self) -> Vec<usize> {
        (0..self.depth).collect()
    }

    fn zero_fill(&self) -> bool {
        false
    }

    fn label(&self, level: &usize) -> String {
        format!("TP{}", level + 1)
    }
}

/// Per-level hit rates across completed trades, in level order.
pub fn group_by_bracket_level(trades: &[Trade]) -> Vec<BracketLevelStats> {
    let classifier = BracketLevelClassifier::from_trades(trades);
    let mut buckets = partition(trades, &classifier);

    classifier
        .categories()
        .into_iter()
        .filter_map(|level| {
            let outcomes: Vec<LevelOutcome> = buckets
                .remove(&level)?
                .into_iter()
                .filter_map(|t| reduce_level(t, level))
                .collect();
            Some(level_stats(level, classifier.label(&level), &outcomes))
        })
        .collect()
}

fn level_stats(level: usize, label: String, outcomes: &[LevelOutcome]) -> BracketLevelStats {
    let n = outcomes.len();
    let count = |hit: LevelHit| outcomes.iter().filter(|o| o.hit == hit).count();
    let rate = |c: usize| if n > 0 { c as f64 / n as f64 } else { 0.0 };

    BracketLevelStats {
        level,
        label,
        sample_size: n,
        tp_hit_rate: rate(count(LevelHit::TakeProfit)),
        sl_hit_rate: rate(count(LevelHit::StopLoss)),
        avg_realized_r: if n > 0 {
            outcomes.iter().map(|o| o.realized_r).sum::<f64>() / n as f64
        } else {
            0.0
        },
        total_pl: outcomes.iter().map(|o| o.pl).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{approx, at, level, make_trade, open_trade};

    fn bracket_trade(id: &str, closes: &[f64]) -> Trade {
        let mut t = make_trade(id, 0.0, 0.0, at(0, 9));
        t.bracket_order.take_profits = vec![101.0, 102.0, 104.0];
        t.bracket_order_outcomes = closes.iter().map(|&c| level(100.0, c, 1.0)).collect();
        t
    }

    #[test]
    fn hit_rates_per_level() {
        let trades = vec![
            bracket_trade("a", &[101.0, 102.0, 104.0]),
            bracket_trade("b", &[101.0, 99.0]),
            bracket_trade("c", &[99.0]),
            bracket_trade("d", &[101.5, 100.5]),
        ];
        let levels = group_by_bracket_level(&trades);
        assert_eq!(levels.len(), 3);

        let l1 = &levels[0];
        assert_eq!(l1.label, "TP1");
        assert_eq!(l1.sample_size, 4);
        assert!(approx(l1.tp_hit_rate, 0.75));
        assert!(approx(l1.sl_hit_rate, 0.25));
        // (1 + 1 - 1 + 1.5) / 4
        assert!(approx(l1.avg_realized_r, 0.625));

        let l2 = &levels[1];
        assert_eq!(l2.sample_size, 3);
        assert!(approx(l2.tp_hit_rate, 1.0 / 3.0));
        assert!(approx(l2.sl_hit_rate, 1.0 / 3.0));

        let l3 = &levels[2];
        assert_eq!(l3.sample_size, 1);
        assert!(approx(l3.tp_hit_rate, 1.0));
        assert!(approx(l3.total_pl, 4.0));
    }

    #[test]
    fn open_and_levelless_trades_contribute_nothing() {
        let mut open = open_trade("o", at(0, 9));
        open.bracket_order_outcomes = vec![level(100.0, 102.0, 1.0)];
        let trades = vec![open, make_trade("x", 5.0, 1.0, at(0, 9))];
        assert!(group_by_bracket_level(&trades).is_empty());
    }
}
