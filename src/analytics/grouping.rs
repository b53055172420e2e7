//! Generic categorical breakdown.
//!
//! A [`Classifier`] assigns each completed trade to zero or more
//! categories; [`group_trades`] partitions the set and runs the metrics
//! reducer per partition, in the classifier's canonical order. Dimensions
//! with richer per-category stats (bracket levels, tools) start from
//! [`partition`] and layer their own reduction on top.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::analytics::metrics::{compute_metrics, PerformanceMetrics};
use crate::models::{completed, Trade};

pub trait Classifier {
    type Category: Clone + Eq + Hash + fmt::Display;

    /// Categories the trade belongs to. Empty means the trade cannot be
    /// placed in this dimension; several means it counts once in each.
    fn classify(&self, trade: &Trade) -> Vec<Self::Category>;

    /// Canonical display order.
    fn categories(&self) -> Vec<Self::Category>;

    /// Report categories that received no trades.
    fn zero_fill(&self) -> bool {
        true
    }

    fn label(&self, category: &Self::Category) -> String {
        category.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats<K> {
    pub category: K,
    pub label: String,
    pub metrics: PerformanceMetrics,
}

/// Completed trades by category. Unclassifiable trades are dropped; a trade
/// listing the same category twice is kept once.
pub fn partition<'a, C: Classifier>(
    trades: &'a [Trade],
    classifier: &C,
) -> HashMap<C::Category, Vec<&'a Trade>> {
    let mut buckets: HashMap<C::Category, Vec<&'a Trade>> = HashMap::new();
    for trade in completed(trades) {
        for key in classifier.classify(trade) {
            let members = buckets.entry(key).or_default();
            if !members.last().is_some_and(|t| std::ptr::eq(*t, trade)) {
                members.push(trade);
            }
        }
    }
    buckets
}

pub fn group_trades<C: Classifier>(trades: &[Trade], classifier: &C) -> Vec<CategoryStats<C::Category>> {
    let mut buckets = partition(trades, classifier);

    classifier
        .categories()
        .into_iter()
        .filter_map(|category| {
            let members = buckets.remove(&category).unwrap_or_default();
            if members.is_empty() && !classifier.zero_fill() {
                return None;
            }
            Some(CategoryStats {
                label: classifier.label(&category),
                metrics: compute_metrics(members),
                category,
            })
        })
        .collect()
}
