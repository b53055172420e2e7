use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::analytics::grouping::{group_trades, Classifier};
use crate::models::{Model, ModelIndex, ToolNameResolver, ToolZone, Trade};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolImpact {
    pub tool_type: String,
    pub display_name: String,
    pub zone: ToolZone,
    pub sample_size: usize,
    /// Percent, 0-100.
    pub win_rate: f64,
    pub avg_pl: f64,
    pub total_pl: f64,
    pub sample_sufficient: bool,
}

/// A tool type as configured in one zone of a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolKey {
    pub tool_type: String,
    pub zone: ToolZone,
}

impl fmt::Display for ToolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.tool_type, self.zone)
    }
}

fn model_tool_keys(model: &Model) -> impl Iterator<Item = ToolKey> + '_ {
    model.zoned_tools().map(|(zone, tool)| ToolKey {
        tool_type: tool.tool_type.clone(),
        zone,
    })
}

/// Distinct tool keys configured on the trade's model. Empty when the model
/// does not resolve.
pub fn tool_keys(trade: &Trade, models: &ModelIndex<'_>) -> BTreeSet<ToolKey> {
    trade
        .model_id
        .as_deref()
        .and_then(|id| models.get(id))
        .map(|model| model_tool_keys(model).collect())
        .unwrap_or_default()
}

/// Puts a trade under every tool its model uses.
pub struct ToolClassifier<'a> {
    models: &'a ModelIndex<'a>,
}

impl<'a> ToolClassifier<'a> {
    pub fn new(models: &'a ModelIndex<'a>) -> Self {
        Self { models }
    }
}

impl Classifier for ToolClassifier<'_> {
    type Category = ToolKey;

    fn classify(&self, trade: &Trade) -> Vec<ToolKey> {
        tool_keys(trade, self.models).into_iter().collect()
    }

    /// Every configured tool, ordered by type then zone.
    fn categories(&self) -> Vec<ToolKey> {
        self.models
            .values()
            .flat_map(|m| model_tool_keys(m))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn zero_fill(&self) -> bool {
        false
    }
}

/// Win rate and P/L for every tool a completed trade's model uses, ranked
/// by win rate then average P/L, both descending.
pub fn compute_tool_impact<R>(
    trades: &[Trade],
    models: &ModelIndex<'_>,
    names: &R,
    min_sample: usize,
) -> Vec<ToolImpact>
where
    R: ToolNameResolver + ?Sized,
{
    let mut out: Vec<ToolImpact> = group_trades(trades, &ToolClassifier::new(models))
        .into_iter()
        .map(|g| {
            let m = g.metrics;
            ToolImpact {
                display_name: names.display_name(&g.category.tool_type),
                tool_type: g.category.tool_type,
                zone: g.category.zone,
                sample_size: m.total_trades,
                win_rate: m.win_rate,
                avg_pl: m.avg_pl,
                total_pl: m.total_pl,
                sample_sufficient: m.total_trades >= min_sample,
            }
        })
        .collect();

    out.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.avg_pl.total_cmp(&a.avg_pl))
    });
    out
}
