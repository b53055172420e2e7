use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::analytics::grouping::{group_trades, CategoryStats, Classifier};
use crate::core::bias::classify_bias;
use crate::core::sessions::{utc_hour, utc_weekday, WEEKDAYS_SUNDAY_FIRST};
use crate::core::{Session, VolatilityBucket, VolatilityCutoffs};
use crate::models::{completed, Bias, ModelIndex, Trade};

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionClassifier;

impl Classifier for SessionClassifier {
    type Category = Session;

    fn classify(&self, trade: &Trade) -> Vec<Session> {
        vec![Session::classify(trade.created_at)]
    }

    fn categories(&self) -> Vec<Session> {
        Session::ALL.to_vec()
    }
}

/// Buckets against tercile cut points of the trade set it was built from.
#[derive(Debug, Clone, Copy)]
pub struct VolatilityClassifier {
    cutoffs: Option<VolatilityCutoffs>,
}

impl VolatilityClassifier {
    pub fn from_trades(trades: &[Trade]) -> Self {
        Self {
            cutoffs: VolatilityCutoffs::from_trades(completed(trades)),
        }
    }
}

impl Classifier for VolatilityClassifier {
    type Category = VolatilityBucket;

    fn classify(&self, trade: &Trade) -> Vec<VolatilityBucket> {
        self.cutoffs
            .as_ref()
            .and_then(|c| c.classify(trade))
            .into_iter()
            .collect()
    }

    fn categories(&self) -> Vec<VolatilityBucket> {
        VolatilityBucket::ALL.to_vec()
    }
}

pub struct BiasClassifier<'a> {
    models: &'a ModelIndex<'a>,
}

impl<'a> BiasClassifier<'a> {
    pub fn new(models: &'a ModelIndex<'a>) -> Self {
        Self { models }
    }
}

impl Classifier for BiasClassifier<'_> {
    type Category = Bias;

    fn classify(&self, trade: &Trade) -> Vec<Bias> {
        vec![classify_bias(trade, self.models)]
    }

    fn categories(&self) -> Vec<Bias> {
        Bias::ALL.to_vec()
    }

    fn zero_fill(&self) -> bool {
        false
    }
}

/// UTC hour bucket, displayed as `HH:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HourOfDay(pub u32);

impl fmt::Display for HourOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HourClassifier;

impl Classifier for HourClassifier {
    type Category = HourOfDay;

    fn classify(&self, trade: &Trade) -> Vec<HourOfDay> {
        vec![HourOfDay(utc_hour(trade.created_at))]
    }

    fn categories(&self) -> Vec<HourOfDay> {
        (0..24).map(HourOfDay).collect()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WeekdayClassifier;

impl Classifier for WeekdayClassifier {
    type Category = Weekday;

    fn classify(&self, trade: &Trade) -> Vec<Weekday> {
        vec![utc_weekday(trade.created_at)]
    }

    fn categories(&self) -> Vec<Weekday> {
        WEEKDAYS_SUNDAY_FIRST.to_vec()
    }
}

pub fn group_by_session(trades: &[Trade]) -> Vec<CategoryStats<Session>> {
    group_trades(trades, &SessionClassifier)
}

pub fn group_by_volatility(trades: &[Trade]) -> Vec<CategoryStats<VolatilityBucket>> {
    group_trades(trades, &VolatilityClassifier::from_trades(trades))
}

pub fn group_by_bias(trades: &[Trade], models: &ModelIndex<'_>) -> Vec<CategoryStats<Bias>> {
    group_trades(trades, &BiasClassifier::new(models))
}

pub fn group_by_hour(trades: &[Trade]) -> Vec<CategoryStats<HourOfDay>> {
    group_trades(trades, &HourClassifier)
}

pub fn group_by_weekday(trades: &[Trade]) -> Vec<CategoryStats<Weekday>> {
    group_trades(trades, &WeekdayClassifier)
}
