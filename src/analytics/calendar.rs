use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::outcome;
use crate::models::{completed, Trade};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayAggregates {
    pub date: String,
    pub trades: Vec<Trade>,
    pub total_pl_dollar: f64,
    pub total_pl_percent: f64,
    pub net_r: f64,
    pub trade_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: String,
    pub is_current_month: bool,
    pub aggregates: Option<DayAggregates>,
}

impl CalendarDay {
    /// Padding days from adjacent months are never selectable.
    pub fn is_clickable(&self) -> bool {
        self.is_current_month
    }
}

/// Return on the position notional (entry price times executed size), in
/// percent. `None` when the trade carries no usable basis.
pub fn pl_percent(trade: &Trade) -> Option<f64> {
    let basis = trade.bracket_order.entry_price * trade.total_size();
    if basis > 0.0 {
        Some(outcome::reduce(trade).pl / basis * 100.0)
    } else {
        None
    }
}

/// Completed trades rolled up by UTC date key.
pub fn aggregate_trades_by_day(trades: &[Trade]) -> BTreeMap<String, DayAggregates> {
    let mut days: BTreeMap<String, DayAggregates> = BTreeMap::new();
    for trade in completed(trades) {
        let date = trade.date_key();
        let o = outcome::reduce(trade);
        let day = days.entry(date.clone()).or_insert_with(|| DayAggregates {
            date,
            ..DayAggregates::default()
        });
        day.total_pl_dollar += o.pl;
        day.total_pl_percent += pl_percent(trade).unwrap_or(0.0);
        day.net_r += o.rr;
        day.trade_count += 1;
        day.trades.push(trade.clone());
    }
    days
}

/// Sunday-first grid of whole weeks covering `month` (1-12). Empty for an
/// invalid year/month.
pub fn get_month_calendar_grid(
    year: i32,
    month: u32,
    aggregates: &BTreeMap<String, DayAggregates>,
) -> Vec<CalendarDay> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let Some(last) = last_day_of_month(first) else {
        return Vec::new();
    };

    let leading = first.weekday().num_days_from_sunday() as i64;
    let trailing = 6 - last.weekday().num_days_from_sunday() as i64;
    let start = first - Duration::days(leading);
    let total = leading + last.day() as i64 + trailing;

    (0..total)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let key = date.format("%Y-%m-%d").to_string();
            let is_current_month = date.month() == month && date.year() == year;
            CalendarDay {
                day: date.day(),
                aggregates: if is_current_month {
                    aggregates.get(&key).cloned()
                } else {
                    None
                },
                date: key,
                is_current_month,
            }
        })
        .collect()
}

fn last_day_of_month(first: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
}
