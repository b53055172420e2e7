pub mod adherence;
pub mod brackets;
pub mod calendar;
pub mod dimensions;
pub mod equity;
pub mod filter;
pub mod grouping;
pub mod metrics;
pub mod monte_carlo;
pub mod report;
pub mod tools;

pub use adherence::{compute_adherence_comparison, AdherenceComparison};
pub use brackets::{group_by_bracket_level, BracketLevelClassifier, BracketLevelStats};
pub use calendar::{aggregate_trades_by_day, get_month_calendar_grid, CalendarDay, DayAggregates};
pub use dimensions::{
    group_by_bias, group_by_hour, group_by_session, group_by_volatility, group_by_weekday,
};
pub use equity::{
    compute_balance_curve, compute_equity_curve, compute_max_drawdown, BalancePoint, EquityPoint,
};
pub use filter::{filter_trades, ScopeFilter};
pub use grouping::{group_trades, partition, CategoryStats, Classifier};
pub use metrics::{compute_metrics, PerformanceMetrics};
pub use monte_carlo::{
    run_monte_carlo_simulation, run_monte_carlo_with_rng, MonteCarloOutcome, MonteCarloSummary,
};
pub use report::AnalyticsReport;
pub use tools::{compute_tool_impact, ToolClassifier, ToolImpact, ToolKey};
