use chrono::Weekday;
use serde::Serialize;
use tracing::debug;

use crate::analytics::adherence::{compute_adherence_comparison, AdherenceComparison};
use crate::analytics::brackets::{group_by_bracket_level, BracketLevelStats};
use crate::analytics::dimensions::{
    group_by_bias, group_by_hour, group_by_session, group_by_volatility, group_by_weekday,
    HourOfDay,
};
use crate::analytics::equity::{
    balance_drawdown, compute_balance_curve, compute_equity_curve, compute_max_drawdown,
    BalancePoint, Drawdown, EquityPoint,
};
use crate::analytics::filter::{filter_trades, ScopeFilter};
use crate::analytics::grouping::CategoryStats;
use crate::analytics::metrics::{compute_metrics, PerformanceMetrics};
use crate::analytics::monte_carlo::{run_monte_carlo_simulation, MonteCarloOutcome};
use crate::analytics::tools::{compute_tool_impact, ToolImpact};
use crate::config::Config;
use crate::core::{Session, VolatilityBucket};
use crate::models::{index_models, Bias, Model, ToolNameResolver, Trade};

/// Everything the dashboard shows for one filter scope.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub scope: ScopeFilter,
    pub scoped_trades: usize,
    pub open_trades: usize,

    pub metrics: PerformanceMetrics,

    pub equity_curve: Vec<EquityPoint>,
    pub max_drawdown: f64,
    pub initial_balance: f64,
    pub balance_curve: Vec<BalancePoint>,
    pub balance_drawdown: Drawdown,

    pub by_session: Vec<CategoryStats<Session>>,
    pub by_volatility: Vec<CategoryStats<VolatilityBucket>>,
    pub by_bias: Vec<CategoryStats<Bias>>,
    pub by_hour: Vec<CategoryStats<HourOfDay>>,
    pub by_weekday: Vec<CategoryStats<Weekday>>,
    pub by_bracket_level: Vec<BracketLevelStats>,
    pub tool_impact: Vec<ToolImpact>,

    pub adherence: AdherenceComparison,
    pub monte_carlo: MonteCarloOutcome,
}

impl AnalyticsReport {
    /// `trades` is the full collection; the scope filter is applied here and
    /// the adherence comparison still sees every trade.
    pub fn build<R>(trades: &[Trade], models: &[Model], names: &R, cfg: &Config) -> Self
    where
        R: ToolNameResolver + ?Sized,
    {
        let scope = cfg.scope();
        let scoped = filter_trades(trades, &scope);
        let index = index_models(models);
        debug!(
            total = trades.len(),
            scoped = scoped.len(),
            models = models.len(),
            "building analytics report"
        );

        let equity_curve = compute_equity_curve(&scoped);
        let max_drawdown = compute_max_drawdown(&equity_curve);
        let balance_curve = compute_balance_curve(&scoped, cfg.initial_balance);
        let balance_drawdown = balance_drawdown(&balance_curve, cfg.initial_balance);

        AnalyticsReport {
            scoped_trades: scoped.len(),
            open_trades: scoped.iter().filter(|t| !t.is_completed).count(),
            metrics: compute_metrics(&scoped),
            equity_curve,
            max_drawdown,
            initial_balance: cfg.initial_balance,
            balance_curve,
            balance_drawdown,
            by_session: group_by_session(&scoped),
            by_volatility: group_by_volatility(&scoped),
            by_bias: group_by_bias(&scoped, &index),
            by_hour: group_by_hour(&scoped),
            by_weekday: group_by_weekday(&scoped),
            by_bracket_level: group_by_bracket_level(&scoped),
            tool_impact: compute_tool_impact(&scoped, &index, names, cfg.min_sample_per_bucket),
            adherence: compute_adherence_comparison(trades, cfg.adherence_threshold),
            monte_carlo: run_monte_carlo_simulation(
                &scoped,
                cfg.monte_carlo_runs,
                cfg.monte_carlo_trades_per_run,
            ),
            scope,
        }
    }

    pub fn final_balance(&self) -> f64 {
        self.balance_curve
            .last()
            .map_or(self.initial_balance, |p| p.balance)
    }

    pub fn render_summary(&self) -> String {
        let mut out = Vec::new();
        let rule = "─".repeat(35);
        let m = &self.metrics;

        out.push(format!("\n{}", "=".repeat(70)));
        out.push("  TRADE JOURNAL ANALYTICS".to_string());
        out.push("=".repeat(70));
        out.push(format!("  Scope:       {}", describe_scope(&self.scope)));
        out.push(format!(
            "  Trades:      {} in scope ({} open)",
            self.scoped_trades, self.open_trades
        ));
        out.push(String::new());

        out.push("  PERFORMANCE".to_string());
        out.push(format!("  {}", rule));
        out.push(format!("  Closed:      {}", m.total_trades));
        out.push(format!("  Win/Loss:    {} / {}", m.total_wins, m.total_losses));
        out.push(format!("  Win Rate:    {:.1}%", m.win_rate));
        out.push(format!("  Total P/L:   ${:+.2}", m.total_pl));
        out.push(format!("  Avg P/L:     ${:+.2}", m.avg_pl));
        out.push(format!("  Avg R:       {:+.2}R", m.avg_r));
        out.push(format!("  Avg Win:     ${:.2}", m.avg_win));
        out.push(format!("  Avg Loss:    ${:.2}", m.avg_loss));
        out.push(format!("  Best/Worst:  ${:+.2} / ${:+.2}", m.best_trade, m.worst_trade));
        out.push(format!("  Profit Factor: {}", format_ratio(m.profit_factor)));
        out.push(String::new());

        out.push("  EQUITY".to_string());
        out.push(format!("  {}", rule));
        out.push(format!("  Initial:     ${:.2}", self.initial_balance));
        out.push(format!("  Final:       ${:.2}", self.final_balance()));
        out.push(format!("  Max DD:      ${:.2}", self.max_drawdown));
        out.push(format!(
            "  Balance DD:  ${:.2} ({:.1}%)",
            self.balance_drawdown.max_drawdown, self.balance_drawdown.max_drawdown_pct
        ));

        push_groups(&mut out, "BY SESSION", &self.by_session);
        push_groups(&mut out, "BY VOLATILITY", &self.by_volatility);
        push_groups(&mut out, "BY HTF BIAS", &self.by_bias);
        push_groups(&mut out, "BY WEEKDAY", &self.by_weekday);

        let active_hours: Vec<&CategoryStats<HourOfDay>> = self
            .by_hour
            .iter()
            .filter(|h| h.metrics.total_trades > 0)
            .collect();
        if !active_hours.is_empty() {
            out.push(String::new());
            out.push("  BY HOUR (active)".to_string());
            out.push(format!("  {}", rule));
            for h in active_hours {
                out.push(group_line(h));
            }
        }

        if !self.by_bracket_level.is_empty() {
            out.push(String::new());
            out.push("  BY BRACKET LEVEL".to_string());
            out.push(format!("  {}", rule));
            for l in &self.by_bracket_level {
                out.push(format!(
                    "  {:>12}: {} fills | TP {:.0}% | SL {:.0}% | Avg {:+.2}R",
                    l.label,
                    l.sample_size,
                    l.tp_hit_rate * 100.0,
                    l.sl_hit_rate * 100.0,
                    l.avg_realized_r
                ));
            }
        }

        if !self.tool_impact.is_empty() {
            out.push(String::new());
            out.push("  TOOL IMPACT".to_string());
            out.push(format!("  {}", rule));
            for t in &self.tool_impact {
                let flag = if t.sample_sufficient { "" } else { " (low sample)" };
                out.push(format!(
                    "  {:>20} [{}]: {} trades | WR {:.0}% | Avg ${:+.2}{}",
                    t.display_name, t.zone, t.sample_size, t.win_rate, t.avg_pl, flag
                ));
            }
        }

        let a = &self.adherence;
        out.push(String::new());
        out.push(format!("  ADHERENCE >= {:.0}%", a.threshold * 100.0));
        out.push(format!("  {}", rule));
        out.push(format!(
            "  Adherent:    {} trades | WR {:.1}% | P/L ${:+.2}",
            a.filtered_trades, a.filtered_win_rate, a.filtered_pl
        ));
        out.push(format!(
            "  All:         {} trades | WR {:.1}% | P/L ${:+.2}",
            a.all_trades, a.all_win_rate, a.all_pl
        ));
        out.push(format!(
            "  Delta:       WR {:+.1} pts | P/L ${:+.2}",
            a.win_rate_delta, a.pl_delta
        ));

        out.push(String::new());
        out.push("  MONTE CARLO (R)".to_string());
        out.push(format!("  {}", rule));
        match &self.monte_carlo {
            MonteCarloOutcome::InsufficientData { completed_trades } => out.push(format!(
                "  Not enough closed trades ({}) to simulate",
                completed_trades
            )),
            MonteCarloOutcome::Simulated(s) => {
                out.push(format!(
                    "  {} runs x {} trades",
                    s.runs, s.trades_per_run
                ));
                out.push(format!(
                    "  Final R:     min {:+.2} | avg {:+.2} | max {:+.2}",
                    s.min_equity, s.avg_equity, s.max_equity
                ));
            }
        }

        out.push("=".repeat(70));
        out.join("\n")
    }

    pub fn print_summary(&self) {
        println!("{}", self.render_summary());
    }
}

fn describe_scope(scope: &ScopeFilter) -> String {
    if scope.is_unrestricted() {
        return "all trades".to_string();
    }
    let mut parts = Vec::new();
    if let Some(id) = &scope.model_id {
        parts.push(format!("model={}", id));
    }
    if let Some(s) = scope.session {
        parts.push(format!("session={}", s));
    }
    if let Some(t) = scope.adherence_threshold {
        parts.push(format!("adherence>={:.2}", t));
    }
    parts.join(", ")
}

fn format_ratio(x: f64) -> String {
    if x.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.2}", x)
    }
}

fn group_line<K>(g: &CategoryStats<K>) -> String {
    format!(
        "  {:>12}: {} trades | WR {:.0}% | PnL ${:+.2} | Avg {:+.2}R",
        g.label, g.metrics.total_trades, g.metrics.win_rate, g.metrics.total_pl, g.metrics.avg_r
    )
}

fn push_groups<K>(out: &mut Vec<String>, title: &str, groups: &[CategoryStats<K>]) {
    if groups.is_empty() {
        return;
    }
    out.push(String::new());
    out.push(format!("  {}", title));
    out.push(format!("  {}", "─".repeat(35)));
    for g in groups {
        out.push(group_line(g));
    }
}
