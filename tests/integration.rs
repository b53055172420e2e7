mod common;

use std::collections::HashMap;
use std::path::PathBuf;

use common::{at, journal, models, trade};
use journal_analytics::analytics::{
    aggregate_trades_by_day, compute_equity_curve, get_month_calendar_grid,
    run_monte_carlo_with_rng, AnalyticsReport, MonteCarloOutcome,
};
use journal_analytics::config::Config;
use journal_analytics::core::Session;
use journal_analytics::loader;
use journal_analytics::models::{Bias, ToolZone};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn write_snapshot(name: &str, json: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("journal_it_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

fn config() -> Config {
    Config {
        monte_carlo_runs: 20,
        monte_carlo_trades_per_run: 30,
        ..Config::default()
    }
}

#[test]
fn report_from_snapshot_files() {
    let trades_path = write_snapshot(
        "trades.json",
        &serde_json::to_string(&journal()).unwrap(),
    );
    let models_path = write_snapshot("models.json", &serde_json::to_string(&models()).unwrap());
    let names_path = write_snapshot("names.json", r#"{"ltf_mss":"LTF Market Structure Shift"}"#);

    let trades = loader::load_trades(&trades_path).unwrap();
    let models = loader::load_models(&models_path).unwrap();
    let names = loader::load_tool_names(&names_path).unwrap();
    assert_eq!(trades.len(), 10);

    let report = AnalyticsReport::build(&trades, &models, &names, &config());

    assert_eq!(report.scoped_trades, 10);
    assert_eq!(report.open_trades, 1);
    let m = &report.metrics;
    assert_eq!(m.total_trades, 9);
    assert_eq!(m.total_wins, 5);
    assert!(approx(m.total_pl, 270.0));
    assert!(approx(m.win_rate, 5.0 / 9.0 * 100.0));
    assert!(approx(report.final_balance(), 10_270.0));

    // the equity curve only covers closed trades
    assert_eq!(report.equity_curve.len(), 9);
    assert!(approx(report.equity_curve.last().unwrap().equity, 270.0));

    let mss = report
        .tool_impact
        .iter()
        .find(|t| t.tool_type == "ltf_mss")
        .unwrap();
    assert_eq!(mss.zone, ToolZone::Execution);
    assert_eq!(mss.display_name, "LTF Market Structure Shift");
    assert_eq!(mss.sample_size, 8);
    assert!(approx(mss.total_pl, 245.0));
    assert!(!mss.sample_sufficient);

    assert!(!report.monte_carlo.is_insufficient());
    assert!(report.render_summary().contains("TRADE JOURNAL ANALYTICS"));
    assert!(serde_json::to_value(&report).is_ok());
}

#[test]
fn sessions_partition_the_closed_trades() {
    let trades = journal();
    let report = AnalyticsReport::build(&trades, &models(), &HashMap::new(), &config());

    assert_eq!(report.by_session.len(), Session::ALL.len());
    let counts: Vec<(Session, usize)> = report
        .by_session
        .iter()
        .map(|s| (s.category, s.metrics.total_trades))
        .collect();
    assert_eq!(
        counts,
        vec![(Session::Asia, 2), (Session::London, 4), (Session::Ny, 3)]
    );

    let summed: f64 = report.by_session.iter().map(|s| s.metrics.total_pl).sum();
    assert!(approx(summed, report.metrics.total_pl));

    let by_hour: usize = report.by_hour.iter().map(|h| h.metrics.total_trades).sum();
    let by_day: usize = report.by_weekday.iter().map(|d| d.metrics.total_trades).sum();
    let by_vol: usize = report.by_volatility.iter().map(|v| v.metrics.total_trades).sum();
    assert_eq!(by_hour, 9);
    assert_eq!(by_day, 9);
    assert_eq!(by_vol, 9);
}

#[test]
fn bias_follows_narrative_tools() {
    let trades = journal();
    let report = AnalyticsReport::build(&trades, &models(), &HashMap::new(), &config());

    let find = |bias: Bias| {
        report
            .by_bias
            .iter()
            .find(|b| b.category == bias)
            .map(|b| (b.metrics.total_trades, b.metrics.total_pl))
    };
    let (n, pl) = find(Bias::Bullish).unwrap();
    assert_eq!(n, 5);
    assert!(approx(pl, 80.0));
    let (n, pl) = find(Bias::Bearish).unwrap();
    assert_eq!(n, 3);
    assert!(approx(pl, 165.0));
    // the "ghost" model is not in the model list
    let (n, _) = find(Bias::Unknown).unwrap();
    assert_eq!(n, 1);
}

#[test]
fn scope_filter_narrows_everything_but_adherence() {
    let trades = journal();
    let cfg = Config {
        filter_model: "reversal".to_string(),
        filter_session: "NY".to_string(),
        ..config()
    };
    assert!(cfg.validate().is_ok());

    let report = AnalyticsReport::build(&trades, &models(), &HashMap::new(), &cfg);
    // reversal trades at 17:00 and 20:00
    assert_eq!(report.metrics.total_trades, 2);
    assert!(approx(report.metrics.total_pl, 15.0));
    assert!(report.monte_carlo.is_insufficient());

    assert_eq!(report.adherence.all_trades, 9);
    assert_eq!(report.adherence.filtered_trades, 5);
    assert!(approx(report.adherence.filtered_pl, 310.0));
    assert!(approx(report.adherence.pl_delta, 40.0));
}

#[test]
fn unknown_session_label_fails_validation() {
    let cfg = Config {
        filter_session: "Sydney".to_string(),
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn equity_curve_ignores_input_order() {
    let trades = journal();
    let mut reversed = trades.clone();
    reversed.reverse();

    let forward = compute_equity_curve(&trades);
    let backward = compute_equity_curve(&reversed);
    let values = |c: &[journal_analytics::analytics::EquityPoint]| {
        c.iter().map(|p| p.equity).collect::<Vec<f64>>()
    };
    assert_eq!(values(&forward[..]), values(&backward[..]));
    assert!(forward.windows(2).all(|w| w[0].date <= w[1].date));
}

#[test]
fn calendar_month_of_the_journal() {
    let trades = journal();
    let days = aggregate_trades_by_day(&trades);
    let grid = get_month_calendar_grid(2024, 1, &days);

    // January 2024 starts on a Monday
    assert_eq!(grid.len(), 35);
    assert!(!grid[0].is_current_month);
    assert_eq!(grid[1].date, "2024-01-01");

    let fifteenth = grid.iter().find(|d| d.date == "2024-01-15").unwrap();
    let agg = fifteenth.aggregates.as_ref().unwrap();
    assert_eq!(agg.trade_count, 2);
    assert!(approx(agg.total_pl_dollar, 60.0));
    assert!(fifteenth.is_clickable());

    // a quiet in-month day is still selectable, padding never is
    let quiet = grid.iter().find(|d| d.date == "2024-01-14").unwrap();
    assert!(quiet.aggregates.is_none());
    assert!(quiet.is_clickable());
    assert!(!grid[0].is_clickable());
    assert!(grid.iter().rev().take(3).all(|d| !d.is_current_month));
}

#[test]
fn seeded_monte_carlo_is_reproducible() {
    let trades: Vec<_> = [2.0, -1.0, 1.5, -1.0, 3.0, -1.0]
        .iter()
        .enumerate()
        .map(|(i, r)| trade(&format!("mc{}", i), "breaker", r * 10.0, at(i as i64, 10)))
        .collect();

    let run = |seed| run_monte_carlo_with_rng(&trades, 50, 40, &mut StdRng::seed_from_u64(seed));
    let first = run(7);
    let second = run(7);
    assert_eq!(first, second);

    let MonteCarloOutcome::Simulated(s) = first else {
        panic!("expected a simulation");
    };
    assert_eq!(s.min_path.len(), 41);
    assert!(s.min_equity <= s.avg_equity && s.avg_equity <= s.max_equity);
    assert!(approx(*s.min_path.last().unwrap(), s.min_equity));
    assert!(approx(*s.max_path.last().unwrap(), s.max_equity));
}
