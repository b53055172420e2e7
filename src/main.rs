use anyhow::{Context, Result};
use tracing::{info, warn};

use journal_analytics::analytics::AnalyticsReport;
use journal_analytics::config::Config;
use journal_analytics::loader;

fn main() -> Result<()> {
    let cfg = Config::from_env();
    journal_analytics::init_tracing(&cfg.log_level);
    cfg.validate().context("configuration")?;

    // Optional: `journal-analytics --json` dumps the full report instead of the summary
    let as_json = std::env::args().skip(1).any(|a| a == "--json");

    let trades = loader::load_trades(&cfg.trades_file)?;
    let models = loader::load_models(&cfg.models_file)?;
    let names = match &cfg.tool_names_file {
        Some(path) => loader::load_tool_names(path)?,
        None => Default::default(),
    };

    if trades.is_empty() {
        warn!("No trades in {}", cfg.trades_file);
    }

    let report = AnalyticsReport::build(&trades, &models, &names, &cfg);
    info!(
        "Report ready: {} closed trades, win rate {:.1}%",
        report.metrics.total_trades, report.metrics.win_rate
    );

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        report.print_summary();
    }

    Ok(())
}
