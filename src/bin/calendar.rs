use anyhow::{bail, Result};
use chrono::{Datelike, Utc};
use tracing::info;

use journal_analytics::analytics::{aggregate_trades_by_day, get_month_calendar_grid};
use journal_analytics::config::Config;
use journal_analytics::loader;

/// Prints a month of daily P/L. Usage: `calendar [YEAR MONTH]`.
fn main() -> Result<()> {
    let cfg = Config::from_env();
    journal_analytics::init_tracing(&cfg.log_level);

    let args: Vec<String> = std::env::args().collect();
    let now = Utc::now();
    let year: i32 = args
        .get(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(now.year());
    let month: u32 = args
        .get(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(now.month());

    // the calendar ignores the analytics scope and shows all activity
    let trades = loader::load_trades(&cfg.trades_file)?;
    let days = aggregate_trades_by_day(&trades);
    let grid = get_month_calendar_grid(year, month, &days);
    if grid.is_empty() {
        bail!("invalid month {}-{}", year, month);
    }
    info!("{} trading days on record", days.len());

    println!("\n  {}-{:02}", year, month);
    println!("  {}", "─".repeat(77));
    println!(
        "  {}",
        ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
            .iter()
            .map(|d| format!("{:<11}", d))
            .collect::<String>()
    );

    let mut month_pl = 0.0;
    let mut month_r = 0.0;
    for week in grid.chunks(7) {
        let dates: String = week
            .iter()
            .map(|d| {
                if d.is_current_month {
                    format!("{:<11}", d.day)
                } else {
                    format!("{:<11}", ".")
                }
            })
            .collect();
        let pnl: String = week
            .iter()
            .map(|d| match &d.aggregates {
                Some(a) => {
                    month_pl += a.total_pl_dollar;
                    month_r += a.net_r;
                    format!("{:<11}", format!("${:+.0}", a.total_pl_dollar))
                }
                None => format!("{:<11}", ""),
            })
            .collect();
        println!("  {}", dates);
        println!("  {}", pnl);
    }

    println!("  {}", "─".repeat(77));
    println!("  Month P/L: ${:+.2} | Net R: {:+.2}", month_pl, month_r);
    Ok(())
}
