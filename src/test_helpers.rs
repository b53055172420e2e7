use chrono::{DateTime, Duration, Utc};

use crate::models::{
    BracketOrder, BracketOrderOutcome, Direction, Model, OutcomeLevel, ToolConfig, Trade,
};

/// Monday 2024-01-15 00:00 UTC.
pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn nanos(dt: DateTime<Utc>) -> i64 {
    dt.timestamp_nanos_opt().unwrap()
}

/// Timestamp `days` after the base Monday at `hour`:00 UTC.
pub fn at(days: i64, hour: i64) -> i64 {
    nanos(base_time() + Duration::days(days) + Duration::hours(hour))
}

/// Completed long trade on EURUSD-style prices (entry 100, stop 99, tp 102)
/// with an authoritative summary outcome.
pub fn make_trade(id: &str, pl: f64, rr: f64, created_at: i64) -> Trade {
    Trade {
        id: id.to_string(),
        asset: "NQ".to_string(),
        direction: Direction::Long,
        model_id: None,
        created_at,
        is_completed: true,
        bracket_order: BracketOrder {
            entry_price: 100.0,
            stop_loss: 99.0,
            take_profits: vec![102.0],
        },
        bracket_order_outcome: Some(BracketOrderOutcome {
            final_pl_usd: pl,
            rr,
        }),
        bracket_order_outcomes: Vec::new(),
        adherence_score: None,
    }
}

/// Same as `make_trade` but still open.
pub fn open_trade(id: &str, created_at: i64) -> Trade {
    Trade {
        is_completed: false,
        bracket_order_outcome: None,
        ..make_trade(id, 0.0, 0.0, created_at)
    }
}

/// Completed trades with the given P/Ls, one per day, R = pl / 50.
pub fn make_trades(pnls: &[f64]) -> Vec<Trade> {
    pnls.iter()
        .enumerate()
        .map(|(i, &pl)| make_trade(&format!("t{}", i), pl, pl / 50.0, at(i as i64, 10)))
        .collect()
}

pub fn level(execution_price: f64, closure_price: f64, size: f64) -> OutcomeLevel {
    OutcomeLevel {
        execution_price,
        closure_price,
        size,
    }
}

pub fn tool(tool_type: &str, properties: &str) -> ToolConfig {
    ToolConfig {
        tool_type: tool_type.to_string(),
        properties: properties.to_string(),
    }
}

pub fn make_model(
    id: &str,
    narrative: Vec<ToolConfig>,
    framework: Vec<ToolConfig>,
    execution: Vec<ToolConfig>,
) -> Model {
    Model {
        id: id.to_string(),
        name: format!("Model {}", id),
        description: String::new(),
        narrative,
        framework,
        execution,
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
