use chrono::{DateTime, Duration, Utc};
use journal_analytics::models::{
    BracketOrder, BracketOrderOutcome, Direction, Model, OutcomeLevel, ToolConfig, Trade,
};

/// Monday 2024-01-15 00:00 UTC plus `days` and `hour`, in nanoseconds.
pub fn at(days: i64, hour: i64) -> i64 {
    let base = DateTime::parse_from_rfc3339("2024-01-15T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    (base + Duration::days(days) + Duration::hours(hour))
        .timestamp_nanos_opt()
        .unwrap()
}

/// Completed long trade, entry 100 / stop 99 / targets 101 and 102, one
/// executed level sized so that the level records agree with `pl`.
pub fn trade(id: &str, model: &str, pl: f64, created_at: i64) -> Trade {
    let size = 10.0;
    let closure = 100.0 + pl / size;
    Trade {
        id: id.to_string(),
        asset: "ES".to_string(),
        direction: Direction::Long,
        model_id: Some(model.to_string()),
        created_at,
        is_completed: true,
        bracket_order: BracketOrder {
            entry_price: 100.0,
            stop_loss: 99.0,
            take_profits: vec![101.0, 102.0],
        },
        bracket_order_outcome: Some(BracketOrderOutcome {
            final_pl_usd: pl,
            rr: pl / size,
        }),
        bracket_order_outcomes: vec![OutcomeLevel {
            execution_price: 100.0,
            closure_price: closure,
            size,
        }],
        adherence_score: None,
    }
}

pub fn tool(tool_type: &str, properties: &str) -> ToolConfig {
    ToolConfig {
        tool_type: tool_type.to_string(),
        properties: properties.to_string(),
    }
}

pub fn models() -> Vec<Model> {
    vec![
        Model {
            id: "breaker".to_string(),
            name: "Breaker".to_string(),
            description: "HTF breaker continuation".to_string(),
            narrative: vec![tool("weekly_profile", r#"{"direction":"bullish"}"#)],
            framework: vec![tool("breaker_block", "{}")],
            execution: vec![tool("ltf_mss", "not json")],
        },
        Model {
            id: "reversal".to_string(),
            name: "Reversal".to_string(),
            description: String::new(),
            narrative: vec![tool("bearish_daily_bias", "{}")],
            framework: vec![tool("fvg", "{}")],
            execution: vec![tool("ltf_mss", "{}")],
        },
    ]
}

/// Two weeks of mixed activity across sessions and models, plus one open
/// position and one trade on an unknown model.
pub fn journal() -> Vec<Trade> {
    let mut trades = Vec::new();
    let plan = [
        ("breaker", 120.0, 0, 3),
        ("breaker", -60.0, 0, 10),
        ("reversal", 45.0, 1, 17),
        ("breaker", 80.0, 2, 9),
        ("reversal", -30.0, 3, 20),
        ("breaker", -60.0, 4, 4),
        ("reversal", 150.0, 7, 13),
        ("breaker", 0.0, 8, 11),
        ("ghost", 25.0, 9, 22),
    ];
    for (i, (model, pl, day, hour)) in plan.iter().enumerate() {
        let mut t = trade(&format!("t{}", i), model, *pl, at(*day, *hour));
        t.adherence_score = Some(if i % 2 == 0 { 0.9 } else { 0.6 });
        trades.push(t);
    }

    let mut open = trade("open", "breaker", 0.0, at(10, 9));
    open.is_completed = false;
    open.bracket_order_outcome = None;
    trades.push(open);
    trades
}
