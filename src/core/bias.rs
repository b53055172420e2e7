use crate::models::{Bias, Model, ModelIndex, ToolConfig, Trade};

/// Property keys treated as carrying a directional value.
const DIRECTION_KEYS: &[&str] = &["direction", "bias", "htf_bias", "trend", "side"];

/// Bias of a single narrative tool: a direction-like property first, then
/// the type identifier itself.
pub fn tool_bias(tool: &ToolConfig) -> Option<Bias> {
    let props = tool.properties();
    let mut candidates: Vec<(&str, &str)> = props
        .iter()
        .filter(|(key, _)| is_direction_key(key))
        .collect();
    // map order is arbitrary
    candidates.sort_unstable_by_key(|(key, _)| *key);

    let from_props = candidates
        .into_iter()
        .find_map(|(_, value)| Bias::from_text(value));

    from_props.or_else(|| Bias::from_text(&tool.tool_type))
}

/// First narrative tool with a readable bias wins.
pub fn model_bias(model: &Model) -> Bias {
    model
        .narrative
        .iter()
        .find_map(tool_bias)
        .unwrap_or(Bias::Unknown)
}

/// Unresolved or missing model references classify as `Unknown`.
pub fn classify_bias(trade: &Trade, models: &ModelIndex<'_>) -> Bias {
    trade
        .model_id
        .as_deref()
        .and_then(|id| models.get(id))
        .map(|m| model_bias(m))
        .unwrap_or(Bias::Unknown)
}

fn is_direction_key(key: &str) -> bool {
    let key = key.to_lowercase();
    DIRECTION_KEYS.iter().any(|k| key == *k || key.ends_with(&format!("_{}", k)))
}
