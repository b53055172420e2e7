use serde::{Deserialize, Serialize};

use crate::core::Session;
use crate::models::Trade;

/// Model id that disables model filtering.
pub const ALL_MODELS: &str = "all";

/// Narrows a trade collection before analysis. Every field left `None`
/// means "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeFilter {
    pub model_id: Option<String>,
    pub session: Option<Session>,
    pub adherence_threshold: Option<f64>,
}

impl ScopeFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `"all"` (any case) or an empty id clears the model restriction.
    pub fn with_model(mut self, model_id: &str) -> Self {
        let id = model_id.trim();
        self.model_id = if id.is_empty() || id.eq_ignore_ascii_case(ALL_MODELS) {
            None
        } else {
            Some(id.to_string())
        };
        self
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn with_adherence(mut self, threshold: Option<f64>) -> Self {
        self.adherence_threshold = threshold;
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.model_id.is_none() && self.session.is_none() && self.adherence_threshold.is_none()
    }

    pub fn matches(&self, trade: &Trade) -> bool {
        if let Some(id) = &self.model_id {
            if trade.model_id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if let Some(session) = self.session {
            if Session::classify(trade.created_at) != session {
                return false;
            }
        }
        if let Some(threshold) = self.adherence_threshold {
            match trade.adherence_score {
                Some(score) if score >= threshold => {}
                _ => return false,
            }
        }
        true
    }
}

/// Kept trades in input order.
pub fn filter_trades(trades: &[Trade], filter: &ScopeFilter) -> Vec<Trade> {
    trades.iter().filter(|t| filter.matches(t)).cloned().collect()
}
