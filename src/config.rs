use serde::{Deserialize, Serialize};

use crate::analytics::filter::{ScopeFilter, ALL_MODELS};
use crate::analytics::monte_carlo::{DEFAULT_RUNS, DEFAULT_TRADES_PER_RUN};
use crate::core::Session;
use crate::error::JournalError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Data snapshots
    pub trades_file: String,
    pub models_file: String,
    pub tool_names_file: Option<String>,

    // Dashboard
    pub initial_balance: f64,
    pub adherence_threshold: f64,
    pub min_sample_per_bucket: usize,

    // Simulation
    pub monte_carlo_runs: usize,
    pub monte_carlo_trades_per_run: usize,

    // Scope
    pub filter_model: String,
    pub filter_session: String,
    pub filter_adherence: Option<f64>,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            trades_file: "data/trades.json".to_string(),
            models_file: "data/models.json".to_string(),
            tool_names_file: None,
            initial_balance: 10_000.0,
            adherence_threshold: 0.8,
            min_sample_per_bucket: 10,
            monte_carlo_runs: DEFAULT_RUNS,
            monte_carlo_trades_per_run: DEFAULT_TRADES_PER_RUN,
            filter_model: ALL_MODELS.to_string(),
            filter_session: "All".to_string(),
            filter_adherence: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        let d = Config::default();

        Config {
            trades_file: env("TRADES_FILE").unwrap_or(d.trades_file),
            models_file: env("MODELS_FILE").unwrap_or(d.models_file),
            tool_names_file: env("TOOL_NAMES_FILE"),
            initial_balance: env("INITIAL_BALANCE")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.initial_balance),
            adherence_threshold: env("ADHERENCE_THRESHOLD")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.adherence_threshold),
            min_sample_per_bucket: env("MIN_SAMPLE_PER_BUCKET")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.min_sample_per_bucket),
            monte_carlo_runs: env("MONTE_CARLO_RUNS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.monte_carlo_runs),
            monte_carlo_trades_per_run: env("MONTE_CARLO_TRADES_PER_RUN")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.monte_carlo_trades_per_run),
            filter_model: env("FILTER_MODEL").unwrap_or(d.filter_model),
            filter_session: env("FILTER_SESSION").unwrap_or(d.filter_session),
            filter_adherence: env("FILTER_ADHERENCE").and_then(|v| v.parse().ok()),
            log_level: env("LOG_LEVEL").unwrap_or(d.log_level),
        }
    }

    /// Rejects values the analytics would silently misread.
    pub fn validate(&self) -> Result<(), JournalError> {
        Session::parse_filter(&self.filter_session)?;
        for (name, value) in [
            ("ADHERENCE_THRESHOLD", Some(self.adherence_threshold)),
            ("FILTER_ADHERENCE", self.filter_adherence),
        ] {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(JournalError::Config(format!(
                        "{} must be a fraction in [0, 1], got {}",
                        name, v
                    )));
                }
            }
        }
        if !self.initial_balance.is_finite() {
            return Err(JournalError::Config("INITIAL_BALANCE must be finite".to_string()));
        }
        Ok(())
    }

    /// Unknown session labels mean no session filter; `validate` reports them.
    pub fn scope(&self) -> ScopeFilter {
        ScopeFilter::new()
            .with_model(&self.filter_model)
            .with_session(Session::parse_filter(&self.filter_session).unwrap_or(None))
            .with_adherence(self.filter_adherence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scope_is_unrestricted() {
        let cfg = Config::default();
        assert!(cfg.scope().is_unrestricted());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn scope_from_labels() {
        let cfg = Config {
            filter_model: "m7".to_string(),
            filter_session: "london".to_string(),
            filter_adherence: Some(0.7),
            ..Config::default()
        };
        let scope = cfg.scope();
        assert_eq!(scope.model_id.as_deref(), Some("m7"));
        assert_eq!(scope.session, Some(Session::London));
        assert_eq!(scope.adherence_threshold, Some(0.7));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let bad_session = Config {
            filter_session: "Sydney".to_string(),
            ..Config::default()
        };
        assert!(matches!(bad_session.validate(), Err(JournalError::Session(_))));
        assert!(bad_session.scope().session.is_none());

        let bad_threshold = Config {
            adherence_threshold: 80.0,
            ..Config::default()
        };
        assert!(matches!(bad_threshold.validate(), Err(JournalError::Config(_))));
    }
}
