//! JSON snapshot loading for the binaries. The analytics modules never touch
//! the filesystem; they take whatever these functions hand back.

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::JournalError;
use crate::models::{Model, Trade};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, JournalError> {
    let content = fs::read_to_string(path).map_err(|source| JournalError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| JournalError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_trades(path: impl AsRef<Path>) -> Result<Vec<Trade>, JournalError> {
    let path = path.as_ref();
    let trades: Vec<Trade> = read_json(path)?;
    let open = trades.iter().filter(|t| !t.is_completed).count();
    info!(
        "Loaded {} trades ({} open) from {}",
        trades.len(),
        open,
        path.display()
    );
    Ok(trades)
}

pub fn load_models(path: impl AsRef<Path>) -> Result<Vec<Model>, JournalError> {
    let path = path.as_ref();
    let models: Vec<Model> = read_json(path)?;
    info!("Loaded {} models from {}", models.len(), path.display());
    Ok(models)
}

/// `type_id -> display name` map. A missing file is an empty map.
pub fn load_tool_names(path: impl AsRef<Path>) -> Result<HashMap<String, String>, JournalError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("No tool name file at {}", path.display());
        return Ok(HashMap::new());
    }
    read_json(path)
}
