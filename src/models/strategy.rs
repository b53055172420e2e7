use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which of a model's three tool collections a tool lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolZone {
    Narrative,
    Framework,
    Execution,
}

impl fmt::Display for ToolZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolZone::Narrative => write!(f, "narrative"),
            ToolZone::Framework => write!(f, "framework"),
            ToolZone::Execution => write!(f, "execution"),
        }
    }
}

impl ToolZone {
    pub const ALL: [ToolZone; 3] = [ToolZone::Narrative, ToolZone::Framework, ToolZone::Execution];
}

/// Parsed tool configuration. Lookups never fail; malformed input is an
/// empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolProperties(HashMap<String, String>);

impl ToolProperties {
    /// Parses a JSON object. Non-string values are kept in their JSON text form.
    pub fn parse(raw: &str) -> Self {
        let value: serde_json::Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(_) => return Self::default(),
        };
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        let map = obj
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect();
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(rename = "type")]
    pub tool_type: String,
    /// String-encoded JSON map, parsed on demand.
    #[serde(default)]
    pub properties: String,
}

impl ToolConfig {
    pub fn properties(&self) -> ToolProperties {
        ToolProperties::parse(&self.properties)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub narrative: Vec<ToolConfig>,
    #[serde(default)]
    pub framework: Vec<ToolConfig>,
    #[serde(default)]
    pub execution: Vec<ToolConfig>,
}

impl Model {
    pub fn tools(&self, zone: ToolZone) -> &[ToolConfig] {
        match zone {
            ToolZone::Narrative => &self.narrative,
            ToolZone::Framework => &self.framework,
            ToolZone::Execution => &self.execution,
        }
    }

    /// Every tool with its zone, narrative first.
    pub fn zoned_tools(&self) -> impl Iterator<Item = (ToolZone, &ToolConfig)> {
        ToolZone::ALL
            .into_iter()
            .flat_map(move |zone| self.tools(zone).iter().map(move |tool| (zone, tool)))
    }
}

/// Borrowed id -> model lookup for resolving `Trade::model_id`.
pub type ModelIndex<'a> = HashMap<&'a str, &'a Model>;

pub fn index_models(models: &[Model]) -> ModelIndex<'_> {
    models.iter().map(|m| (m.id.as_str(), m)).collect()
}

/// Maps a tool type identifier to a human-facing name.
pub trait ToolNameResolver {
    fn resolve(&self, type_id: &str) -> Option<String>;

    fn display_name(&self, type_id: &str) -> String {
        self.resolve(type_id).unwrap_or_else(|| type_id.to_string())
    }
}

impl ToolNameResolver for HashMap<String, String> {
    fn resolve(&self, type_id: &str) -> Option<String> {
        self.get(type_id).cloned()
    }
}

/// Uses the type identifier itself as the display name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawToolNames;

impl ToolNameResolver for RawToolNames {
    fn resolve(&self, _type_id: &str) -> Option<String> {
        None
    }
}
