use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "long",
            Direction::Short => "short",
        }
    }

    /// +1 for long, -1 for short. Multiplies a raw price move into P/L.
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// Higher-timeframe directional bias read from a model's narrative tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Bias {
    Bullish,
    Bearish,
    Unknown,
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bias::Bullish => write!(f, "Bullish"),
            Bias::Bearish => write!(f, "Bearish"),
            Bias::Unknown => write!(f, "Unknown"),
        }
    }
}

impl Bias {
    pub const ALL: [Bias; 3] = [Bias::Bullish, Bias::Bearish, Bias::Unknown];

    /// Loose text match: "bull"/"long" => Bullish, "bear"/"short" => Bearish.
    pub fn from_text(s: &str) -> Option<Bias> {
        let s = s.to_lowercase();
        if s.contains("bull") || s.contains("long") {
            Some(Bias::Bullish)
        } else if s.contains("bear") || s.contains("short") {
            Some(Bias::Bearish)
        } else {
            None
        }
    }
}
