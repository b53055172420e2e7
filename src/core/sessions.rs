use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// UTC trading session: Asia [00:00, 08:00), London [08:00, 16:00),
/// NY [16:00, 24:00).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Session {
    Asia,
    London,
    #[serde(rename = "NY")]
    Ny,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Session {
    pub const ALL: [Session; 3] = [Session::Asia, Session::London, Session::Ny];

    pub fn as_str(&self) -> &'static str {
        match self {
            Session::Asia => "Asia",
            Session::London => "London",
            Session::Ny => "NY",
        }
    }

    pub fn from_hour(hour: u32) -> Session {
        match hour {
            0..=7 => Session::Asia,
            8..=15 => Session::London,
            _ => Session::Ny,
        }
    }

    /// Session of a `created_at` timestamp in nanoseconds.
    pub fn classify(created_at: i64) -> Session {
        Session::from_hour(utc_hour(created_at))
    }

    /// Parses a filter label. `"All"` (any case) and empty mean no session
    /// filter and yield `Ok(None)`.
    pub fn parse_filter(label: &str) -> Result<Option<Session>, UnknownSession> {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        trimmed.parse().map(Some)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown session '{0}'")]
pub struct UnknownSession(pub String);

impl FromStr for Session {
    type Err = UnknownSession;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asia" | "asian" => Ok(Session::Asia),
            "london" => Ok(Session::London),
            "ny" | "new york" | "new_york" => Ok(Session::Ny),
            _ => Err(UnknownSession(s.to_string())),
        }
    }
}

fn to_utc(created_at: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_nanos(created_at)
}

/// UTC hour (0-23) of a nanosecond timestamp.
pub fn utc_hour(created_at: i64) -> u32 {
    to_utc(created_at).hour()
}

/// UTC weekday of a nanosecond timestamp.
pub fn utc_weekday(created_at: i64) -> Weekday {
    to_utc(created_at).weekday()
}

/// Sunday-first week order used by every weekday breakdown.
pub const WEEKDAYS_SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];
