use serde::{Deserialize, Serialize};
use std::fmt;

/// One set of current conditions, extracted from a single fetch.
///
/// Immutable after extraction; never persisted as a structured object, only as
/// derived text (log lines, snapshot files).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location: String,
    pub temperature_c: f64,
    pub humidity_pct: i64,
    pub condition: String,
    /// Local observation time as reported by the API, `YYYY-MM-DD HH:MM`.
    pub timestamp: String,
}

impl WeatherReading {
    /// The `YYYY-MM-DD` prefix of the timestamp, used to group log records by day.
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}

/// One persisted `(timestamp, temperature)` pair in the temperature log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: String,
    pub temperature_c: f64,
}

impl LogRecord {
    /// Parse one log line.
    ///
    /// A valid line has exactly three whitespace-separated tokens: the date
    /// part, the time part (the timestamp was written with an embedded space)
    /// and the temperature. Anything else yields `None`; callers skip such
    /// lines rather than aborting a scan.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let (Some(date), Some(time), Some(temp), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return None;
        };

        let temperature_c: f64 = temp.parse().ok()?;

        Some(Self { timestamp: format!("{date} {time}"), temperature_c })
    }

    /// The `YYYY-MM-DD` prefix of the stored timestamp.
    pub fn date(&self) -> &str {
        self.timestamp.get(..10).unwrap_or(&self.timestamp)
    }
}

/// A high-temperature event appended to the notifications log.
///
/// Events have no identity beyond file order.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationEvent {
    pub temperature_c: f64,
    pub timestamp: String,
    pub location: String,
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "High temperature warning: {:.2}°C at {} in {}",
            self.temperature_c, self.timestamp, self.location
        )
    }
}
