//! Snapshot files: two fixed-path files fully overwritten on every run,
//! representing the most recent fetch only.

use std::{fs, io, path::Path};

use crate::model::WeatherReading;

/// Overwrite the raw snapshot with the unmodified response body.
pub fn write_raw(path: &Path, body: &[u8]) -> io::Result<()> {
    fs::write(path, body)
}

/// Overwrite the processed snapshot with the formatted summary.
pub fn write_processed(path: &Path, reading: &WeatherReading) -> io::Result<()> {
    fs::write(path, format_summary(reading))
}

/// The fixed five-line rendering of a reading.
pub fn format_summary(reading: &WeatherReading) -> String {
    format!(
        "Location: {}\n\
         Temperature (C): {:.2}\n\
         Humidity: {}%\n\
         Condition: {}\n\
         Timestamp: {}\n",
        reading.location,
        reading.temperature_c,
        reading.humidity_pct,
        reading.condition,
        reading.timestamp,
    )
}
