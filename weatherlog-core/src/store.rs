//! The temperature log: an unbounded, append-only sequence of
//! `"<timestamp> <temp:.2>"` lines.
//!
//! The log file is the single source of truth for aggregation. Other
//! processes may read or append between runs, so averages are always
//! re-derived from disk rather than cached in memory.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::Path,
};

use crate::model::LogRecord;

/// Append one reading to the temperature log, creating the file if absent.
///
/// The line is `"<timestamp> <temp with exactly 2 decimal digits>"`; existing
/// content is never touched. The handle is scoped to this call, so it is
/// closed on every exit path.
pub fn append_reading(path: &Path, timestamp: &str, temperature_c: f64) -> io::Result<()> {
    let mut log = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(log, "{timestamp} {temperature_c:.2}")?;
    Ok(())
}

/// Arithmetic mean of all logged temperatures whose date prefix equals
/// `date` (`YYYY-MM-DD`, exact string match).
///
/// An unopenable log and a log with no matching rows both mean "no data".
/// Lines that do not parse as a [`LogRecord`] are skipped, never fatal.
pub fn average_for_date(path: &Path, date: &str) -> Option<f64> {
    let log = File::open(path).ok()?;

    let mut total = 0.0;
    let mut count: u32 = 0;

    for line in BufReader::new(log).lines() {
        let Ok(line) = line else { continue };
        let Some(record) = LogRecord::parse(&line) else { continue };

        if record.date() == date {
            total += record.temperature_c;
            count += 1;
        }
    }

    (count > 0).then(|| total / f64::from(count))
}
