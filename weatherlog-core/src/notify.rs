use std::{
    fmt::Debug,
    fs::OpenOptions,
    io::{self, Write},
    path::{Path, PathBuf},
    process::Command,
};

use crate::model::NotificationEvent;

/// Pluggable delivery mechanism for desktop notifications.
///
/// Delivery is fire-and-forget: implementations report failures themselves
/// (if at all) and never surface them to the caller.
pub trait NotificationSink: Send + Sync + Debug {
    fn notify(&self, title: &str, body: &str);
}

/// Delivers notifications through the `notify-send` desktop mechanism.
#[derive(Debug, Default, Clone)]
pub struct DesktopNotifier;

impl NotificationSink for DesktopNotifier {
    fn notify(&self, title: &str, body: &str) {
        if let Err(err) = Command::new("notify-send").arg(title).arg(body).status() {
            tracing::warn!("Could not invoke notify-send: {err}");
        }
    }
}

/// Raises a notification and records it when a reading crosses the threshold.
#[derive(Debug)]
pub struct Notifier {
    sink: Box<dyn NotificationSink>,
    log_path: PathBuf,
    threshold_c: f64,
}

impl Notifier {
    pub fn new(sink: Box<dyn NotificationSink>, log_path: PathBuf, threshold_c: f64) -> Self {
        Self { sink, log_path, threshold_c }
    }

    /// Strict `>` check: a reading exactly at the threshold does not fire.
    ///
    /// When it fires, sends one desktop notification and appends one line to
    /// the notifications log. A failure to append is reported but not
    /// returned; it must not stop the rest of the run. Returns whether the
    /// event fired.
    pub fn notify_if_high(&self, temperature_c: f64, timestamp: &str, location: &str) -> bool {
        if temperature_c <= self.threshold_c {
            return false;
        }

        let event = NotificationEvent {
            temperature_c,
            timestamp: timestamp.to_string(),
            location: location.to_string(),
        };

        self.sink
            .notify("High Temperature Warning", &format!("Its {temperature_c:.2}°C in {location}"));

        if let Err(err) = append_event(&self.log_path, &event) {
            tracing::error!("Could not open notifications log file: {err}");
        }

        true
    }
}

fn append_event(path: &Path, event: &NotificationEvent) -> io::Result<()> {
    let mut log = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(log, "{event}")?;
    Ok(())
}
