use crate::{
    config::MonitorConfig,
    extract,
    fetch::{Fetch, FetchError, HttpFetcher},
    model::WeatherReading,
    notify::{DesktopNotifier, NotificationSink, Notifier},
    snapshot, store,
};

/// What one completed cycle observed and did.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub reading: WeatherReading,
    /// Mean of all logged temperatures sharing the reading's date, including
    /// the reading itself (it is appended before the average is taken).
    pub average_c: Option<f64>,
    /// Whether the high-temperature notification fired.
    pub notified: bool,
}

/// Runs one monitoring cycle: fetch, extract, log, notify, average, snapshot.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    fetcher: Box<dyn Fetch>,
    notifier: Notifier,
}

impl Monitor {
    pub fn new(
        config: MonitorConfig,
        fetcher: Box<dyn Fetch>,
        sink: Box<dyn NotificationSink>,
    ) -> Self {
        let notifier =
            Notifier::new(sink, config.notifications_log_path.clone(), config.high_temp_threshold_c);

        Self { config, fetcher, notifier }
    }

    /// Production wiring: HTTP transport and the desktop notifier.
    pub fn from_config(config: MonitorConfig) -> Self {
        let fetcher = Box::new(HttpFetcher::new(config.api_key.clone()));
        Self::new(config, fetcher, Box::new(DesktopNotifier))
    }

    /// One full cycle.
    ///
    /// Only a transport failure is fatal. A body missing a required field
    /// aborts the rest of the cycle but yields `Ok(None)`: it is reported
    /// here and the process still exits successfully. Every file step after
    /// extraction is best-effort; a failure is reported and its siblings
    /// still run.
    pub async fn run(&self) -> Result<Option<RunReport>, FetchError> {
        let raw = self.fetcher.fetch_current(&self.config.location).await?;

        let reading = match extract::extract(&raw) {
            Ok(reading) => reading,
            Err(err) => {
                tracing::error!("Failed to parse weather data: {err}");
                return Ok(None);
            }
        };

        if let Err(err) =
            store::append_reading(&self.config.log_path, &reading.timestamp, reading.temperature_c)
        {
            tracing::error!("Could not append to temperature log: {err}");
        }

        let notified = self.notifier.notify_if_high(
            reading.temperature_c,
            &reading.timestamp,
            &reading.location,
        );

        let average_c = store::average_for_date(&self.config.log_path, reading.date());

        if let Err(err) = snapshot::write_raw(&self.config.raw_snapshot_path, &raw) {
            tracing::error!("Could not write raw snapshot: {err}");
        }
        if let Err(err) = snapshot::write_processed(&self.config.processed_snapshot_path, &reading)
        {
            tracing::error!("Could not write processed snapshot: {err}");
        }

        Ok(Some(RunReport { reading, average_c, notified }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::Fetch;
    use async_trait::async_trait;
    use std::{
        fs,
        path::PathBuf,
        sync::{Arc, Mutex},
    };

    const BODY: &str = r#"{"location":{"name":"Karachi","localtime":"2024-06-01 14:00"},"current":{"temp_c":35.5,"humidity":40,"condition":{"text":"Sunny"}}}"#;

    #[derive(Debug)]
    struct StubFetcher(&'static str);

    #[async_trait]
    impl Fetch for StubFetcher {
        async fn fetch_current(&self, _location: &str) -> Result<Vec<u8>, FetchError> {
            Ok(self.0.as_bytes().to_vec())
        }
    }

    #[derive(Debug, Default, Clone)]
    struct RecordingSink {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl NotificationSink for RecordingSink {
        fn notify(&self, title: &str, body: &str) {
            self.calls.lock().unwrap().push((title.to_string(), body.to_string()));
        }
    }

    struct Sandbox {
        config: MonitorConfig,
    }

    impl Sandbox {
        fn new(name: &str) -> Self {
            let dir =
                std::env::temp_dir().join(format!("weatherlog-run-{}-{name}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).expect("create sandbox dir");

            let config = MonitorConfig {
                api_key: "TESTKEY".into(),
                location: "Karachi".into(),
                log_path: dir.join("temperature_log.txt"),
                notifications_log_path: dir.join("notifications.log"),
                raw_snapshot_path: dir.join("raw_weather_data.json"),
                processed_snapshot_path: dir.join("processed_weather_data.txt"),
                ..MonitorConfig::default()
            };

            Self { config }
        }

        fn dir(&self) -> PathBuf {
            self.config.log_path.parent().unwrap().to_path_buf()
        }
    }

    impl Drop for Sandbox {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(self.dir());
        }
    }

    #[tokio::test]
    async fn full_cycle_logs_notifies_and_snapshots() {
        let sandbox = Sandbox::new("full-cycle");
        let sink = RecordingSink::default();
        let monitor = Monitor::new(
            sandbox.config.clone(),
            Box::new(StubFetcher(BODY)),
            Box::new(sink.clone()),
        );

        let report = monitor.run().await.expect("no transport error").expect("extraction ok");

        assert_eq!(report.reading.location, "Karachi");
        assert_eq!(report.reading.temperature_c, 35.5);
        assert_eq!(report.reading.humidity_pct, 40);
        assert_eq!(report.reading.condition, "Sunny");
        assert_eq!(report.reading.timestamp, "2024-06-01 14:00");
        assert_eq!(report.average_c, Some(35.5));
        assert!(report.notified);

        let log = fs::read_to_string(&sandbox.config.log_path).expect("log written");
        assert_eq!(log, "2024-06-01 14:00 35.50\n");

        let notifications =
            fs::read_to_string(&sandbox.config.notifications_log_path).expect("notif log written");
        assert_eq!(
            notifications,
            "High temperature warning: 35.50°C at 2024-06-01 14:00 in Karachi\n"
        );
        assert_eq!(sink.calls.lock().unwrap().len(), 1);

        let raw = fs::read(&sandbox.config.raw_snapshot_path).expect("raw snapshot");
        assert_eq!(raw, BODY.as_bytes());

        let processed =
            fs::read_to_string(&sandbox.config.processed_snapshot_path).expect("processed");
        assert_eq!(
            processed,
            "Location: Karachi\n\
             Temperature (C): 35.50\n\
             Humidity: 40%\n\
             Condition: Sunny\n\
             Timestamp: 2024-06-01 14:00\n"
        );
    }

    #[tokio::test]
    async fn average_covers_earlier_same_day_readings() {
        let sandbox = Sandbox::new("running-average");
        store::append_reading(&sandbox.config.log_path, "2024-06-01 09:00", 24.5)
            .expect("seed log");

        let monitor = Monitor::new(
            sandbox.config.clone(),
            Box::new(StubFetcher(BODY)),
            Box::new(RecordingSink::default()),
        );

        let report = monitor.run().await.unwrap().unwrap();
        assert_eq!(report.average_c, Some(30.0));
    }

    #[tokio::test]
    async fn cool_reading_does_not_notify() {
        let sandbox = Sandbox::new("cool-reading");
        let body: &'static str = r#"{"location":{"name":"Karachi","localtime":"2024-06-01 14:00"},"current":{"temp_c":22.0,"humidity":40,"condition":{"text":"Cloudy"}}}"#;

        let sink = RecordingSink::default();
        let monitor =
            Monitor::new(sandbox.config.clone(), Box::new(StubFetcher(body)), Box::new(sink.clone()));

        let report = monitor.run().await.unwrap().expect("extraction ok");

        assert!(!report.notified);
        assert!(sink.calls.lock().unwrap().is_empty());
        assert!(!sandbox.config.notifications_log_path.exists());
    }

    #[tokio::test]
    async fn missing_marker_body_skips_all_file_steps() {
        let sandbox = Sandbox::new("missing-marker");
        let body: &'static str = r#"{"location":{"name":"Karachi"},"current":{"temp_c":35.5,"humidity":40,"condition":{"text":"Sunny"}}}"#;

        let monitor = Monitor::new(
            sandbox.config.clone(),
            Box::new(StubFetcher(body)),
            Box::new(RecordingSink::default()),
        );

        let outcome = monitor.run().await.expect("parse failure is not fatal");

        assert!(outcome.is_none());
        assert!(!sandbox.config.log_path.exists());
        assert!(!sandbox.config.raw_snapshot_path.exists());
        assert!(!sandbox.config.processed_snapshot_path.exists());
    }
}
