//! Core library for the `weatherlog` CLI.
//!
//! This crate defines:
//! - Configuration handling (API key, location, threshold, file paths)
//! - Abstraction over the upstream weather API transport
//! - Field extraction from the raw response body
//! - The temperature log store and same-day averaging
//! - High-temperature notification and snapshot writing
//! - The orchestrator that runs one monitoring cycle
//!
//! It is used by `weatherlog-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod monitor;
pub mod notify;
pub mod snapshot;
pub mod store;

pub use config::MonitorConfig;
pub use extract::{ExtractError, extract};
pub use fetch::{Fetch, FetchError, HttpFetcher};
pub use model::{LogRecord, NotificationEvent, WeatherReading};
pub use monitor::{Monitor, RunReport};
pub use notify::{DesktopNotifier, NotificationSink, Notifier};
pub use store::{append_reading, average_for_date};
