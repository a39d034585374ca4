use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use weatherlog_core::{Monitor, MonitorConfig, RunReport, average_for_date};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherlog", version, about = "Weather logging CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key and the monitored location.
    Configure,

    /// Fetch current conditions once, log them and write snapshots.
    Run {
        /// Override the configured location for this run.
        #[arg(long)]
        location: Option<String>,
    },

    /// Print the average logged temperature for a date.
    Average {
        /// Date as YYYY-MM-DD; defaults to today.
        #[arg(long)]
        date: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run { location } => run_once(location).await,
            Command::Average { date } => average(date),
        }
    }
}

fn configure() -> Result<()> {
    let mut cfg = MonitorConfig::load()?;

    cfg.api_key = inquire::Text::new("WeatherAPI.com API key:")
        .with_initial_value(&cfg.api_key)
        .prompt()
        .context("Failed to read API key")?;

    cfg.location = inquire::Text::new("Location to monitor:")
        .with_initial_value(&cfg.location)
        .prompt()
        .context("Failed to read location")?;

    cfg.save()?;
    println!("Configuration saved to {}", MonitorConfig::config_file_path()?.display());

    Ok(())
}

async fn run_once(location: Option<String>) -> Result<()> {
    let mut cfg = MonitorConfig::load()?;
    if let Some(location) = location {
        cfg.location = location;
    }

    if !cfg.has_api_key() {
        bail!(
            "No API key configured.\n\
             Hint: run `weatherlog configure` and enter your WeatherAPI.com key."
        );
    }

    let monitor = Monitor::from_config(cfg);

    // A transport failure is the only fatal outcome; a body that fails
    // extraction was already reported and still exits 0.
    if let Some(report) = monitor.run().await? {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    let reading = &report.reading;

    if report.notified {
        println!(
            "⚠️ Warning: High temperature detected! {:.2}°C at {}",
            reading.temperature_c, reading.timestamp
        );
    }

    println!("Location: {}", reading.location);
    println!("Temperature Now: {:.2}°C", reading.temperature_c);
    println!("Humidity: {}%", reading.humidity_pct);
    println!("Condition: {}", reading.condition);
    match report.average_c {
        Some(avg) => println!("Average Temperature Today: {avg:.2}°C"),
        None => println!("Average Temperature Today: No data available"),
    }
}

fn average(date: Option<String>) -> Result<()> {
    let cfg = MonitorConfig::load()?;
    let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());

    match average_for_date(&cfg.log_path, &date) {
        Some(avg) => println!("Average temperature on {date}: {avg:.2}°C"),
        None => println!("Average temperature on {date}: No data available"),
    }

    Ok(())
}
