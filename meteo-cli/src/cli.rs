use std::path::Path;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use meteo_core::{Config, DateWindow, MeteostatClient, latest_for_station};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::output;

/// Dotfile checked for the API key, relative to the working directory.
const DOTENV_FILE: &str = ".env";

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "meteo",
    version,
    about = "Print the latest Meteostat observation for a weather station"
)]
pub struct Cli {
    /// Name of weather station to search for and retrieve weather from.
    #[arg(long, default_value = "Indianapolis")]
    pub station: String,
}

impl Cli {
    /// Logs go to stderr at `warn` unless `RUST_LOG` says otherwise.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;
        let api_key = config.resolve_api_key(Path::new(DOTENV_FILE))?;

        let client = MeteostatClient::new(api_key, &config.http)
            .context("Failed to set up Meteostat client")?;

        let today = Local::now().date_naive();
        debug!(%today, "current date");

        let report = latest_for_station(&client, &self.station, DateWindow::single_day(today))
            .await
            .with_context(|| format!("Failed to get weather for '{}'", self.station))?;

        print!("{}", output::render(&report));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_defaults_to_indianapolis() {
        let cli = Cli::try_parse_from(["meteo"]).expect("no args is valid");
        assert_eq!(cli.station, "Indianapolis");
    }

    #[test]
    fn station_flag_takes_free_text() {
        let cli = Cli::try_parse_from(["meteo", "--station", "New York City"])
            .expect("valid args");
        assert_eq!(cli.station, "New York City");
    }

    #[test]
    fn station_is_the_only_flag() {
        assert!(Cli::try_parse_from(["meteo", "-v"]).is_err());
        assert!(Cli::try_parse_from(["meteo", "--verbose"]).is_err());
    }

    #[test]
    fn positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["meteo", "show"]).is_err());
    }
}
