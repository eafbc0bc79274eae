//! Core library for the `meteo` CLI.
//!
//! This crate defines:
//! - Configuration & credential lookup
//! - The Meteostat client behind the `WeatherSource` trait
//! - Decoded station/observation models
//! - Placeholder filtering and latest-observation selection
//!
//! It is used by `meteo-cli`, but the filter and orchestration work against any
//! `WeatherSource`, so they can be driven without network access.

pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod provider;
pub mod report;

pub use config::{API_KEY_VAR, Config};
pub use error::MeteostatError;
pub use filter::{filter_observations, has_sensor_data, latest_observation};
pub use model::{DateWindow, Observation, Station, celsius_to_fahrenheit};
pub use provider::{
    WeatherSource,
    meteostat::{ClientConfig, MeteostatClient},
    resolve_station,
};
pub use report::{LatestReport, latest_for_station};
