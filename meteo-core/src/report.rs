use tracing::info;

use crate::{
    error::MeteostatError,
    filter::{filter_observations, latest_observation},
    model::{DateWindow, Observation},
    provider::{WeatherSource, resolve_station},
};

/// What the CLI prints: the resolved station and its latest usable record.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestReport {
    pub station_id: String,
    pub station_name: String,
    pub observation: Observation,
}

/// Resolve `query`, fetch `window` for the first matching station and pick the
/// latest observation that carries sensor data.
///
/// Calls are strictly sequential: the hourly fetch needs the station id.
pub async fn latest_for_station(
    source: &dyn WeatherSource,
    query: &str,
    window: DateWindow,
) -> Result<LatestReport, MeteostatError> {
    let station = resolve_station(source, query).await?;

    let observations = source.hourly(&station.id, window).await?;
    let filtered = filter_observations(observations);
    let latest = latest_observation(&filtered)?;

    info!(time = %latest.time, "selected latest observation");

    Ok(LatestReport {
        observation: latest.clone(),
        station_name: station.name.en,
        station_id: station.id,
    })
}
