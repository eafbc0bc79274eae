use async_trait::async_trait;
use std::fmt::Debug;
use tracing::info;

use crate::{
    error::MeteostatError,
    model::{DateWindow, Observation, Station},
};

pub mod meteostat;

/// The two upstream lookups the CLI needs.
///
/// Implemented by [`meteostat::MeteostatClient`]; tests plug in their own.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Stations matching a free-text query, best match first.
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, MeteostatError>;

    /// Hourly observations for `station_id`, ascending by time.
    async fn hourly(
        &self,
        station_id: &str,
        window: DateWindow,
    ) -> Result<Vec<Observation>, MeteostatError>;
}

/// Resolve a free-text station name to the first search result.
pub async fn resolve_station(
    source: &dyn WeatherSource,
    query: &str,
) -> Result<Station, MeteostatError> {
    let station = source
        .search_stations(query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| MeteostatError::StationNotFound(query.to_string()))?;

    info!(id = %station.id, name = %station.display_name(), "resolved station");
    Ok(station)
}
