use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, info};

use crate::{
    error::MeteostatError,
    model::{DateWindow, HourlyResponse, Observation, Station, StationSearchResponse},
};

use super::WeatherSource;

pub const DEFAULT_BASE_URL: &str = "https://api.meteostat.net/v2";

const API_KEY_HEADER: &str = "x-api-key";

const SEARCH_ENDPOINT: &str = "station search";
const HOURLY_ENDPOINT: &str = "hourly";

/// HTTP transport settings, read from the `[http]` table of the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Meteostat API base URL (default: <https://api.meteostat.net/v2>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// How long an idle pooled connection is kept (default: 30)
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_secs: u64,

    /// Idle connections kept per host (default: 10)
    #[serde(default = "default_pool_max_idle")]
    pub pool_max_idle_per_host: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout() -> u64 {
    30
}

const fn default_pool_idle_timeout() -> u64 {
    30
}

const fn default_pool_max_idle() -> usize {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            pool_idle_timeout_secs: default_pool_idle_timeout(),
            pool_max_idle_per_host: default_pool_max_idle(),
        }
    }
}

/// Meteostat JSON API client authenticated with a static API key.
#[derive(Debug, Clone)]
pub struct MeteostatClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl MeteostatClient {
    pub fn new(api_key: String, config: &ClientConfig) -> Result<Self, MeteostatError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .no_gzip()
            .build()
            .map_err(MeteostatError::Client)?;

        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Search URL for `query`. Spaces become a literal `%20`; nothing else is escaped.
    pub fn search_url(&self, query: &str) -> String {
        format!("{}/stations/search?query={}", self.base_url, query.replace(' ', "%20"))
    }

    fn hourly_url(&self) -> String {
        format!("{}/stations/hourly", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        request: RequestBuilder,
    ) -> Result<T, MeteostatError> {
        let res = request
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|source| MeteostatError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| MeteostatError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(MeteostatError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| MeteostatError::Decode { endpoint, source })
    }
}

#[async_trait]
impl WeatherSource for MeteostatClient {
    async fn search_stations(&self, query: &str) -> Result<Vec<Station>, MeteostatError> {
        let url = self.search_url(query);
        info!(%url, "searching stations");

        let parsed: StationSearchResponse =
            self.get_json(SEARCH_ENDPOINT, self.http.get(&url)).await?;

        debug!(
            results = parsed.data.len(),
            generated = %parsed.meta.generated,
            "station search finished"
        );
        Ok(parsed.data)
    }

    async fn hourly(
        &self,
        station_id: &str,
        window: DateWindow,
    ) -> Result<Vec<Observation>, MeteostatError> {
        let url = self.hourly_url();
        let (start, end) = (window.start_param(), window.end_param());
        info!(%url, station = station_id, %start, %end, "fetching hourly observations");

        let request = self.http.get(&url).query(&[
            ("station", station_id),
            ("start", start.as_str()),
            ("end", end.as_str()),
        ]);
        let parsed: HourlyResponse = self.get_json(HOURLY_ENDPOINT, request).await?;

        debug!(
            records = parsed.data.len(),
            source = %parsed.meta.source,
            exec_time = parsed.meta.exec_time,
            "hourly fetch finished"
        );
        Ok(parsed.data)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}
