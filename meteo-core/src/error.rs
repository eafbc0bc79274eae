use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to Meteostat or selecting an observation.
#[derive(Debug, Error)]
pub enum MeteostatError {
    #[error("Failed to initialise HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to Meteostat ({endpoint})")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Meteostat {endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse Meteostat {endpoint} JSON")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No station found matching '{0}'")]
    StationNotFound(String),

    #[error("No data available")]
    NoData,
}
