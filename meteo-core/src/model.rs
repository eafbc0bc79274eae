use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{DefaultOnNull, serde_as};

/// One hourly record from the Meteostat `stations/hourly` endpoint.
///
/// Every field is nullable upstream. Absent and `null` values both decode as
/// zero (or an empty string for `time`), so a zero here does not mean "measured
/// zero" with any certainty.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Observation {
    /// Date and hour of the record, e.g. `2021-03-14 09:00:00`.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub time: String,

    /// Air temperature in degrees Celsius.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "temp")]
    pub temperature_c: i32,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "dwpt")]
    pub dew_point_c: f64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "rhum")]
    pub humidity_pct: i32,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "prcp")]
    pub precipitation: i32,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub snow: i32,

    /// Wind direction in degrees.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "wdir")]
    pub wind_direction: i32,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "wspd")]
    pub wind_speed: f64,

    /// Peak wind gust.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "wpgt")]
    pub wind_gust: i32,

    /// Sea-level air pressure.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "pres")]
    pub pressure: f64,

    /// Sunshine duration.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "tsun")]
    pub sunshine: i32,

    /// Weather condition code.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default, rename = "coco")]
    pub condition_code: i32,
}

impl Observation {
    pub fn temperature_f(&self) -> f64 {
        celsius_to_fahrenheit(self.temperature_c)
    }
}

/// `°F = °C × 9/5 + 32`, computed in floating point.
pub fn celsius_to_fahrenheit(celsius: i32) -> f64 {
    f64::from(celsius) * 9.0 / 5.0 + 32.0
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationName {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub en: String,
}

/// A weather station as returned by `stations/search`.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Station {
    pub id: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub name: StationName,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub country: String,

    pub region: Option<String>,
    pub national: Option<String>,
    pub wmo: Option<String>,
    pub icao: Option<String>,
    pub iata: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub latitude: f64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub longitude: f64,

    /// Elevation in meters.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub elevation: i32,

    pub timezone: Option<String>,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub active: bool,
}

impl Station {
    pub fn display_name(&self) -> &str {
        &self.name.en
    }
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlyMeta {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub source: String,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub exec_time: f64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub generated: String,
}

/// Envelope of the `stations/hourly` endpoint.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HourlyResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub meta: HourlyMeta,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub data: Vec<Observation>,
}

#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchMeta {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub exec_time: f64,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub generated: String,
}

/// Envelope of the `stations/search` endpoint.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StationSearchResponse {
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub meta: SearchMeta,

    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub data: Vec<Station>,
}

/// Inclusive range of calendar days sent as `start`/`end` to the hourly endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A window covering just `day`.
    pub fn single_day(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    pub fn start_param(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}
