use meteo_core::LatestReport;

/// Console lines for a report, newline-terminated.
pub fn render(report: &LatestReport) -> String {
    let obs = &report.observation;
    format!(
        "Station: {}\n\
         Latest Time: {}\n\
         Latest Temp (C): {}\n\
         Latest Temp (F): {}\n\
         Latest Prcp: {}\n",
        report.station_name,
        obs.time,
        obs.temperature_c,
        obs.temperature_f(),
        obs.precipitation,
    )
}
