//! Placeholder filtering and latest-record selection.
//!
//! Meteostat pads the hourly window with every slot of the requested days,
//! including hours that have not happened yet. Those slots come back with
//! their sensor fields zeroed. There is no explicit marker, so a record counts
//! as real only when temperature, wind direction and wind speed are all
//! non-zero.
//!
//! This is a heuristic. A genuine reading of exactly 0 °C, a due-north wind
//! reported as 0°, or dead calm is indistinguishable from a placeholder and
//! gets dropped along with it.

use tracing::debug;

use crate::{error::MeteostatError, model::Observation};

/// Whether `obs` looks like a measured record rather than a future placeholder.
pub fn has_sensor_data(obs: &Observation) -> bool {
    obs.temperature_c != 0 && obs.wind_direction != 0 && obs.wind_speed != 0.0
}

/// Keep only records with sensor data, preserving order.
///
/// If nothing survives (e.g. a calm day with true zero wind) the input is
/// returned unchanged so callers still have something to show.
pub fn filter_observations(observations: Vec<Observation>) -> Vec<Observation> {
    if !observations.iter().any(has_sensor_data) {
        debug!(total = observations.len(), "no record has sensor data, keeping all");
        return observations;
    }

    let total = observations.len();
    let kept: Vec<Observation> = observations.into_iter().filter(has_sensor_data).collect();
    debug!(total, kept = kept.len(), "dropped placeholder records");
    kept
}

/// The most recent record: the last one in upstream (ascending time) order.
pub fn latest_observation(observations: &[Observation]) -> Result<&Observation, MeteostatError> {
    observations.last().ok_or(MeteostatError::NoData)
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    /// Small ranges so zeros in each of the three checked fields come up often.
    fn observation() -> impl Strategy<Value = Observation> {
        (
            0u8..24,
            -3i32..=3,
            0i32..=2,
            prop_oneof![Just(0.0_f64), 0.5_f64..20.0],
            0i32..5,
        )
            .prop_map(|(hour, temp, wdir, wspd, prcp)| Observation {
                time: format!("2021-03-14 {hour:02}:00:00"),
                temperature_c: temp,
                wind_direction: wdir * 90,
                wind_speed: wspd,
                precipitation: prcp,
                ..Default::default()
            })
    }

    /// Records with at least one of the three checked fields forced to zero.
    fn placeholder_like() -> impl Strategy<Value = Observation> {
        (observation(), 0usize..3).prop_map(|(mut obs, field)| {
            match field {
                0 => obs.temperature_c = 0,
                1 => obs.wind_direction = 0,
                _ => obs.wind_speed = 0.0,
            }
            obs
        })
    }

    proptest! {
        #[test]
        fn keeps_exactly_the_sensor_records_in_order(
            set in prop::collection::vec(observation(), 0..24)
        ) {
            prop_assume!(set.iter().any(has_sensor_data));

            let expected: Vec<Observation> =
                set.iter().filter(|o| has_sensor_data(o)).cloned().collect();
            prop_assert_eq!(filter_observations(set), expected);
        }

        #[test]
        fn returns_input_unchanged_without_sensor_records(
            set in prop::collection::vec(placeholder_like(), 0..24)
        ) {
            prop_assert_eq!(filter_observations(set.clone()), set);
        }

        #[test]
        fn latest_is_last_filtered_record_or_no_data(
            set in prop::collection::vec(observation(), 0..24)
        ) {
            let was_empty = set.is_empty();
            let filtered = filter_observations(set);

            match latest_observation(&filtered) {
                Ok(latest) => {
                    prop_assert!(!was_empty);
                    prop_assert_eq!(Some(latest), filtered.last());
                }
                Err(err) => {
                    prop_assert!(was_empty);
                    prop_assert!(matches!(err, MeteostatError::NoData));
                }
            }
        }
    }
}
