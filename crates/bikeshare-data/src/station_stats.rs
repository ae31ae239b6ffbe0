//! Most popular stations and trip.

use bikeshare_core::models::Dataset;
use bikeshare_core::{BikeshareError, Result};
use serde::Serialize;

use crate::frequency::{FrequencyTable, Mode};

/// A start/end station combination.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start: Mode<String>,
    pub most_common_end: Mode<String>,
    /// Grouped over the (start, end) key; ties go to the smallest pair,
    /// comparing start first.
    pub most_common_trip: Mode<StationPair>,
}

/// Compute the popular start station, end station and route.
///
/// Fails with [`BikeshareError::EmptyDataset`] when there are no trips.
pub fn station_stats(dataset: &Dataset) -> Result<StationStats> {
    let trips = dataset.records();

    let starts: FrequencyTable<&str> = trips.iter().map(|t| t.start_station.as_str()).collect();
    let ends: FrequencyTable<&str> = trips.iter().map(|t| t.end_station.as_str()).collect();
    let routes: FrequencyTable<(&str, &str)> = trips
        .iter()
        .map(|t| (t.start_station.as_str(), t.end_station.as_str()))
        .collect();

    let (Some(start), Some(end), Some(route)) = (starts.mode(), ends.mode(), routes.mode()) else {
        return Err(BikeshareError::EmptyDataset);
    };

    Ok(StationStats {
        most_common_start: owned(start),
        most_common_end: owned(end),
        most_common_trip: Mode {
            value: StationPair {
                start: route.value.0.to_string(),
                end: route.value.1.to_string(),
            },
            count: route.count,
        },
    })
}

fn owned(mode: Mode<&str>) -> Mode<String> {
    Mode {
        value: mode.value.to_string(),
        count: mode.count,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
