//! Total and average trip duration.

use bikeshare_core::models::Dataset;
use bikeshare_core::{BikeshareError, Result};
use serde::Serialize;

const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    /// Sum of all trip durations, in hours.
    pub total_hours: f64,
    /// Average trip duration, in hours.
    pub mean_hours: f64,
    pub trip_count: usize,
}

/// Sum of trip durations in hours; `0.0` for an empty dataset.
pub fn total_duration_hours(dataset: &Dataset) -> f64 {
    total_seconds(dataset) / SECONDS_PER_HOUR
}

/// Total and mean duration in hours.
///
/// The mean of zero trips is undefined, so an empty dataset fails with
/// [`BikeshareError::EmptyDataset`].
pub fn duration_stats(dataset: &Dataset) -> Result<DurationStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let total = total_seconds(dataset);
    let count = dataset.len();
    Ok(DurationStats {
        total_hours: total / SECONDS_PER_HOUR,
        mean_hours: total / count as f64 / SECONDS_PER_HOUR,
        trip_count: count,
    })
}

fn total_seconds(dataset: &Dataset) -> f64 {
    dataset
        .records()
        .iter()
        .map(|t| t.trip_duration_seconds)
        .sum()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{dataset, empty, trip};

    fn with_durations(seconds: &[f64]) -> Dataset {
        dataset(
            seconds
                .iter()
                .map(|&s| {
                    let mut t = trip("2017-04-04 12:00:00", "A", "B");
                    t.trip_duration_seconds = s;
                    t
                })
                .collect(),
        )
    }

    #[test]
    fn test_total_and_mean_in_hours() {
        let stats = duration_stats(&with_durations(&[3600.0, 7200.0])).unwrap();
        assert!((stats.total_hours - 2.0).abs() < 1e-12);
        assert!((stats.mean_hours - 1.5).abs() < 1e-12);
        assert_eq!(stats.trip_count, 2);
    }

    #[test]
    fn test_fractional_durations() {
        let stats = duration_stats(&with_durations(&[489.066, 1110.934])).unwrap();
        assert!((stats.total_hours - 1600.0 / 3600.0).abs() < 1e-9);
        assert!((stats.mean_hours - 800.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_of_empty_is_zero() {
        assert_eq!(total_duration_hours(&empty()), 0.0);
    }

    #[test]
    fn test_total_matches_stats() {
        let ds = with_durations(&[60.0, 120.0, 180.0]);
        assert_eq!(total_duration_hours(&ds), duration_stats(&ds).unwrap().total_hours);
    }

    #[test]
    fn test_mean_of_empty_is_error() {
        assert!(matches!(duration_stats(&empty()), Err(BikeshareError::EmptyDataset)));
    }
}
