//! Most frequent times of travel.

use std::cmp::Ordering;

use bikeshare_core::models::{Dataset, Month, Weekday};
use bikeshare_core::{BikeshareError, Result};
use serde::Serialize;

use crate::frequency::{FrequencyTable, Mode};

/// The modal month, weekday and start hour of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: Mode<Month>,
    /// Ties go to the alphabetically first day name.
    pub most_common_day: Mode<Weekday>,
    pub most_common_hour: Mode<u32>,
}

/// Weekday ordered by its lowercase name rather than calendar position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ByName(Weekday);

impl Ord for ByName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.name().cmp(other.0.name())
    }
}

impl PartialOrd for ByName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compute the three time-of-travel modes.
///
/// Fails with [`BikeshareError::EmptyDataset`] when there are no trips.
pub fn time_stats(dataset: &Dataset) -> Result<TimeStats> {
    let trips = dataset.records();

    let months: FrequencyTable<Month> = trips.iter().map(|t| t.month).collect();
    let days: FrequencyTable<ByName> = trips.iter().map(|t| ByName(t.day_of_week)).collect();
    let hours: FrequencyTable<u32> = trips.iter().map(|t| t.hour).collect();

    let (Some(month), Some(day), Some(hour)) = (months.mode(), days.mode(), hours.mode()) else {
        return Err(BikeshareError::EmptyDataset);
    };

    Ok(TimeStats {
        most_common_month: month,
        most_common_day: Mode {
            value: day.value.0,
            count: day.count,
        },
        most_common_hour: hour,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
