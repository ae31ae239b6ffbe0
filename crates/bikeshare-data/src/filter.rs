//! Month / weekday narrowing of a loaded dataset.
//!
//! Filtering never reorders: the result is the stable subsequence of matching
//! trips. The source dataset is left untouched.

use bikeshare_core::models::{Dataset, FilterCriteria, Month, Selection, TripRecord, Weekday};
use tracing::debug;

/// Keep trips whose start month and start weekday both match.
///
/// `Selection::All` disables the corresponding predicate. An empty result is
/// a valid, empty dataset.
pub fn apply_filters(dataset: &Dataset, month: Selection<Month>, day: Selection<Weekday>) -> Dataset {
    let filtered = retain(dataset, |trip| {
        month.matches(&trip.month) && day.matches(&trip.day_of_week)
    });
    debug!(
        "Filter month={} day={} kept {} of {} trips",
        month,
        day,
        filtered.len(),
        dataset.len()
    );
    filtered
}

/// Apply the month and day parts of `criteria`.
pub fn apply_criteria(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    apply_filters(dataset, criteria.month, criteria.day)
}

pub fn filter_by_month(dataset: &Dataset, month: Selection<Month>) -> Dataset {
    retain(dataset, |trip| month.matches(&trip.month))
}

pub fn filter_by_day(dataset: &Dataset, day: Selection<Weekday>) -> Dataset {
    retain(dataset, |trip| day.matches(&trip.day_of_week))
}

fn retain(dataset: &Dataset, keep: impl Fn(&TripRecord) -> bool) -> Dataset {
    let records = dataset
        .records()
        .iter()
        .filter(|trip| keep(trip))
        .cloned()
        .collect();
    Dataset::new(dataset.city(), dataset.schema(), records)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{City, Schema};
    use chrono::NaiveDate;

    /// One trip per (month, day-of-month) pair, in the given order.
    fn dataset(days: &[(u32, u32)]) -> Dataset {
        let records = days
            .iter()
            .enumerate()
            .map(|(i, &(m, d))| {
                let start = NaiveDate::from_ymd_opt(2017, m, d)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap();
                TripRecord::new(start, start, 60.0, format!("S{i}"), "E").unwrap()
            })
            .collect();
        Dataset::new(City::Chicago, Schema::full(), records)
    }

    fn stations(ds: &Dataset) -> Vec<&str> {
        ds.records().iter().map(|t| t.start_station.as_str()).collect()
    }

    // 2017-01-02 Mon, 2017-01-06 Fri, 2017-02-03 Fri, 2017-03-06 Mon, 2017-06-02 Fri
    const DAYS: &[(u32, u32)] = &[(1, 2), (1, 6), (2, 3), (3, 6), (6, 2)];

    #[test]
    fn test_all_all_is_identity() {
        let ds = dataset(DAYS);
        let out = apply_filters(&ds, Selection::All, Selection::All);
        assert_eq!(out, ds);
    }

    #[test]
    fn test_filter_by_month_keeps_order() {
        let ds = dataset(DAYS);
        let out = filter_by_month(&ds, Selection::Only(Month::January));
        assert_eq!(stations(&out), vec!["S0", "S1"]);
    }

    #[test]
    fn test_filter_by_day_keeps_order() {
        let ds = dataset(DAYS);
        let out = filter_by_day(&ds, Selection::Only(Weekday::Friday));
        assert_eq!(stations(&out), vec!["S1", "S2", "S4"]);
    }

    #[test]
    fn test_combined_filter() {
        let ds = dataset(DAYS);
        let out = apply_filters(&ds, Selection::Only(Month::January), Selection::Only(Weekday::Friday));
        assert_eq!(stations(&out), vec!["S1"]);
    }

    #[test]
    fn test_filters_commute() {
        let ds = dataset(DAYS);
        let month = Selection::Only(Month::June);
        let day = Selection::Only(Weekday::Friday);
        let month_then_day = filter_by_day(&filter_by_month(&ds, month), day);
        let day_then_month = filter_by_month(&filter_by_day(&ds, day), month);
        assert_eq!(month_then_day, day_then_month);
        assert_eq!(month_then_day, apply_filters(&ds, month, day));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let ds = dataset(DAYS);
        let month = Selection::Only(Month::March);
        let day = Selection::Only(Weekday::Monday);
        let once = apply_filters(&ds, month, day);
        let twice = apply_filters(&once, month, day);
        assert_eq!(once, twice);
        assert_eq!(stations(&once), vec!["S3"]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let ds = dataset(DAYS);
        let out = apply_filters(&ds, Selection::Only(Month::April), Selection::All);
        assert!(out.is_empty());
        assert_eq!(out.city(), City::Chicago);
    }

    #[test]
    fn test_schema_survives_filtering() {
        let ds = Dataset::new(City::Washington, Schema::default(), dataset(DAYS).records().to_vec());
        let out = filter_by_month(&ds, Selection::Only(Month::February));
        assert_eq!(out.schema(), Schema::default());
        assert_eq!(out.city(), City::Washington);
    }

    #[test]
    fn test_apply_criteria() {
        let ds = dataset(DAYS);
        let criteria = FilterCriteria {
            city: City::Chicago,
            month: Selection::All,
            day: Selection::Only(Weekday::Monday),
        };
        assert_eq!(stations(&apply_criteria(&ds, &criteria)), vec!["S0", "S3"]);
    }

    #[test]
    fn test_source_dataset_untouched() {
        let ds = dataset(DAYS);
        let before = ds.clone();
        let _ = apply_filters(&ds, Selection::Only(Month::May), Selection::Only(Weekday::Sunday));
        assert_eq!(ds, before);
    }
}
