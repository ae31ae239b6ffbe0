//! Trip builders shared by the unit tests.

use bikeshare_core::models::{City, Dataset, Schema, TripRecord};
use chrono::NaiveDateTime;

pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

/// A 10-minute subscriber trip starting at `start`.
pub fn trip(start: &str, from: &str, to: &str) -> TripRecord {
    let start = ts(start);
    TripRecord::new(start, start + chrono::Duration::minutes(10), 600.0, from, to)
        .unwrap()
        .with_user_type("Subscriber")
}

pub fn dataset(records: Vec<TripRecord>) -> Dataset {
    Dataset::new(City::Chicago, Schema::full(), records)
}

pub fn empty() -> Dataset {
    dataset(Vec::new())
}
