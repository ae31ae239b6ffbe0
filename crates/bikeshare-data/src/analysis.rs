//! Session analysis pipeline.
//!
//! Runs the four aggregators over one filtered dataset and packages their
//! results, with per-section timings, into a [`SessionReport`] ready for the
//! display layer.

use std::time::Instant;

use bikeshare_core::models::{City, Dataset, FilterCriteria, Month, Selection, Weekday};
use bikeshare_core::{BikeshareError, Result};
use serde::Serialize;
use tracing::debug;

use crate::duration_stats::{duration_stats, DurationStats};
use crate::station_stats::{station_stats, StationStats};
use crate::time_stats::{time_stats, TimeStats};
use crate::user_stats::{user_stats, UserStats};

// ── Public types ──────────────────────────────────────────────────────────────

/// Result of one aggregator over the filtered trips.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ready(T),
    /// No trip matched the filters.
    NoData,
}

impl<T> Outcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(v) => Some(v),
            Outcome::NoData => None,
        }
    }
}

/// One report section plus how long it took to compute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<T> {
    pub outcome: Outcome<T>,
    pub elapsed_seconds: f64,
}

/// Everything the display layer needs for one analysis session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub city: City,
    pub month: Selection<Month>,
    pub day: Selection<Weekday>,
    /// Trips left after filtering.
    pub trip_count: usize,
    pub time: Section<TimeStats>,
    pub stations: Section<StationStats>,
    pub durations: Section<DurationStats>,
    pub users: Section<UserStats>,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run every aggregator over `filtered`.
///
/// Each aggregator reads the same dataset independently. An empty dataset
/// turns every section into [`Outcome::NoData`]; any other aggregator error
/// is returned.
pub fn analyze(filtered: &Dataset, criteria: &FilterCriteria) -> Result<SessionReport> {
    let report = SessionReport {
        city: criteria.city,
        month: criteria.month,
        day: criteria.day,
        trip_count: filtered.len(),
        time: timed("time", || time_stats(filtered))?,
        stations: timed("station", || station_stats(filtered))?,
        durations: timed("duration", || duration_stats(filtered))?,
        users: timed("user", || user_stats(filtered))?,
    };
    Ok(report)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn timed<T>(label: &str, compute: impl FnOnce() -> Result<T>) -> Result<Section<T>> {
    let started = Instant::now();
    let outcome = match compute() {
        Ok(stats) => Outcome::Ready(stats),
        Err(BikeshareError::EmptyDataset) => Outcome::NoData,
        Err(other) => return Err(other),
    };
    let elapsed_seconds = started.elapsed().as_secs_f64();
    debug!("{} stats computed in {:.6}s", label, elapsed_seconds);
    Ok(Section {
        outcome,
        elapsed_seconds,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
