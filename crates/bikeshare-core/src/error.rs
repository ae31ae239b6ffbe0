use std::path::PathBuf;
use thiserror::Error;

use crate::models::City;

/// All errors produced by the bikeshare explorer.
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// A city's trip log could not be opened or read.
    #[error("Trip data for {city} is unavailable at {path}: {source}")]
    DataUnavailable {
        city: City,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A row could not be turned into a trip record. Aborts the whole load.
    #[error("Malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    /// A required column is missing from the source header.
    #[error("Required column \"{0}\" is missing from the trip data")]
    MissingColumn(String),

    /// An aggregator was asked to summarise zero trips.
    #[error("No trip data matches the selected filters")]
    EmptyDataset,

    /// A city, month or day string is outside its enumeration.
    #[error("Invalid {kind}: {value}")]
    InvalidSelection { kind: &'static str, value: String },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the bikeshare crates.
pub type Result<T> = std::result::Result<T, BikeshareError>;
