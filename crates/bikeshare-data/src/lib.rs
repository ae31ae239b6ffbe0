//! Data pipeline for the bikeshare explorer.
//!
//! Loads a city's trip log, narrows it by month and weekday, and computes the
//! time, station, duration and user statistics plus cumulative raw-row pages.

pub mod analysis;
pub mod duration_stats;
pub mod filter;
pub mod frequency;
pub mod paginator;
pub mod reader;
pub mod station_stats;
pub mod time_stats;
pub mod user_stats;

#[cfg(test)]
mod fixtures;
