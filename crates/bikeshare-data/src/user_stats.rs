//! Rider demographics.
//!
//! Gender and birth year are only recorded by some cities. Whether they are
//! reported is decided by the dataset's [`Schema`](bikeshare_core::models::Schema),
//! never by probing individual records.

use bikeshare_core::models::{Dataset, OptionalColumn};
use bikeshare_core::{BikeshareError, Result};
use serde::Serialize;

use crate::frequency::{FrequencyTable, Mode};

/// Whether a city's source provided an optional column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum ColumnStatus<T> {
    Available(T),
    /// The column is absent from this city's trip log.
    Unavailable,
}

impl<T> ColumnStatus<T> {
    pub fn as_available(&self) -> Option<&T> {
        match self {
            ColumnStatus::Available(v) => Some(v),
            ColumnStatus::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, ColumnStatus::Available(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: Mode<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    /// Most frequent first.
    pub user_types: Vec<CategoryCount>,
    pub genders: ColumnStatus<Vec<CategoryCount>>,
    /// `Available(None)` when the column exists but every selected trip left
    /// it blank.
    pub birth_years: ColumnStatus<Option<BirthYearStats>>,
}

/// Compute user-type counts plus, where the city records them, gender counts
/// and birth-year extremes and mode.
///
/// Blank cells are skipped. Fails with [`BikeshareError::EmptyDataset`] when
/// there are no trips.
pub fn user_stats(dataset: &Dataset) -> Result<UserStats> {
    if dataset.is_empty() {
        return Err(BikeshareError::EmptyDataset);
    }
    let trips = dataset.records();
    let schema = dataset.schema();

    let user_types = category_counts(trips.iter().filter_map(|t| t.user_type.as_deref()));

    let genders = if schema.has(OptionalColumn::Gender) {
        ColumnStatus::Available(category_counts(
            trips.iter().filter_map(|t| t.gender.as_deref()),
        ))
    } else {
        ColumnStatus::Unavailable
    };

    let birth_years = if schema.has(OptionalColumn::BirthYear) {
        ColumnStatus::Available(birth_year_stats(trips.iter().filter_map(|t| t.birth_year)))
    } else {
        ColumnStatus::Unavailable
    };

    Ok(UserStats {
        user_types,
        genders,
        birth_years,
    })
}

fn category_counts<'a>(values: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    values
        .collect::<FrequencyTable<&str>>()
        .sorted_by_count()
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

fn birth_year_stats(years: impl Iterator<Item = i32>) -> Option<BirthYearStats> {
    let table: FrequencyTable<i32> = years.collect();
    let most_common = table.mode()?;
    let earliest = *table.keys().next()?;
    let most_recent = *table.keys().next_back()?;
    Some(BirthYearStats {
        earliest,
        most_recent,
        most_common,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
