use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::BikeshareError;

// ── City ──────────────────────────────────────────────────────────────────────

/// The cities whose trip logs can be explored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "chicago")]
    Chicago,
    #[serde(rename = "new york city")]
    NewYorkCity,
    #[serde(rename = "washington")]
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lowercase name, as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Capitalised name for display.
    pub fn title(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Conventional file name of the city's trip log inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == normalised)
            .ok_or_else(|| BikeshareError::InvalidSelection {
                kind: "city",
                value: s.trim().to_string(),
            })
    }
}

// ── Month ─────────────────────────────────────────────────────────────────────

/// Calendar months covered by the trip logs (January through June).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Map a 1-based month number to a covered month.
    ///
    /// Returns `None` for July onwards and for out-of-range numbers.
    pub fn from_number(n: u32) -> Option<Month> {
        Month::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "january",
            Month::February => "february",
            Month::March => "march",
            Month::April => "april",
            Month::May => "may",
            Month::June => "june",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        Month::ALL
            .into_iter()
            .find(|m| m.name() == normalised)
            .ok_or_else(|| BikeshareError::InvalidSelection {
                kind: "month",
                value: s.trim().to_string(),
            })
    }
}

// ── Weekday ───────────────────────────────────────────────────────────────────

/// Day of the week a trip started on.
///
/// The derived ordering follows the calendar (Monday first). Mode tie-breaks
/// compare [`Weekday::name`] instead, so "friday" beats "monday".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lowercase full weekday name.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|d| d.name() == normalised)
            .ok_or_else(|| BikeshareError::InvalidSelection {
                kind: "day",
                value: s.trim().to_string(),
            })
    }
}

// ── Selection / FilterCriteria ────────────────────────────────────────────────

/// A filter criterion that is either disabled (`all`) or pinned to one value.
///
/// Serialises as a plain string, `"all"` or the value's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: PartialEq> Selection<T> {
    /// `true` when `value` passes this criterion.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(v) => v.fmt(f),
        }
    }
}

impl<T> FromStr for Selection<T>
where
    T: FromStr<Err = BikeshareError>,
{
    type Err = BikeshareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: FromStr<Err = BikeshareError>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// The (city, month, day) triple narrowing one analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub city: City,
    pub month: Selection<Month>,
    pub day: Selection<Weekday>,
}

// ── TripRecord ────────────────────────────────────────────────────────────────

/// One logged bicycle rental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// When the rental began.
    pub start_time: NaiveDateTime,
    /// When the bike was returned.
    pub end_time: NaiveDateTime,
    /// Rental length in seconds.
    pub trip_duration_seconds: f64,
    pub start_station: String,
    pub end_station: String,
    /// Rider category, `None` when the cell was blank.
    pub user_type: Option<String>,
    /// `None` when blank or when the city does not record gender.
    pub gender: Option<String>,
    /// `None` when blank or when the city does not record birth years.
    pub birth_year: Option<i32>,
    /// Derived from `start_time`.
    pub month: Month,
    /// Derived from `start_time`.
    pub day_of_week: Weekday,
    /// Derived from `start_time`, 0-23.
    pub hour: u32,
}

impl TripRecord {
    /// Build a record and derive its temporal fields from `start_time`.
    ///
    /// Returns `None` when `start_time` falls outside January-June, the only
    /// months the trip logs cover.
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        trip_duration_seconds: f64,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
    ) -> Option<Self> {
        let month = Month::from_number(start_time.month())?;
        Some(Self {
            start_time,
            end_time,
            trip_duration_seconds,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month,
            day_of_week: start_time.weekday().into(),
            hour: start_time.hour(),
        })
    }

    pub fn with_user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = Some(user_type.into());
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_birth_year(mut self, year: i32) -> Self {
        self.birth_year = Some(year);
        self
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// Columns that only some cities' trip logs provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionalColumn {
    Gender,
    BirthYear,
}

impl OptionalColumn {
    /// Header name in the source file.
    pub fn header(self) -> &'static str {
        match self {
            OptionalColumn::Gender => "Gender",
            OptionalColumn::BirthYear => "Birth Year",
        }
    }
}

/// Which optional columns a dataset's source provided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub gender: bool,
    pub birth_year: bool,
}

impl Schema {
    /// Schema with every optional column present.
    pub fn full() -> Self {
        Self {
            gender: true,
            birth_year: true,
        }
    }

    pub fn has(&self, column: OptionalColumn) -> bool {
        match column {
            OptionalColumn::Gender => self.gender,
            OptionalColumn::BirthYear => self.birth_year,
        }
    }
}

// ── Dataset ───────────────────────────────────────────────────────────────────

/// The ordered trip records of one city, plus its optional-column schema.
///
/// Record order is the source's insertion order. A dataset is never mutated
/// after construction; filtering produces a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    city: City,
    schema: Schema,
    records: Vec<TripRecord>,
}

impl Dataset {
    pub fn new(city: City, schema: Schema, records: Vec<TripRecord>) -> Self {
        Self {
            city,
            schema,
            records,
        }
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    // ── parsing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_city_from_str_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("  NEW YORK CITY ".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("washington".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_city_from_str_rejects_unknown() {
        let err = "boston".parse::<City>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid city: boston");
    }

    #[test]
    fn test_month_rejects_july() {
        assert!("july".parse::<Month>().is_err());
        assert!("june".parse::<Month>().is_ok());
    }

    #[test]
    fn test_selection_parses_all() {
        assert_eq!("All".parse::<Selection<Month>>().unwrap(), Selection::All);
        assert_eq!(
            "march".parse::<Selection<Month>>().unwrap(),
            Selection::Only(Month::March)
        );
        assert_eq!(
            "Sunday".parse::<Selection<Weekday>>().unwrap(),
            Selection::Only(Weekday::Sunday)
        );
        assert!("someday".parse::<Selection<Weekday>>().is_err());
    }

    #[test]
    fn test_selection_matches() {
        assert!(Selection::All.matches(&Month::May));
        assert!(Selection::Only(Month::May).matches(&Month::May));
        assert!(!Selection::Only(Month::May).matches(&Month::June));
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::<Weekday>::All.to_string(), "all");
        assert_eq!(Selection::Only(Weekday::Friday).to_string(), "friday");
    }

    #[test]
    fn test_selection_serializes_as_plain_name() {
        let criteria = FilterCriteria {
            city: City::NewYorkCity,
            month: Selection::Only(Month::March),
            day: Selection::All,
        };
        let value = serde_json::to_value(criteria).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"city": "new york city", "month": "march", "day": "all"})
        );

        let back: FilterCriteria = serde_json::from_value(value).unwrap();
        assert_eq!(back, criteria);
        assert!(serde_json::from_str::<Selection<Month>>("\"july\"").is_err());
    }

    // ── Month ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_month_number_round_trip() {
        for m in Month::ALL {
            assert_eq!(Month::from_number(m.number()), Some(m));
        }
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(7), None);
    }

    // ── TripRecord derivation ─────────────────────────────────────────────────

    #[test]
    fn test_trip_record_derives_temporal_fields() {
        // 2017-06-23 was a Friday.
        let trip = TripRecord::new(at(2017, 6, 23, 15), at(2017, 6, 23, 16), 600.0, "A", "B")
            .unwrap();
        assert_eq!(trip.month, Month::June);
        assert_eq!(trip.day_of_week, Weekday::Friday);
        assert_eq!(trip.day_of_week.name(), "friday");
        assert_eq!(trip.hour, 15);
    }

    #[test]
    fn test_trip_record_outside_coverage() {
        assert!(TripRecord::new(at(2017, 7, 1, 8), at(2017, 7, 1, 9), 60.0, "A", "B").is_none());
    }

    #[test]
    fn test_trip_record_builders() {
        let trip = TripRecord::new(at(2017, 1, 2, 0), at(2017, 1, 2, 1), 60.0, "A", "B")
            .unwrap()
            .with_user_type("Subscriber")
            .with_gender("Female")
            .with_birth_year(1990);
        assert_eq!(trip.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(trip.gender.as_deref(), Some("Female"));
        assert_eq!(trip.birth_year, Some(1990));
    }

    // ── Schema ────────────────────────────────────────────────────────────────

    #[test]
    fn test_schema_has() {
        let schema = Schema {
            gender: false,
            birth_year: true,
        };
        assert!(!schema.has(OptionalColumn::Gender));
        assert!(schema.has(OptionalColumn::BirthYear));
        assert!(Schema::full().has(OptionalColumn::Gender));
        assert!(!Schema::default().has(OptionalColumn::BirthYear));
    }
}
