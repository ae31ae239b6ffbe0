//! CSV trip-log loading for the bikeshare explorer.
//!
//! Reads one city's trip log and converts every row into a [`TripRecord`]
//! with its month, weekday and hour derived. Any malformed row aborts the
//! whole load: statistics over a partial dataset would be misleading.

use std::io::Read;
use std::path::Path;

use bikeshare_core::models::{City, Dataset, OptionalColumn, Schema, TripRecord};
use bikeshare_core::settings::CitySources;
use bikeshare_core::time_utils::parse_timestamp;
use bikeshare_core::{BikeshareError, Result};
use csv::StringRecord;
use tracing::{debug, info};

const START_TIME: &str = "Start Time";
const END_TIME: &str = "End Time";
const TRIP_DURATION: &str = "Trip Duration";
const START_STATION: &str = "Start Station";
const END_STATION: &str = "End Station";
const USER_TYPE: &str = "User Type";

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the trip log configured for `city` in `sources`.
pub fn load_city(sources: &CitySources, city: City) -> Result<Dataset> {
    let Some(path) = sources.path_for(city) else {
        return Err(BikeshareError::DataUnavailable {
            city,
            path: city.default_file_name().into(),
            source: csv::Error::from(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no trip log configured for this city",
            )),
        });
    };
    load_from_path(city, path)
}

/// Load `city`'s trip log from an explicit CSV file.
pub fn load_from_path(city: City, path: &Path) -> Result<Dataset> {
    debug!("Loading {} trips from {}", city, path.display());

    let unavailable = |source: csv::Error| BikeshareError::DataUnavailable {
        city,
        path: path.to_path_buf(),
        source,
    };

    let reader = csv::Reader::from_path(path).map_err(unavailable)?;
    read_trips(city, reader).map_err(|err| match err {
        BikeshareError::Io(io) => unavailable(csv::Error::from(io)),
        other => other,
    })
}

/// Load trips from any CSV byte stream. I/O failures surface as
/// [`BikeshareError::Io`].
pub fn load_from_reader<R: Read>(city: City, input: R) -> Result<Dataset> {
    read_trips(city, csv::Reader::from_reader(input))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header positions of the columns the loader understands.
#[derive(Debug)]
struct Columns {
    start_time: usize,
    end_time: usize,
    trip_duration: usize,
    start_station: usize,
    end_station: usize,
    user_type: usize,
    gender: Option<usize>,
    birth_year: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        let require =
            |name: &str| find(name).ok_or_else(|| BikeshareError::MissingColumn(name.to_string()));

        Ok(Self {
            start_time: require(START_TIME)?,
            end_time: require(END_TIME)?,
            trip_duration: require(TRIP_DURATION)?,
            start_station: require(START_STATION)?,
            end_station: require(END_STATION)?,
            user_type: require(USER_TYPE)?,
            gender: find(OptionalColumn::Gender.header()),
            birth_year: find(OptionalColumn::BirthYear.header()),
        })
    }

    fn schema(&self) -> Schema {
        Schema {
            gender: self.gender.is_some(),
            birth_year: self.birth_year.is_some(),
        }
    }
}

fn read_trips<R: Read>(city: City, mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers = reader.headers().map_err(classify_csv_error)?.clone();
    let columns = Columns::locate(&headers)?;

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(classify_csv_error)?;
        // Header is line 1, so the n-th data row is line n + 2.
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);
        records.push(parse_row(&row, &columns, line)?);
    }

    info!("Loaded {} trips for {}", records.len(), city);
    Ok(Dataset::new(city, columns.schema(), records))
}

/// I/O failures stay I/O errors; anything else is a structural problem with
/// the row the reader was on.
fn classify_csv_error(err: csv::Error) -> BikeshareError {
    if err.is_io_error() {
        return BikeshareError::Io(err.into());
    }
    BikeshareError::MalformedRecord {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        reason: err.to_string(),
    }
}

fn parse_row(row: &StringRecord, columns: &Columns, line: u64) -> Result<TripRecord> {
    let field = |idx: usize| row.get(idx).unwrap_or("").trim();
    let malformed = |reason: String| BikeshareError::MalformedRecord { line, reason };

    let timestamp = |name: &str, idx: usize| {
        parse_timestamp(field(idx))
            .ok_or_else(|| malformed(format!("unparseable {} \"{}\"", name, field(idx))))
    };
    let start_time = timestamp(START_TIME, columns.start_time)?;
    let end_time = timestamp(END_TIME, columns.end_time)?;

    let raw_duration = field(columns.trip_duration);
    let duration = raw_duration
        .parse::<f64>()
        .ok()
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| malformed(format!("invalid {} \"{}\"", TRIP_DURATION, raw_duration)))?;

    let station = |name: &str, idx: usize| {
        non_blank(field(idx)).ok_or_else(|| malformed(format!("blank {}", name)))
    };
    let start_station = station(START_STATION, columns.start_station)?;
    let end_station = station(END_STATION, columns.end_station)?;

    let mut trip = TripRecord::new(start_time, end_time, duration, start_station, end_station)
    .ok_or_else(|| {
        malformed(format!(
            "{} {} falls outside January-June",
            START_TIME, start_time
        ))
    })?;

    trip.user_type = non_blank(field(columns.user_type));
    trip.gender = columns.gender.and_then(|idx| non_blank(field(idx)));
    if let Some(idx) = columns.birth_year {
        trip.birth_year = parse_birth_year(field(idx))
            .map_err(|raw| {
                let header = OptionalColumn::BirthYear.header();
                malformed(format!("invalid {} \"{}\"", header, raw))
            })?;
    }

    Ok(trip)
}

fn non_blank(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Birth years are written as floats (`1992.0`); blanks mean unknown.
fn parse_birth_year(raw: &str) -> std::result::Result<Option<i32>, String> {
    if raw.is_empty() {
        return Ok(None);
    }
    let year = raw
        .parse::<f64>()
        .map_err(|_| raw.to_string())?
        .trunc();
    if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&year) {
        return Err(raw.to_string());
    }
    Ok(Some(year as i32))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
