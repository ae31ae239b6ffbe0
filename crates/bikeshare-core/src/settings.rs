use clap::Parser;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::models::{City, FilterCriteria, Month, Selection, Weekday};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Explore US bikeshare trip data
#[derive(Parser, Debug, Clone)]
#[command(
    name = "bikeshare",
    about = "Explore US bikeshare trip data by city, month and weekday",
    version
)]
pub struct Settings {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// City to analyse; with --month and --day the session runs without prompts
    #[arg(long, value_parser = parse_city)]
    pub city: Option<City>,

    /// Month filter (all, january .. june)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<Selection<Month>>,

    /// Weekday filter (all, monday .. sunday)
    #[arg(long, value_parser = parse_day)]
    pub day: Option<Selection<Weekday>>,

    /// Report output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Rows added to the raw-data view on every advance
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u16).range(1..=100))]
    pub page_size: u16,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Parse an explicit argument list (the first item is the binary name).
    pub fn try_load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// `--debug` overrides the log level.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The full filter triple, when all three parts were given on the command
    /// line.
    pub fn criteria(&self) -> Option<FilterCriteria> {
        Some(FilterCriteria {
            city: self.city?,
            month: self.month?,
            day: self.day?,
        })
    }

    /// City trip-log locations under `--data-dir`.
    pub fn city_sources(&self) -> CitySources {
        CitySources::from_data_dir(&self.data_dir)
    }

    pub fn json_output(&self) -> bool {
        self.format == "json"
    }
}

fn parse_city(s: &str) -> Result<City, String> {
    s.parse().map_err(|e: crate::error::BikeshareError| e.to_string())
}

fn parse_month(s: &str) -> Result<Selection<Month>, String> {
    s.parse().map_err(|e: crate::error::BikeshareError| e.to_string())
}

fn parse_day(s: &str) -> Result<Selection<Weekday>, String> {
    s.parse().map_err(|e: crate::error::BikeshareError| e.to_string())
}

// ── CitySources ────────────────────────────────────────────────────────────────

/// Maps each city to the file holding its trip log.
///
/// Passed explicitly to the loader so tests can point cities at fixtures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitySources {
    paths: BTreeMap<City, PathBuf>,
}

impl CitySources {
    /// A mapping with no cities configured.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every city mapped to its conventional file name under `dir`.
    pub fn from_data_dir(dir: &Path) -> Self {
        let paths = City::ALL
            .into_iter()
            .map(|city| (city, dir.join(city.default_file_name())))
            .collect();
        Self { paths }
    }

    /// Point `city` at `path`, replacing any previous mapping.
    pub fn with_source(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(city, path.into());
        self
    }

    pub fn path_for(&self, city: City) -> Option<&Path> {
        self.paths.get(&city).map(PathBuf::as_path)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
