//! One analysis session and the interactive restart loop around it.

use std::io::{BufRead, Write};

use anyhow::Context;
use bikeshare_core::models::{Dataset, FilterCriteria};
use bikeshare_core::settings::CitySources;
use bikeshare_data::analysis::analyze;
use bikeshare_data::filter::apply_criteria;
use bikeshare_data::paginator::RawDataPaginator;
use bikeshare_data::reader::load_city;
use tracing::{debug, info, warn};

use crate::prompt::{self, FilterPrompt, Step};
use crate::report;

/// How reports are written and raw rows paged.
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub page_size: usize,
}

/// Load, filter and analyse one city, writing the report to `out`.
///
/// Returns the filtered dataset so the caller can page through it.
pub fn run_once<W: Write>(
    sources: &CitySources,
    criteria: &FilterCriteria,
    options: OutputOptions,
    out: &mut W,
) -> anyhow::Result<Dataset> {
    info!(
        "Session: city={} month={} day={}",
        criteria.city, criteria.month, criteria.day
    );

    let dataset = load_city(sources, criteria.city)
        .with_context(|| format!("loading trip data for {}", criteria.city.title()))?;
    let filtered = apply_criteria(&dataset, criteria);
    if filtered.is_empty() {
        warn!("No trips match month={} day={}", criteria.month, criteria.day);
    }

    let session = analyze(&filtered, criteria)?;
    let rendered = if options.json {
        report::render_json(&session)?
    } else {
        report::render_report(&session)
    };
    writeln!(out, "{}", rendered)?;

    Ok(filtered)
}

/// Prompt for filters, report, page raw rows, and repeat while the user
/// answers `yes` to the restart question. End of input ends the loop.
pub fn run_interactive<R: BufRead, W: Write>(
    sources: &CitySources,
    options: OutputOptions,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        let Some(criteria) = collect_filters(input, out)? else {
            return Ok(());
        };

        let filtered = run_once(sources, &criteria, options, out)?;
        page_raw_rows(&filtered, options.page_size, input, out)?;

        write!(out, "\nWould you like to restart? Enter yes or no.\n")?;
        out.flush()?;
        match read_line(input)? {
            Some(answer) if prompt::wants_restart(&answer) => continue,
            _ => return Ok(()),
        }
    }
}

/// Drive the [`FilterPrompt`] from `input`. Returns `None` on end of input.
pub fn collect_filters<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<FilterCriteria>> {
    let mut machine = FilterPrompt::new();
    writeln!(out, "{}", prompt::GREETING)?;
    write!(out, "{}", machine.question())?;
    out.flush()?;

    loop {
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match machine.feed(&line) {
            Step::Ask(question) => {
                write!(out, "{}", question)?;
                out.flush()?;
            }
            Step::Retry(question) => {
                debug!("Rejected {:?} at {:?}", line, machine.state());
                write!(out, "{}", question)?;
                out.flush()?;
            }
            Step::Done(criteria) => {
                writeln!(out, "{}", "-".repeat(40))?;
                return Ok(Some(criteria));
            }
        }
    }
}

/// Show growing prefixes of `dataset` until the user types `no` or input
/// ends. Each page repeats the rows already shown.
pub fn page_raw_rows<R: BufRead, W: Write>(
    dataset: &Dataset,
    page_size: usize,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut pager = RawDataPaginator::with_page_size(dataset, page_size);
    loop {
        writeln!(
            out,
            "Press Enter to see {} rows of raw data, or type 'no' to skip.",
            page_size
        )?;
        out.flush()?;
        match read_line(input)? {
            Some(answer) if prompt::wants_more_rows(&answer) => {
                writeln!(out, "{}", report::render_rows(pager.advance(), dataset.schema()))?;
            }
            _ => return Ok(()),
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> anyhow::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{City, Month, Selection};
    use bikeshare_core::BikeshareError;
    use std::io::Cursor;
    use tempfile::TempDir;

    const HEADER: &str =
        ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year";

    fn options() -> OutputOptions {
        OutputOptions {
            json: false,
            page_size: 5,
        }
    }

    /// Seven January trips and one March trip for Chicago.
    fn fixture_dir() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        let mut text = format!("{HEADER}\n");
        for i in 0..7 {
            text.push_str(&format!(
                "{i},2017-01-0{} 08:00:00,2017-01-0{} 08:30:00,1800,Station {i},Lake St,Subscriber,Male,1985.0\n",
                i + 1,
                i + 1
            ));
        }
        text.push_str("7,2017-03-01 17:00:00,2017-03-01 17:10:00,600,Canal St,Lake St,Customer,,\n");
        std::fs::write(dir.path().join("chicago.csv"), text).expect("write fixture");
        dir
    }

    fn run_script(dir: &TempDir, script: &str) -> anyhow::Result<String> {
        let sources = CitySources::from_data_dir(dir.path());
        let mut input = Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        run_interactive(&sources, options(), &mut input, &mut out)?;
        Ok(String::from_utf8(out).expect("utf8"))
    }

    #[test]
    fn test_run_once_writes_report() {
        let dir = fixture_dir();
        let criteria = FilterCriteria {
            city: City::Chicago,
            month: Selection::Only(Month::March),
            day: Selection::All,
        };
        let mut out = Vec::new();
        let filtered = run_once(
            &CitySources::from_data_dir(dir.path()),
            &criteria,
            options(),
            &mut out,
        )
        .unwrap();
        assert_eq!(filtered.len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("The most common start station is: Canal St (1 trips)"));
    }

    #[test]
    fn test_run_once_json() {
        let dir = fixture_dir();
        let criteria = FilterCriteria {
            city: City::Chicago,
            month: Selection::All,
            day: Selection::All,
        };
        let mut out = Vec::new();
        run_once(
            &CitySources::from_data_dir(dir.path()),
            &criteria,
            OutputOptions {
                json: true,
                page_size: 5,
            },
            &mut out,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["trip_count"], 8);
    }

    #[test]
    fn test_run_once_missing_city_file() {
        let dir = TempDir::new().unwrap();
        let criteria = FilterCriteria {
            city: City::Washington,
            month: Selection::All,
            day: Selection::All,
        };
        let err = run_once(
            &CitySources::from_data_dir(dir.path()),
            &criteria,
            options(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BikeshareError>(),
            Some(BikeshareError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_interactive_with_reprompts_and_paging() {
        let dir = fixture_dir();
        // bad city, city, bad month, month, day, two pages, stop, no restart
        let script = "boston\nchicago\njuly\nall\nall\n\n\nno\nno\n";
        let text = run_script(&dir, script).unwrap();

        assert!(text.contains("Choose between Chicago, New York City, or Washington: "));
        assert!(text.contains("Enter a valid month"));
        assert!(text.contains("8 trips for Chicago"));
        assert!(text.contains("Mean travel time is:"));
        // Second page repeats rows 0-4 and adds 5-7.
        assert_eq!(text.matches("Station 0 ").count(), 2);
        assert_eq!(text.matches("Station 6 ").count(), 1);
        assert!(text.contains("Canal St"));
        assert_eq!(text.matches("Would you like to restart?").count(), 1);
    }

    #[test]
    fn test_interactive_restart_runs_second_session() {
        let dir = fixture_dir();
        let script = "chicago\nmarch\nall\nno\nyes\nchicago\nall\nsunday\nno\nno\n";
        let text = run_script(&dir, script).unwrap();

        assert_eq!(text.matches(prompt::GREETING).count(), 2);
        assert!(text.contains("1 trips for Chicago (month: march, day: all)"));
        // 2017-01-01 is the only Sunday.
        assert!(text.contains("1 trips for Chicago (month: all, day: sunday)"));
    }

    #[test]
    fn test_interactive_empty_filter_reports_no_data() {
        let dir = fixture_dir();
        let script = "chicago\njune\nall\n\nno\nno\n";
        let text = run_script(&dir, script).unwrap();
        assert!(text.contains("0 trips for Chicago"));
        assert!(text.contains("No trip data matches the selected filters."));
    }

    #[test]
    fn test_interactive_end_of_input_exits_cleanly() {
        let dir = fixture_dir();
        assert!(run_script(&dir, "chicago\n").is_ok());
        assert!(run_script(&dir, "").is_ok());
    }

    #[test]
    fn test_read_line_strips_crlf() {
        let mut input = Cursor::new(b"yes\r\n".to_vec());
        assert_eq!(read_line(&mut input).unwrap(), Some("yes".to_string()));
        assert_eq!(read_line(&mut input).unwrap(), None);
    }
}
