//! Plain-text and JSON rendering of session reports and raw rows.

use bikeshare_core::formatting::{
    format_count, format_hour_of_day, format_hours, format_number, percentage, title_case,
};
use bikeshare_core::models::{Schema, TripRecord};
use bikeshare_data::analysis::{Outcome, Section, SessionReport};
use bikeshare_data::duration_stats::DurationStats;
use bikeshare_data::station_stats::StationStats;
use bikeshare_data::time_stats::TimeStats;
use bikeshare_data::user_stats::{CategoryCount, ColumnStatus, UserStats};
use unicode_width::UnicodeWidthStr;

const SEPARATOR_WIDTH: usize = 40;
const NO_DATA: &str = "No trip data matches the selected filters.";

// ── Session report ─────────────────────────────────────────────────────────────

/// Render every section of `report` the way the console shows it.
pub fn render_report(report: &SessionReport) -> String {
    let mut out = vec![format!(
        "{} trips for {} (month: {}, day: {})",
        format_count(report.trip_count),
        report.city.title(),
        report.month,
        report.day
    )];
    out.push(separator());

    render_section(
        &mut out,
        "Calculating The Most Frequent Times of Travel...",
        &report.time,
        time_lines,
    );
    render_section(
        &mut out,
        "Calculating The Most Popular Stations and Trip...",
        &report.stations,
        station_lines,
    );
    render_section(
        &mut out,
        "Calculating Trip Duration...",
        &report.durations,
        duration_lines,
    );
    render_section(&mut out, "Calculating User Stats...", &report.users, user_lines);

    out.join("\n")
}

/// Serialise `report` as pretty-printed JSON.
pub fn render_json(report: &SessionReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

fn render_section<T>(
    out: &mut Vec<String>,
    heading: &str,
    section: &Section<T>,
    body: fn(&T) -> Vec<String>,
) {
    out.push(String::new());
    out.push(heading.to_string());
    out.push(String::new());
    match &section.outcome {
        Outcome::Ready(stats) => out.extend(body(stats)),
        Outcome::NoData => out.push(NO_DATA.to_string()),
    }
    out.push(String::new());
    out.push(format!(
        "This took {} seconds.",
        format_number(section.elapsed_seconds, 6)
    ));
    out.push(separator());
}

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

fn time_lines(stats: &TimeStats) -> Vec<String> {
    vec![
        format!(
            "The most common month is: {} ({} trips)",
            title_case(stats.most_common_month.value.name()),
            format_count(stats.most_common_month.count)
        ),
        format!(
            "The most common day is: {} ({} trips)",
            title_case(stats.most_common_day.value.name()),
            format_count(stats.most_common_day.count)
        ),
        format!(
            "The most common start hour is: {} ({} trips)",
            format_hour_of_day(stats.most_common_hour.value),
            format_count(stats.most_common_hour.count)
        ),
    ]
}

fn station_lines(stats: &StationStats) -> Vec<String> {
    vec![
        format!(
            "The most common start station is: {} ({} trips)",
            stats.most_common_start.value,
            format_count(stats.most_common_start.count)
        ),
        format!(
            "The most common end station is: {} ({} trips)",
            stats.most_common_end.value,
            format_count(stats.most_common_end.count)
        ),
        "The most frequent combination of start and end stations is:".to_string(),
        format!(
            "  {} -> {} ({} trips)",
            stats.most_common_trip.value.start,
            stats.most_common_trip.value.end,
            format_count(stats.most_common_trip.count)
        ),
    ]
}

fn duration_lines(stats: &DurationStats) -> Vec<String> {
    vec![
        format!("Total travel time is: {}", format_hours(stats.total_hours)),
        format!("Mean travel time is: {}", format_hours(stats.mean_hours)),
    ]
}

fn user_lines(stats: &UserStats) -> Vec<String> {
    let mut lines = vec!["User types:".to_string()];
    lines.extend(count_lines(&stats.user_types));

    lines.push(String::new());
    match &stats.genders {
        ColumnStatus::Available(counts) => {
            lines.push("Gender counts:".to_string());
            lines.extend(count_lines(counts));
        }
        ColumnStatus::Unavailable => {
            lines.push("Gender data is not available for this city.".to_string())
        }
    }

    lines.push(String::new());
    match &stats.birth_years {
        ColumnStatus::Available(Some(years)) => {
            lines.push("Birth Year stats:".to_string());
            lines.push(format!("  Earliest: {}", years.earliest));
            lines.push(format!("  Most recent: {}", years.most_recent));
            lines.push(format!(
                "  Most common: {} ({} riders)",
                years.most_common.value,
                format_count(years.most_common.count)
            ));
        }
        ColumnStatus::Available(None) => {
            lines.push("No birth years were recorded for the selected trips.".to_string())
        }
        ColumnStatus::Unavailable => {
            lines.push("Birth Year data is not available for this city.".to_string())
        }
    }
    lines
}

fn count_lines(counts: &[CategoryCount]) -> Vec<String> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    let width = counts.iter().map(|c| c.category.width()).max().unwrap_or(0);
    counts
        .iter()
        .map(|c| {
            format!(
                "  {}  {} ({}%)",
                pad(&c.category, width),
                format_count(c.count),
                format_number(percentage(c.count as f64, total as f64, 1), 1)
            )
        })
        .collect()
}

// ── Raw rows ───────────────────────────────────────────────────────────────────

/// Render `rows` as an aligned text table. Optional columns appear only when
/// `schema` says the city records them.
pub fn render_rows(rows: &[TripRecord], schema: Schema) -> String {
    let mut header = vec![
        "#",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if schema.gender {
        header.push("Gender");
    }
    if schema.birth_year {
        header.push("Birth Year");
    }

    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, trip)| row_cells(i, trip, schema))
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.width());
        }
    }

    let render_line = |cells: Vec<String>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| pad(cell, w))
            .collect::<Vec<String>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render_line(header.iter().map(|h| h.to_string()).collect())];
    lines.extend(body.into_iter().map(render_line));
    lines.join("\n")
}

fn row_cells(index: usize, trip: &TripRecord, schema: Schema) -> Vec<String> {
    let mut cells = vec![
        index.to_string(),
        trip.start_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        trip.end_time.format("%Y-%m-%d %H:%M:%S").to_string(),
        format_number(trip.trip_duration_seconds, 1),
        trip.start_station.clone(),
        trip.end_station.clone(),
        trip.user_type.clone().unwrap_or_default(),
    ];
    if schema.gender {
        cells.push(trip.gender.clone().unwrap_or_default());
    }
    if schema.birth_year {
        cells.push(trip.birth_year.map(|y| y.to_string()).unwrap_or_default());
    }
    cells
}

/// Right-pad `s` with spaces to `width` display columns.
fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(fill))
}

// ── Tests ──────────────────────────────────────────────────────────────────────
