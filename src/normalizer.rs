use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::model::fixture::FixtureRecord;

/// Feed sentinel for "no value" in the time and match id columns.
pub const NOT_AVAILABLE: &str = "N/A";

static TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):(\d{2})(?::\d{2})?\s*([AaPp][Mm])?$").expect("time pattern is valid")
});

/// Day/month order for slash-delimited dates. Fixed per deployment, never guessed per row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    #[default]
    DayFirst,
    MonthFirst,
}

/// Header names of the logical feed columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub court: String,
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
    pub match_id: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            court: "Court".to_string(),
            date: "Date".to_string(),
            time: "Time".to_string(),
            team1: "Team 1".to_string(),
            team2: "Team 2".to_string(),
            match_id: "MatchID".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub delimiter: u8,
    pub date_order: DateOrder,
    pub columns: ColumnNames,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            date_order: DateOrder::default(),
            columns: ColumnNames::default(),
        }
    }
}

/// Column positions resolved from the header line; `None` when a column is missing.
struct ColumnIndex {
    court: Option<usize>,
    date: Option<usize>,
    time: Option<usize>,
    team1: Option<usize>,
    team2: Option<usize>,
    match_id: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, names: &ColumnNames) -> Self {
        let by_name: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_ascii_lowercase(), i))
            .collect();
        let find = |name: &str| {
            let idx = by_name.get(&name.trim().to_ascii_lowercase()).copied();
            if idx.is_none() {
                warn!(column = %name, "Feed header is missing an expected column");
            }
            idx
        };
        Self {
            court: find(&names.court),
            date: find(&names.date),
            time: find(&names.time),
            team1: find(&names.team1),
            team2: find(&names.team2),
            match_id: find(&names.match_id),
        }
    }
}

fn field(record: &csv::StringRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim().to_string()
}

/// Convert a header-first delimited fixture table into fixture records.
///
/// Never fails as a whole: rows the reader cannot decode are skipped, and
/// unparseable dates or times only leave that record without a scheduled instant.
#[instrument(level = "debug", skip(raw, options), fields(bytes = raw.len()))]
pub fn normalize(raw: &str, options: &NormalizeOptions) -> Vec<FixtureRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => ColumnIndex::resolve(headers, &options.columns),
        Err(e) => {
            warn!(error = %e, kind = "malformed_row", "Failed to read feed header");
            return Vec::new();
        }
    };

    let mut fixtures = Vec::new();
    for (row, result) in reader.records().enumerate() {
        // Header is line 1.
        let line = row + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(line, error = %e, kind = "malformed_row", "Skipping undecodable feed row");
                continue;
            }
        };
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }

        let date = field(&record, columns.date);
        let time = field(&record, columns.time);
        let match_id = field(&record, columns.match_id);

        let parsed_date = parse_date(&date, options.date_order);
        if parsed_date.is_none() {
            warn!(line, date = %date, kind = "malformed_row", "Unrecognized fixture date");
        }
        let parsed_time = parse_time(&time);
        if parsed_time.is_none() && !is_unscheduled(&time) {
            warn!(line, time = %time, kind = "malformed_row", "Unrecognized fixture time");
        }

        fixtures.push(FixtureRecord {
            court: field(&record, columns.court),
            date,
            time,
            team1: field(&record, columns.team1),
            team2: field(&record, columns.team2),
            match_id: if is_unscheduled(&match_id) { None } else { Some(match_id) },
            parsed_date,
            parsed_time,
        });
    }

    debug!(count = fixtures.len(), "Normalized fixture feed");
    fixtures
}

fn is_unscheduled(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(NOT_AVAILABLE)
}

/// Parse `YYYY-MM-DD`, or a slash date in the configured day/month order.
/// A trailing time of day after whitespace or `T` is ignored.
pub fn parse_date(s: &str, order: DateOrder) -> Option<NaiveDate> {
    let s = s.trim();
    let fmt = if s.contains('-') {
        "%Y-%m-%d"
    } else if s.contains('/') {
        match order {
            DateOrder::DayFirst => "%d/%m/%Y",
            DateOrder::MonthFirst => "%m/%d/%Y",
        }
    } else {
        return None;
    };
    // Spreadsheet exports may append a time of day; only the date part counts.
    let (date, rest) = NaiveDate::parse_and_remainder(s, fmt).ok()?;
    match rest.chars().next() {
        None => Some(date),
        Some(c) if c.is_whitespace() || c == 'T' => Some(date),
        Some(_) => None,
    }
}

/// Parse `H:MM` (24-hour) or `H:MM AM|PM`, with optional seconds that are
/// dropped. `N/A` and anything else yield `None`.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if s.eq_ignore_ascii_case(NOT_AVAILABLE) {
        return None;
    }
    let caps = TIME_PATTERN.captures(s)?;
    let mut hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;

    if let Some(meridiem) = caps.get(3) {
        if hour == 0 || hour > 12 {
            return None;
        }
        let pm = meridiem.as_str().eq_ignore_ascii_case("pm");
        hour = match (pm, hour) {
            (false, 12) => 0,
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, h) => h,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, 0)
}
