use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// One scheduled match row from the fixture feed, as normalized.
///
/// The raw `date`/`time` strings are kept for display; the parsed halves are
/// `None` when the feed value could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    pub court: String,
    pub date: String,
    pub time: String,
    pub team1: String,
    pub team2: String,
    pub match_id: Option<String>,
    pub parsed_date: Option<NaiveDate>,
    pub parsed_time: Option<NaiveTime>,
}

impl FixtureRecord {
    /// Local wall-clock start of the match, when both date and time resolved.
    pub fn scheduled_instant(&self) -> Option<NaiveDateTime> {
        match (self.parsed_date, self.parsed_time) {
            (Some(d), Some(t)) => Some(d.and_time(t)),
            _ => None,
        }
    }
}
