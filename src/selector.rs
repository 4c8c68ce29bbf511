use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::catalog::CourtCatalog;
use crate::model::court::CourtIdentity;
use crate::model::fixture::FixtureRecord;

/// How long after its scheduled start a match is still shown as playing.
pub const LIVE_WINDOW_MINUTES: i64 = 10;

pub fn live_window() -> Duration {
    Duration::minutes(LIVE_WINDOW_MINUTES)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Live,
    Upcoming,
}

impl MatchStatus {
    /// Status of a fixture at `now`; `None` once its live window has elapsed
    /// or when it has no scheduled instant.
    pub fn classify(fixture: &FixtureRecord, now: NaiveDateTime) -> Option<Self> {
        let start = fixture.scheduled_instant()?;
        if now < start {
            Some(MatchStatus::Upcoming)
        } else if now < start + live_window() {
            Some(MatchStatus::Live)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchStatus::Live => "LIVE NOW",
            MatchStatus::Upcoming => "UPCOMING",
        }
    }
}

/// The selected fixture (or none) for one court.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtSlot {
    pub court: CourtIdentity,
    pub fixture: Option<FixtureRecord>,
}

/// Result of one selection pass: configured courts first, in catalog order,
/// then raw-label courts from the feed, alphabetically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    slots: Vec<CourtSlot>,
}

impl Selection {
    pub fn iter(&self) -> impl Iterator<Item = &CourtSlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// `None` if the court is not reported at all; `Some(None)` if it is
    /// reported with no fixture to show.
    pub fn get(&self, court: &CourtIdentity) -> Option<Option<&FixtureRecord>> {
        self.slots
            .iter()
            .find(|s| &s.court == court)
            .map(|s| s.fixture.as_ref())
    }

    pub fn selected_count(&self) -> usize {
        self.slots.iter().filter(|s| s.fixture.is_some()).count()
    }
}

/// Pick, for every court, the first fixture in start order whose live window
/// has not yet elapsed at `now`.
pub fn select_next(
    fixtures: &[FixtureRecord],
    catalog: &CourtCatalog,
    now: NaiveDateTime,
) -> Selection {
    let mut buckets: HashMap<CourtIdentity, Vec<(NaiveDateTime, &FixtureRecord)>> = HashMap::new();
    let mut raw_courts: BTreeMap<String, CourtIdentity> = BTreeMap::new();

    for fixture in fixtures {
        let court = catalog.identify(&fixture.court);
        if let CourtIdentity::Raw(name) = &court {
            raw_courts.entry(name.clone()).or_insert_with(|| {
                debug!(target: "scoreboard::selector", court = %name, "Bucketing unknown court under its raw label");
                court.clone()
            });
        }
        match fixture.scheduled_instant() {
            Some(start) => buckets.entry(court).or_default().push((start, fixture)),
            None => {
                trace!(target: "scoreboard::selector", court = %court, time = %fixture.time, "Fixture has no scheduled instant");
            }
        }
    }

    let courts = catalog.expected().chain(raw_courts.into_values());
    let slots = courts
        .map(|court| {
            let fixture = buckets.get_mut(&court).and_then(|bucket| {
                // Stable: equal start times keep feed order.
                bucket.sort_by_key(|(start, _)| *start);
                pick(&court, bucket, now)
            });
            CourtSlot { court, fixture }
        })
        .collect::<Vec<_>>();

    let selection = Selection { slots };
    debug!(
        target: "scoreboard::selector",
        courts = selection.len(),
        selected = selection.selected_count(),
        now = %now,
        "Selected next fixtures"
    );
    selection
}

fn pick(
    court: &CourtIdentity,
    bucket: &[(NaiveDateTime, &FixtureRecord)],
    now: NaiveDateTime,
) -> Option<FixtureRecord> {
    let window = live_window();
    for (start, fixture) in bucket {
        if now < *start + window {
            trace!(target: "scoreboard::selector", court = %court, start = %start, "Selected fixture");
            return Some((*fixture).clone());
        }
        trace!(target: "scoreboard::selector", court = %court, start = %start, "Skipping elapsed fixture");
    }
    None
}
