use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::catalog::CourtCatalog;
use crate::error::FeedError;
use crate::model::court::CourtIdentity;
use crate::model::fixture::FixtureRecord;
use crate::normalizer::{self, NormalizeOptions};
use crate::selector::{self, MatchStatus};

const TBA: &str = "TBA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardState {
    /// No feed has been loaded successfully yet.
    Loading,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureCard {
    pub team1: String,
    pub team2: String,
    pub time: String,
    pub status: MatchStatus,
    pub match_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtCard {
    pub court: CourtIdentity,
    pub label: String,
    pub sponsor: Option<String>,
    pub logo: Option<String>,
    /// `None` renders as the court's "no fixture" state.
    pub fixture: Option<FixtureCard>,
}

/// Everything a renderer needs for one display refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub generated_at: NaiveDateTime,
    pub state: BoardState,
    pub last_update: Option<NaiveDateTime>,
    pub warning: Option<String>,
    pub courts: Vec<CourtCard>,
}

impl BoardView {
    pub fn has_fixtures(&self) -> bool {
        self.courts.iter().any(|c| c.fixture.is_some())
    }

    pub fn court(&self, court: &CourtIdentity) -> Option<&CourtCard> {
        self.courts.iter().find(|c| &c.court == court)
    }
}

/// Single owner of the current fixture set and the last rendered board.
///
/// Feed refreshes replace the fixture set wholesale; a failed refresh keeps it.
#[derive(Debug)]
pub struct Scoreboard {
    catalog: CourtCatalog,
    options: NormalizeOptions,
    fixtures: Vec<FixtureRecord>,
    loaded: bool,
    last_update: Option<NaiveDateTime>,
    warning: Option<String>,
    view: BoardView,
}

impl Scoreboard {
    pub fn new(catalog: CourtCatalog, options: NormalizeOptions, now: NaiveDateTime) -> Self {
        let mut board = Self {
            catalog,
            options,
            fixtures: Vec::new(),
            loaded: false,
            last_update: None,
            warning: None,
            view: BoardView {
                generated_at: now,
                state: BoardState::Loading,
                last_update: None,
                warning: None,
                courts: Vec::new(),
            },
        };
        board.refresh_display(now);
        board
    }

    pub fn fixtures(&self) -> &[FixtureRecord] {
        &self.fixtures
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    /// Apply the outcome of a feed fetch and re-render.
    #[instrument(level = "info", skip(self, result))]
    pub fn apply_feed(&mut self, result: Result<String, FeedError>, now: NaiveDateTime) -> &BoardView {
        match result {
            Ok(raw) => {
                let fixtures = normalizer::normalize(&raw, &self.options);
                self.report_unknown_courts(&fixtures);
                info!(count = fixtures.len(), "Replaced fixture set");
                self.fixtures = fixtures;
                self.loaded = true;
                self.last_update = Some(now);
                self.warning = None;
            }
            Err(e) => {
                warn!(error = %e, kept = self.fixtures.len(), kind = "feed_unavailable", "Feed refresh failed; keeping previous fixtures");
                self.warning = Some(format!("Error loading matches: {}", e));
            }
        }
        self.refresh_display(now)
    }

    /// Re-run selection against the held fixtures at `now`.
    pub fn refresh_display(&mut self, now: NaiveDateTime) -> &BoardView {
        let selection = selector::select_next(&self.fixtures, &self.catalog, now);
        let courts = selection
            .iter()
            .map(|slot| self.court_card(&slot.court, slot.fixture.as_ref(), now))
            .collect();

        self.view = BoardView {
            generated_at: now,
            state: if self.loaded { BoardState::Ready } else { BoardState::Loading },
            last_update: self.last_update,
            warning: self.warning.clone(),
            courts,
        };
        &self.view
    }

    fn court_card(&self, court: &CourtIdentity, fixture: Option<&FixtureRecord>, now: NaiveDateTime) -> CourtCard {
        let entry = self.catalog.entry(court);
        let fixture = fixture.and_then(|f| {
            MatchStatus::classify(f, now).map(|status| FixtureCard {
                team1: or_tba(&f.team1),
                team2: or_tba(&f.team2),
                time: f.time.clone(),
                status,
                match_id: f.match_id.clone(),
            })
        });
        CourtCard {
            court: court.clone(),
            label: entry.map(|e| e.label.clone()).unwrap_or_else(|| court.name().to_string()),
            sponsor: entry.and_then(|e| e.sponsor.clone()),
            logo: entry.and_then(|e| e.logo.clone()),
            fixture,
        }
    }

    fn report_unknown_courts(&self, fixtures: &[FixtureRecord]) {
        let unknown: BTreeSet<String> = fixtures
            .iter()
            .map(|f| self.catalog.identify(&f.court))
            .filter(|c| !c.is_known())
            .map(|c| c.name().to_string())
            .collect();
        for court in unknown {
            warn!(court = %court, kind = "unknown_court", "Court label matched no configured court");
        }
    }
}

fn or_tba(name: &str) -> String {
    if name.trim().is_empty() { TBA.to_string() } else { name.to_string() }
}

/// Current-time line shown above the board.
pub fn clock_text(now: NaiveDateTime) -> String {
    now.format("%A, %-d %B %Y at %I:%M:%S %P").to_string()
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(warning) = &self.warning {
            writeln!(f, "! {}", warning)?;
        }
        if self.state == BoardState::Loading {
            return writeln!(f, "Loading matches...");
        }
        if !self.has_fixtures() {
            writeln!(f, "No upcoming matches")?;
            writeln!(f, "There are no more matches scheduled for today.")?;
        }
        for card in &self.courts {
            match &card.sponsor {
                Some(sponsor) => write!(f, "{} ({})", card.label, sponsor)?,
                None => write!(f, "{}", card.label)?,
            }
            match &card.fixture {
                Some(fx) => {
                    writeln!(f, "  {} - {}", fx.status.label(), fx.time)?;
                    writeln!(f, "    Home: {}  VS  Away: {}", fx.team1, fx.team2)?;
                    if let Some(id) = &fx.match_id {
                        writeln!(f, "    Match ID: {}", id)?;
                    }
                }
                None => writeln!(f, "  No fixture")?,
            }
        }
        if let Some(at) = self.last_update {
            writeln!(f, "Last updated {}", at.format("%I:%M:%S %p"))?;
        }
        Ok(())
    }
}
