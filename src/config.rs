use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::CourtCatalog;
use crate::error::ConfigError;
use crate::model::court::CourtEntry;
use crate::normalizer::{ColumnNames, DateOrder, NormalizeOptions};

pub const CONFIG_PATH_VAR: &str = "SCOREBOARD_CONFIG";
pub const FEED_URL_VAR: &str = "SCOREBOARD_FEED_URL";

const DEFAULT_FEED_URL: &str = "https://gameviewstorage.blob.core.windows.net/csvfiles/todays_matches.csv";

/// Where the fixture table comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedLocation {
    Url(String),
    Path(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intervals {
    pub clock_secs: u64,
    pub display_secs: u64,
    pub feed_secs: u64,
}

impl Default for Intervals {
    fn default() -> Self {
        Self { clock_secs: 1, display_secs: 60, feed_secs: 120 }
    }
}

impl Intervals {
    pub fn clock(&self) -> Duration {
        Duration::from_secs(self.clock_secs)
    }

    pub fn display(&self) -> Duration {
        Duration::from_secs(self.display_secs)
    }

    pub fn feed(&self) -> Duration {
        Duration::from_secs(self.feed_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    pub feed: FeedLocation,
    pub feed_timeout_secs: u64,
    pub delimiter: char,
    pub date_order: DateOrder,
    pub columns: ColumnNames,
    /// IANA zone of the venue; the board runs on its wall clock.
    pub timezone: String,
    pub intervals: Intervals,
    pub courts: Vec<CourtEntry>,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            feed: FeedLocation::Url(DEFAULT_FEED_URL.to_string()),
            feed_timeout_secs: 10,
            delimiter: ',',
            date_order: DateOrder::DayFirst,
            columns: ColumnNames::default(),
            timezone: "Australia/Sydney".to_string(),
            intervals: Intervals::default(),
            courts: CourtCatalog::venue_default().entries().to_vec(),
        }
    }
}

impl ScoreboardConfig {
    pub fn from_json(body: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(body)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let body = std::fs::read_to_string(path)?;
        Self::from_json(&body)
    }

    /// Load from the file named by `SCOREBOARD_CONFIG` (defaults otherwise),
    /// then apply a `SCOREBOARD_FEED_URL` override.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var(CONFIG_PATH_VAR) {
            Ok(path) => {
                info!(path = %path, "Loading scoreboard config");
                Self::from_file(Path::new(&path))?
            }
            Err(_) => Self::default(),
        };
        if let Ok(url) = env::var(FEED_URL_VAR) {
            config.feed = FeedLocation::Url(url);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.delimiter.is_ascii() || self.delimiter == '"' {
            return Err(ConfigError::Invalid(format!(
                "delimiter must be a single ASCII character other than '\"', got {:?}",
                self.delimiter
            )));
        }
        let i = &self.intervals;
        if i.clock_secs == 0 || i.display_secs == 0 || i.feed_secs == 0 {
            return Err(ConfigError::Invalid("refresh intervals must be greater than zero".to_string()));
        }
        self.tz()?;
        if let Some(entry) = self.courts.iter().find(|c| c.prefix.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!("court {} has an empty prefix", entry.id)));
        }
        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| ConfigError::Invalid(format!("unknown timezone {}: {}", self.timezone, e)))
    }

    pub fn catalog(&self) -> CourtCatalog {
        CourtCatalog::new(self.courts.clone())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            // validate() guarantees an ASCII delimiter.
            delimiter: self.delimiter as u8,
            date_order: self.date_order,
            columns: self.columns.clone(),
        }
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }
}
