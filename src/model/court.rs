use std::fmt;

use serde::{Deserialize, Serialize};

pub const UNKNOWN_COURT: &str = "Unknown Court";

/// Canonical bucket a raw court label is normalized into.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum CourtIdentity {
    /// A configured venue court, by its canonical id.
    Known(String),
    /// A label that matched no configured prefix; it is its own bucket.
    Raw(String),
}

impl CourtIdentity {
    pub fn name(&self) -> &str {
        match self {
            CourtIdentity::Known(id) | CourtIdentity::Raw(id) => id,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, CourtIdentity::Known(_))
    }
}

impl fmt::Display for CourtIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Display metadata and matching prefix for one configured court.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtEntry {
    pub prefix: String,
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub sponsor: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

impl CourtEntry {
    pub fn new(prefix: &str, id: &str, label: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            id: id.to_string(),
            label: label.to_string(),
            sponsor: None,
            logo: None,
        }
    }
}
