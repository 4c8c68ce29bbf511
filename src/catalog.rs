use crate::model::court::{CourtEntry, CourtIdentity, UNKNOWN_COURT};

/// Ordered list of configured venue courts.
///
/// Order is both the prefix priority used by [`CourtCatalog::identify`] and the
/// order courts are shown on the board.
#[derive(Clone, Debug)]
pub struct CourtCatalog {
    entries: Vec<CourtEntry>,
}

impl CourtCatalog {
    pub fn new(entries: Vec<CourtEntry>) -> Self {
        Self { entries }
    }

    /// The Snakepit's four indoor courts plus Beaton Park.
    pub fn venue_default() -> Self {
        Self::new(vec![
            CourtEntry::new("The Snakepit-1", "The Snakepit-1", "Court 1"),
            CourtEntry::new("The Snakepit-2", "The Snakepit-2", "Court 2"),
            CourtEntry::new("The Snakepit-3", "The Snakepit-3", "Court 3"),
            CourtEntry::new("The Snakepit-4", "The Snakepit-4", "Court 4"),
            CourtEntry::new("Beaton Park", "Beaton Park", "Beaton Park"),
        ])
    }

    pub fn entries(&self) -> &[CourtEntry] {
        &self.entries
    }

    /// Identities of every configured court, in display order.
    pub fn expected(&self) -> impl Iterator<Item = CourtIdentity> + '_ {
        self.entries.iter().map(|e| CourtIdentity::Known(e.id.clone()))
    }

    pub fn entry(&self, court: &CourtIdentity) -> Option<&CourtEntry> {
        match court {
            CourtIdentity::Known(id) => self.entries.iter().find(|e| &e.id == id),
            CourtIdentity::Raw(_) => None,
        }
    }

    /// Resolve a raw venue label to its court bucket.
    pub fn identify(&self, raw: &str) -> CourtIdentity {
        let label = raw.trim();
        if label.is_empty() {
            return CourtIdentity::Raw(UNKNOWN_COURT.to_string());
        }

        for entry in &self.entries {
            if starts_with_ignore_case(label, &entry.prefix) {
                return CourtIdentity::Known(entry.id.clone());
            }
        }

        CourtIdentity::Raw(label.to_string())
    }
}

impl Default for CourtCatalog {
    fn default() -> Self {
        Self::venue_default()
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}
