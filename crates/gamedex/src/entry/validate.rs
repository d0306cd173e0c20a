use serde::Serialize;

use super::{Entry, inactive_remainder};

/// Fields every entry must carry.
pub const ESSENTIAL_FIELDS: [&str; 2] = ["home", "state"];

/// A problem with an entry that does not prevent parsing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum EntryIssue {
    /// An essential field is absent.
    MissingField(String),
    /// The state names neither or both of `beta` and `mature`.
    InvalidState(String),
    /// `inactive since` is not followed by a year.
    InvalidInactiveYear(String),
    /// A field occurs more than once; the first occurrence is used.
    DuplicateField(String),
}

impl std::fmt::Display for EntryIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryIssue::MissingField(name) => write!(f, "essential field \"{}\" missing", name),
            EntryIssue::InvalidState(raw) => {
                write!(f, "state must be one of <beta, mature>, found \"{}\"", raw)
            }
            EntryIssue::InvalidInactiveYear(value) => {
                write!(f, "\"{}\" does not name a year", value)
            }
            EntryIssue::DuplicateField(name) => write!(f, "field \"{}\" present more than once", name),
        }
    }
}

pub(super) fn validate(entry: &Entry) -> Vec<EntryIssue> {
    let mut issues = Vec::new();

    for name in ESSENTIAL_FIELDS {
        if !entry.has(name) {
            issues.push(EntryIssue::MissingField(name.to_string()));
        }
    }

    if let Some(state) = entry.field("state") {
        if entry.is_beta() == entry.is_mature() {
            issues.push(EntryIssue::InvalidState(state.raw.clone()));
        }

        for value in &state.values {
            if let Some(year) = inactive_remainder(value)
                && year.parse::<i32>().is_err()
            {
                issues.push(EntryIssue::InvalidInactiveYear(value.clone()));
            }
        }
    }

    issues
}
