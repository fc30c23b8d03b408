//! Substatus lookup: active/inactive and judgment classification.
//!
//! The table is seed data, not code. An unrecognised substatus is an error
//! rather than a guess, so an operator can extend the table instead of
//! silently miscounting active cases.

use std::collections::HashMap;

use chrono::NaiveDate;
use docket_types::types::Activity;
use serde::Deserialize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("unknown substatus '{0}'")]
    UnknownSubstatus(String),
}

#[derive(thiserror::Error, Debug)]
pub enum StatusTableError {
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("duplicate substatus '{0}'")]
    DuplicateSubstatus(String),
}

/// Coarse grouping of substatuses.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCategory {
    Pending,
    Judgment,
    Dismissed,
    Stayed,
    Abated,
    Closed,
    Transferred,
    Appealed,
}

/// Result of classifying one substatus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub activity: Activity,
    pub category: StatusCategory,
}

impl Classification {
    pub fn is_judgment(&self) -> bool {
        self.category == StatusCategory::Judgment
    }

    /// `true` when this is a judgment dated on or after `cutoff`.
    pub fn judgment_after(&self, disposition_date: NaiveDate, cutoff: NaiveDate) -> bool {
        self.is_judgment() && disposition_date >= cutoff
    }
}

#[derive(Deserialize, Debug)]
struct SubstatusEntry {
    name: String,
    active: bool,
    category: StatusCategory,
}

#[derive(Deserialize, Debug)]
struct StatusFile {
    substatus: Vec<SubstatusEntry>,
}

/// Case-insensitive substatus lookup table.
#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    entries: HashMap<String, Classification>,
    names: Vec<String>,
}

fn key(substatus: &str) -> String {
    crate::html::normalize(substatus).to_lowercase()
}

impl StatusTable {
    /// Parses `[[substatus]]` entries from TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, StatusTableError> {
        let file: StatusFile = toml::from_str(content)?;
        let mut entries = HashMap::with_capacity(file.substatus.len());
        let mut names = Vec::with_capacity(file.substatus.len());
        for entry in file.substatus {
            let classification = Classification {
                activity: if entry.active {
                    Activity::Active
                } else {
                    Activity::Inactive
                },
                category: entry.category,
            };
            if entries.insert(key(&entry.name), classification).is_some() {
                return Err(StatusTableError::DuplicateSubstatus(entry.name));
            }
            names.push(entry.name);
        }
        Ok(StatusTable { entries, names })
    }

    /// The embedded table from `seed_data/substatuses.toml`.
    pub fn load_default() -> Result<Self, StatusTableError> {
        let toml_content = include_str!("../../seed_data/substatuses.toml");
        Self::from_toml_str(toml_content)
    }

    pub fn classify(&self, substatus: &str) -> Result<Classification, StatusError> {
        self.entries
            .get(&key(substatus))
            .copied()
            .ok_or_else(|| StatusError::UnknownSubstatus(substatus.trim().to_string()))
    }

    /// Substatus names as written in the table, in file order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, substatus: &str) -> bool {
        self.entries.contains_key(&key(substatus))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
