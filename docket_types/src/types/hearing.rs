//! Timeline entries scraped from a case's "Events & Orders" section.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One hearing from a case's register.
///
/// Several fields are inferred from `all_text` rather than tagged on the
/// page, so the raw text is kept for auditing.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Hearing {
    pub date: Option<NaiveDate>,
    /// e.g. "11:00 AM". Not every hearing type records a time.
    pub time: Option<String>,
    pub officer: Option<String>,
    /// True iff the row mentions "appeared" in any casing.
    pub appeared: bool,
    pub hearing_type: Option<String>,
    pub all_text: String,
}

/// A dated post-filing event such as a writ issuance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CaseEvent {
    pub date: NaiveDate,
    pub served_date: Option<NaiveDate>,
    pub served_subject: Option<String>,
    pub returned_date: Option<NaiveDate>,
}

impl CaseEvent {
    /// An event with only a date.
    pub fn on(date: NaiveDate) -> Self {
        CaseEvent {
            date,
            served_date: None,
            served_subject: None,
            returned_date: None,
        }
    }

    pub fn is_returned(&self) -> bool {
        self.returned_date.is_some()
    }
}

/// The writ lifecycle events tracked per case. `None` means the event never
/// appears in the register.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseEvents {
    pub writ: Option<CaseEvent>,
    pub writ_of_possession_service: Option<CaseEvent>,
    pub writ_of_possession_requested: Option<CaseEvent>,
    pub writ_of_possession_sent_to_constable: Option<CaseEvent>,
    pub writ_returned_to_court: Option<CaseEvent>,
}

/// Service of process on one party.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub subject: String,
    pub served_date: Option<NaiveDate>,
}
