//! The canonical case record assembled from a register-of-actions page.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CaseEvents, County, Disposition, Hearing, Service};

/// Attorney name mapped to the parties that attorney represents.
pub type AttorneyMap = BTreeMap<String, Vec<String>>;

/// One court filing, keyed by its case number.
///
/// Text fields that the page may omit are `Option`s; `None` means the
/// locator found nothing, which is distinct from an empty value on the page.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// Stable unique key (e.g. "J1-CV-20-001590"). Never empty.
    pub case_number: String,

    pub county: County,

    /// Free-text caption, e.g. "XYZ Group LLC vs. John G Doe".
    pub style: Option<String>,

    /// First listed plaintiff.
    pub plaintiff: Option<String>,

    /// Defendants in document order.
    pub defendants: Vec<String>,

    pub precinct: Option<Precinct>,

    /// Substatus as shown on the search-result page.
    pub status: Option<String>,

    pub case_type: Option<String>,

    pub register_url: Option<String>,

    pub date_filed: Option<NaiveDate>,

    pub plaintiff_zip: Option<String>,

    pub defendant_zip: Option<String>,

    pub attorneys_for_plaintiffs: AttorneyMap,

    pub attorneys_for_defendants: AttorneyMap,

    pub disposition: Disposition,

    /// Hearings in document order. Not guaranteed to be chronological.
    pub hearings: Vec<Hearing>,

    pub events: CaseEvents,

    /// Every "Served" record on the page, in document order.
    pub services: Vec<Service>,

    pub alternative_service_dates: Vec<NaiveDate>,

    /// `None` when the substatus is missing or not in the lookup table.
    pub activity: Option<Activity>,

    /// `None` when there is no disposition date or the substatus is unknown.
    pub judgment_after_moratorium: Option<bool>,

    /// Only published by some counties.
    pub defendant_demographics: Demographics,
}

impl Case {
    /// An otherwise empty record for `case_number`.
    pub fn new(case_number: impl Into<String>, county: County) -> Self {
        Case {
            case_number: case_number.into(),
            county,
            style: None,
            plaintiff: None,
            defendants: Vec::new(),
            precinct: None,
            status: None,
            case_type: None,
            register_url: None,
            date_filed: None,
            plaintiff_zip: None,
            defendant_zip: None,
            attorneys_for_plaintiffs: AttorneyMap::new(),
            attorneys_for_defendants: AttorneyMap::new(),
            disposition: Disposition::default(),
            hearings: Vec::new(),
            events: CaseEvents::default(),
            services: Vec::new(),
            alternative_service_dates: Vec::new(),
            activity: None,
            judgment_after_moratorium: None,
            defendant_demographics: Demographics::default(),
        }
    }

    /// Defendants in the legacy semicolon-joined form.
    pub fn defendants_joined(&self) -> String {
        self.defendants.join("; ")
    }
}

/// Justice-of-the-peace precinct. Some counties subdivide precincts into places.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precinct {
    pub number: u8,
    pub place: Option<u8>,
}

impl Precinct {
    pub fn new(number: u8) -> Self {
        Precinct { number, place: None }
    }

    pub fn with_place(number: u8, place: u8) -> Self {
        Precinct {
            number,
            place: Some(place),
        }
    }
}

impl fmt::Display for Precinct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.place {
            Some(place) => write!(f, "{}.{}", self.number, place),
            None => write!(f, "{}", self.number),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Activity {
    Active,
    Inactive,
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Activity::Active => write!(f, "Active"),
            Activity::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Defendant details published alongside the party block.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Demographics {
    pub address: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
}
