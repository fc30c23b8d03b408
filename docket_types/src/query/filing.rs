use crate::types::County;

use super::common::{form_date, DateRange, Query};

/// Filing-date search for one case-number prefix.
///
/// `case_pattern` is the portal's wildcard search value, e.g. `J1-CV-2020*`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilingQuery {
    pub range: DateRange,
    pub case_pattern: String,
}

impl FilingQuery {
    pub fn new(range: DateRange, case_pattern: impl Into<String>) -> Self {
        FilingQuery {
            range,
            case_pattern: case_pattern.into(),
        }
    }

    /// One query per case-number prefix per calendar year touched by `range`.
    ///
    /// Every query keeps the full range; the year only narrows the case
    /// number pattern.
    pub fn for_county(county: County, range: DateRange) -> Vec<FilingQuery> {
        let mut queries = Vec::new();
        for year in range.years() {
            for prefix in county.case_number_prefixes() {
                queries.push(FilingQuery::new(range, county.filing_pattern(prefix, year)));
            }
        }
        queries
    }
}

impl Query for FilingQuery {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("DateFiledOnAfter", form_date(self.range.after)),
            ("DateFiledOnBefore", form_date(self.range.before)),
            ("CaseSearchValue", self.case_pattern.clone()),
        ]
    }

    fn range(&self) -> DateRange {
        self.range
    }

    fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    fn search_value(&self) -> Option<&str> {
        Some(&self.case_pattern)
    }
}
