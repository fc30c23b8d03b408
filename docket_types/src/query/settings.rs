use super::common::{form_date, DateRange, Query};

/// Court calendar search by setting date.
///
/// Calendars are queried one day at a time, so these never need splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsQuery {
    pub range: DateRange,
}

impl SettingsQuery {
    pub fn new(range: DateRange) -> Self {
        SettingsQuery { range }
    }

    /// One single-day query per day in `range`.
    pub fn daily(range: DateRange) -> Vec<SettingsQuery> {
        range
            .iter_days()
            .map(|day| SettingsQuery::new(DateRange::single_day(day)))
            .collect()
    }
}

impl Query for SettingsQuery {
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("DateSettingOnAfter", form_date(self.range.after)),
            ("DateSettingOnBefore", form_date(self.range.before)),
        ]
    }

    fn range(&self) -> DateRange {
        self.range
    }

    fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }
}
