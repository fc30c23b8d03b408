//! Shared query infrastructure: the [`Query`] trait, the [`DateRange`] both
//! search forms filter on, and the range splitter used when a portal caps
//! its result set.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Trait implemented by all search-form builders. Provides the form fields
/// to submit and access to the date range so an orchestrator can narrow a
/// query that came back truncated.
pub trait Query {
    /// Form field name/value pairs, in submission order.
    fn form_fields(&self) -> Vec<(&'static str, String)>;

    /// The date range this query filters on.
    fn range(&self) -> DateRange;

    /// Returns a copy of this query restricted to `range`.
    fn with_range(self, range: DateRange) -> Self
    where
        Self: Sized;

    /// Case-number search value, for queries that have one.
    fn search_value(&self) -> Option<&str> {
        None
    }

    /// Splits this query into two queries covering each half of its range.
    fn split(&self) -> Result<(Self, Self), Error>
    where
        Self: Sized + Clone,
    {
        let (first, second) = self.range().split()?;
        Ok((self.clone().with_range(first), self.clone().with_range(second)))
    }
}

/// Inclusive date range `[after, before]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub after: NaiveDate,
    pub before: NaiveDate,
}

impl DateRange {
    /// Fails if `after` is later than `before`. A single-day range is valid.
    pub fn new(after: NaiveDate, before: NaiveDate) -> Result<Self, Error> {
        if after > before {
            return Err(Error::InvalidRange { after, before });
        }
        Ok(DateRange { after, before })
    }

    pub fn single_day(day: NaiveDate) -> Self {
        DateRange {
            after: day,
            before: day,
        }
    }

    /// Number of days covered, counting both ends.
    pub fn days(&self) -> u64 {
        (self.before - self.after).num_days() as u64 + 1
    }

    pub fn is_single_day(&self) -> bool {
        self.after == self.before
    }

    /// Bisects the range into two contiguous halves.
    pub fn split(&self) -> Result<(DateRange, DateRange), Error> {
        let (end_first, start_second) = split_date_range(self.after, self.before)?;
        Ok((
            DateRange {
                after: self.after,
                before: end_first,
            },
            DateRange {
                after: start_second,
                before: self.before,
            },
        ))
    }

    /// Calendar years touched by the range, ascending.
    pub fn years(&self) -> Vec<i32> {
        (self.after.year()..=self.before.year()).collect()
    }

    /// Every day in the range, in order.
    pub fn iter_days(&self) -> impl Iterator<Item = NaiveDate> {
        let before = self.before;
        self.after.iter_days().take_while(move |day| *day <= before)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.after, self.before)
    }
}

/// Returns `(end_of_first_half, start_of_second_half)` for the inclusive
/// range `[after, before]`.
///
/// The inclusive day count is halved by integer division; the first half
/// gets that many days. Fails when the range is a single day (it cannot be
/// narrowed further) or is inverted.
pub fn split_date_range(after: NaiveDate, before: NaiveDate) -> Result<(NaiveDate, NaiveDate), Error> {
    if after >= before {
        return Err(Error::InvalidRange { after, before });
    }
    let days = (before - after).num_days() as u64 + 1;
    let half = days / 2;
    let end_first = after
        .checked_add_days(Days::new(half - 1))
        .ok_or(Error::InvalidRange { after, before })?;
    let start_second = end_first
        .succ_opt()
        .ok_or(Error::InvalidRange { after, before })?;
    Ok((end_first, start_second))
}

/// Portal date format: `M/D/YYYY` without leading zeros.
pub(crate) fn form_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}
