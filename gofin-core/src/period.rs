//! Calendar month selection.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar month of a given year (not a rolling 30-day window).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthYear {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthYear {
    /// `None` unless `month` is 1..=12 and `year` is within chrono's date range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let years = NaiveDate::MIN.year()..=NaiveDate::MAX.year();
        ((1..=12).contains(&month) && years.contains(&year)).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// True if `date` falls within this calendar month.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // only a hand-built value outside `new`'s range can miss
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn next(&self) -> Option<Self> {
        self.shift(1)
    }

    pub fn prev(&self) -> Option<Self> {
        self.shift(-1)
    }

    /// Move by `months` (negative goes back), rolling the year over.
    ///
    /// `None` when the result leaves chrono's date range.
    pub fn shift(&self, months: i32) -> Option<Self> {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(months);
        let year = i32::try_from(index.div_euclid(12)).ok()?;
        MonthYear::new(year, index.rem_euclid(12) as u32 + 1)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthYear {
    type Err = String;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (y, m) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{s}'"))?;
        let year: i32 = y.parse().map_err(|_| format!("invalid year in '{s}'"))?;
        let month: u32 = m.parse().map_err(|_| format!("invalid month in '{s}'"))?;
        MonthYear::new(year, month).ok_or_else(|| format!("year or month out of range in '{s}'"))
    }
}
