//! Reporting periods: the view-level `TimePeriod` selector and the
//! calendar `Month` key under which KPI values are recorded.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// Granularity at which KPI values are read. Not stored per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimePeriod {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl TimePeriod {
    /// Number of months covered by a window of this period.
    pub fn months(&self) -> u32 {
        match self {
            TimePeriod::Monthly => 1,
            TimePeriod::Quarterly => 3,
            TimePeriod::Yearly => 12,
        }
    }

    /// Returns the display label for this period.
    pub fn label(&self) -> &'static str {
        match self {
            TimePeriod::Monthly => "Monthly",
            TimePeriod::Quarterly => "Quarterly",
            TimePeriod::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A calendar month (`YYYY-MM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Creates a month, validating the month number.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::out_of_range("month", 1, 12, i64::from(month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing `ts` (UTC).
    pub fn of_timestamp(ts: &Timestamp) -> Self {
        Self::of_date(ts.as_datetime().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months since year 0, used for window arithmetic.
    fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: (ordinal.rem_euclid(12) + 1) as u32,
        }
    }

    /// The month `n` months before this one.
    pub fn minus_months(&self, n: u32) -> Self {
        Self::from_ordinal(self.ordinal() - i64::from(n))
    }

    /// The month immediately following this one.
    pub fn next(&self) -> Self {
        Self::from_ordinal(self.ordinal() + 1)
    }

    /// First month of the trailing window of `period` ending at `self`.
    pub fn window_start(&self, period: TimePeriod) -> Self {
        self.minus_months(period.months() - 1)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ValidationError::invalid_format("month", "expected YYYY-MM"))?;
        let year = year
            .parse::<i32>()
            .map_err(|_| ValidationError::invalid_format("month", "year is not a number"))?;
        let month = month
            .parse::<u32>()
            .map_err(|_| ValidationError::invalid_format("month", "month is not a number"))?;
        Self::new(year, month)
    }
}

impl TryFrom<String> for Month {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}
