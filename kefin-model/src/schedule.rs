//! Annually recurring date windows.
//!
//! Seasonal sections carry a `MM-DD` start and end day with no year
//! component. A window whose start falls after its end wraps the year
//! boundary, so `12-20`..`01-05` covers the last days of December and the
//! first days of January.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

const DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A calendar day without a year, ordered January 1st first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u8,
    day: u8,
}

impl MonthDay {
    pub fn new(month: u8, day: u8) -> Result<Self> {
        if !(1..=12).contains(&month)
            || day == 0
            || day > DAYS_IN_MONTH[usize::from(month - 1)]
        {
            return Err(ModelError::InvalidMonthDay(format!(
                "{month:02}-{day:02}"
            )));
        }
        Ok(Self { month, day })
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn from_date(date: NaiveDate) -> Self {
        // chrono guarantees both components are in range.
        Self {
            month: date.month() as u8,
            day: date.day() as u8,
        }
    }
}

impl FromStr for MonthDay {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self> {
        let invalid = || ModelError::InvalidMonthDay(raw.to_string());
        let (month, day) = raw.trim().split_once('-').ok_or_else(invalid)?;
        let month = month.parse::<u8>().map_err(|_| invalid())?;
        let day = day.parse::<u8>().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthDay {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// Inclusive active window, possibly wrapping year-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl Schedule {
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    pub fn wraps_year_end(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, day: MonthDay) -> bool {
        if self.wraps_year_end() {
            day >= self.start || day <= self.end
        } else {
            day >= self.start && day <= self.end
        }
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.contains(MonthDay::from_date(date))
    }
}
