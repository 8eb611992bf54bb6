//! Calendar arithmetic
//!
//! Everything here is total: inputs are expected to come out of the token
//! codec, which already range-checks months, days and years.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Inclusive span of years a calendar may navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSpan {
    pub min: i32,
    pub max: i32,
}

impl Default for YearSpan {
    fn default() -> Self {
        Self { min: 1, max: 9999 }
    }
}

impl YearSpan {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min..=self.max).contains(&year)
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Column (0..=6) of the first day of the month in a week starting on `week_start`.
pub fn first_weekday(year: i32, month: u32, week_start: Weekday) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.clamp(1, 12), 1)
        .map(|d| d.weekday())
        .unwrap_or(Weekday::Mon);
    (first.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

/// Shift a (year, month) pair by `delta` months, carrying into the year.
pub fn add_months(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + (month as i32 - 1) + delta;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// Clamp into the default plausible span (1..=9999).
pub fn clamp_year(year: i32) -> i32 {
    YearSpan::default().clamp(year)
}

/// Weekday `offset` days after `start`, used to order header columns.
pub fn weekday_at(start: Weekday, offset: u32) -> Weekday {
    let mut day = start;
    for _ in 0..offset % 7 {
        day = day.succ();
    }
    day
}
