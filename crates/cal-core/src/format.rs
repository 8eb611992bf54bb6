//! User-selectable date formats

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// DD.MM.YYYY
    #[default]
    DayMonthYear,
    /// YYYY-MM-DD
    YearMonthDay,
    /// MM/DD/YYYY
    MonthDayYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 3] = [
        DateFormat::DayMonthYear,
        DateFormat::YearMonthDay,
        DateFormat::MonthDayYear,
    ];

    fn pattern(self) -> &'static str {
        match self {
            Self::DayMonthYear => "%d.%m.%Y",
            Self::YearMonthDay => "%Y-%m-%d",
            Self::MonthDayYear => "%m/%d/%Y",
        }
    }

    /// Stable identifier, safe to embed in callback payloads
    pub fn code(self) -> &'static str {
        match self {
            Self::DayMonthYear => "dd.mm.yyyy",
            Self::YearMonthDay => "yyyy-mm-dd",
            Self::MonthDayYear => "mm/dd/yyyy",
        }
    }

    pub fn format(self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code().to_ascii_uppercase())
    }
}

impl FromStr for DateFormat {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.code() == wanted)
            .ok_or_else(|| CalendarError::Config(format!("unknown date format: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 5).unwrap();
        assert_eq!(DateFormat::DayMonthYear.format(date), "05.02.2024");
        assert_eq!(DateFormat::YearMonthDay.format(date), "2024-02-05");
        assert_eq!(DateFormat::MonthDayYear.format(date), "02/05/2024");
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("dd.mm.yyyy".parse::<DateFormat>().unwrap(), DateFormat::DayMonthYear);
        assert_eq!("YYYY-MM-DD".parse::<DateFormat>().unwrap(), DateFormat::YearMonthDay);
        assert_eq!("mm/dd/yyyy".parse::<DateFormat>().unwrap(), DateFormat::MonthDayYear);
        assert!("dd/mm/yy".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(DateFormat::MonthDayYear.to_string(), "MM/DD/YYYY");
        assert_eq!(DateFormat::default(), DateFormat::DayMonthYear);
    }
}
