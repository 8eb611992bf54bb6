//! One-tap relative dates and human readable date summaries

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::format::DateFormat;
use crate::locale::{Localization, fill};
use crate::math::{add_months, days_in_month};

/// Shortcuts offered next to the full calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickDate {
    Today,
    Tomorrow,
    NextWeek,
    InTwoWeeks,
    NextMonth,
    InThreeMonths,
    StartOfMonth,
    EndOfMonth,
}

impl QuickDate {
    pub const ALL: [QuickDate; 8] = [
        QuickDate::Today,
        QuickDate::Tomorrow,
        QuickDate::NextWeek,
        QuickDate::InTwoWeeks,
        QuickDate::NextMonth,
        QuickDate::InThreeMonths,
        QuickDate::StartOfMonth,
        QuickDate::EndOfMonth,
    ];

    /// Concrete date relative to `today`.
    ///
    /// Month shifts keep the day of month where possible and otherwise land
    /// on the last day of the target month (31 Jan + 1 month = 29 Feb 2024).
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Today => today,
            Self::Tomorrow => today + Duration::days(1),
            Self::NextWeek => today + Duration::weeks(1),
            Self::InTwoWeeks => today + Duration::weeks(2),
            Self::NextMonth => shift_months(today, 1),
            Self::InThreeMonths => shift_months(today, 3),
            Self::StartOfMonth => today.with_day(1).unwrap_or(today),
            Self::EndOfMonth => today
                .with_day(days_in_month(today.year(), today.month()))
                .unwrap_or(today),
        }
    }

    pub fn label(self, l10n: &Localization) -> &str {
        let captions = &l10n.captions;
        match self {
            Self::Today => &captions.today,
            Self::Tomorrow => &captions.tomorrow,
            Self::NextWeek => &captions.next_week,
            Self::InTwoWeeks => &captions.in_two_weeks,
            Self::NextMonth => &captions.next_month,
            Self::InThreeMonths => &captions.in_three_months,
            Self::StartOfMonth => &captions.start_of_month,
            Self::EndOfMonth => &captions.end_of_month,
        }
    }

    /// Reverse of [`QuickDate::label`]
    pub fn from_label(label: &str, l10n: &Localization) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|quick| quick.label(l10n) == label)
    }
}

fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let (year, month) = add_months(date.year(), date.month(), delta);
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Facts about a date, relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateDescription {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// Negative for past dates
    pub days_until: i64,
    pub day_of_year: u32,
    pub iso_week: u32,
}

impl DateDescription {
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.weekday(),
            days_until: (date - today).num_days(),
            day_of_year: date.ordinal(),
            iso_week: date.iso_week().week(),
        }
    }

    pub fn relative(&self, l10n: &Localization) -> String {
        let captions = &l10n.captions;
        match self.days_until {
            0 => captions.today.to_lowercase(),
            1 => captions.tomorrow.to_lowercase(),
            -1 => captions.relative_yesterday.clone(),
            n if n > 0 => fill(&captions.relative_in_days, "n", &n.to_string()),
            n => fill(&captions.relative_days_ago, "n", &(-n).to_string()),
        }
    }

    /// Multi-line summary for a chat message
    pub fn render(&self, l10n: &Localization, format: DateFormat) -> String {
        let captions = &l10n.captions;
        [
            format!("📅 {}: {}", captions.label_date, format.format(self.date)),
            format!("📆 {}: {}", captions.label_weekday, l10n.weekday_full(self.weekday)),
            format!("⏳ {}: {}", captions.label_when, self.relative(l10n)),
            format!("📊 {}: {}", captions.label_day_of_year, self.day_of_year),
            format!("📈 {}: {}", captions.label_week, self.iso_week),
        ]
        .join("\n")
    }
}
