//! Calendar widget configuration

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::locale::{DEFAULT_LANGUAGE, Localization};
use crate::math::YearSpan;

/// Per-widget configuration, immutable for the lifetime of a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Language code used to pick the localization table
    pub locale: String,
    /// Earliest selectable date (inclusive)
    pub min_date: Option<NaiveDate>,
    /// Latest selectable date (inclusive)
    pub max_date: Option<NaiveDate>,
    /// Overrides the localized "Cancel" caption
    pub cancel_caption: Option<String>,
    /// Overrides the localized "Today" caption
    pub today_caption: Option<String>,
    /// Report range violations as a blocking alert instead of a toast
    pub show_alerts: bool,
    /// First column of the day grid
    pub week_start: Weekday,
    /// Years the calendar may navigate to
    pub year_span: YearSpan,
    /// Years shown on one dialog year page
    pub years_per_page: u32,
    /// Columns of the dialog month grid (3 or 4)
    pub month_columns: u32,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LANGUAGE.to_string(),
            min_date: None,
            max_date: None,
            cancel_caption: None,
            today_caption: None,
            show_alerts: false,
            week_start: Weekday::Mon,
            year_span: YearSpan::default(),
            years_per_page: 16,
            month_columns: 3,
        }
    }
}

impl CalendarConfig {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Default::default()
        }
    }

    /// Set the inclusive range of selectable dates
    pub fn with_date_range(mut self, min_date: NaiveDate, max_date: NaiveDate) -> Self {
        self.min_date = Some(min_date);
        self.max_date = Some(max_date);
        self
    }

    pub fn with_min_date(mut self, min_date: NaiveDate) -> Self {
        self.min_date = Some(min_date);
        self
    }

    pub fn with_max_date(mut self, max_date: NaiveDate) -> Self {
        self.max_date = Some(max_date);
        self
    }

    pub fn with_cancel_caption(mut self, caption: impl Into<String>) -> Self {
        self.cancel_caption = Some(caption.into());
        self
    }

    pub fn with_today_caption(mut self, caption: impl Into<String>) -> Self {
        self.today_caption = Some(caption.into());
        self
    }

    pub fn with_show_alerts(mut self, show_alerts: bool) -> Self {
        self.show_alerts = show_alerts;
        self
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_year_span(mut self, span: YearSpan) -> Self {
        self.year_span = span;
        self
    }

    pub fn with_years_per_page(mut self, years: u32) -> Self {
        self.years_per_page = years;
        self
    }

    pub fn with_month_columns(mut self, columns: u32) -> Self {
        self.month_columns = columns;
        self
    }

    /// Reject configurations the navigators can not honour.
    pub fn validate(&self) -> Result<()> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(CalendarError::Config(format!(
                    "min_date {min} is after max_date {max}"
                )));
            }
        }
        if self.year_span.is_empty() {
            return Err(CalendarError::Config(format!(
                "empty year span {}..={}",
                self.year_span.min, self.year_span.max
            )));
        }
        if self.year_span.min < 1 || self.year_span.max > 9999 {
            return Err(CalendarError::Config(
                "year span must stay within 1..=9999".to_string(),
            ));
        }
        if !(1..=40).contains(&self.years_per_page) {
            return Err(CalendarError::Config(format!(
                "years_per_page must be between 1 and 40, got {}",
                self.years_per_page
            )));
        }
        if !matches!(self.month_columns, 3 | 4) {
            return Err(CalendarError::Config(format!(
                "month_columns must be 3 or 4, got {}",
                self.month_columns
            )));
        }
        Ok(())
    }

    pub fn cancel_label<'a>(&'a self, l10n: &'a Localization) -> &'a str {
        self.cancel_caption.as_deref().unwrap_or(&l10n.captions.cancel)
    }

    pub fn today_label<'a>(&'a self, l10n: &'a Localization) -> &'a str {
        self.today_caption.as_deref().unwrap_or(&l10n.captions.today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = CalendarConfig::default();
        assert_eq!(config.locale, "en");
        assert_eq!(config.week_start, Weekday::Mon);
        assert_eq!(config.years_per_page, 16);
        assert_eq!(config.month_columns, 3);
        assert!(!config.show_alerts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = CalendarConfig::new("ru")
            .with_date_range(date(2022, 1, 1), date(2025, 12, 31))
            .with_cancel_caption("Stop")
            .with_show_alerts(true);
        assert_eq!(config.locale, "ru");
        assert_eq!(config.min_date, Some(date(2022, 1, 1)));
        assert_eq!(config.max_date, Some(date(2025, 12, 31)));
        assert!(config.show_alerts);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = CalendarConfig::default().with_date_range(date(2025, 1, 1), date(2024, 1, 1));
        assert!(matches!(config.validate(), Err(CalendarError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_layout() {
        assert!(CalendarConfig::default().with_month_columns(5).validate().is_err());
        assert!(CalendarConfig::default().with_years_per_page(0).validate().is_err());
        assert!(
            CalendarConfig::default()
                .with_year_span(YearSpan::new(2030, 2020))
                .validate()
                .is_err()
        );
        assert!(
            CalendarConfig::default()
                .with_year_span(YearSpan::new(0, 2020))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_caption_overrides() {
        let l10n = Localization::english();
        let config = CalendarConfig::default();
        assert_eq!(config.cancel_label(&l10n), "Cancel");
        assert_eq!(config.today_label(&l10n), "Today");

        let config = config.with_cancel_caption("Close").with_today_caption("Now");
        assert_eq!(config.cancel_label(&l10n), "Close");
        assert_eq!(config.today_label(&l10n), "Now");
    }

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
locale = "ru"
min_date = "2022-01-01"
max_date = "2025-12-31"
show_alerts = true
week_start = "Sun"

[year_span]
min = 1990
max = 2030
"#;
        let config: CalendarConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.locale, "ru");
        assert_eq!(config.min_date, Some(date(2022, 1, 1)));
        assert_eq!(config.week_start, Weekday::Sun);
        assert_eq!(config.year_span, YearSpan::new(1990, 2030));
        // untouched fields keep their defaults
        assert_eq!(config.years_per_page, 16);
        assert!(config.validate().is_ok());
    }
}
