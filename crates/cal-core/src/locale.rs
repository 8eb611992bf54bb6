//! Localized strings for calendar keyboards
//!
//! Tables are plain data; hosts can deserialize their own and register them
//! in a [`Locales`] next to the built-in English and Russian ones.

use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Language used when a code has no table
pub const DEFAULT_LANGUAGE: &str = "en";

/// Button captions and message templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captions {
    pub select_year: String,
    pub select_month: String,
    pub select_day: String,
    pub prev: String,
    pub next: String,
    pub today: String,
    pub cancel: String,
    pub back: String,

    pub tomorrow: String,
    pub next_week: String,
    pub in_two_weeks: String,
    pub next_month: String,
    pub in_three_months: String,
    pub start_of_month: String,
    pub end_of_month: String,

    /// `{date}` is replaced with the lower bound
    pub date_too_early: String,
    /// `{date}` is replaced with the upper bound
    pub date_too_late: String,

    pub label_date: String,
    pub label_weekday: String,
    pub label_when: String,
    pub label_day_of_year: String,
    pub label_week: String,
    pub relative_yesterday: String,
    /// `{n}` is replaced with the day count
    pub relative_in_days: String,
    /// `{n}` is replaced with the day count
    pub relative_days_ago: String,
}

/// One language's table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    pub months: [String; 12],
    /// Abbreviations, Monday first
    pub weekdays: [String; 7],
    /// Full names, Monday first
    pub weekdays_full: [String; 7],
    pub captions: Captions,
}

impl Localization {
    pub fn english() -> Self {
        Self {
            months: [
                "January", "February", "March", "April", "May", "June", "July", "August",
                "September", "October", "November", "December",
            ]
            .map(String::from),
            weekdays: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].map(String::from),
            weekdays_full: [
                "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
            ]
            .map(String::from),
            captions: Captions {
                select_year: "Select year".into(),
                select_month: "Select month".into(),
                select_day: "Select day".into(),
                prev: "<<".into(),
                next: ">>".into(),
                today: "Today".into(),
                cancel: "Cancel".into(),
                back: "Back".into(),
                tomorrow: "Tomorrow".into(),
                next_week: "Next week".into(),
                in_two_weeks: "In 2 weeks".into(),
                next_month: "Next month".into(),
                in_three_months: "In 3 months".into(),
                start_of_month: "Start of month".into(),
                end_of_month: "End of month".into(),
                date_too_early: "The date has to be later than {date}".into(),
                date_too_late: "The date has to be before {date}".into(),
                label_date: "Date".into(),
                label_weekday: "Weekday".into(),
                label_when: "When".into(),
                label_day_of_year: "Day of year".into(),
                label_week: "Week of year".into(),
                relative_yesterday: "yesterday".into(),
                relative_in_days: "in {n} days".into(),
                relative_days_ago: "{n} days ago".into(),
            },
        }
    }

    pub fn russian() -> Self {
        Self {
            months: [
                "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август",
                "Сентябрь", "Октябрь", "Ноябрь", "Декабрь",
            ]
            .map(String::from),
            weekdays: ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"].map(String::from),
            weekdays_full: [
                "понедельник",
                "вторник",
                "среда",
                "четверг",
                "пятница",
                "суббота",
                "воскресенье",
            ]
            .map(String::from),
            captions: Captions {
                select_year: "Выберите год".into(),
                select_month: "Выберите месяц".into(),
                select_day: "Выберите день".into(),
                prev: "<<".into(),
                next: ">>".into(),
                today: "Сегодня".into(),
                cancel: "Отмена".into(),
                back: "Назад".into(),
                tomorrow: "Завтра".into(),
                next_week: "Через неделю".into(),
                in_two_weeks: "Через 2 недели".into(),
                next_month: "Через месяц".into(),
                in_three_months: "Через 3 месяца".into(),
                start_of_month: "Начало месяца".into(),
                end_of_month: "Конец месяца".into(),
                date_too_early: "Дата должна быть позже {date}".into(),
                date_too_late: "Дата должна быть раньше {date}".into(),
                label_date: "Дата".into(),
                label_weekday: "День недели".into(),
                label_when: "Когда".into(),
                label_day_of_year: "День года".into(),
                label_week: "Неделя года".into(),
                relative_yesterday: "вчера".into(),
                relative_in_days: "через {n} дн.".into(),
                relative_days_ago: "{n} дн. назад".into(),
            },
        }
    }

    /// Month name for 1..=12; other values are echoed back as digits.
    pub fn month_name(&self, month: u32) -> String {
        match month {
            1..=12 => self.months[month as usize - 1].clone(),
            _ => month.to_string(),
        }
    }

    pub fn weekday_short(&self, day: Weekday) -> &str {
        &self.weekdays[day.num_days_from_monday() as usize]
    }

    pub fn weekday_full(&self, day: Weekday) -> &str {
        &self.weekdays_full[day.num_days_from_monday() as usize]
    }

    fn check(&self) -> Result<()> {
        let blank = self
            .months
            .iter()
            .chain(&self.weekdays)
            .chain(&self.weekdays_full)
            .any(|s| s.trim().is_empty());
        if blank {
            return Err(CalendarError::Config(
                "localization has blank month or weekday names".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Localization {
    fn default() -> Self {
        Self::english()
    }
}

/// Registry of localization tables keyed by language code
#[derive(Debug, Clone)]
pub struct Locales {
    tables: HashMap<String, Localization>,
    fallback: Localization,
}

impl Default for Locales {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Locales {
    /// English and Russian tables
    pub fn builtin() -> Self {
        let mut tables = HashMap::new();
        tables.insert("en".to_string(), Localization::english());
        tables.insert("ru".to_string(), Localization::russian());
        Self {
            tables,
            fallback: Localization::english(),
        }
    }

    /// Register or replace a table.
    pub fn insert(&mut self, code: &str, table: Localization) -> Result<()> {
        table.check()?;
        self.tables.insert(normalize(code), table);
        Ok(())
    }

    /// Table for `code` (`ru`, `ru_RU`, `en-US`, ...), English if unknown.
    pub fn lookup(&self, code: &str) -> &Localization {
        self.tables.get(&normalize(code)).unwrap_or(&self.fallback)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.tables.contains_key(&normalize(code))
    }

    pub fn available_languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

/// Bare lowercase language code: `ru_RU`, `RU` and `ru-RU.UTF-8` all become `ru`.
pub fn normalize(code: &str) -> String {
    code.split(['_', '-', '.'])
        .next()
        .unwrap_or(DEFAULT_LANGUAGE)
        .trim()
        .to_ascii_lowercase()
}

/// Substitute a `{name}` placeholder in a caption template.
pub fn fill(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{name}}}"), value)
}
