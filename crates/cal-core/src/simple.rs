//! Single-screen month calendar

use chrono::{Datelike, NaiveDate};

use crate::config::CalendarConfig;
use crate::error::{DecodeError, Result};
use crate::locale::{Locales, Localization};
use crate::math::{YearSpan, add_months};
use crate::navigator::{Navigator, Step, expect_kind, unsupported};
use crate::render::{Grid, Render};
use crate::token::{Action, CallbackToken, Screen, WidgetKind};

/// The only state of the simple calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
}

impl MonthView {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Nearest month inside `span`: January of the first year or December
    /// of the last one when `self` lies outside.
    pub fn within(self, span: YearSpan) -> Self {
        if self.year < span.min {
            Self { year: span.min, month: 1 }
        } else if self.year > span.max {
            Self { year: span.max, month: 12 }
        } else {
            self
        }
    }

    /// Adjacent month, or `self` when the move would leave the year span.
    fn shifted(self, delta: i32, config: &CalendarConfig) -> Self {
        let (year, month) = add_months(self.year, self.month, delta);
        if config.year_span.contains(year) {
            Self { year, month }
        } else {
            self
        }
    }
}

/// Month grid with previous/next arrows, "today" and "cancel"
#[derive(Debug, Clone, Copy)]
pub struct SimpleCalendar<'a> {
    config: &'a CalendarConfig,
    l10n: &'a Localization,
}

impl<'a> SimpleCalendar<'a> {
    pub fn new(config: &'a CalendarConfig, locales: &'a Locales) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            l10n: locales.lookup(&config.locale),
        })
    }

    /// Opening state: `initial` (clamped into range) or the month of `today`.
    pub fn initial_view(&self, initial: Option<(i32, u32)>, today: NaiveDate) -> MonthView {
        let view = match initial {
            Some((year, month)) => MonthView {
                year,
                month: month.clamp(1, 12),
            },
            None => MonthView::of(today),
        };
        view.within(self.config.year_span)
    }

    pub fn start(&self, initial: Option<(i32, u32)>, today: NaiveDate) -> Grid {
        self.initial_view(initial, today)
            .render(self.config, self.l10n)
    }
}

impl Navigator for SimpleCalendar<'_> {
    type State = MonthView;

    fn kind(&self) -> WidgetKind {
        WidgetKind::Simple
    }

    fn config(&self) -> &CalendarConfig {
        self.config
    }

    fn localization(&self) -> &Localization {
        self.l10n
    }

    fn step(&self, token: &CallbackToken, today: NaiveDate) -> Result<Step<MonthView>> {
        expect_kind(token, WidgetKind::Simple)?;
        if token.screen != Screen::MonthView {
            return Err(unsupported(token));
        }

        match token.action {
            Action::Cancel => return Ok(Step::Cancel),
            Action::Today => {
                return Ok(Step::Show(MonthView::of(today).within(self.config.year_span)));
            }
            _ => {}
        }

        let (Some(year), Some(month)) = (token.year, token.month) else {
            return Err(unsupported(token));
        };
        let view = MonthView { year, month };

        Ok(match token.action {
            Action::Ignore => Step::Show(view),
            Action::PrevMonth => Step::Show(view.shifted(-1, self.config)),
            Action::NextMonth => Step::Show(view.shifted(1, self.config)),
            Action::SelectDay => {
                let day = token.day.ok_or_else(|| unsupported(token))?;
                let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DecodeError::Range)?;
                Step::Select(date)
            }
            _ => return Err(unsupported(token)),
        })
    }
}
