//! Three-screen calendar: year page, month grid, day grid

use chrono::{Datelike, NaiveDate};

use crate::config::CalendarConfig;
use crate::error::{DecodeError, Result};
use crate::locale::{Locales, Localization};
use crate::math::add_months;
use crate::navigator::{Navigator, Step, expect_kind, unsupported};
use crate::render::{Grid, Render};
use crate::token::{Action, CallbackToken, Screen, WidgetKind};

/// Screens of the dialog calendar; `Back` always leads to the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogScreen {
    YearPage { page: u32 },
    MonthGrid { year: i32 },
    DayGrid { year: i32, month: u32 },
}

/// Index of the year page containing `year`
pub fn page_of(year: i32, config: &CalendarConfig) -> u32 {
    let span = config.year_span;
    (span.clamp(year) - span.min) as u32 / config.years_per_page.max(1)
}

/// Index of the page holding the last year of the span
pub fn last_page(config: &CalendarConfig) -> u32 {
    page_of(config.year_span.max, config)
}

/// First year shown on `page`
pub fn page_start(page: u32, config: &CalendarConfig) -> i32 {
    let page = page.min(last_page(config));
    config.year_span.min + (page * config.years_per_page) as i32
}

/// Year page, then month grid, then day grid
#[derive(Debug, Clone, Copy)]
pub struct DialogCalendar<'a> {
    config: &'a CalendarConfig,
    l10n: &'a Localization,
}

impl<'a> DialogCalendar<'a> {
    pub fn new(config: &'a CalendarConfig, locales: &'a Locales) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            l10n: locales.lookup(&config.locale),
        })
    }

    /// Opening screen: the day grid of `initial`, or the year page holding `today`.
    pub fn initial_screen(&self, initial: Option<(i32, u32)>, today: NaiveDate) -> DialogScreen {
        match initial {
            Some((year, month)) => DialogScreen::DayGrid {
                year: self.config.year_span.clamp(year),
                month: month.clamp(1, 12),
            },
            None => DialogScreen::YearPage {
                page: page_of(today.year(), self.config),
            },
        }
    }

    pub fn start(&self, initial: Option<(i32, u32)>, today: NaiveDate) -> Grid {
        self.initial_screen(initial, today)
            .render(self.config, self.l10n)
    }

    fn year_page_step(&self, token: &CallbackToken, year: i32) -> Result<Step<DialogScreen>> {
        let page = page_of(year, self.config);
        let page = match token.action {
            Action::SelectYear => return Ok(Step::Show(DialogScreen::MonthGrid { year })),
            Action::Ignore => page,
            Action::PrevPage => page.saturating_sub(1),
            Action::NextPage => (page + 1).min(last_page(self.config)),
            _ => return Err(unsupported(token)),
        };
        Ok(Step::Show(DialogScreen::YearPage { page }))
    }

    fn month_grid_step(&self, token: &CallbackToken, year: i32) -> Result<Step<DialogScreen>> {
        Ok(Step::Show(match token.action {
            Action::SelectMonth => {
                let month = token.month.ok_or_else(|| unsupported(token))?;
                DialogScreen::DayGrid { year, month }
            }
            Action::Back => DialogScreen::YearPage {
                page: page_of(year, self.config),
            },
            Action::Ignore => DialogScreen::MonthGrid { year },
            _ => return Err(unsupported(token)),
        }))
    }

    fn day_grid_step(&self, token: &CallbackToken, year: i32) -> Result<Step<DialogScreen>> {
        let month = token.month.ok_or_else(|| unsupported(token))?;
        let shifted = |delta| {
            let (y, m) = add_months(year, month, delta);
            if self.config.year_span.contains(y) {
                DialogScreen::DayGrid { year: y, month: m }
            } else {
                DialogScreen::DayGrid { year, month }
            }
        };

        Ok(match token.action {
            Action::SelectDay => {
                let day = token.day.ok_or_else(|| unsupported(token))?;
                let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(DecodeError::Range)?;
                Step::Select(date)
            }
            Action::Back => Step::Show(DialogScreen::MonthGrid { year }),
            Action::PrevMonth => Step::Show(shifted(-1)),
            Action::NextMonth => Step::Show(shifted(1)),
            Action::Ignore => Step::Show(DialogScreen::DayGrid { year, month }),
            _ => return Err(unsupported(token)),
        })
    }
}

impl Navigator for DialogCalendar<'_> {
    type State = DialogScreen;

    fn kind(&self) -> WidgetKind {
        WidgetKind::Dialog
    }

    fn config(&self) -> &CalendarConfig {
        self.config
    }

    fn localization(&self) -> &Localization {
        self.l10n
    }

    fn step(&self, token: &CallbackToken, _today: NaiveDate) -> Result<Step<DialogScreen>> {
        expect_kind(token, WidgetKind::Dialog)?;
        if token.screen == Screen::MonthView {
            return Err(unsupported(token));
        }
        if token.action == Action::Cancel {
            return Ok(Step::Cancel);
        }

        let year = token.year.ok_or_else(|| unsupported(token))?;
        match token.screen {
            Screen::YearPage => self.year_page_step(token, year),
            Screen::MonthGrid => self.month_grid_step(token, year),
            Screen::DayGrid => self.day_grid_step(token, year),
            Screen::MonthView => Err(unsupported(token)),
        }
    }
}
