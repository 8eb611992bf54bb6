//! Navigator seam shared by the simple and dialog calendars
//!
//! A navigator is a pure transition table: `(token, config, today)` in,
//! next screen or terminal outcome out. Nothing is remembered between calls.

use chrono::NaiveDate;
use tracing::debug;

use crate::config::CalendarConfig;
use crate::dialog::DialogCalendar;
use crate::error::{NavigationError, Result};
use crate::locale::{Locales, Localization};
use crate::render::{Grid, Render};
use crate::simple::SimpleCalendar;
use crate::token::{CallbackToken, WidgetKind};
use crate::validate::{SelectionResult, validate};

/// Result of one transition, before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    /// Keep navigating on this screen
    Show(S),
    /// Terminal: the user picked a day
    Select(NaiveDate),
    /// Terminal: the user gave up
    Cancel,
}

/// What the host should do after a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Replace the keyboard with this grid
    Render(Grid),
    /// Terminal selection; on rejection the keyboard stays as it is
    Selected(SelectionResult),
    Cancelled,
}

pub trait Navigator {
    type State: Render;

    fn kind(&self) -> WidgetKind;

    fn config(&self) -> &CalendarConfig;

    fn localization(&self) -> &Localization;

    /// Pure transition for one decoded token.
    fn step(&self, token: &CallbackToken, today: NaiveDate) -> Result<Step<Self::State>>;

    fn render(&self, state: &Self::State) -> Grid {
        state.render(self.config(), self.localization())
    }

    /// Transition and turn the step into a host-facing outcome.
    fn process(&self, token: &CallbackToken, today: NaiveDate) -> Result<Transition> {
        let step = self.step(token, today)?;
        Ok(match step {
            Step::Show(state) => Transition::Render(self.render(&state)),
            Step::Select(date) => {
                let result = validate(date, self.config());
                debug!(%date, accepted = result.is_accepted(), "day selected");
                Transition::Selected(result)
            }
            Step::Cancel => {
                debug!(kind = ?self.kind(), "calendar cancelled");
                Transition::Cancelled
            }
        })
    }

    /// Decode a raw callback payload and process it.
    fn process_data(&self, data: &str, today: NaiveDate) -> Result<Transition> {
        let token = CallbackToken::decode_with_span(data, self.config().year_span)?;
        debug!(data, ?token, "calendar token decoded");
        self.process(&token, today)
    }
}

/// Reject tokens addressed to the other widget kind.
pub(crate) fn expect_kind(token: &CallbackToken, kind: WidgetKind) -> Result<()> {
    if token.widget_kind == kind {
        Ok(())
    } else {
        Err(unsupported(token))
    }
}

pub(crate) fn unsupported(token: &CallbackToken) -> crate::error::CalendarError {
    NavigationError::UnsupportedAction {
        screen: token.screen,
        action: token.action,
    }
    .into()
}

/// Either navigator, picked by the widget kind a token names
#[derive(Debug, Clone, Copy)]
pub enum Calendar<'a> {
    Simple(SimpleCalendar<'a>),
    Dialog(DialogCalendar<'a>),
}

impl<'a> Calendar<'a> {
    pub fn new(kind: WidgetKind, config: &'a CalendarConfig, locales: &'a Locales) -> Result<Self> {
        Ok(match kind {
            WidgetKind::Simple => Self::Simple(SimpleCalendar::new(config, locales)?),
            WidgetKind::Dialog => Self::Dialog(DialogCalendar::new(config, locales)?),
        })
    }

    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::Simple(_) => WidgetKind::Simple,
            Self::Dialog(_) => WidgetKind::Dialog,
        }
    }

    /// First keyboard, optionally opened on a given month
    pub fn start(&self, initial: Option<(i32, u32)>, today: NaiveDate) -> Grid {
        match self {
            Self::Simple(calendar) => calendar.start(initial, today),
            Self::Dialog(calendar) => calendar.start(initial, today),
        }
    }

    pub fn process(&self, token: &CallbackToken, today: NaiveDate) -> Result<Transition> {
        match self {
            Self::Simple(calendar) => calendar.process(token, today),
            Self::Dialog(calendar) => calendar.process(token, today),
        }
    }
}

/// Decode a payload and route it to the navigator its widget kind names.
pub fn dispatch(
    data: &str,
    config: &CalendarConfig,
    locales: &Locales,
    today: NaiveDate,
) -> Result<Transition> {
    let token = CallbackToken::decode_with_span(data, config.year_span)?;
    debug!(data, ?token, "dispatching calendar token");
    Calendar::new(token.widget_kind, config, locales)?.process(&token, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CalendarError, DecodeError};
    use crate::validate::RangeViolation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 10, 19)
    }

    #[test]
    fn test_dispatch_routes_by_kind() {
        let config = CalendarConfig::default();
        let locales = Locales::builtin();

        let simple = dispatch("cal:s:v:>:2024:12", &config, &locales, today()).unwrap();
        let Transition::Render(grid) = simple else {
            panic!("expected a grid");
        };
        assert_eq!(grid.rows[0][1].label, "January 2025");

        let dialog = dispatch("cal:d:y:Y:1989", &config, &locales, today()).unwrap();
        let Transition::Render(grid) = dialog else {
            panic!("expected a grid");
        };
        assert!(grid.find("June").is_some());
    }

    #[test]
    fn test_dispatch_selection_goes_through_validator() {
        let config = CalendarConfig::default().with_date_range(date(2022, 1, 1), date(2025, 12, 31));
        let locales = Locales::builtin();

        let rejected = dispatch("cal:s:v:D:2021:12:31", &config, &locales, today()).unwrap();
        assert_eq!(
            rejected,
            Transition::Selected(SelectionResult::Rejected {
                date: date(2021, 12, 31),
                violation: RangeViolation::BelowMin(date(2022, 1, 1)),
            })
        );

        let accepted = dispatch("cal:d:d:D:2024:2:15", &config, &locales, today()).unwrap();
        assert_eq!(
            accepted,
            Transition::Selected(SelectionResult::Accepted(date(2024, 2, 15)))
        );
    }

    #[test]
    fn test_dispatch_protocol_errors() {
        let config = CalendarConfig::default();
        let locales = Locales::builtin();

        let err = dispatch("garbage", &config, &locales, today()).unwrap_err();
        assert_eq!(err, CalendarError::Decode(DecodeError::Malformed));
        assert!(err.is_protocol_error());

        // a dialog-only action on the simple calendar
        let err = dispatch("cal:s:v:b:2024:2", &config, &locales, today()).unwrap_err();
        assert!(matches!(err, CalendarError::Navigation(_)));
    }

    #[test]
    fn test_dispatch_respects_configured_span() {
        let config = CalendarConfig::default()
            .with_year_span(crate::math::YearSpan::new(2000, 2030));
        let locales = Locales::builtin();
        let err = dispatch("cal:s:v:>:1999:5", &config, &locales, today()).unwrap_err();
        assert_eq!(err, CalendarError::Decode(DecodeError::Range));
    }

    #[test]
    fn test_dispatch_rejects_bad_config() {
        let config = CalendarConfig::default().with_date_range(date(2025, 1, 1), date(2020, 1, 1));
        let locales = Locales::builtin();
        let err = dispatch("cal:s:v:x", &config, &locales, today()).unwrap_err();
        assert!(matches!(err, CalendarError::Config(_)));
        assert!(!err.is_protocol_error());
    }

    #[test]
    fn test_calendar_enum_start() {
        let config = CalendarConfig::default();
        let locales = Locales::builtin();

        let simple = Calendar::new(WidgetKind::Simple, &config, &locales).unwrap();
        assert_eq!(simple.kind(), WidgetKind::Simple);
        let grid = simple.start(Some((2024, 2)), today());
        assert_eq!(grid.rows[0][1].label, "February 2024");

        let dialog = Calendar::new(WidgetKind::Dialog, &config, &locales).unwrap();
        let grid = dialog.start(None, today());
        assert!(grid.find("2026").is_some());
        assert_eq!(
            grid.find("2026").unwrap().token.encode(),
            "cal:d:y:Y:2026"
        );
    }
}
