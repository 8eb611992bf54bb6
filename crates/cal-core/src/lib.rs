//! cal-core: stateless inline date picker for chat bots
//!
//! Renders a calendar as a grid of buttons and navigates it purely through
//! the short tokens attached to those buttons. Every click carries the whole
//! navigation state, so any process can answer any click.
//!
//! ## Features
//!
//! - Simple calendar: one month at a time with previous/next, today and cancel
//! - Dialog calendar: year page, month grid, day grid with back navigation
//! - Optional inclusive date range checked when a day is picked
//! - English and Russian tables, custom tables via [`Locales::insert`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cal_core::{CalendarConfig, Locales, Navigator, SimpleCalendar, Transition};
//!
//! let config = CalendarConfig::new("en").with_date_range(min, max);
//! let locales = Locales::builtin();
//! let calendar = SimpleCalendar::new(&config, &locales)?;
//!
//! // Initial keyboard
//! let grid = calendar.start(Some((2024, 2)), today);
//!
//! // Later, for a clicked button
//! match calendar.process_data(&callback_data, today)? {
//!     Transition::Render(grid) => { /* edit the keyboard */ }
//!     Transition::Selected(result) => { /* accepted or rejected date */ }
//!     Transition::Cancelled => { /* remove the keyboard */ }
//! }
//! ```

pub mod config;
pub mod dialog;
pub mod error;
pub mod format;
pub mod locale;
pub mod math;
pub mod navigator;
pub mod quick;
pub mod render;
pub mod simple;
pub mod token;
pub mod validate;

pub use config::CalendarConfig;
pub use dialog::{DialogCalendar, DialogScreen};
pub use error::{CalendarError, DecodeError, NavigationError, Result};
pub use format::DateFormat;
pub use locale::{Locales, Localization};
pub use math::YearSpan;
pub use navigator::{Calendar, Navigator, Step, Transition, dispatch};
pub use quick::{DateDescription, QuickDate};
pub use render::{Cell, Grid, Render};
pub use simple::{MonthView, SimpleCalendar};
pub use token::{Action, CallbackToken, Screen, WidgetKind};
pub use validate::{RangeViolation, SelectionResult, validate};

/// Re-export the types most hosts need
pub mod prelude {
    pub use super::{
        Calendar, CalendarConfig, CallbackToken, DateFormat, Grid, Locales, Navigator,
        SelectionResult, Transition,
    };
}
