//! Keyboard rendering
//!
//! Grids are rebuilt from scratch on every call. Inert cells (titles, weekday
//! headers, padding) carry an `Ignore` token holding the current coordinates,
//! because chat transports need a payload on every button.

use crate::config::CalendarConfig;
use crate::dialog::{DialogScreen, page_start};
use crate::locale::Localization;
use crate::math::{days_in_month, first_weekday, weekday_at};
use crate::simple::MonthView;
use crate::token::{Action, CallbackToken, Screen, WidgetKind};

/// Columns of a day grid
pub const WEEK_COLUMNS: usize = 7;

/// Columns of a dialog year page
pub const YEAR_COLUMNS: usize = 4;

const BLANK: &str = " ";

/// One button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub label: String,
    pub token: CallbackToken,
}

impl Cell {
    pub fn new(label: impl Into<String>, token: CallbackToken) -> Self {
        Self {
            label: label.into(),
            token,
        }
    }

    fn blank(token: CallbackToken) -> Self {
        Self::new(BLANK, token)
    }

    /// Clicking the cell leaves the keyboard as it is.
    pub fn is_inert(&self) -> bool {
        self.token.action == Action::Ignore
    }
}

/// Ordered rows of buttons
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    /// First cell whose label matches exactly
    pub fn find(&self, label: &str) -> Option<&Cell> {
        self.cells().find(|cell| cell.label == label)
    }

    /// First cell carrying `action`
    pub fn find_action(&self, action: Action) -> Option<&Cell> {
        self.cells().find(|cell| cell.token.action == action)
    }

    fn push_padded(&mut self, cells: Vec<Cell>, columns: usize, filler: CallbackToken) {
        for chunk in cells.chunks(columns) {
            let mut row = chunk.to_vec();
            row.resize_with(columns, || Cell::blank(filler));
            self.push_row(row);
        }
    }
}

/// Anything that can be drawn as a keyboard
pub trait Render {
    fn render(&self, config: &CalendarConfig, l10n: &Localization) -> Grid;
}

impl Render for MonthView {
    fn render(&self, config: &CalendarConfig, l10n: &Localization) -> Grid {
        let mut grid = day_grid(
            WidgetKind::Simple,
            Screen::MonthView,
            self.year,
            self.month,
            config,
            l10n,
        );
        grid.push_row(vec![
            Cell::new(
                config.today_label(l10n),
                CallbackToken::bare(WidgetKind::Simple, Screen::MonthView, Action::Today),
            ),
            Cell::new(
                config.cancel_label(l10n),
                CallbackToken::bare(WidgetKind::Simple, Screen::MonthView, Action::Cancel),
            ),
        ]);
        grid
    }
}

impl Render for DialogScreen {
    fn render(&self, config: &CalendarConfig, l10n: &Localization) -> Grid {
        match *self {
            DialogScreen::YearPage { page } => year_page(page, config, l10n),
            DialogScreen::MonthGrid { year } => month_grid(year, config, l10n),
            DialogScreen::DayGrid { year, month } => {
                let mut grid =
                    day_grid(WidgetKind::Dialog, Screen::DayGrid, year, month, config, l10n);
                grid.push_row(vec![
                    Cell::new(
                        &l10n.captions.back,
                        CallbackToken::with_month(
                            WidgetKind::Dialog,
                            Screen::DayGrid,
                            Action::Back,
                            year,
                            month,
                        ),
                    ),
                    cancel_cell(Screen::DayGrid, config, l10n),
                ]);
                grid
            }
        }
    }
}

/// Navigation row, weekday header and week rows of one month.
fn day_grid(
    kind: WidgetKind,
    screen: Screen,
    year: i32,
    month: u32,
    config: &CalendarConfig,
    l10n: &Localization,
) -> Grid {
    let at = |action| CallbackToken::with_month(kind, screen, action, year, month);
    let ignore = at(Action::Ignore);

    let mut grid = Grid::default();
    grid.push_row(vec![
        Cell::new(&l10n.captions.prev, at(Action::PrevMonth)),
        Cell::new(format!("{} {}", l10n.month_name(month), year), ignore),
        Cell::new(&l10n.captions.next, at(Action::NextMonth)),
    ]);
    grid.push_row(
        (0..WEEK_COLUMNS as u32)
            .map(|i| Cell::new(l10n.weekday_short(weekday_at(config.week_start, i)), ignore))
            .collect(),
    );

    let offset = first_weekday(year, month, config.week_start);
    let mut days: Vec<Cell> = (0..offset).map(|_| Cell::blank(ignore)).collect();
    days.extend((1..=days_in_month(year, month)).map(|day| {
        Cell::new(
            day.to_string(),
            CallbackToken::with_day(kind, screen, year, month, day),
        )
    }));
    grid.push_padded(days, WEEK_COLUMNS, ignore);
    grid
}

fn year_page(page: u32, config: &CalendarConfig, l10n: &Localization) -> Grid {
    let first = page_start(page, config);
    let last = (first + config.years_per_page as i32 - 1).min(config.year_span.max);
    let at = |action| CallbackToken::with_year(WidgetKind::Dialog, Screen::YearPage, action, first);
    let ignore = at(Action::Ignore);

    let mut grid = Grid::default();
    grid.push_row(vec![Cell::new(&l10n.captions.select_year, ignore)]);

    let years = (first..=last)
        .map(|year| {
            Cell::new(
                year.to_string(),
                CallbackToken::with_year(
                    WidgetKind::Dialog,
                    Screen::YearPage,
                    Action::SelectYear,
                    year,
                ),
            )
        })
        .collect();
    grid.push_padded(years, YEAR_COLUMNS, ignore);

    grid.push_row(vec![
        Cell::new(&l10n.captions.prev, at(Action::PrevPage)),
        Cell::new(format!("{first} – {last}"), ignore),
        Cell::new(&l10n.captions.next, at(Action::NextPage)),
    ]);
    grid.push_row(vec![cancel_cell(Screen::YearPage, config, l10n)]);
    grid
}

fn month_grid(year: i32, config: &CalendarConfig, l10n: &Localization) -> Grid {
    let ignore = CallbackToken::with_year(WidgetKind::Dialog, Screen::MonthGrid, Action::Ignore, year);

    let mut grid = Grid::default();
    grid.push_row(vec![Cell::new(
        format!("{} {year}", l10n.captions.select_month),
        ignore,
    )]);

    let months = (1..=12)
        .map(|month| {
            Cell::new(
                l10n.month_name(month),
                CallbackToken::with_month(
                    WidgetKind::Dialog,
                    Screen::MonthGrid,
                    Action::SelectMonth,
                    year,
                    month,
                ),
            )
        })
        .collect();
    grid.push_padded(months, config.month_columns as usize, ignore);

    grid.push_row(vec![
        Cell::new(
            &l10n.captions.back,
            CallbackToken::with_year(WidgetKind::Dialog, Screen::MonthGrid, Action::Back, year),
        ),
        cancel_cell(Screen::MonthGrid, config, l10n),
    ]);
    grid
}

fn cancel_cell(screen: Screen, config: &CalendarConfig, l10n: &Localization) -> Cell {
    Cell::new(
        config.cancel_label(l10n),
        CallbackToken::bare(WidgetKind::Dialog, screen, Action::Cancel),
    )
}
