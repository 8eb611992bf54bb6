//! Callback token codec
//!
//! A token carries the whole navigation state of a calendar keyboard, so any
//! process can answer any click without a session. The wire form is
//! positional:
//!
//! ```text
//! cal:<kind>:<screen>:<action>[:<year>[:<month>[:<day>]]]
//! ```
//!
//! e.g. `cal:s:v:D:2024:2:15` selects 15 February 2024 from a simple calendar.

use crate::error::DecodeError;
use crate::math::YearSpan;

/// Prefix every payload starts with, so hosts can route callbacks to the widget
pub const TOKEN_PREFIX: &str = "cal";

/// Upper bound for a callback payload (Telegram's `callback_data` limit)
pub const MAX_TOKEN_LEN: usize = 64;

const SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Simple,
    Dialog,
}

impl WidgetKind {
    fn code(self) -> char {
        match self {
            Self::Simple => 's',
            Self::Dialog => 'd',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            's' => Some(Self::Simple),
            'd' => Some(Self::Dialog),
            _ => None,
        }
    }
}

/// Screen a button was rendered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Month grid of the simple calendar
    MonthView,
    /// Dialog calendar: page of years
    YearPage,
    /// Dialog calendar: twelve months of one year
    MonthGrid,
    /// Dialog calendar: days of one month
    DayGrid,
}

impl Screen {
    fn code(self) -> char {
        match self {
            Self::MonthView => 'v',
            Self::YearPage => 'y',
            Self::MonthGrid => 'm',
            Self::DayGrid => 'd',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        match code {
            'v' => Some(Self::MonthView),
            'y' => Some(Self::YearPage),
            'm' => Some(Self::MonthGrid),
            'd' => Some(Self::DayGrid),
            _ => None,
        }
    }

    /// Coordinates a screen needs to be re-rendered.
    fn coordinates(self) -> Fields {
        match self {
            Self::MonthView | Self::DayGrid => Fields::YearMonth,
            Self::YearPage | Self::MonthGrid => Fields::Year,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Ignore,
    PrevMonth,
    NextMonth,
    Today,
    Cancel,
    SelectDay,
    SelectYear,
    SelectMonth,
    Back,
    PrevPage,
    NextPage,
}

impl Action {
    fn code(self) -> char {
        match self {
            Self::Ignore => 'i',
            Self::PrevMonth => '<',
            Self::NextMonth => '>',
            Self::Today => 't',
            Self::Cancel => 'x',
            Self::SelectDay => 'D',
            Self::SelectYear => 'Y',
            Self::SelectMonth => 'M',
            Self::Back => 'b',
            Self::PrevPage => '[',
            Self::NextPage => ']',
        }
    }

    fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'i' => Self::Ignore,
            '<' => Self::PrevMonth,
            '>' => Self::NextMonth,
            't' => Self::Today,
            'x' => Self::Cancel,
            'D' => Self::SelectDay,
            'Y' => Self::SelectYear,
            'M' => Self::SelectMonth,
            'b' => Self::Back,
            '[' => Self::PrevPage,
            ']' => Self::NextPage,
            _ => return None,
        })
    }

    /// Terminal actions end navigation instead of producing a new grid.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::SelectDay | Self::Cancel)
    }
}

/// Which numeric fields a token carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fields {
    None,
    Year,
    YearMonth,
    YearMonthDay,
}

impl Fields {
    fn count(self) -> usize {
        match self {
            Self::None => 0,
            Self::Year => 1,
            Self::YearMonth => 2,
            Self::YearMonthDay => 3,
        }
    }

    fn expected(screen: Screen, action: Action) -> Self {
        match action {
            Action::Cancel | Action::Today => Self::None,
            Action::SelectDay => Self::YearMonthDay,
            Action::SelectMonth => Self::YearMonth,
            Action::SelectYear => Self::Year,
            _ => screen.coordinates(),
        }
    }
}

/// Decoded callback payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackToken {
    pub widget_kind: WidgetKind,
    pub screen: Screen,
    pub action: Action,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

impl CallbackToken {
    /// Token without numeric fields (`Cancel`, `Today`)
    pub fn bare(widget_kind: WidgetKind, screen: Screen, action: Action) -> Self {
        Self {
            widget_kind,
            screen,
            action,
            year: None,
            month: None,
            day: None,
        }
    }

    pub fn with_year(widget_kind: WidgetKind, screen: Screen, action: Action, year: i32) -> Self {
        Self {
            year: Some(year),
            ..Self::bare(widget_kind, screen, action)
        }
    }

    pub fn with_month(
        widget_kind: WidgetKind,
        screen: Screen,
        action: Action,
        year: i32,
        month: u32,
    ) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            ..Self::bare(widget_kind, screen, action)
        }
    }

    pub fn with_day(
        widget_kind: WidgetKind,
        screen: Screen,
        year: i32,
        month: u32,
        day: u32,
    ) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
            ..Self::bare(widget_kind, screen, Action::SelectDay)
        }
    }

    /// Quick check a host can use to route a callback payload.
    pub fn is_calendar_payload(data: &str) -> bool {
        data.strip_prefix(TOKEN_PREFIX)
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(24);
        out.push_str(TOKEN_PREFIX);
        for code in [
            self.widget_kind.code(),
            self.screen.code(),
            self.action.code(),
        ] {
            out.push(SEPARATOR);
            out.push(code);
        }

        let numbers = [
            self.year.map(i64::from),
            self.month.map(i64::from),
            self.day.map(i64::from),
        ];
        for value in numbers.into_iter().map_while(|v| v) {
            out.push(SEPARATOR);
            out.push_str(&value.to_string());
        }

        debug_assert!(out.len() <= MAX_TOKEN_LEN);
        out
    }

    /// Decode with the default plausible year span (1..=9999).
    pub fn decode(data: &str) -> Result<Self, DecodeError> {
        Self::decode_with_span(data, YearSpan::default())
    }

    pub fn decode_with_span(data: &str, span: YearSpan) -> Result<Self, DecodeError> {
        if data.len() > MAX_TOKEN_LEN {
            return Err(DecodeError::Malformed);
        }

        let mut parts = data.split(SEPARATOR);
        if parts.next() != Some(TOKEN_PREFIX) {
            return Err(DecodeError::Malformed);
        }

        let widget_kind = next_code(&mut parts).and_then(WidgetKind::from_code);
        let screen = next_code(&mut parts).and_then(Screen::from_code);
        let action = next_code(&mut parts).and_then(Action::from_code);
        let (Some(widget_kind), Some(screen), Some(action)) = (widget_kind, screen, action) else {
            return Err(DecodeError::Malformed);
        };

        let numbers: Vec<&str> = parts.collect();
        if numbers.len() != Fields::expected(screen, action).count() {
            return Err(DecodeError::Malformed);
        }

        // Check every field is canonical before range-checking any of them.
        let values = numbers
            .iter()
            .map(|raw| parse_number(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let mut token = Self::bare(widget_kind, screen, action);
        let mut values = values.into_iter();
        if let Some(year) = values.next() {
            token.year = Some(checked(year, i64::from(span.min), i64::from(span.max))?);
        }
        if let Some(month) = values.next() {
            token.month = Some(checked(month, 1, 12)?);
        }
        if let Some(day) = values.next() {
            token.day = Some(checked(day, 1, 31)?);
        }
        Ok(token)
    }
}

fn next_code<'a>(parts: &mut impl Iterator<Item = &'a str>) -> Option<char> {
    let part = parts.next()?;
    let mut chars = part.chars();
    match (chars.next(), chars.next()) {
        (Some(code), None) => Some(code),
        _ => None,
    }
}

/// Digits only, no sign, no leading zero. `None` inside `Ok` means overflow.
fn parse_number(raw: &str) -> Result<Option<i64>, DecodeError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::Malformed);
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return Err(DecodeError::Malformed);
    }
    Ok(raw.parse::<i64>().ok())
}

fn checked<T: TryFrom<i64>>(value: Option<i64>, min: i64, max: i64) -> Result<T, DecodeError> {
    value
        .filter(|v| (min..=max).contains(v))
        .and_then(|v| T::try_from(v).ok())
        .ok_or(DecodeError::Range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_valid_samples() -> Vec<CallbackToken> {
        use Action::*;
        use Screen::*;
        use WidgetKind::*;
        vec![
            CallbackToken::with_month(Simple, MonthView, PrevMonth, 2024, 2),
            CallbackToken::with_month(Simple, MonthView, NextMonth, 2024, 12),
            CallbackToken::with_month(Simple, MonthView, Ignore, 1, 1),
            CallbackToken::bare(Simple, MonthView, Today),
            CallbackToken::bare(Simple, MonthView, Cancel),
            CallbackToken::with_day(Simple, MonthView, 2024, 2, 29),
            CallbackToken::with_year(Dialog, YearPage, SelectYear, 1989),
            CallbackToken::with_year(Dialog, YearPage, PrevPage, 1985),
            CallbackToken::with_year(Dialog, YearPage, NextPage, 9985),
            CallbackToken::with_month(Dialog, MonthGrid, SelectMonth, 1989, 6),
            CallbackToken::with_year(Dialog, MonthGrid, Back, 1989),
            CallbackToken::with_month(Dialog, DayGrid, Back, 1989, 6),
            CallbackToken::with_day(Dialog, DayGrid, 9999, 12, 31),
            CallbackToken::bare(Dialog, DayGrid, Cancel),
        ]
    }

    #[test]
    fn test_encode_format() {
        let token = CallbackToken::with_day(WidgetKind::Simple, Screen::MonthView, 2024, 2, 15);
        assert_eq!(token.encode(), "cal:s:v:D:2024:2:15");

        let token = CallbackToken::bare(WidgetKind::Dialog, Screen::YearPage, Action::Cancel);
        assert_eq!(token.encode(), "cal:d:y:x");
    }

    #[test]
    fn test_decode_inverts_encode() {
        for token in all_valid_samples() {
            let encoded = token.encode();
            assert!(encoded.len() <= MAX_TOKEN_LEN);
            assert_eq!(CallbackToken::decode(&encoded), Ok(token), "{encoded}");
        }
    }

    #[test]
    fn test_decode_missing_day_is_malformed() {
        assert_eq!(
            CallbackToken::decode("cal:s:v:D:2024:2"),
            Err(DecodeError::Malformed)
        );
    }

    #[test]
    fn test_decode_malformed_inputs() {
        let cases = [
            "",
            "cal",
            "cal:",
            "cal:s",
            "cal:s:v",
            "xyz:s:v:<:2024:2",
            "cal:q:v:<:2024:2",
            "cal:s:q:<:2024:2",
            "cal:s:v:?:2024:2",
            "cal:ss:v:<:2024:2",
            "cal:s:v:<:2024",
            "cal:s:v:<:2024:2:1",
            "cal:s:v:x:2024",
            "cal:s:v:<:2024:02",
            "cal:s:v:<:+2024:2",
            "cal:s:v:<:-5:2",
            "cal:s:v:<:2024:",
            "cal:s:v:<:20 24:2",
            "cal:s:v:<:2024:2:",
            "simple_calendar:DAY:2024:2:15",
        ];
        for case in cases {
            assert_eq!(CallbackToken::decode(case), Err(DecodeError::Malformed), "{case:?}");
        }
    }

    #[test]
    fn test_decode_range_errors() {
        let cases = [
            "cal:s:v:<:2024:13",
            "cal:s:v:<:2024:0",
            "cal:s:v:D:2024:2:32",
            "cal:s:v:D:2024:2:0",
            "cal:s:v:<:0:2",
            "cal:s:v:<:10000:2",
            "cal:d:y:Y:99999999999999999999",
        ];
        for case in cases {
            assert_eq!(CallbackToken::decode(case), Err(DecodeError::Range), "{case:?}");
        }
    }

    #[test]
    fn test_decode_custom_span() {
        let span = YearSpan::new(1990, 2030);
        assert!(CallbackToken::decode_with_span("cal:d:y:Y:2030", span).is_ok());
        assert_eq!(
            CallbackToken::decode_with_span("cal:d:y:Y:1989", span),
            Err(DecodeError::Range)
        );
    }

    #[test]
    fn test_decode_oversized_payload() {
        let long = format!("cal:s:v:<:2024:{}", "1".repeat(64));
        assert_eq!(CallbackToken::decode(&long), Err(DecodeError::Malformed));
    }

    #[test]
    fn test_decode_truncations() {
        let full = "cal:d:d:D:1989:6:15";
        let expected = CallbackToken::decode(full);
        assert!(expected.is_ok());

        for end in 0..full.len() {
            let truncated = &full[..end];
            assert_ne!(CallbackToken::decode(truncated), expected, "{truncated:?}");
        }
        assert_eq!(
            CallbackToken::decode("cal:d:d:D:1989:6"),
            Err(DecodeError::Malformed)
        );
    }

    #[test]
    fn test_is_calendar_payload() {
        assert!(CallbackToken::is_calendar_payload("cal:s:v:x"));
        assert!(!CallbackToken::is_calendar_payload("calendar:s"));
        assert!(!CallbackToken::is_calendar_payload("lang_en"));
    }

    #[test]
    fn test_terminal_actions() {
        assert!(Action::SelectDay.is_terminal());
        assert!(Action::Cancel.is_terminal());
        assert!(!Action::Back.is_terminal());
    }
}
