//! Error types for cal-core

use thiserror::Error;

/// Reasons a callback payload can not be turned into a token
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Wrong prefix, unknown code, wrong arity or non-canonical numerics
    #[error("malformed calendar token")]
    Malformed,

    /// Numeric field outside its plausible bounds
    #[error("calendar token field out of range")]
    Range,
}

/// A well-formed token that the receiving navigator can not act on
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    #[error("action {action:?} is not supported on screen {screen:?}")]
    UnsupportedAction {
        screen: crate::token::Screen,
        action: crate::token::Action,
    },
}

/// cal-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CalendarError {
    /// Errors caused by forged, stale or foreign payloads.
    ///
    /// Hosts should acknowledge the click without changing the keyboard.
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::Navigation(_))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Action, Screen};

    #[test]
    fn test_protocol_errors() {
        assert!(CalendarError::from(DecodeError::Malformed).is_protocol_error());
        assert!(CalendarError::from(DecodeError::Range).is_protocol_error());

        let nav = NavigationError::UnsupportedAction {
            screen: Screen::YearPage,
            action: Action::Today,
        };
        assert!(CalendarError::from(nav).is_protocol_error());

        assert!(!CalendarError::Config("bad".to_string()).is_protocol_error());
    }
}
