//! Range validation of a picked day

use chrono::NaiveDate;

use crate::config::CalendarConfig;
use crate::format::DateFormat;
use crate::locale::{Localization, fill};

/// Bound a rejected date violated, with the bound itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeViolation {
    BelowMin(NaiveDate),
    AboveMax(NaiveDate),
}

impl RangeViolation {
    pub fn bound(&self) -> NaiveDate {
        match self {
            Self::BelowMin(date) | Self::AboveMax(date) => *date,
        }
    }

    /// Localized text naming the violated bound
    pub fn message(&self, l10n: &Localization, format: DateFormat) -> String {
        let template = match self {
            Self::BelowMin(_) => &l10n.captions.date_too_early,
            Self::AboveMax(_) => &l10n.captions.date_too_late,
        };
        fill(template, "date", &format.format(self.bound()))
    }
}

/// Outcome of a terminal day selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionResult {
    Accepted(NaiveDate),
    Rejected {
        date: NaiveDate,
        violation: RangeViolation,
    },
}

impl SelectionResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// The accepted date, if any
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::Accepted(date) => Some(*date),
            Self::Rejected { .. } => None,
        }
    }

    pub fn violation(&self) -> Option<RangeViolation> {
        match self {
            Self::Accepted(_) => None,
            Self::Rejected { violation, .. } => Some(*violation),
        }
    }
}

/// Check `date` against the configured inclusive window.
///
/// `min_date <= max_date` is a configuration precondition
/// (see [`CalendarConfig::validate`]).
pub fn validate(date: NaiveDate, config: &CalendarConfig) -> SelectionResult {
    if let Some(min) = config.min_date.filter(|min| date < *min) {
        return SelectionResult::Rejected {
            date,
            violation: RangeViolation::BelowMin(min),
        };
    }
    if let Some(max) = config.max_date.filter(|max| date > *max) {
        return SelectionResult::Rejected {
            date,
            violation: RangeViolation::AboveMax(max),
        };
    }
    SelectionResult::Accepted(date)
}
