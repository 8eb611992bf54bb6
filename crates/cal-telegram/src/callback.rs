//! Calendar callback handling
//!
//! Bridges decoded calendar transitions to Telegram calls: edit the keyboard,
//! drop it on a final answer, or answer the query with the range violation.

use chrono::NaiveDate;
use teloxide::prelude::*;
use teloxide::{ApiError, RequestError};
use tracing::{debug, info, warn};

use cal_core::{
    CalendarConfig, DateFormat, Grid, Locales, RangeViolation, SelectionResult, Transition,
    dispatch,
};

use crate::error::Result;
use crate::keyboard::to_inline_keyboard;

/// What a calendar click amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarOutcome {
    /// The keyboard moved to another screen
    Navigated,
    /// Accepted date; the keyboard was removed
    Picked(NaiveDate),
    /// Date outside the allowed range; the keyboard stays
    Rejected(RangeViolation),
    /// The user cancelled; the keyboard was removed
    Cancelled,
    /// Forged, stale or foreign payload; acknowledged and ignored
    Ignored,
}

/// What happens to the inline keyboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardChange {
    Keep,
    Replace(Grid),
    Remove,
}

/// Telegram calls owed for one click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackReply {
    pub outcome: CalendarOutcome,
    pub keyboard: KeyboardChange,
    /// Text of the callback answer; `None` answers silently
    pub answer_text: Option<String>,
    pub show_alert: bool,
}

impl CallbackReply {
    fn silent(outcome: CalendarOutcome, keyboard: KeyboardChange) -> Self {
        Self {
            outcome,
            keyboard,
            answer_text: None,
            show_alert: false,
        }
    }
}

/// Decide how to answer a calendar payload without touching the network.
///
/// Protocol errors turn into a silent `Ignored` reply; configuration errors
/// are returned to the caller.
pub fn plan_reply(
    data: &str,
    config: &CalendarConfig,
    locales: &Locales,
    format: DateFormat,
    today: NaiveDate,
) -> cal_core::Result<CallbackReply> {
    let transition = match dispatch(data, config, locales, today) {
        Ok(transition) => transition,
        Err(e) if e.is_protocol_error() => {
            warn!(data, error = %e, "ignoring calendar callback");
            return Ok(CallbackReply::silent(
                CalendarOutcome::Ignored,
                KeyboardChange::Keep,
            ));
        }
        Err(e) => return Err(e),
    };

    Ok(match transition {
        Transition::Render(grid) => {
            CallbackReply::silent(CalendarOutcome::Navigated, KeyboardChange::Replace(grid))
        }
        Transition::Selected(SelectionResult::Accepted(date)) => {
            CallbackReply::silent(CalendarOutcome::Picked(date), KeyboardChange::Remove)
        }
        Transition::Selected(SelectionResult::Rejected { date, violation }) => {
            debug!(%date, ?violation, "selection rejected");
            let l10n = locales.lookup(&config.locale);
            CallbackReply {
                outcome: CalendarOutcome::Rejected(violation),
                keyboard: KeyboardChange::Keep,
                answer_text: Some(violation.message(l10n, format)),
                show_alert: config.show_alerts,
            }
        }
        Transition::Cancelled => {
            CallbackReply::silent(CalendarOutcome::Cancelled, KeyboardChange::Remove)
        }
    })
}

/// Process a calendar callback query end to end.
pub async fn handle_calendar_query(
    bot: &Bot,
    query: &CallbackQuery,
    config: &CalendarConfig,
    locales: &Locales,
    format: DateFormat,
    today: NaiveDate,
) -> Result<CalendarOutcome> {
    let Some(data) = query.data.as_deref() else {
        bot.answer_callback_query(query.id.clone()).await?;
        return Ok(CalendarOutcome::Ignored);
    };

    let reply = match plan_reply(data, config, locales, format, today) {
        Ok(reply) => reply,
        Err(e) => {
            bot.answer_callback_query(query.id.clone()).await?;
            return Err(e.into());
        }
    };

    let answer = bot.answer_callback_query(query.id.clone());
    match reply.answer_text {
        Some(text) => answer.text(text).show_alert(reply.show_alert).await?,
        None => answer.await?,
    };

    if let Some(message) = query.regular_message() {
        match reply.keyboard {
            KeyboardChange::Keep => {}
            KeyboardChange::Replace(grid) => {
                let edit = bot
                    .edit_message_reply_markup(message.chat.id, message.id)
                    .reply_markup(to_inline_keyboard(&grid))
                    .await;
                match edit {
                    // Replayed clicks and `Ignore` cells redraw the same keyboard
                    Err(RequestError::Api(ApiError::MessageNotModified)) => {
                        debug!("calendar keyboard unchanged");
                    }
                    other => {
                        other?;
                    }
                }
            }
            KeyboardChange::Remove => {
                bot.edit_message_reply_markup(message.chat.id, message.id)
                    .await?;
            }
        }
    }

    if let CalendarOutcome::Picked(date) = reply.outcome {
        info!(%date, user = query.from.id.0, "date selected");
    }
    Ok(reply.outcome)
}
