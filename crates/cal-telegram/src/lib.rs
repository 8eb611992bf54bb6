//! cal-telegram: Telegram front end for cal-core
//!
//! Turns calendar grids into inline keyboards, answers their clicks and
//! wraps everything in a small demo bot with per-user language and date
//! format settings.

pub mod bot;
pub mod callback;
pub mod commands;
pub mod error;
pub mod keyboard;
pub mod settings;
pub mod texts;

pub use bot::CalendarBot;
pub use callback::{
    CalendarOutcome, CallbackReply, KeyboardChange, handle_calendar_query, plan_reply,
};
pub use commands::BotState;
pub use error::{Result, TelegramError};
pub use keyboard::{SettingsCallback, to_inline_keyboard};
pub use settings::{InMemorySettingsStore, UserSettings};
