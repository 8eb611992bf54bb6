//! Telegram bot commands

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, User};
use tracing::{info, warn};

use cal_core::locale::fill;
use cal_core::{Calendar, CalendarConfig, DateDescription, Locales, WidgetKind};

use crate::callback::{CalendarOutcome, handle_calendar_query};
use crate::error::Result;
use crate::keyboard::{
    SettingsCallback, date_format_menu, language_menu, main_menu, parse_quick_date, quick_dates,
    settings_menu, to_inline_keyboard,
};
use crate::settings::{InMemorySettingsStore, UserSettings};
use crate::texts::{BotTexts, LANGUAGES, MenuItem, texts};

/// Bot state shared across commands
pub struct BotState {
    pub calendar_config: CalendarConfig,
    pub locales: Locales,
    pub settings: InMemorySettingsStore,
}

impl BotState {
    pub fn new(calendar_config: CalendarConfig) -> Self {
        let settings = InMemorySettingsStore::new(&calendar_config.locale);
        Self {
            calendar_config,
            locales: Locales::builtin(),
            settings,
        }
    }

    /// Settings of the user behind an update
    pub async fn user_settings(&self, user: Option<&User>) -> UserSettings {
        let Some(user) = user else {
            return UserSettings::new(self.settings.default_language());
        };
        let supported: Vec<&str> = LANGUAGES.iter().map(|(code, _)| *code).collect();
        self.settings
            .get_or_create(user.id.0, user.language_code.as_deref(), &supported)
            .await
    }

    /// Calendar configuration speaking the user's language
    pub fn calendar_config_for(&self, settings: &UserSettings) -> CalendarConfig {
        let mut config = self.calendar_config.clone();
        config.locale = settings.language.clone();
        config
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn settings_overview(texts: &BotTexts, settings: &UserSettings) -> String {
    let language = crate::texts::texts(&settings.language).language_name;
    let text = fill(texts.settings_title, "language", language);
    fill(&text, "format", &settings.date_format.to_string())
}

/// Handle /start command
pub async fn handle_start(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let settings = state.user_settings(msg.from.as_ref()).await;
    let texts = texts(&settings.language);

    info!("New conversation in chat {}", msg.chat.id);

    bot.send_message(msg.chat.id, texts.welcome)
        .reply_markup(main_menu(texts))
        .await?;
    Ok(())
}

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let settings = state.user_settings(msg.from.as_ref()).await;
    bot.send_message(msg.chat.id, texts(&settings.language).help)
        .await?;
    Ok(())
}

/// Handle /settings command
pub async fn handle_settings(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let settings = state.user_settings(msg.from.as_ref()).await;
    let texts = texts(&settings.language);

    bot.send_message(msg.chat.id, settings_overview(texts, &settings))
        .reply_markup(settings_menu(texts))
        .await?;
    Ok(())
}

/// Handle /simple and /dialog: send a fresh calendar keyboard
pub async fn handle_calendar(
    bot: Bot,
    msg: Message,
    state: Arc<BotState>,
    kind: WidgetKind,
) -> Result<()> {
    let settings = state.user_settings(msg.from.as_ref()).await;
    let texts = texts(&settings.language);
    let config = state.calendar_config_for(&settings);

    let grid = Calendar::new(kind, &config, &state.locales)?.start(None, today());
    let prompt = match kind {
        WidgetKind::Simple => texts.simple_prompt,
        WidgetKind::Dialog => texts.dialog_prompt,
    };

    bot.send_message(msg.chat.id, prompt)
        .reply_markup(to_inline_keyboard(&grid))
        .await?;
    Ok(())
}

/// Handle /quick command
pub async fn handle_quick(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let settings = state.user_settings(msg.from.as_ref()).await;
    let texts = texts(&settings.language);
    let l10n = state.locales.lookup(&settings.language);

    bot.send_message(msg.chat.id, texts.quick_prompt)
        .reply_markup(quick_dates(texts, l10n))
        .await?;
    Ok(())
}

/// Handle reply-keyboard presses and other plain text
pub async fn handle_text(bot: Bot, msg: Message, state: Arc<BotState>) -> Result<()> {
    let Some(text) = msg.text().map(str::to_owned) else {
        return Ok(());
    };

    match MenuItem::parse(&text) {
        Some(MenuItem::Simple) => return handle_calendar(bot, msg, state, WidgetKind::Simple).await,
        Some(MenuItem::Dialog) => return handle_calendar(bot, msg, state, WidgetKind::Dialog).await,
        Some(MenuItem::Quick) => return handle_quick(bot, msg, state).await,
        Some(MenuItem::Settings) => return handle_settings(bot, msg, state).await,
        Some(MenuItem::Back) | None => {}
    }

    let settings = state.user_settings(msg.from.as_ref()).await;
    let texts = texts(&settings.language);
    let l10n = state.locales.lookup(&settings.language);

    if let Some(quick) = parse_quick_date(&text, l10n) {
        let today = today();
        let description = DateDescription::new(quick.resolve(today), today);
        let reply = format!(
            "{}\n\n{}",
            description.render(l10n, settings.date_format),
            texts.quick_selected_footer
        );
        bot.send_message(msg.chat.id, reply).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, texts.main_menu)
        .reply_markup(main_menu(texts))
        .await?;
    Ok(())
}

/// Handle a click on a calendar keyboard
pub async fn handle_calendar_callback(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<BotState>,
) -> Result<()> {
    let settings = state.user_settings(Some(&query.from)).await;
    let texts = texts(&settings.language);
    let config = state.calendar_config_for(&settings);

    let outcome = handle_calendar_query(
        &bot,
        &query,
        &config,
        &state.locales,
        settings.date_format,
        today(),
    )
    .await?;

    let Some(chat_id) = query.regular_message().map(|message| message.chat.id) else {
        return Ok(());
    };
    match outcome {
        CalendarOutcome::Picked(date) => {
            let text = fill(texts.selected, "date", &settings.date_format.format(date));
            bot.send_message(chat_id, text).await?;
        }
        CalendarOutcome::Cancelled => {
            bot.send_message(chat_id, texts.cancelled).await?;
        }
        CalendarOutcome::Navigated | CalendarOutcome::Rejected(_) | CalendarOutcome::Ignored => {}
    }
    Ok(())
}

/// Handle a click on the inline settings menu
pub async fn handle_settings_callback(
    bot: Bot,
    query: CallbackQuery,
    state: Arc<BotState>,
    action: SettingsCallback,
) -> Result<()> {
    bot.answer_callback_query(query.id.clone()).await?;
    let Some(message) = query.regular_message() else {
        return Ok(());
    };
    let (chat_id, message_id) = (message.chat.id, message.id);
    let user_id = query.from.id.0;

    let mut settings = state.user_settings(Some(&query.from)).await;
    let (text, markup): (String, InlineKeyboardMarkup) = match action {
        SettingsCallback::Open => {
            let texts = texts(&settings.language);
            (settings_overview(texts, &settings), settings_menu(texts))
        }
        SettingsCallback::ChooseLanguage => {
            let texts = texts(&settings.language);
            (texts.choose_language.to_string(), language_menu(texts))
        }
        SettingsCallback::SetLanguage(code) => {
            if LANGUAGES.iter().any(|(supported, _)| *supported == code) {
                settings = state.settings.set_language(user_id, &code).await;
                info!("User {} switched language to {}", user_id, code);
            } else {
                warn!("Ignoring unsupported language {:?}", code);
            }
            let texts = texts(&settings.language);
            (settings_overview(texts, &settings), settings_menu(texts))
        }
        SettingsCallback::ChooseDateFormat => {
            let texts = texts(&settings.language);
            (texts.choose_date_format.to_string(), date_format_menu(texts))
        }
        SettingsCallback::SetDateFormat(format) => {
            settings = state.settings.set_date_format(user_id, format).await;
            let texts = texts(&settings.language);
            (settings_overview(texts, &settings), settings_menu(texts))
        }
        SettingsCallback::Close => {
            bot.delete_message(chat_id, message_id).await?;
            return Ok(());
        }
    };

    bot.edit_message_text(chat_id, message_id, text)
        .reply_markup(markup)
        .await?;
    Ok(())
}
