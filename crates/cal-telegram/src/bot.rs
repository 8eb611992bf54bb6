//! Telegram bot implementation

use std::sync::Arc;

use teloxide::{dispatching::UpdateFilterExt, prelude::*, utils::command::BotCommands};
use tracing::{error, info};

use cal_core::{CalendarConfig, CallbackToken, WidgetKind};

use crate::commands::{
    BotState, handle_calendar, handle_calendar_callback, handle_help, handle_quick,
    handle_settings, handle_settings_callback, handle_start, handle_text,
};
use crate::error::{Result, TelegramError};
use crate::keyboard::SettingsCallback;

/// Telegram bot commands
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "Calendar Bot commands")]
enum Command {
    #[command(description = "Show the main menu")]
    Start,
    #[command(description = "Show help message")]
    Help,
    #[command(description = "Language and date format")]
    Settings,
    #[command(description = "Month calendar with arrows")]
    Simple,
    #[command(description = "Year, month and day selection")]
    Dialog,
    #[command(description = "Quick relative dates")]
    Quick,
}

/// Telegram bot wrapper
pub struct CalendarBot {
    bot: Bot,
    state: Arc<BotState>,
}

impl CalendarBot {
    /// Create a new calendar bot
    pub fn new(token: &str, calendar_config: CalendarConfig) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(TelegramError::TokenNotSet);
        }
        calendar_config.validate()?;

        Ok(Self {
            bot: Bot::new(token),
            state: Arc::new(BotState::new(calendar_config)),
        })
    }

    /// Start the bot
    pub async fn start(self) -> Result<()> {
        info!("Starting calendar bot...");

        if let Err(e) = self.bot.set_my_commands(Command::bot_commands()).await {
            error!("Failed to register bot commands: {}", e);
        }

        let command_handler = Update::filter_message()
            .filter_command::<Command>()
            .endpoint(|bot: Bot, msg: Message, cmd: Command, state: Arc<BotState>| async move {
                match cmd {
                    Command::Start => handle_start(bot, msg, state).await,
                    Command::Help => handle_help(bot, msg, state).await,
                    Command::Settings => handle_settings(bot, msg, state).await,
                    Command::Simple => handle_calendar(bot, msg, state, WidgetKind::Simple).await,
                    Command::Dialog => handle_calendar(bot, msg, state, WidgetKind::Dialog).await,
                    Command::Quick => handle_quick(bot, msg, state).await,
                }
            });

        let text_handler = Update::filter_message()
            .endpoint(|bot: Bot, msg: Message, state: Arc<BotState>| async move {
                handle_text(bot, msg, state).await
            });

        let calendar_handler = Update::filter_callback_query()
            .filter(|query: CallbackQuery| {
                query
                    .data
                    .as_deref()
                    .is_some_and(CallbackToken::is_calendar_payload)
            })
            .endpoint(|bot: Bot, query: CallbackQuery, state: Arc<BotState>| async move {
                handle_calendar_callback(bot, query, state).await
            });

        let settings_handler = Update::filter_callback_query()
            .filter_map(|query: CallbackQuery| query.data.as_deref().and_then(SettingsCallback::parse))
            .endpoint(
                |bot: Bot, query: CallbackQuery, state: Arc<BotState>, action: SettingsCallback| async move {
                    handle_settings_callback(bot, query, state, action).await
                },
            );

        let handler = dptree::entry()
            .branch(command_handler)
            .branch(text_handler)
            .branch(calendar_handler)
            .branch(settings_handler);

        Dispatcher::builder(self.bot, handler)
            .dependencies(dptree::deps![self.state])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        assert_eq!(Command::parse("/start", "calbot").ok(), Some(Command::Start));
        assert_eq!(Command::parse("/simple", "calbot").ok(), Some(Command::Simple));
        assert_eq!(Command::parse("/dialog@calbot", "calbot").ok(), Some(Command::Dialog));
        assert!(Command::parse("/unknown", "calbot").is_err());
    }

    #[test]
    fn test_command_descriptions_list_every_command() {
        let commands = Command::bot_commands();
        assert_eq!(commands.len(), 6);
        assert!(commands.iter().all(|c| !c.description.is_empty()));
    }

    #[test]
    fn test_empty_token_rejected() {
        let result = CalendarBot::new("  ", CalendarConfig::default());
        assert!(matches!(result, Err(TelegramError::TokenNotSet)));
    }
}
