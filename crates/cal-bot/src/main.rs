//! cal-bot: Telegram calendar bot binary
//!
//! Usage:
//!   cal-bot            - Start the bot
//!   cal-bot --help     - Show help
//!   cal-bot --version  - Show version

mod config;

use cal_telegram::CalendarBot;
use tracing_subscriber::EnvFilter;

use crate::config::BotConfig;

/// Run mode
enum RunMode {
    /// Long-poll Telegram for updates
    Run,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match parse_args() {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("cal-bot {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Run => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;

    tracing::info!("Starting cal-bot...");
    tracing::info!(
        "Locale: {}, range: {:?} ..= {:?}",
        config.calendar.locale,
        config.calendar.min_date,
        config.calendar.max_date
    );

    let bot = CalendarBot::new(&config.telegram_token, config.calendar)
        .map_err(|e| anyhow::anyhow!("Failed to create Telegram bot: {}", e))?;
    bot.start().await?;

    tracing::info!("cal-bot stopped");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::Run
}

/// Print help message
fn print_help() {
    println!("cal-bot - inline calendar date picker for Telegram");
    println!();
    println!("Usage:");
    println!("  cal-bot            Start the bot");
    println!("  cal-bot --help     Show this help message");
    println!("  cal-bot --version  Show version");
    println!();
    println!("Environment Variables:");
    println!("  TELEGRAM_BOT_TOKEN    Bot token from @BotFather (required)");
    println!("  CALENDAR_CONFIG       Path to a TOML config file");
    println!("  CALENDAR_LOCALE       Default language: en or ru (default: en)");
    println!("  CALENDAR_MIN_DATE     Earliest selectable date, YYYY-MM-DD");
    println!("  CALENDAR_MAX_DATE     Latest selectable date, YYYY-MM-DD");
    println!("  CALENDAR_SHOW_ALERTS  Show range errors as alerts (default: false)");
    println!("  RUST_LOG              Log filter (default: info)");
}
