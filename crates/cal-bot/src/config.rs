//! Bot configuration
//!
//! Settings are read in this order, later sources winning:
//! 1. defaults
//! 2. the TOML file named by `CALENDAR_CONFIG`
//! 3. environment variables
//!
//! `${VAR_NAME}` inside the TOML file is replaced with the variable's value.

use std::path::Path;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use serde::Deserialize;

use cal_core::CalendarConfig;

/// Everything the binary needs to start the bot
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram_token: String,
    pub calendar: CalendarConfig,
}

#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    telegram: Option<TomlTelegram>,
    #[serde(default)]
    calendar: CalendarConfig,
}

#[derive(Debug, Default, Deserialize)]
struct TomlTelegram {
    token: Option<String>,
}

impl BotConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        let lookup = |name: &str| std::env::var(name).ok();
        let file = match lookup("CALENDAR_CONFIG") {
            Some(path) => Self::read_file(Path::new(&path), &lookup)?,
            None => TomlConfig::default(),
        };
        Self::resolve(file, &lookup)
    }

    fn read_file(path: &Path, lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<TomlConfig> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse_toml(&raw, lookup).with_context(|| format!("invalid config file {}", path.display()))
    }

    fn parse_toml(raw: &str, lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<TomlConfig> {
        Ok(toml::from_str(&expand_env_vars(raw, lookup))?)
    }

    /// Apply environment overrides on top of the file and validate the result
    fn resolve(file: TomlConfig, lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut calendar = file.calendar;

        if let Some(locale) = lookup("CALENDAR_LOCALE") {
            calendar.locale = locale;
        }
        if let Some(value) = lookup("CALENDAR_MIN_DATE") {
            calendar.min_date = Some(parse_date("CALENDAR_MIN_DATE", &value)?);
        }
        if let Some(value) = lookup("CALENDAR_MAX_DATE") {
            calendar.max_date = Some(parse_date("CALENDAR_MAX_DATE", &value)?);
        }
        if let Some(value) = lookup("CALENDAR_SHOW_ALERTS") {
            calendar.show_alerts = parse_bool("CALENDAR_SHOW_ALERTS", &value)?;
        }
        calendar.validate()?;

        let telegram_token = lookup("TELEGRAM_BOT_TOKEN")
            .or_else(|| file.telegram.and_then(|t| t.token))
            .filter(|token| !token.trim().is_empty())
            .context("TELEGRAM_BOT_TOKEN is not set")?;

        Ok(Self {
            telegram_token,
            calendar,
        })
    }
}

fn parse_date(name: &str, value: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .with_context(|| format!("{name} must be a YYYY-MM-DD date, got {value:?}"))
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{name} must be true or false, got {value:?}"),
    }
}

/// Replace `${VAR_NAME}` with the variable's value; unknown variables become empty.
fn expand_env_vars(value: &str, lookup: &impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                if let Some(env_value) = lookup(&after[..end]) {
                    result.push_str(&env_value);
                }
                rest = &after[end + 1..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_token_required() {
        let err = BotConfig::resolve(TomlConfig::default(), &env(&[])).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));

        let err = BotConfig::resolve(TomlConfig::default(), &env(&[("TELEGRAM_BOT_TOKEN", " ")]))
            .unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn test_defaults_from_env_only() {
        let config =
            BotConfig::resolve(TomlConfig::default(), &env(&[("TELEGRAM_BOT_TOKEN", "123:abc")]))
                .unwrap();
        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.calendar, CalendarConfig::default());
    }

    #[test]
    fn test_file_with_env_expansion() {
        let lookup = env(&[("BOT_TOKEN", "42:xyz")]);
        let file = BotConfig::parse_toml(
            r#"
            [telegram]
            token = "${BOT_TOKEN}"

            [calendar]
            locale = "ru"
            min_date = "2024-01-01"
            show_alerts = true
            "#,
            &lookup,
        )
        .unwrap();
        let config = BotConfig::resolve(file, &lookup).unwrap();

        assert_eq!(config.telegram_token, "42:xyz");
        assert_eq!(config.calendar.locale, "ru");
        assert_eq!(config.calendar.min_date, Some(date(2024, 1, 1)));
        assert!(config.calendar.show_alerts);
    }

    #[test]
    fn test_env_overrides_file() {
        let lookup = env(&[
            ("TELEGRAM_BOT_TOKEN", "env-token"),
            ("CALENDAR_MAX_DATE", "2030-12-31"),
            ("CALENDAR_SHOW_ALERTS", "off"),
        ]);
        let file = BotConfig::parse_toml(
            r#"
            [telegram]
            token = "file-token"

            [calendar]
            max_date = "2025-06-30"
            show_alerts = true
            "#,
            &lookup,
        )
        .unwrap();
        let config = BotConfig::resolve(file, &lookup).unwrap();

        assert_eq!(config.telegram_token, "env-token");
        assert_eq!(config.calendar.max_date, Some(date(2030, 12, 31)));
        assert!(!config.calendar.show_alerts);
    }

    #[test]
    fn test_invalid_overrides() {
        let err = BotConfig::resolve(
            TomlConfig::default(),
            &env(&[("TELEGRAM_BOT_TOKEN", "t"), ("CALENDAR_MIN_DATE", "01.02.2024")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("CALENDAR_MIN_DATE"));

        let err = BotConfig::resolve(
            TomlConfig::default(),
            &env(&[("TELEGRAM_BOT_TOKEN", "t"), ("CALENDAR_SHOW_ALERTS", "maybe")]),
        )
        .unwrap_err();
        assert!(err.to_string().contains("CALENDAR_SHOW_ALERTS"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = BotConfig::resolve(
            TomlConfig::default(),
            &env(&[
                ("TELEGRAM_BOT_TOKEN", "t"),
                ("CALENDAR_MIN_DATE", "2025-01-01"),
                ("CALENDAR_MAX_DATE", "2024-01-01"),
            ]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        let lookup = env(&[("NAME", "value")]);
        assert_eq!(expand_env_vars("a_${NAME}_b", &lookup), "a_value_b");
        assert_eq!(expand_env_vars("a_${MISSING}_b", &lookup), "a__b");
        assert_eq!(expand_env_vars("no vars", &lookup), "no vars");
        assert_eq!(expand_env_vars("open ${NAME", &lookup), "open ${NAME");
    }
}
