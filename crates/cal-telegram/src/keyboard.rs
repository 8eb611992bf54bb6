//! Conversion of calendar grids and bot menus into Telegram keyboards

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup};

use cal_core::{DateFormat, Grid, Localization, QuickDate};

use crate::texts::{BotTexts, LANGUAGES};

/// Callback payloads of the inline settings menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsCallback {
    /// Show the settings overview
    Open,
    ChooseLanguage,
    SetLanguage(String),
    ChooseDateFormat,
    SetDateFormat(DateFormat),
    Close,
}

const SETTINGS_PREFIX: &str = "settings";

impl SettingsCallback {
    pub fn encode(&self) -> String {
        match self {
            Self::Open => format!("{SETTINGS_PREFIX}:open"),
            Self::ChooseLanguage => format!("{SETTINGS_PREFIX}:lang"),
            Self::SetLanguage(code) => format!("{SETTINGS_PREFIX}:lang:{code}"),
            Self::ChooseDateFormat => format!("{SETTINGS_PREFIX}:fmt"),
            Self::SetDateFormat(format) => format!("{SETTINGS_PREFIX}:fmt:{}", format.code()),
            Self::Close => format!("{SETTINGS_PREFIX}:close"),
        }
    }

    pub fn parse(data: &str) -> Option<Self> {
        let rest = data.strip_prefix(SETTINGS_PREFIX)?.strip_prefix(':')?;
        // date format codes contain no ':' so splitting twice is enough
        let mut parts = rest.splitn(2, ':');
        match (parts.next()?, parts.next()) {
            ("open", None) => Some(Self::Open),
            ("close", None) => Some(Self::Close),
            ("lang", None) => Some(Self::ChooseLanguage),
            ("lang", Some(code)) if !code.is_empty() => Some(Self::SetLanguage(code.to_string())),
            ("fmt", None) => Some(Self::ChooseDateFormat),
            ("fmt", Some(code)) => code.parse().ok().map(Self::SetDateFormat),
            _ => None,
        }
    }
}

/// Inline keyboard for a calendar grid
pub fn to_inline_keyboard(grid: &Grid) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(grid.rows.iter().map(|row| {
        row.iter()
            .map(|cell| InlineKeyboardButton::callback(cell.label.clone(), cell.token.encode()))
            .collect::<Vec<_>>()
    }))
}

/// Reply keyboard of the main menu
pub fn main_menu(texts: &BotTexts) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(texts.menu_simple),
            KeyboardButton::new(texts.menu_dialog),
        ],
        vec![
            KeyboardButton::new(texts.menu_quick),
            KeyboardButton::new(texts.menu_settings),
        ],
    ])
    .resize_keyboard()
}

/// Reply keyboard with the quick-date shortcuts, two per row
pub fn quick_dates(texts: &BotTexts, l10n: &Localization) -> KeyboardMarkup {
    let mut rows: Vec<Vec<KeyboardButton>> = QuickDate::ALL
        .chunks(2)
        .map(|pair| {
            pair.iter()
                .map(|quick| KeyboardButton::new(format!("📌 {}", quick.label(l10n))))
                .collect()
        })
        .collect();
    rows.push(vec![KeyboardButton::new(texts.menu_back)]);
    KeyboardMarkup::new(rows).resize_keyboard()
}

/// Strip the decoration `quick_dates` adds to a button text.
pub fn parse_quick_date(text: &str, l10n: &Localization) -> Option<QuickDate> {
    let label = text.trim().strip_prefix("📌").unwrap_or(text);
    QuickDate::from_label(label, l10n)
}

pub fn settings_menu(texts: &BotTexts) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback(
            texts.settings_language,
            SettingsCallback::ChooseLanguage.encode(),
        )],
        vec![InlineKeyboardButton::callback(
            texts.settings_date_format,
            SettingsCallback::ChooseDateFormat.encode(),
        )],
        vec![InlineKeyboardButton::callback(
            texts.settings_close,
            SettingsCallback::Close.encode(),
        )],
    ])
}

pub fn language_menu(texts: &BotTexts) -> InlineKeyboardMarkup {
    let languages = LANGUAGES.iter().map(|(code, language)| {
        InlineKeyboardButton::callback(
            language.language_name,
            SettingsCallback::SetLanguage(code.to_string()).encode(),
        )
    });
    InlineKeyboardMarkup::new(vec![
        languages.collect::<Vec<_>>(),
        vec![InlineKeyboardButton::callback(
            texts.settings_back,
            SettingsCallback::Open.encode(),
        )],
    ])
}

pub fn date_format_menu(texts: &BotTexts) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = DateFormat::ALL
        .into_iter()
        .map(|format| {
            vec![InlineKeyboardButton::callback(
                format.to_string(),
                SettingsCallback::SetDateFormat(format).encode(),
            )]
        })
        .collect();
    rows.push(vec![InlineKeyboardButton::callback(
        texts.settings_back,
        SettingsCallback::Open.encode(),
    )]);
    InlineKeyboardMarkup::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cal_core::{CalendarConfig, MonthView, Render};
    use teloxide::types::InlineKeyboardButtonKind;

    use crate::texts::{ENGLISH, RUSSIAN};

    #[test]
    fn test_grid_to_inline_keyboard() {
        let grid = MonthView { year: 2024, month: 2 }
            .render(&CalendarConfig::default(), &Localization::english());
        let markup = to_inline_keyboard(&grid);

        assert_eq!(markup.inline_keyboard.len(), grid.rows.len());
        let title = &markup.inline_keyboard[0][1];
        assert_eq!(title.text, "February 2024");
        assert_eq!(
            title.kind,
            InlineKeyboardButtonKind::CallbackData("cal:s:v:i:2024:2".to_string())
        );
    }

    #[test]
    fn test_every_payload_fits_telegram_limit() {
        let grid = MonthView { year: 9999, month: 12 }
            .render(&CalendarConfig::default(), &Localization::russian());
        for row in to_inline_keyboard(&grid).inline_keyboard {
            for button in row {
                let InlineKeyboardButtonKind::CallbackData(data) = button.kind else {
                    panic!("calendar buttons carry callback data");
                };
                assert!(data.len() <= 64);
            }
        }
    }

    #[test]
    fn test_settings_callback_codec() {
        let cases = [
            SettingsCallback::Open,
            SettingsCallback::ChooseLanguage,
            SettingsCallback::SetLanguage("ru".to_string()),
            SettingsCallback::ChooseDateFormat,
            SettingsCallback::SetDateFormat(DateFormat::MonthDayYear),
            SettingsCallback::Close,
        ];
        for case in cases {
            assert_eq!(SettingsCallback::parse(&case.encode()), Some(case));
        }
        assert_eq!(SettingsCallback::parse("settings:fmt:dd/mm"), None);
        assert_eq!(SettingsCallback::parse("settings:lang:"), None);
        assert_eq!(SettingsCallback::parse("cal:s:v:x"), None);
    }

    #[test]
    fn test_quick_dates_keyboard() {
        let markup = quick_dates(&RUSSIAN, &Localization::russian());
        assert_eq!(markup.keyboard.len(), 5);
        assert_eq!(markup.keyboard[0][1].text, "📌 Завтра");
        assert_eq!(markup.keyboard[4][0].text, RUSSIAN.menu_back);
    }

    #[test]
    fn test_parse_quick_date() {
        let en = Localization::english();
        assert_eq!(parse_quick_date("📌 In 2 Weeks", &en), None);
        assert_eq!(parse_quick_date("📌 In 2 weeks", &en), Some(QuickDate::InTwoWeeks));
        assert_eq!(parse_quick_date("Tomorrow", &en), Some(QuickDate::Tomorrow));
    }

    #[test]
    fn test_language_menu_lists_all_languages() {
        let markup = language_menu(&ENGLISH);
        assert_eq!(markup.inline_keyboard[0].len(), LANGUAGES.len());
        assert_eq!(markup.inline_keyboard[0][1].text, "🇷🇺 Русский");
    }
}
