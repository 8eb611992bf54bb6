//! Bot message texts (the calendar captions live in `cal_core::Localization`)

use cal_core::locale::normalize;

/// Texts of one language
#[derive(Debug, Clone, Copy)]
pub struct BotTexts {
    pub welcome: &'static str,
    pub help: &'static str,
    pub main_menu: &'static str,
    pub simple_prompt: &'static str,
    pub dialog_prompt: &'static str,
    pub quick_prompt: &'static str,
    /// `{date}` is replaced with the formatted date
    pub selected: &'static str,
    pub quick_selected_footer: &'static str,
    pub cancelled: &'static str,
    pub error: &'static str,

    pub menu_simple: &'static str,
    pub menu_dialog: &'static str,
    pub menu_quick: &'static str,
    pub menu_settings: &'static str,
    pub menu_back: &'static str,

    /// `{language}` and `{format}` are replaced with the current values
    pub settings_title: &'static str,
    pub settings_language: &'static str,
    pub settings_date_format: &'static str,
    pub settings_back: &'static str,
    pub settings_close: &'static str,
    pub choose_language: &'static str,
    pub choose_date_format: &'static str,
    pub language_name: &'static str,
}

pub const ENGLISH: BotTexts = BotTexts {
    welcome: "👋 Welcome to Calendar Bot!\nChoose a calendar type:",
    help: "📅 Calendar Bot\n\n\
           /simple - month calendar with previous/next arrows\n\
           /dialog - pick a year, then a month, then a day\n\
           /quick - one-tap relative dates\n\
           /settings - language and date format\n\
           /help - show this help",
    main_menu: "🏠 Main Menu\nChoose a calendar type:",
    simple_prompt: "📅 Simple Calendar\nSelect a date:",
    dialog_prompt: "📅 Dialog Calendar\nSelect a year:",
    quick_prompt: "📌 Quick dates\nChoose a date:",
    selected: "✅ You selected: {date}",
    quick_selected_footer: "📝 Choose another date or go back to the main menu",
    cancelled: "❌ Date selection cancelled",
    error: "❌ An error occurred. Please try again later.",
    menu_simple: "📅 Simple Calendar",
    menu_dialog: "📅 Dialog Calendar",
    menu_quick: "📌 Quick dates",
    menu_settings: "⚙️ Settings",
    menu_back: "🔙 Back to Main Menu",
    settings_title: "⚙️ Settings\n\nLanguage: {language}\nDate format: {format}",
    settings_language: "🌐 Language",
    settings_date_format: "📅 Date format",
    settings_back: "🔙 Back",
    settings_close: "✖️ Close",
    choose_language: "🌐 Choose a language:",
    choose_date_format: "📅 Choose a date format:",
    language_name: "🇬🇧 English",
};

pub const RUSSIAN: BotTexts = BotTexts {
    welcome: "👋 Добро пожаловать в Calendar Bot!\nВыберите тип календаря:",
    help: "📅 Calendar Bot\n\n\
           /simple - календарь на месяц со стрелками\n\
           /dialog - выбор года, затем месяца, затем дня\n\
           /quick - быстрые даты\n\
           /settings - язык и формат даты\n\
           /help - показать эту справку",
    main_menu: "🏠 Главное меню\nВыберите тип календаря:",
    simple_prompt: "📅 Простой календарь\nВыберите дату:",
    dialog_prompt: "📅 Диалоговый календарь\nВыберите год:",
    quick_prompt: "📌 Быстрые даты\nВыберите дату:",
    selected: "✅ Вы выбрали: {date}",
    quick_selected_footer: "📝 Можете выбрать другую дату или вернуться в главное меню",
    cancelled: "❌ Выбор даты отменён",
    error: "❌ Произошла ошибка. Пожалуйста, попробуйте позже.",
    menu_simple: "📅 Простой календарь",
    menu_dialog: "📅 Диалоговый календарь",
    menu_quick: "📌 Быстрые даты",
    menu_settings: "⚙️ Настройки",
    menu_back: "🔙 Вернуться в главное меню",
    settings_title: "⚙️ Настройки\n\nЯзык: {language}\nФормат даты: {format}",
    settings_language: "🌐 Язык",
    settings_date_format: "📅 Формат даты",
    settings_back: "🔙 Назад",
    settings_close: "✖️ Закрыть",
    choose_language: "🌐 Выберите язык:",
    choose_date_format: "📅 Выберите формат даты:",
    language_name: "🇷🇺 Русский",
};

/// Languages the bot has texts for, with their codes
pub const LANGUAGES: [(&str, &BotTexts); 2] = [("en", &ENGLISH), ("ru", &RUSSIAN)];

/// Texts for `language` (region suffixes ignored), English when unknown
pub fn texts(language: &str) -> &'static BotTexts {
    let language = normalize(language);
    LANGUAGES
        .iter()
        .find(|(code, _)| *code == language)
        .map(|(_, texts)| *texts)
        .unwrap_or(&ENGLISH)
}

/// Menu item a reply-keyboard text stands for, in any language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Simple,
    Dialog,
    Quick,
    Settings,
    Back,
}

impl MenuItem {
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        LANGUAGES.iter().find_map(|(_, t)| {
            [
                (t.menu_simple, Self::Simple),
                (t.menu_dialog, Self::Dialog),
                (t.menu_quick, Self::Quick),
                (t.menu_settings, Self::Settings),
                (t.menu_back, Self::Back),
            ]
            .into_iter()
            .find(|(label, _)| *label == text)
            .map(|(_, item)| item)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texts_fallback() {
        assert_eq!(texts("ru").menu_simple, "📅 Простой календарь");
        assert_eq!(texts("de").menu_simple, "📅 Simple Calendar");
        assert_eq!(texts("ru_RU").menu_simple, "📅 Простой календарь");
        assert_eq!(texts("RU").menu_simple, "📅 Простой календарь");
    }

    #[test]
    fn test_menu_item_in_both_languages() {
        assert_eq!(MenuItem::parse("📅 Simple Calendar"), Some(MenuItem::Simple));
        assert_eq!(MenuItem::parse("📅 Диалоговый календарь"), Some(MenuItem::Dialog));
        assert_eq!(MenuItem::parse(" ⚙️ Settings "), Some(MenuItem::Settings));
        assert_eq!(MenuItem::parse("🔙 Вернуться в главное меню"), Some(MenuItem::Back));
        assert_eq!(MenuItem::parse("hello"), None);
    }
}
