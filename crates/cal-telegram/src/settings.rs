//! Per-user preferences for the calendar bot

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use cal_core::DateFormat;
use cal_core::locale::normalize;

/// Preferences of one Telegram user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub language: String,
    pub date_format: DateFormat,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserSettings {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            date_format: DateFormat::default(),
            updated_at: chrono::Utc::now(),
        }
    }
}

/// In-memory settings store; preferences are lost on restart
#[derive(Debug)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<HashMap<u64, UserSettings>>>,
    default_language: String,
}

impl InMemorySettingsStore {
    /// Create a new settings store
    pub fn new(default_language: &str) -> Self {
        Self {
            settings: Arc::new(RwLock::new(HashMap::new())),
            default_language: normalize(default_language),
        }
    }

    /// Language given to users without a supported client language
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Get the settings of a user, creating them on first contact.
    ///
    /// `client_language` (Telegram's `language_code`) seeds the language of
    /// new users when it is one of `supported`.
    pub async fn get_or_create(
        &self,
        user_id: u64,
        client_language: Option<&str>,
        supported: &[&str],
    ) -> UserSettings {
        let settings = self.settings.read().await;
        if let Some(existing) = settings.get(&user_id) {
            return existing.clone();
        }
        drop(settings);

        let language = client_language
            .map(normalize)
            .filter(|code| supported.contains(&code.as_str()))
            .unwrap_or_else(|| self.default_language.clone());

        let mut settings = self.settings.write().await;
        settings
            .entry(user_id)
            .or_insert_with(|| UserSettings::new(language))
            .clone()
    }

    pub async fn set_language(&self, user_id: u64, language: &str) -> UserSettings {
        self.update(user_id, |s| s.language = language.to_string())
            .await
    }

    pub async fn set_date_format(&self, user_id: u64, format: DateFormat) -> UserSettings {
        self.update(user_id, |s| s.date_format = format).await
    }

    async fn update(&self, user_id: u64, apply: impl FnOnce(&mut UserSettings)) -> UserSettings {
        let mut settings = self.settings.write().await;
        let entry = settings
            .entry(user_id)
            .or_insert_with(|| UserSettings::new(self.default_language.clone()));
        apply(entry);
        entry.updated_at = chrono::Utc::now();
        entry.clone()
    }

    /// Number of users with stored settings
    pub async fn user_count(&self) -> usize {
        let settings = self.settings.read().await;
        settings.len()
    }
}

impl Clone for InMemorySettingsStore {
    fn clone(&self) -> Self {
        Self {
            settings: Arc::clone(&self.settings),
            default_language: self.default_language.clone(),
        }
    }
}
