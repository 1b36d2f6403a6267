use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::i18n::{Language, LanguageStrings};

#[derive(Debug, Clone)]
pub struct Config {
    // Static file server
    pub port: u16,
    pub bind_addr: String,
    pub static_dir: String,

    // Remote translation service
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub remote_max_attempts: u32,

    // Session behavior
    pub suggestion_debounce: Duration,
    pub announcement_ttl: Duration,
    pub default_source_lang: String,
    pub default_target_lang: String,
    pub ui_locale: String,
}

/// The subset of configuration a [`crate::TranslatorSession`] needs at mount time.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub suggestion_debounce: Duration,
    pub announcement_ttl: Duration,
    pub source_lang: Language,
    pub target_lang: Language,
    pub strings: &'static LanguageStrings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            suggestion_debounce: Duration::from_millis(500),
            announcement_ttl: Duration::from_millis(3000),
            source_lang: Language::ENGLISH,
            target_lang: Language::SPANISH,
            strings: LanguageStrings::spanish(),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            port: env_or("PORT", 3000),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .unwrap_or_else(|_| "dist/accessible-translator".to_string()),

            api_base_url: std::env::var("TRANSLATE_API_URL")
                .unwrap_or_else(|_| "http://localhost:5181/api/translate".to_string()),
            request_timeout: Duration::from_secs(env_or("REQUEST_TIMEOUT_SECS", 10)),
            remote_max_attempts: env_or("REMOTE_MAX_ATTEMPTS", 2),

            suggestion_debounce: Duration::from_millis(env_or("SUGGESTION_DEBOUNCE_MS", 500)),
            announcement_ttl: Duration::from_millis(env_or("ANNOUNCEMENT_CLEAR_MS", 3000)),
            default_source_lang: std::env::var("DEFAULT_SOURCE_LANG")
                .unwrap_or_else(|_| "en".to_string()),
            default_target_lang: std::env::var("DEFAULT_TARGET_LANG")
                .unwrap_or_else(|_| "es".to_string()),
            ui_locale: std::env::var("UI_LOCALE").unwrap_or_else(|_| "es".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.remote_max_attempts == 0 {
            bail!("REMOTE_MAX_ATTEMPTS must be at least 1");
        }
        Language::from_code(&self.default_source_lang).context("DEFAULT_SOURCE_LANG")?;
        Language::from_code(&self.default_target_lang).context("DEFAULT_TARGET_LANG")?;
        LanguageStrings::for_locale(&self.ui_locale).context("UI_LOCALE")?;
        Ok(())
    }

    /// Project the session-relevant settings, resolving language codes against the catalog.
    pub fn session_settings(&self) -> Result<SessionSettings> {
        Ok(SessionSettings {
            suggestion_debounce: self.suggestion_debounce,
            announcement_ttl: self.announcement_ttl,
            source_lang: Language::from_code(&self.default_source_lang)?,
            target_lang: Language::from_code(&self.default_target_lang)?,
            strings: LanguageStrings::for_locale(&self.ui_locale)?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}
