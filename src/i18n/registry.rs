//! Language registry: the languages offered in both selectors.
//!
//! Initialized once behind a `OnceLock` and immutable thereafter. Codes are unique.

use std::sync::OnceLock;

/// One entry of the language catalog.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "en", "es", "zh")
    pub code: &'static str,

    /// Display name shown in the selectors (e.g., "Inglés", "Chino")
    pub name: &'static str,

    /// Name of the language in the language itself (e.g., "English", "中文")
    pub native_name: &'static str,
}

pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Look up a language by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All languages, in selector order.
    pub fn list_all(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Display name for `code`, or `None` when the code is not in the catalog.
    pub fn display_name(&self, code: &str) -> Option<&'static str> {
        self.get_by_code(code).map(|lang| lang.name)
    }
}

fn entry(code: &'static str, name: &'static str, native_name: &'static str) -> LanguageConfig {
    LanguageConfig {
        code,
        name,
        native_name,
    }
}

fn default_languages() -> Vec<LanguageConfig> {
    vec![
        entry("en", "Inglés", "English"),
        entry("es", "Español", "Español"),
        entry("fr", "Francés", "Français"),
        entry("de", "Alemán", "Deutsch"),
        entry("zh", "Chino", "中文"),
        entry("it", "Italiano", "Italiano"),
        entry("pt", "Portugués", "Português"),
        entry("ru", "Ruso", "Русский"),
        entry("ja", "Japonés", "日本語"),
        entry("ar", "Árabe", "العربية"),
    ]
}
