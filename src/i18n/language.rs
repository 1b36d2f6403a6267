//! Language type: a code that is known to exist in the catalog.

use crate::error::CatalogError;
use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Serialize, Serializer};

/// A language from the catalog.
///
/// Only constructible through [`Language::from_code`] or the constants, so holding a
/// `Language` means catalog membership has already been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    code: &'static str,
}

impl Language {
    pub const ENGLISH: Language = Language { code: "en" };
    pub const SPANISH: Language = Language { code: "es" };

    /// Resolve a code against the catalog.
    ///
    /// # Example
    /// ```ignore
    /// let french = Language::from_code("fr")?;
    /// ```
    pub fn from_code(code: &str) -> Result<Language, CatalogError> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| CatalogError::UnknownLanguage(code.to_string()))
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full catalog entry for this language.
    pub fn config(&self) -> &'static LanguageConfig {
        // Every constructor goes through the registry, so the lookup cannot miss.
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Display name shown in the selectors.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
