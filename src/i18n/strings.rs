use crate::error::CatalogError;

/// All user-facing strings for one UI locale.
///
/// Every user action that changes visible state announces one of these on the live
/// region. Templates use `{name}` placeholders, filled with [`LanguageStrings::fill`].
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    /// Locale code these strings are written in
    pub locale: &'static str,

    // ==================== Accessibility Toggles ====================
    pub contrast_on: &'static str,
    pub contrast_off: &'static str,
    pub dyslexia_on: &'static str,
    pub dyslexia_off: &'static str,
    pub grayscale_on: &'static str,
    pub grayscale_off: &'static str,

    /// Placeholders: {percent}
    pub font_increased: &'static str,

    /// Placeholders: {percent}
    pub font_decreased: &'static str,

    // ==================== Translation ====================
    pub nothing_to_translate: &'static str,
    pub translating: &'static str,
    pub translation_done: &'static str,

    /// Shown in place of the translation when the service answered without one
    pub translation_missing: &'static str,

    /// Shown in place of the translation when the call failed
    pub translation_failed_text: &'static str,

    /// Announced when the call failed
    pub translation_failed: &'static str,

    /// Placeholder in the empty translation box
    pub translation_placeholder: &'static str,

    // ==================== Suggestions ====================
    pub suggestions_missing: &'static str,
    pub suggestions_failed: &'static str,

    // ==================== Form Actions ====================
    pub languages_swapped: &'static str,
    pub input_cleared: &'static str,
    pub copied: &'static str,
    pub copy_failed: &'static str,
    pub clipboard_unavailable: &'static str,

    // ==================== Voice Input ====================
    pub listening: &'static str,
    pub recognition_error: &'static str,
    pub recognition_stopped: &'static str,
    pub recognition_unavailable: &'static str,

    // ==================== Voice Output ====================
    pub nothing_to_speak: &'static str,
    pub synthesis_unavailable: &'static str,
    pub speaking: &'static str,
    pub speak_failed: &'static str,

    // ==================== Other ====================
    /// Stand-in for a language code missing from the catalog
    pub unknown_language: &'static str,
}

pub static SPANISH_STRINGS: LanguageStrings = LanguageStrings {
    locale: "es",

    contrast_on: "Modo alto contraste activado",
    contrast_off: "Modo alto contraste desactivado",
    dyslexia_on: "Modo amigable para dislexia activado",
    dyslexia_off: "Modo amigable para dislexia desactivado",
    grayscale_on: "Modo escala de grises activado",
    grayscale_off: "Modo escala de grises desactivado",
    font_increased: "Tamaño de fuente aumentado a {percent}%",
    font_decreased: "Tamaño de fuente disminuido a {percent}%",

    nothing_to_translate: "No hay texto para traducir",
    translating: "Traduciendo...",
    translation_done: "Traducción completada",
    translation_missing: "No se recibió traducción",
    translation_failed_text: "Error al traducir, inténtalo más tarde.",
    translation_failed: "Error en la traducción",
    translation_placeholder: "Traducción aparecerá aquí",

    suggestions_missing: "No se recibieron sugerencias",
    suggestions_failed: "Error al obtener sugerencias.",

    languages_swapped: "Idiomas intercambiados",
    input_cleared: "Texto limpiado",
    copied: "Traducción copiada al portapapeles",
    copy_failed: "Error al copiar la traducción",
    clipboard_unavailable: "El portapapeles no está disponible en este navegador",

    listening: "Escuchando...",
    recognition_error: "Error en el reconocimiento de voz",
    recognition_stopped: "Reconocimiento de voz detenido",
    recognition_unavailable: "El reconocimiento de voz no está disponible en este navegador",

    nothing_to_speak: "No hay texto para leer",
    synthesis_unavailable: "La síntesis de voz no está disponible en este idioma o navegador",
    speaking: "Reproduciendo traducción",
    speak_failed: "No se pudo reproducir la voz para este idioma",

    unknown_language: "desconocido",
};

pub static ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    locale: "en",

    contrast_on: "High contrast mode on",
    contrast_off: "High contrast mode off",
    dyslexia_on: "Dyslexia-friendly mode on",
    dyslexia_off: "Dyslexia-friendly mode off",
    grayscale_on: "Grayscale mode on",
    grayscale_off: "Grayscale mode off",
    font_increased: "Font size increased to {percent}%",
    font_decreased: "Font size decreased to {percent}%",

    nothing_to_translate: "There is no text to translate",
    translating: "Translating...",
    translation_done: "Translation complete",
    translation_missing: "No translation received",
    translation_failed_text: "Translation failed, please try again later.",
    translation_failed: "Translation error",
    translation_placeholder: "The translation will appear here",

    suggestions_missing: "No suggestions received",
    suggestions_failed: "Could not fetch suggestions.",

    languages_swapped: "Languages swapped",
    input_cleared: "Text cleared",
    copied: "Translation copied to clipboard",
    copy_failed: "Could not copy the translation",
    clipboard_unavailable: "The clipboard is not available in this browser",

    listening: "Listening...",
    recognition_error: "Speech recognition error",
    recognition_stopped: "Speech recognition stopped",
    recognition_unavailable: "Speech recognition is not available in this browser",

    nothing_to_speak: "There is no text to read",
    synthesis_unavailable: "Speech synthesis is not available for this language or browser",
    speaking: "Playing translation",
    speak_failed: "Could not play the voice for this language",

    unknown_language: "unknown",
};

impl LanguageStrings {
    /// Strings for a UI locale code.
    pub fn for_locale(locale: &str) -> Result<&'static LanguageStrings, CatalogError> {
        match locale {
            "es" => Ok(&SPANISH_STRINGS),
            "en" => Ok(&ENGLISH_STRINGS),
            other => Err(CatalogError::UnknownLocale(other.to_string())),
        }
    }

    pub fn spanish() -> &'static LanguageStrings {
        &SPANISH_STRINGS
    }

    /// Replace each `{key}` in `template` with its value.
    pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
        values
            .iter()
            .fold(template.to_string(), |acc, (key, value)| {
                acc.replace(&format!("{{{}}}", key), value)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_locale() {
        assert_eq!(LanguageStrings::for_locale("es").unwrap().locale, "es");
        assert_eq!(LanguageStrings::for_locale("en").unwrap().locale, "en");
        assert!(LanguageStrings::for_locale("fr").is_err());
    }

    #[test]
    fn test_spanish_failure_text() {
        assert_eq!(
            SPANISH_STRINGS.translation_failed_text,
            "Error al traducir, inténtalo más tarde."
        );
    }

    #[test]
    fn test_font_templates_have_placeholder() {
        for strings in [&SPANISH_STRINGS, &ENGLISH_STRINGS] {
            assert!(strings.font_increased.contains("{percent}"));
            assert!(strings.font_decreased.contains("{percent}"));
        }
    }

    #[test]
    fn test_fill_replaces_placeholder() {
        let message = LanguageStrings::fill(SPANISH_STRINGS.font_increased, &[("percent", "110")]);
        assert_eq!(message, "Tamaño de fuente aumentado a 110%");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(
            LanguageStrings::fill("{a} and {b}", &[("a", "1")]),
            "1 and {b}"
        );
    }

    #[test]
    fn test_toggle_messages_differ() {
        for strings in [&SPANISH_STRINGS, &ENGLISH_STRINGS] {
            assert_ne!(strings.contrast_on, strings.contrast_off);
            assert_ne!(strings.dyslexia_on, strings.dyslexia_off);
            assert_ne!(strings.grayscale_on, strings.grayscale_off);
        }
    }
}
