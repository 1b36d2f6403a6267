use serde::Serialize;

use crate::error::VoiceError;
use crate::i18n::Language;

/// A voice installed in the synthesis engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 tag reported by the engine (e.g., "es-ES")
    pub lang: String,
}

/// Text to be spoken, tagged with the language it is written in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub text: String,
    pub lang: Language,
}

impl Utterance {
    pub fn new(text: impl Into<String>, lang: Language) -> Self {
        Self {
            text: text.into(),
            lang,
        }
    }
}

/// A text-to-speech engine.
pub trait SpeechSynthesizer: Send + Sync {
    /// Voices currently loaded. Engines may report none until they finish loading.
    fn voices(&self) -> Vec<Voice>;

    /// Queue the utterance for playback. Errors are synchronous failures only.
    fn speak(&self, utterance: Utterance) -> Result<(), VoiceError>;
}
