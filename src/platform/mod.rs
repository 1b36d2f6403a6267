//! Optional browser capabilities behind adapter traits.
//!
//! Each capability is detected once when the [`Platform`] is built and then held as a
//! [`Capability`], so call sites have to match on availability before using it.

mod clipboard;
mod recognition;
mod synthesis;

pub use clipboard::Clipboard;
pub use recognition::{RecognitionEvent, RecognitionOptions, RecognitionSink, SpeechRecognizer};
pub use synthesis::{SpeechSynthesizer, Utterance, Voice};

use std::sync::Arc;

/// A platform feature that is either present or permanently absent.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable,
}

impl<T> Capability<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }
}

impl<T> From<Option<T>> for Capability<T> {
    fn from(detected: Option<T>) -> Self {
        match detected {
            Some(inner) => Capability::Available(inner),
            None => Capability::Unavailable,
        }
    }
}

/// The set of capabilities a session runs against.
pub struct Platform {
    pub recognition: Capability<Box<dyn SpeechRecognizer>>,
    pub synthesis: Capability<Box<dyn SpeechSynthesizer>>,
    pub clipboard: Capability<Arc<dyn Clipboard>>,
}

impl Platform {
    /// A platform with none of the optional capabilities, e.g. a terminal.
    pub fn headless() -> Self {
        Self {
            recognition: Capability::Unavailable,
            synthesis: Capability::Unavailable,
            clipboard: Capability::Unavailable,
        }
    }

    pub fn with_recognition(mut self, recognizer: impl SpeechRecognizer + 'static) -> Self {
        self.recognition = Capability::Available(Box::new(recognizer));
        self
    }

    pub fn with_synthesis(mut self, synthesizer: impl SpeechSynthesizer + 'static) -> Self {
        self.synthesis = Capability::Available(Box::new(synthesizer));
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Capability::Available(Arc::new(clipboard));
        self
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform")
            .field("recognition", &self.recognition.is_available())
            .field("synthesis", &self.synthesis.is_available())
            .field("clipboard", &self.clipboard.is_available())
            .finish()
    }
}
