use std::sync::Arc;

use crate::error::VoiceError;
use crate::i18n::Language;

/// How a recognition session is started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub lang: Language,
    /// Keep listening across pauses instead of stopping after one phrase
    pub continuous: bool,
    /// Deliver partial transcripts while the user is still speaking
    pub interim_results: bool,
}

impl RecognitionOptions {
    /// Continuous recognition with interim results, the mode the voice button uses.
    pub fn dictation(lang: Language) -> Self {
        Self {
            lang,
            continuous: true,
            interim_results: true,
        }
    }
}

/// Something the recognition engine reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Latest transcript, partial or final
    Result { transcript: String },
    Error { detail: String },
}

/// Callback handle a recognizer uses to report transcripts and errors.
///
/// The owner decides what delivery means; once the owner is gone, delivering is a
/// no-op, so an engine may keep calling after teardown without harm.
#[derive(Clone)]
pub struct RecognitionSink {
    deliver: Arc<dyn Fn(RecognitionEvent) + Send + Sync>,
}

impl RecognitionSink {
    pub fn new(deliver: impl Fn(RecognitionEvent) + Send + Sync + 'static) -> Self {
        Self {
            deliver: Arc::new(deliver),
        }
    }

    pub fn on_result(&self, transcript: impl Into<String>) {
        (self.deliver)(RecognitionEvent::Result {
            transcript: transcript.into(),
        });
    }

    pub fn on_error(&self, detail: impl Into<String>) {
        (self.deliver)(RecognitionEvent::Error {
            detail: detail.into(),
        });
    }
}

impl std::fmt::Debug for RecognitionSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RecognitionSink")
    }
}

/// A speech-to-text engine.
pub trait SpeechRecognizer: Send + Sync {
    /// Language used by the next (or current) recognition session
    fn set_language(&self, lang: Language);

    /// Begin recognizing; results and errors go to `sink` until [`stop`](Self::stop)
    fn start(&self, options: RecognitionOptions, sink: RecognitionSink)
        -> Result<(), VoiceError>;

    fn stop(&self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_dictation_options() {
        let options = RecognitionOptions::dictation(Language::SPANISH);
        assert!(options.continuous);
        assert!(options.interim_results);
        assert_eq!(options.lang, Language::SPANISH);
    }

    #[test]
    fn test_sink_delivers_events_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let sink = RecognitionSink::new(move |event| seen_clone.lock().unwrap().push(event));

        sink.on_result("hola");
        sink.on_error("no-speech");

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                RecognitionEvent::Result {
                    transcript: "hola".to_string()
                },
                RecognitionEvent::Error {
                    detail: "no-speech".to_string()
                },
            ]
        );
    }
}
