//! The translator session: form state plus every user-triggered handler.
//!
//! A session is created at mount and dropped at unmount. While alive it owns the
//! suggestion debounce task, the announcement timer and the voice adapters; dropping
//! it releases all three and stops an active recognition session.
//!
//! Handlers that spawn work (suggestions, clipboard, announcement timers) must run
//! inside a tokio runtime.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::announcer::Announcer;
use crate::client::TranslationApi;
use crate::config::SessionSettings;
use crate::error::CatalogError;
use crate::i18n::{Language, LanguageRegistry, LanguageStrings};
use crate::platform::{
    Capability, Clipboard, Platform, RecognitionEvent, RecognitionOptions, RecognitionSink,
    SpeechRecognizer, SpeechSynthesizer, Utterance,
};
use crate::suggestions::SuggestionPipeline;
use crate::view::{self, FontScale, ViewState};

/// Form and accessibility state of one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionState {
    pub source_lang: Language,
    pub target_lang: Language,
    pub input_text: String,
    pub translated_text: String,
    pub suggestions_text: String,
    pub is_listening: bool,
    pub is_high_contrast: bool,
    pub is_dyslexia_friendly: bool,
    pub is_grayscale: bool,
    pub font_size: FontScale,
    pub show_accessibility_info: bool,
}

impl SessionState {
    pub fn new(source_lang: Language, target_lang: Language) -> Self {
        Self {
            source_lang,
            target_lang,
            input_text: String::new(),
            translated_text: String::new(),
            suggestions_text: String::new(),
            is_listening: false,
            is_high_contrast: false,
            is_dyslexia_friendly: false,
            is_grayscale: false,
            font_size: FontScale::DEFAULT,
            show_accessibility_info: false,
        }
    }

    fn view(&self) -> ViewState {
        ViewState {
            high_contrast: self.is_high_contrast,
            dyslexia_friendly: self.is_dyslexia_friendly,
            grayscale: self.is_grayscale,
            keyboard_navigation: view::keyboard_navigation(),
            font_scale: self.font_size,
        }
    }
}

/// State reachable from spawned tasks and platform callbacks. Those hold it weakly so
/// that nothing applies after the session is gone.
struct Shared {
    state: Mutex<SessionState>,
    announcer: Announcer,
    strings: &'static LanguageStrings,
    view_tx: watch::Sender<ViewState>,
    /// Bumped on every suggestion emission; only the newest request may apply.
    suggestion_seq: AtomicU64,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn announce(&self, message: impl Into<String>) {
        self.announcer.announce(message);
    }

    fn publish_view(&self) {
        let view = self.state().view();
        self.view_tx.send_replace(view);
    }

    /// Empty the three text fields. Suggestion responses still in flight no longer
    /// match the sequence and are dropped when they arrive.
    fn clear_text(&self, state: &mut SessionState) {
        state.input_text.clear();
        state.translated_text.clear();
        state.suggestions_text.clear();
        self.suggestion_seq.fetch_add(1, Ordering::SeqCst);
    }

    fn handle_recognition(&self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result { transcript } => {
                self.state().input_text = transcript;
            }
            RecognitionEvent::Error { detail } => {
                error!("Speech recognition error: {}", detail);
                self.announce(self.strings.recognition_error);
            }
        }
    }
}

pub struct TranslatorSession {
    shared: Arc<Shared>,
    api: Arc<dyn TranslationApi>,
    recognition: Capability<Box<dyn SpeechRecognizer>>,
    synthesis: Capability<Box<dyn SpeechSynthesizer>>,
    clipboard: Capability<Arc<dyn Clipboard>>,
    suggestions: SuggestionPipeline,
}

impl TranslatorSession {
    /// Mount a session. Spawns the suggestion debounce task on the current runtime.
    pub fn new(
        api: Arc<dyn TranslationApi>,
        platform: Platform,
        settings: SessionSettings,
    ) -> Self {
        let state = SessionState::new(settings.source_lang, settings.target_lang);
        let (view_tx, _) = watch::channel(state.view());

        let shared = Arc::new(Shared {
            state: Mutex::new(state),
            announcer: Announcer::new(settings.announcement_ttl),
            strings: settings.strings,
            view_tx,
            suggestion_seq: AtomicU64::new(0),
        });

        let suggestions = {
            let weak = Arc::downgrade(&shared);
            let api = Arc::clone(&api);
            SuggestionPipeline::spawn(settings.suggestion_debounce, move |text| {
                fetch_suggestions(&weak, &api, text);
            })
        };

        if let Capability::Available(recognizer) = &platform.recognition {
            recognizer.set_language(settings.source_lang);
        }

        info!(
            "Translator session mounted ({} -> {}, {:?})",
            settings.source_lang, settings.target_lang, platform
        );

        Self {
            shared,
            api,
            recognition: platform.recognition,
            synthesis: platform.synthesis,
            clipboard: platform.clipboard,
            suggestions,
        }
    }

    // ==================== Reading State ====================

    pub fn snapshot(&self) -> SessionState {
        self.shared.state().clone()
    }

    pub fn view(&self) -> ViewState {
        self.shared.state().view()
    }

    /// Receive a fresh [`ViewState`] after every accessibility change.
    pub fn subscribe_view(&self) -> watch::Receiver<ViewState> {
        self.shared.view_tx.subscribe()
    }

    /// Current live-region text (empty once cleared).
    pub fn live_message(&self) -> String {
        self.shared.announcer.current()
    }

    pub fn strings(&self) -> &'static LanguageStrings {
        self.shared.strings
    }

    /// Display name of a catalog language, or the locale's "unknown" word.
    pub fn language_name(&self, code: &str) -> &'static str {
        LanguageRegistry::get()
            .display_name(code)
            .unwrap_or(self.shared.strings.unknown_language)
    }

    /// Text for the translation box: the translation, or its placeholder.
    pub fn translation_display(&self) -> String {
        let state = self.shared.state();
        if state.translated_text.is_empty() {
            self.shared.strings.translation_placeholder.to_string()
        } else {
            state.translated_text.clone()
        }
    }

    // ==================== Input and Suggestions ====================

    /// Called on every edit of the input field.
    pub fn on_input_change(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.state().input_text = text.clone();
        self.suggestions.push(text);
    }

    pub fn clear_input(&self) {
        self.shared.clear_text(&mut self.shared.state());
        self.suggestions.reset();
        self.shared.announce(self.shared.strings.input_cleared);
    }

    // ==================== Translation ====================

    /// Translate the current input. Never fails: errors end in a status message.
    pub async fn translate(&self) {
        let strings = self.shared.strings;
        let (text, source, target) = {
            let mut state = self.shared.state();
            if state.input_text.trim().is_empty() {
                state.translated_text.clear();
                drop(state);
                self.shared.announce(strings.nothing_to_translate);
                return;
            }
            (state.input_text.clone(), state.source_lang, state.target_lang)
        };

        self.shared.announce(strings.translating);

        match self.api.translate(&text, source.code(), target.code()).await {
            Ok(response) => {
                let translated = response
                    .into_text()
                    .unwrap_or_else(|| strings.translation_missing.to_string());
                self.shared.state().translated_text = translated;
                self.shared.announce(strings.translation_done);
            }
            Err(e) => {
                error!("Translation failed: {}", e);
                self.shared.state().translated_text = strings.translation_failed_text.to_string();
                self.shared.announce(strings.translation_failed);
            }
        }
    }

    // ==================== Languages ====================

    pub fn set_source_lang(&self, code: &str) -> Result<(), CatalogError> {
        let lang = Language::from_code(code)?;
        self.shared.state().source_lang = lang;
        self.update_voice_language();
        Ok(())
    }

    pub fn set_target_lang(&self, code: &str) -> Result<(), CatalogError> {
        let lang = Language::from_code(code)?;
        self.shared.state().target_lang = lang;
        Ok(())
    }

    /// Exchange source and target, clear all three text fields.
    pub fn swap_languages(&self) {
        {
            let mut state = self.shared.state();
            let state = &mut *state;
            std::mem::swap(&mut state.source_lang, &mut state.target_lang);
            self.shared.clear_text(state);
        }
        self.suggestions.reset();
        self.update_voice_language();
        self.shared.announce(self.shared.strings.languages_swapped);
    }

    fn update_voice_language(&self) {
        if let Capability::Available(recognizer) = &self.recognition {
            let lang = self.shared.state().source_lang;
            recognizer.set_language(lang);
        }
    }

    // ==================== Accessibility ====================

    pub fn toggle_contrast(&self) {
        let on = self.toggle(|state| &mut state.is_high_contrast);
        let strings = self.shared.strings;
        self.shared
            .announce(if on { strings.contrast_on } else { strings.contrast_off });
    }

    pub fn toggle_dyslexia_friendly(&self) {
        let on = self.toggle(|state| &mut state.is_dyslexia_friendly);
        let strings = self.shared.strings;
        self.shared
            .announce(if on { strings.dyslexia_on } else { strings.dyslexia_off });
    }

    pub fn toggle_grayscale(&self) {
        let on = self.toggle(|state| &mut state.is_grayscale);
        let strings = self.shared.strings;
        self.shared
            .announce(if on { strings.grayscale_on } else { strings.grayscale_off });
    }

    pub fn increase_font_size(&self) {
        let scale = self.step_font(FontScale::increased);
        let percent = scale.percent().to_string();
        self.shared.announce(LanguageStrings::fill(
            self.shared.strings.font_increased,
            &[("percent", &percent)],
        ));
    }

    pub fn decrease_font_size(&self) {
        let scale = self.step_font(FontScale::decreased);
        let percent = scale.percent().to_string();
        self.shared.announce(LanguageStrings::fill(
            self.shared.strings.font_decreased,
            &[("percent", &percent)],
        ));
    }

    /// Flip one flag, publish the new view, return the flag's new value.
    fn toggle(&self, flag: impl FnOnce(&mut SessionState) -> &mut bool) -> bool {
        let on = {
            let mut state = self.shared.state();
            let flag = flag(&mut *state);
            *flag = !*flag;
            *flag
        };
        self.shared.publish_view();
        on
    }

    fn step_font(&self, step: impl FnOnce(FontScale) -> FontScale) -> FontScale {
        let scale = {
            let mut state = self.shared.state();
            state.font_size = step(state.font_size);
            state.font_size
        };
        self.shared.publish_view();
        scale
    }

    pub fn on_key_down(&self, key: &str) {
        view::note_key_down(key);
        self.shared.publish_view();
    }

    pub fn on_mouse_down(&self) {
        view::note_mouse_down();
        self.shared.publish_view();
    }

    pub fn toggle_accessibility_info(&self) {
        let mut state = self.shared.state();
        state.show_accessibility_info = !state.show_accessibility_info;
    }

    pub fn close_accessibility_info(&self) {
        self.shared.state().show_accessibility_info = false;
    }

    // ==================== Voice Input ====================

    /// Start or stop dictation into the input field.
    pub fn toggle_voice_recognition(&self) {
        let strings = self.shared.strings;
        let recognizer = match &self.recognition {
            Capability::Available(recognizer) => recognizer,
            Capability::Unavailable => {
                self.shared.announce(strings.recognition_unavailable);
                return;
            }
        };

        let (listening, lang) = {
            let state = self.shared.state();
            (state.is_listening, state.source_lang)
        };

        if listening {
            recognizer.stop();
            self.shared.state().is_listening = false;
            self.shared.announce(strings.recognition_stopped);
            return;
        }

        self.shared.state().is_listening = true;
        self.shared.announce(strings.listening);

        let weak = Arc::downgrade(&self.shared);
        let sink = RecognitionSink::new(move |event| {
            if let Some(shared) = weak.upgrade() {
                shared.handle_recognition(event);
            }
        });

        if let Err(e) = recognizer.start(RecognitionOptions::dictation(lang), sink) {
            error!("Could not start speech recognition: {}", e);
            self.shared.state().is_listening = false;
            self.shared.announce(strings.recognition_error);
        }
    }

    // ==================== Voice Output ====================

    /// Read the translation aloud in the target language.
    pub fn speak_text(&self) {
        let strings = self.shared.strings;
        let (text, lang) = {
            let state = self.shared.state();
            (state.translated_text.clone(), state.target_lang)
        };

        if text.is_empty() {
            self.shared.announce(strings.nothing_to_speak);
            return;
        }

        let synthesizer = match &self.synthesis {
            Capability::Available(synthesizer) if !synthesizer.voices().is_empty() => synthesizer,
            _ => {
                self.shared.announce(strings.synthesis_unavailable);
                return;
            }
        };

        match synthesizer.speak(Utterance::new(text, lang)) {
            Ok(()) => self.shared.announce(strings.speaking),
            Err(e) => {
                error!("Speech synthesis failed: {}", e);
                self.shared.announce(strings.speak_failed);
            }
        }
    }

    // ==================== Clipboard ====================

    /// Copy the translation. Fire-and-forget: the returned handle only exists so
    /// callers can wait for the announcement; `None` means nothing was attempted.
    pub fn copy_translation(&self) -> Option<JoinHandle<()>> {
        let text = self.shared.state().translated_text.clone();
        if text.is_empty() {
            return None;
        }

        let clipboard = match &self.clipboard {
            Capability::Available(clipboard) => Arc::clone(clipboard),
            Capability::Unavailable => {
                self.shared.announce(self.shared.strings.clipboard_unavailable);
                return None;
            }
        };

        let weak = Arc::downgrade(&self.shared);
        Some(tokio::spawn(async move {
            let result = clipboard.write_text(&text).await;
            let Some(shared) = weak.upgrade() else {
                return;
            };
            match result {
                Ok(()) => shared.announce(shared.strings.copied),
                Err(e) => {
                    error!("Clipboard write failed: {}", e);
                    shared.announce(shared.strings.copy_failed);
                }
            }
        }))
    }
}

impl Drop for TranslatorSession {
    fn drop(&mut self) {
        if self.shared.state().is_listening {
            if let Capability::Available(recognizer) = &self.recognition {
                recognizer.stop();
            }
        }
        self.shared.announcer.cancel();
        debug!("Translator session unmounted");
        // `suggestions` aborts its debounce task when dropped with the session.
    }
}

/// Emission handler of the debounce pipeline.
fn fetch_suggestions(shared: &Weak<Shared>, api: &Arc<dyn TranslationApi>, text: String) {
    let Some(strong) = shared.upgrade() else {
        return;
    };
    let seq = {
        let mut state = strong.state();
        let seq = strong.suggestion_seq.fetch_add(1, Ordering::SeqCst) + 1;
        if state.input_text != text {
            // Cleared or swapped while the value waited out the quiet period.
            debug!("Discarding suggestion input that is no longer current");
            return;
        }
        if text.trim().is_empty() {
            state.suggestions_text.clear();
            return;
        }
        seq
    };
    drop(strong);

    let shared = Weak::clone(shared);
    let api = Arc::clone(api);
    tokio::spawn(async move {
        let result = api.suggest(&text).await;

        let Some(shared) = shared.upgrade() else {
            return;
        };
        let strings = shared.strings;
        let suggestions = match result {
            Ok(response) => response
                .into_text()
                .unwrap_or_else(|| strings.suggestions_missing.to_string()),
            Err(e) => {
                error!("Failed to fetch suggestions: {}", e);
                strings.suggestions_failed.to_string()
            }
        };

        // Checked under the state lock, which clear and swap also hold when they bump it.
        let mut state = shared.state();
        if shared.suggestion_seq.load(Ordering::SeqCst) != seq {
            debug!("Discarding suggestions for superseded input");
            return;
        }
        state.suggestions_text = suggestions;
    });
}
