//! Accessible translation front end.
//!
//! The crate models a single-page translation form as an explicit session object:
//! text goes to a remote translation service, suggestions are fetched through a
//! debounced pipeline, and accessibility toggles produce a [`view::ViewState`] that a
//! renderer applies to the document. Browser capabilities (speech recognition, speech
//! synthesis, clipboard) sit behind the adapter traits in [`platform`].
//!
//! The `accessible-translator` binary serves the built UI with single-page fallback
//! routing; the `console` binary drives a session from a terminal.

pub mod announcer;
pub mod client;
pub mod config;
pub mod error;
pub mod i18n;
pub mod platform;
pub mod retry;
pub mod server;
pub mod session;
pub mod suggestions;
pub mod view;

pub use client::{RemoteClient, TranslationApi};
pub use config::{Config, SessionSettings};
pub use platform::{Capability, Platform};
pub use session::{SessionState, TranslatorSession};
