//! Terminal front end for the translator session.
//!
//! Usage:
//!   cargo run --bin console
//!
//! Plain lines replace the input text (and feed the suggestion pipeline); lines
//! starting with `/` are commands. `/help` lists them. Speech and clipboard are not
//! available in a terminal, so those commands only announce that.
//!
//! Environment: TRANSLATE_API_URL, REQUEST_TIMEOUT_SECS, REMOTE_MAX_ATTEMPTS,
//! SUGGESTION_DEBOUNCE_MS, ANNOUNCEMENT_CLEAR_MS, DEFAULT_SOURCE_LANG,
//! DEFAULT_TARGET_LANG, UI_LOCALE (see the library's `Config`).

use accessible_translator::i18n::LanguageRegistry;
use accessible_translator::{Config, Platform, RemoteClient, TranslatorSession};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Input(String),
    Translate,
    Swap,
    Source(String),
    Target(String),
    Clear,
    Contrast,
    Dyslexia,
    Grayscale,
    Bigger,
    Smaller,
    Voice,
    Speak,
    Copy,
    Languages,
    Status,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Command {
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Input(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next().map(str::to_string);

        match (name, arg) {
            ("translate" | "t", _) => Command::Translate,
            ("swap", _) => Command::Swap,
            ("source", Some(code)) => Command::Source(code),
            ("target", Some(code)) => Command::Target(code),
            ("clear", _) => Command::Clear,
            ("contrast", _) => Command::Contrast,
            ("dyslexia", _) => Command::Dyslexia,
            ("grayscale", _) => Command::Grayscale,
            ("bigger" | "a+", _) => Command::Bigger,
            ("smaller" | "a-", _) => Command::Smaller,
            ("voice", _) => Command::Voice,
            ("speak", _) => Command::Speak,
            ("copy", _) => Command::Copy,
            ("languages", _) => Command::Languages,
            ("status", _) => Command::Status,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

const HELP: &str = "\
Type text to set the input. Commands:
  /translate        translate the input
  /swap             swap source and target languages
  /source <code>    set the source language
  /target <code>    set the target language
  /languages        list language codes
  /clear            clear input, translation and suggestions
  /contrast /dyslexia /grayscale /bigger /smaller
  /voice /speak /copy
  /status           show the session state as JSON
  /quit";

async fn run(session: &TranslatorSession, command: Command) -> Result<bool> {
    match command {
        Command::Input(text) => session.on_input_change(text),
        Command::Translate => {
            session.translate().await;
            println!("→ {}", session.translation_display());
        }
        Command::Swap => session.swap_languages(),
        Command::Source(code) => {
            if let Err(e) = session.set_source_lang(&code) {
                println!("{}", e);
            }
        }
        Command::Target(code) => {
            if let Err(e) = session.set_target_lang(&code) {
                println!("{}", e);
            }
        }
        Command::Clear => session.clear_input(),
        Command::Contrast => session.toggle_contrast(),
        Command::Dyslexia => session.toggle_dyslexia_friendly(),
        Command::Grayscale => session.toggle_grayscale(),
        Command::Bigger => session.increase_font_size(),
        Command::Smaller => session.decrease_font_size(),
        Command::Voice => session.toggle_voice_recognition(),
        Command::Speak => session.speak_text(),
        Command::Copy => {
            if let Some(handle) = session.copy_translation() {
                handle.await.context("Clipboard task panicked")?;
            }
        }
        Command::Languages => {
            for lang in LanguageRegistry::get().list_all() {
                println!("  {}  {} ({})", lang.code, lang.name, lang.native_name);
            }
        }
        Command::Status => {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            println!("root: [{}]", session.view().root_class_attr());
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(false),
        Command::Unknown(line) => println!("Unknown command: {} (try /help)", line),
    }

    let message = session.live_message();
    if !message.is_empty() {
        println!("[{}]", message);
    }
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("accessible_translator=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let client = RemoteClient::from_config(&config).context("Failed to build HTTP client")?;
    info!("Using translation service at {}", config.api_base_url);

    let session = TranslatorSession::new(
        Arc::new(client),
        Platform::headless(),
        config.session_settings()?,
    );

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if !run(&session, Command::parse(line)).await? {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_input() {
        assert_eq!(
            Command::parse("hello world"),
            Command::Input("hello world".to_string())
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(Command::parse("/translate"), Command::Translate);
        assert_eq!(Command::parse("/t"), Command::Translate);
        assert_eq!(Command::parse("/a+"), Command::Bigger);
        assert_eq!(Command::parse("/exit"), Command::Quit);
    }

    #[test]
    fn test_language_commands_take_code() {
        assert_eq!(Command::parse("/source fr"), Command::Source("fr".to_string()));
        assert_eq!(Command::parse("/target  ja"), Command::Target("ja".to_string()));
    }

    #[test]
    fn test_language_command_without_code_is_unknown() {
        assert_eq!(
            Command::parse("/source"),
            Command::Unknown("/source".to_string())
        );
    }
}
