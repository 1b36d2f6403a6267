//! Language catalog and localized UI strings.
//!
//! - `registry`: the static list of languages offered in the source/target selectors
//! - `language`: `Language`, a code validated against the registry
//! - `strings`: every announcement and fallback message, per UI locale

mod language;
mod registry;
mod strings;

pub use language::Language;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use strings::LanguageStrings;
