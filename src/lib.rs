//! tts-lang-it - Italian linguistic plugins for a text-to-speech pipeline
//!
//! Two independent, read-only components called back by host engines:
//!
//! - [`text::PosSequenceValidator`] constrains a sequence tagger's POS
//!   decisions with a general tag dictionary and a deterministic symbols
//!   dictionary (e.g. punctuation labels restricted to punctuation tokens).
//! - [`prosody::SelectionProsody`] derives the prosodic role of a syllable
//!   (stressed, pre-nuclear/nuclear accent, phrase-final high/low) from its
//!   sentence context, as a byte-valued unit-selection feature.
//!
//! # Example
//! ```
//! use tts_lang_it::text::{PosSequenceValidator, SimpleTagDictionary};
//!
//! let det = SimpleTagDictionary::parse("$PUNCT , . ! ? ;").unwrap();
//! let validator = PosSequenceValidator::new(Some(SimpleTagDictionary::default()), Some(det));
//!
//! assert!(validator.is_valid(0, &["."], &[], "$PUNCT"));
//! assert!(!validator.is_valid(0, &["hello"], &[], "$PUNCT"));
//! ```

pub mod config;
pub mod error;
pub mod prosody;
pub mod text;

pub use config::Config;
pub use error::{Error, Result};
pub use prosody::{ProsodyCategory, SelectionProsody};
pub use text::{PosSequenceValidator, SimpleTagDictionary};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Feature name reported to the unit-selection host
pub const SELECTION_PROSODY_FEATURE: &str = "selection_prosody";
