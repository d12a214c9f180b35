//! Text processing module
//!
//! Provides tag dictionaries and the POS sequence validator used to
//! constrain an external tagger's decoding.

mod dictionary;
mod validator;

pub use dictionary::{SimpleTagDictionary, TagDictionary};
pub use validator::{PosSequenceValidator, SequenceValidator};
