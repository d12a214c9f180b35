//! POS sequence validator with deterministic symbols support
//!
//! The deterministic dictionary constrains which tokens may receive a label:
//! with the row `$PUNCT , . ! ? ;` only those five tokens can ever be tagged
//! `$PUNCT`. The general tag dictionary then restricts each known token to
//! its registered tags.

use super::dictionary::{SimpleTagDictionary, TagDictionary};
use crate::config::TaggerConfig;
use crate::Result;

/// Callback invoked by a sequence decoder for every candidate outcome
pub trait SequenceValidator<T> {
    /// Whether `outcome` is admissible for `input_sequence[i]`
    fn valid_sequence(
        &self,
        i: usize,
        input_sequence: &[T],
        outcomes_sequence: &[String],
        outcome: &str,
    ) -> bool;
}

/// Sequence validator backed by a general and a deterministic tag dictionary
#[derive(Debug, Clone)]
pub struct PosSequenceValidator<D> {
    tag_dictionary: Option<D>,
    deterministic_dictionary: Option<D>,
}

impl<D: TagDictionary> PosSequenceValidator<D> {
    /// Create a validator; either dictionary may be absent
    pub fn new(tag_dictionary: Option<D>, deterministic_dictionary: Option<D>) -> Self {
        if tag_dictionary.is_none() {
            log::warn!("No tag dictionary given: every token accepts any tag");
        }
        Self {
            tag_dictionary,
            deterministic_dictionary,
        }
    }

    /// True when no general tag dictionary is configured
    pub fn is_permissive(&self) -> bool {
        self.tag_dictionary.is_none()
    }

    pub fn tag_dictionary(&self) -> Option<&D> {
        self.tag_dictionary.as_ref()
    }

    pub fn deterministic_dictionary(&self) -> Option<&D> {
        self.deterministic_dictionary.as_ref()
    }

    /// Decide whether `candidate` may label `input_sequence[position]`.
    ///
    /// `_outcomes_so_far` is part of the decoder contract and is not consulted.
    pub fn is_valid<T: AsRef<str>>(
        &self,
        position: usize,
        input_sequence: &[T],
        _outcomes_so_far: &[String],
        candidate: &str,
    ) -> bool {
        let token = match input_sequence.get(position) {
            Some(token) => token.as_ref(),
            None => {
                log::debug!(
                    "Position {} outside input sequence of length {}",
                    position,
                    input_sequence.len()
                );
                return false;
            }
        };

        if let Some(allowed) = self
            .deterministic_dictionary
            .as_ref()
            .and_then(|dict| dict.tags(candidate))
        {
            if !allowed.iter().any(|t| t == token) {
                return false;
            }
        }

        match self.tag_dictionary.as_ref().and_then(|dict| dict.tags(token)) {
            Some(tags) => tags.iter().any(|t| t == candidate),
            None => true,
        }
    }
}

impl PosSequenceValidator<SimpleTagDictionary> {
    /// Load both dictionaries named in the tagger configuration
    pub fn from_config(config: &TaggerConfig) -> Result<Self> {
        let tag_dictionary = config
            .tag_dictionary
            .as_ref()
            .map(SimpleTagDictionary::load)
            .transpose()?;
        let deterministic_dictionary = config
            .deterministic_dictionary
            .as_ref()
            .map(SimpleTagDictionary::load)
            .transpose()?;

        Ok(Self::new(tag_dictionary, deterministic_dictionary))
    }
}

impl<D: TagDictionary, T: AsRef<str>> SequenceValidator<T> for PosSequenceValidator<D> {
    fn valid_sequence(
        &self,
        i: usize,
        input_sequence: &[T],
        outcomes_sequence: &[String],
        outcome: &str,
    ) -> bool {
        self.is_valid(i, input_sequence, outcomes_sequence, outcome)
    }
}
