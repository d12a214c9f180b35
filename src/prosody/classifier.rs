//! Selection prosody feature
//!
//! Classifies a target's syllable into one of seven prosodic roles by
//! looking forward through its sentence for boundaries and later accents.

use super::document::{Document, ProsodicElement, ProsodyContext, Target};
use crate::config::ProsodyConfig;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Names of the categories, indexed by their byte code
pub const CATEGORY_NAMES: [&str; 7] = [
    "unstressed",
    "stressed",
    "pre-nuclear-accent",
    "nuclear-accent",
    "final-high",
    "final-low",
    "final-unknown",
];

/// Prosodic role of a syllable; the discriminant is the feature code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum ProsodyCategory {
    #[default]
    Unstressed = 0,
    Stressed = 1,
    PreNuclearAccent = 2,
    NuclearAccent = 3,
    FinalHigh = 4,
    FinalLow = 5,
    /// Phrase-final with a missing or unrecognised tone
    FinalUnknown = 6,
}

impl ProsodyCategory {
    pub const ALL: [ProsodyCategory; 7] = [
        ProsodyCategory::Unstressed,
        ProsodyCategory::Stressed,
        ProsodyCategory::PreNuclearAccent,
        ProsodyCategory::NuclearAccent,
        ProsodyCategory::FinalHigh,
        ProsodyCategory::FinalLow,
        ProsodyCategory::FinalUnknown,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        CATEGORY_NAMES[self as usize]
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }
}

impl fmt::Display for ProsodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProsodyCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATEGORY_NAMES
            .iter()
            .position(|name| *name == s)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| format!("Unknown prosody category: {}", s))
    }
}

/// Why a target could not be classified
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unresolved {
    #[error("target does not map to a syllable")]
    NoSyllable,
    #[error("syllable has no enclosing sentence")]
    NoSentence,
}

/// High and low boundary tone sets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endtones {
    high: HashSet<String>,
    low: HashSet<String>,
}

impl Endtones {
    pub fn new<I, J, S>(high: I, low: J) -> Self
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            high: high.into_iter().map(Into::into).collect(),
            low: low.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &ProsodyConfig) -> Self {
        Self::new(config.high_endtones.iter().cloned(), config.low_endtones.iter().cloned())
    }

    fn final_category(&self, tone: Option<&str>) -> ProsodyCategory {
        match tone {
            Some(t) if self.low.contains(t) => ProsodyCategory::FinalLow,
            Some(t) if self.high.contains(t) => ProsodyCategory::FinalHigh,
            _ => ProsodyCategory::FinalUnknown,
        }
    }
}

impl Default for Endtones {
    fn default() -> Self {
        Self::from_config(&ProsodyConfig::default())
    }
}

/// Byte-valued feature computed per target by a feature-extraction host
pub trait ByteValuedFeatureProcessor<T: ?Sized> {
    fn name(&self) -> &str;
    fn values(&self) -> &[&str];
    fn process(&self, target: &T) -> u8;
}

/// Prosodic role classifier over any [`ProsodyContext`]
#[derive(Debug, Clone)]
pub struct SelectionProsody<C> {
    context: C,
    endtones: Endtones,
}

impl<C: ProsodyContext> SelectionProsody<C> {
    pub fn new(context: C) -> Self {
        Self::with_endtones(context, Endtones::default())
    }

    pub fn with_endtones(context: C, endtones: Endtones) -> Self {
        Self { context, endtones }
    }

    pub fn context(&self) -> &C {
        &self.context
    }

    /// Classify, keeping the degenerate cases distinguishable
    pub fn try_classify(&self, target: &C::Target) -> Result<ProsodyCategory, Unresolved> {
        let (unit, syllable) = self.context.resolve(target).ok_or(Unresolved::NoSyllable)?;
        let stressed = syllable.stress;
        let accented = syllable.accent.is_some();

        let mut rest = self.context.following(unit).ok_or(Unresolved::NoSentence)?;

        let mut nuclear = true;
        let mut phrase_final = false;
        let mut endtone = None;

        let first = rest.next();
        if let Some(next) = first {
            if let ProsodicElement::Boundary(b) = next {
                phrase_final = true;
                endtone = b.tone.as_deref();
            }
            if accented {
                nuclear = !std::iter::once(next).chain(rest).any(is_accented_syllable);
            }
        }

        let category = if accented {
            if nuclear {
                ProsodyCategory::NuclearAccent
            } else {
                ProsodyCategory::PreNuclearAccent
            }
        } else if phrase_final {
            self.endtones.final_category(endtone)
        } else if stressed {
            ProsodyCategory::Stressed
        } else {
            ProsodyCategory::Unstressed
        };
        Ok(category)
    }

    /// Classify, mapping unresolvable targets to `Unstressed`
    pub fn classify(&self, target: &C::Target) -> ProsodyCategory {
        self.try_classify(target).unwrap_or_else(|reason| {
            log::debug!("Defaulting to unstressed: {}", reason);
            ProsodyCategory::Unstressed
        })
    }
}

fn is_accented_syllable(element: &ProsodicElement) -> bool {
    matches!(element, ProsodicElement::Syllable(s) if s.accent.is_some())
}

impl<C: ProsodyContext> ByteValuedFeatureProcessor<C::Target> for SelectionProsody<C> {
    fn name(&self) -> &str {
        crate::SELECTION_PROSODY_FEATURE
    }

    fn values(&self) -> &[&str] {
        &CATEGORY_NAMES
    }

    fn process(&self, target: &C::Target) -> u8 {
        self.classify(target).code()
    }
}

/// Classify every syllable target of a document in parallel
pub fn classify_document(
    document: &Document,
    endtones: &Endtones,
) -> Vec<(Target, ProsodyCategory)> {
    let classifier = SelectionProsody::with_endtones(document, endtones.clone());
    let targets = document.targets();
    log::debug!("Classifying {} targets", targets.len());

    targets
        .into_par_iter()
        .map(|target| {
            let category = classifier.classify(&target);
            (target, category)
        })
        .collect()
}
