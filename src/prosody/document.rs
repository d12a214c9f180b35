//! Annotated prosodic document
//!
//! A flat, read-only view of the syllable and boundary units of each
//! sentence. Hosts with their own tree implement [`ProsodyContext`]; this
//! model backs the CLI, tests and benches and can be loaded from YAML/JSON.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Syllable unit bearing stress and accent annotations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    /// Phone string of the syllable
    #[serde(default)]
    pub ph: String,
    /// Lexical stress
    #[serde(default)]
    pub stress: bool,
    /// Pitch accent label, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
}

/// Prosodic phrase edge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boundary {
    /// Intonational end tone (e.g. `L-L%`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakindex: Option<u8>,
}

/// Sibling-level unit in document order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProsodicElement {
    Syllable(Syllable),
    Boundary(Boundary),
}

impl ProsodicElement {
    pub fn syllable(ph: &str, stress: bool, accent: Option<&str>) -> Self {
        ProsodicElement::Syllable(Syllable {
            ph: ph.to_string(),
            stress,
            accent: accent.map(str::to_string),
        })
    }

    pub fn boundary(tone: Option<&str>) -> Self {
        ProsodicElement::Boundary(Boundary {
            tone: tone.map(str::to_string),
            breakindex: None,
        })
    }

    pub fn as_syllable(&self) -> Option<&Syllable> {
        match self {
            ProsodicElement::Syllable(s) => Some(s),
            ProsodicElement::Boundary(_) => None,
        }
    }
}

/// Sentence grouping: the scope of every forward scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    #[serde(default)]
    pub elements: Vec<ProsodicElement>,
}

impl Sentence {
    pub fn new(elements: Vec<ProsodicElement>) -> Self {
        Self { elements }
    }
}

/// Where a unit lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Sentence(usize),
    /// Outside of any sentence
    Detached,
}

/// Position of a unit in a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId {
    pub scope: Scope,
    pub index: usize,
}

impl UnitId {
    pub fn in_sentence(sentence: usize, index: usize) -> Self {
        Self {
            scope: Scope::Sentence(sentence),
            index,
        }
    }

    pub fn detached(index: usize) -> Self {
        Self {
            scope: Scope::Detached,
            index,
        }
    }
}

/// Unit-selection target pointing at the syllable it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub phone: String,
    pub syllable: Option<UnitId>,
}

/// Units strictly after `start` in a sentence's element sequence
pub fn following(
    elements: &[ProsodicElement],
    start: usize,
) -> std::slice::Iter<'_, ProsodicElement> {
    elements.get(start + 1..).unwrap_or(&[]).iter()
}

/// Read-only capabilities the prosody classifier needs from a host tree
pub trait ProsodyContext {
    type Target: ?Sized;
    type Unit: Copy;

    /// Resolve a target to its syllable unit
    fn resolve(&self, target: &Self::Target) -> Option<(Self::Unit, &Syllable)>;

    /// Iterate the units after `unit` up to the end of its sentence;
    /// `None` when the unit has no enclosing sentence
    fn following(
        &self,
        unit: Self::Unit,
    ) -> Option<Box<dyn Iterator<Item = &ProsodicElement> + '_>>;
}

impl<C: ProsodyContext + ?Sized> ProsodyContext for &C {
    type Target = C::Target;
    type Unit = C::Unit;

    fn resolve(&self, target: &Self::Target) -> Option<(Self::Unit, &Syllable)> {
        (**self).resolve(target)
    }

    fn following(
        &self,
        unit: Self::Unit,
    ) -> Option<Box<dyn Iterator<Item = &ProsodicElement> + '_>> {
        (**self).following(unit)
    }
}

/// Document made of sentences plus units outside any sentence
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detached: Vec<ProsodicElement>,
}

impl Document {
    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self {
            sentences,
            detached: Vec::new(),
        }
    }

    /// Load a document from YAML
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = Self::read(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| Error::Document(e.to_string()))
    }

    /// Load a document from JSON
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = Self::read(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| Error::Document(e.to_string()))
    }

    fn read(path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(Error::FileNotFound(path.display().to_string()));
        }
        log::info!("Loading document from: {}", path.display());
        Ok(std::fs::read_to_string(path)?)
    }

    /// Element at `unit`, if it exists
    pub fn element(&self, unit: UnitId) -> Option<&ProsodicElement> {
        match unit.scope {
            Scope::Sentence(s) => self.sentences.get(s)?.elements.get(unit.index),
            Scope::Detached => self.detached.get(unit.index),
        }
    }

    /// One target per syllable, in document order (sentences first)
    pub fn targets(&self) -> Vec<Target> {
        let in_sentences = self.sentences.iter().enumerate().flat_map(|(s, sentence)| {
            sentence
                .elements
                .iter()
                .enumerate()
                .map(move |(i, e)| (UnitId::in_sentence(s, i), e))
        });
        let detached = self
            .detached
            .iter()
            .enumerate()
            .map(|(i, e)| (UnitId::detached(i), e));

        in_sentences
            .chain(detached)
            .filter_map(|(id, e)| {
                e.as_syllable().map(|syl| Target {
                    phone: syl.ph.clone(),
                    syllable: Some(id),
                })
            })
            .collect()
    }

    /// Number of syllable units across the whole document
    pub fn syllable_count(&self) -> usize {
        self.sentences
            .iter()
            .flat_map(|s| s.elements.iter())
            .chain(self.detached.iter())
            .filter(|e| e.as_syllable().is_some())
            .count()
    }
}

impl ProsodyContext for Document {
    type Target = Target;
    type Unit = UnitId;

    fn resolve(&self, target: &Target) -> Option<(UnitId, &Syllable)> {
        let unit = target.syllable?;
        let syllable = self.element(unit)?.as_syllable()?;
        Some((unit, syllable))
    }

    fn following(
        &self,
        unit: UnitId,
    ) -> Option<Box<dyn Iterator<Item = &ProsodicElement> + '_>> {
        match unit.scope {
            Scope::Sentence(s) => {
                let sentence = self.sentences.get(s)?;
                Some(Box::new(following(&sentence.elements, unit.index)))
            }
            Scope::Detached => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        let mut doc = Document::new(vec![Sentence::new(vec![
            ProsodicElement::syllable("ka", true, Some("L+H*")),
            ProsodicElement::syllable("za", false, None),
            ProsodicElement::boundary(Some("L-L%")),
        ])]);
        doc.detached.push(ProsodicElement::syllable("o", false, None));
        doc
    }

    #[test]
    fn test_following_is_exclusive_of_start() {
        let doc = sample();
        let elements = &doc.sentences[0].elements;
        let rest: Vec<_> = following(elements, 0).collect();
        assert_eq!(rest.len(), 2);
        assert_eq!(following(elements, 2).count(), 0);
        assert_eq!(following(elements, 10).count(), 0);
    }

    #[test]
    fn test_targets_cover_every_syllable() {
        let doc = sample();
        let targets = doc.targets();
        assert_eq!(targets.len(), 3);
        assert_eq!(doc.syllable_count(), 3);
        assert_eq!(targets[0].phone, "ka");
        assert_eq!(targets[2].syllable, Some(UnitId::detached(0)));
    }

    #[test]
    fn test_resolve_rejects_boundaries_and_missing_units() {
        let doc = sample();
        let boundary = Target {
            phone: String::new(),
            syllable: Some(UnitId::in_sentence(0, 2)),
        };
        assert!(doc.resolve(&boundary).is_none());

        let missing = Target {
            phone: "x".into(),
            syllable: Some(UnitId::in_sentence(4, 0)),
        };
        assert!(doc.resolve(&missing).is_none());

        let unbound = Target {
            phone: "x".into(),
            syllable: None,
        };
        assert!(doc.resolve(&unbound).is_none());
    }

    #[test]
    fn test_detached_units_have_no_sentence_scope() {
        let doc = sample();
        assert!(ProsodyContext::following(&doc, UnitId::detached(0)).is_none());
        assert!(ProsodyContext::following(&doc, UnitId::in_sentence(0, 0)).is_some());
    }

    #[test]
    fn test_yaml_round_trip_preserves_structure() {
        let yaml = "
sentences:
  - elements:
      - { type: syllable, ph: ka, stress: true, accent: H* }
      - { type: boundary, tone: H-H% }
";
        let doc: Document = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            doc.sentences[0].elements[1],
            ProsodicElement::boundary(Some("H-H%"))
        );
        let back: Document = serde_yaml::from_str(&serde_yaml::to_string(&doc).unwrap()).unwrap();
        assert_eq!(back, doc);
    }
}
