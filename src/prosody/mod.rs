//! Prosody features for unit selection
//!
//! Provides the annotated document model, the read-only navigation
//! capabilities a host tree must offer, and the selection prosody
//! classifier.

pub mod classifier;
pub mod document;

pub use classifier::{
    classify_document, ByteValuedFeatureProcessor, Endtones, ProsodyCategory, SelectionProsody,
    Unresolved, CATEGORY_NAMES,
};
pub use document::{
    following, Boundary, Document, ProsodicElement, ProsodyContext, Scope, Sentence, Syllable,
    Target, UnitId,
};
