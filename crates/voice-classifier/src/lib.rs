//! Voice Classifier
//!
//! Scores a fixed-schema acoustic feature vector against reference bands
//! for natural speech and produces a label, a confidence score, and a
//! textual explanation. The reference table is read-only configuration
//! constructed once at startup; classification itself is infallible and
//! deterministic.

mod engine;
mod reference;

pub use engine::{ClassificationResult, Classifier, Label};
pub use reference::{Language, Polarity, ReferenceBand, ReferenceTable, TableSet};
