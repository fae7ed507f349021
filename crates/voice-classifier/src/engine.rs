//! Classification Engine
//!
//! Weighted deviation-from-reference scoring. Each scored feature is
//! compared against its natural-speech band; the signed deviations are
//! oriented by band polarity, combined into a raw score, and squashed
//! through a logistic into a confidence in [0, 1].

use std::cmp::Ordering;

use feature_engine::FeatureVector;
use serde::Serialize;
use tracing::debug;

use crate::reference::{Polarity, ReferenceBand, ReferenceTable};

/// Number of features named in the explanation text
const EXPLAIN_TOP_K: usize = 3;

/// Classification label.
///
/// Determined solely by the confidence score: `AiGenerated` iff
/// `confidence >= 0.5`. The threshold is fixed; higher confidence always
/// means more synthetic-like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Label {
    #[serde(rename = "AI-Generated")]
    AiGenerated,
    Human,
}

impl Label {
    /// Wire representation of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::AiGenerated => "AI-Generated",
            Label::Human => "Human",
        }
    }
}

/// Final decision payload for one feature vector
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// Decision label
    pub label: Label,
    /// Synthetic-likeness confidence in [0, 1]
    pub confidence: f64,
    /// Human-readable justification naming the strongest indicators
    pub explanation: String,
    /// All scored features with their signed deviations, ordered by
    /// descending absolute deviation (ties keep table order)
    pub contributing_features: Vec<(&'static str, f64)>,
}

/// Reference-band classifier.
///
/// Holds one read-only [`ReferenceTable`]; classification performs no I/O
/// and cannot fail. Identical input always produces an identical result,
/// byte-for-byte on the explanation text.
pub struct Classifier {
    table: ReferenceTable,
}

impl Classifier {
    /// Create a classifier over an explicitly constructed reference table
    pub fn new(table: ReferenceTable) -> Self {
        Self { table }
    }

    /// Score one feature vector into a label, confidence, and explanation
    pub fn classify(&self, features: &FeatureVector) -> ClassificationResult {
        let scored: [(&'static str, &ReferenceBand, f64); 6] = [
            ("pitch_jitter", &self.table.pitch_jitter, features.pitch_jitter),
            ("pitch_mean", &self.table.pitch_mean, features.pitch_mean),
            (
                "spectral_centroid_var",
                &self.table.spectral_centroid_var,
                features.spectral_centroid_var,
            ),
            (
                "spectral_flatness",
                &self.table.spectral_flatness,
                features.spectral_flatness,
            ),
            ("energy_var", &self.table.energy_var, features.energy_var),
            (
                "zero_crossing_rate",
                &self.table.zero_crossing_rate,
                features.zero_crossing_rate,
            ),
        ];

        let mut raw_score = 0.0;
        let mut deviations: Vec<(&'static str, f64)> = Vec::with_capacity(scored.len());

        for (name, band, value) in scored {
            let deviation = (value - band.center) / band.spread;
            let evidence = match band.polarity {
                Polarity::BelowBand => -deviation,
                Polarity::AboveBand => deviation,
                Polarity::Either => deviation.abs() - 1.0,
            };
            raw_score += band.weight * evidence;
            deviations.push((name, deviation));
        }

        // Stable sort keeps table order on equal magnitudes
        deviations.sort_by(|a, b| {
            b.1.abs()
                .partial_cmp(&a.1.abs())
                .unwrap_or(Ordering::Equal)
        });

        let confidence = logistic(raw_score);
        let label = if confidence >= 0.5 {
            Label::AiGenerated
        } else {
            Label::Human
        };

        let indicators: Vec<&'static str> = deviations
            .iter()
            .take(EXPLAIN_TOP_K)
            .map(|&(name, deviation)| direction_phrase(name, deviation))
            .collect();
        let explanation = format!(
            "Classified as {} with confidence {:.2}. Key indicators: {}.",
            label.as_str(),
            confidence,
            indicators.join("; ")
        );

        debug!(label = label.as_str(), confidence, "classified feature vector");

        ClassificationResult {
            label,
            confidence,
            explanation,
            contributing_features: deviations,
        }
    }
}

/// Bounded monotonic squashing of the raw score into [0, 1]
fn logistic(raw: f64) -> f64 {
    1.0 / (1.0 + (-raw).exp())
}

/// Fixed direction phrase for one feature's deviation sign
fn direction_phrase(name: &'static str, deviation: f64) -> &'static str {
    let below = deviation < 0.0;
    match name {
        "pitch_jitter" => {
            if below {
                "unusually stable pitch"
            } else {
                "erratic pitch variation"
            }
        }
        "pitch_mean" => {
            if below {
                "pitch below the typical speaking range"
            } else {
                "pitch above the typical speaking range"
            }
        }
        "spectral_centroid_var" => {
            if below {
                "low spectral variability"
            } else {
                "high spectral variability"
            }
        }
        "spectral_flatness" => {
            if below {
                "overly tonal spectrum"
            } else {
                "noise-like spectral envelope"
            }
        }
        "energy_var" => {
            if below {
                "unnaturally even loudness"
            } else {
                "volatile loudness"
            }
        }
        "zero_crossing_rate" => {
            if below {
                "sparse high-frequency detail"
            } else {
                "dense high-frequency detail"
            }
        }
        _ => "atypical acoustic profile",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Polarity;

    fn features_with(
        pitch_jitter: f64,
        pitch_mean: f64,
        spectral_centroid_var: f64,
        spectral_flatness: f64,
        energy_var: f64,
        zero_crossing_rate: f64,
    ) -> FeatureVector {
        FeatureVector {
            duration: 1.0,
            mfcc_mean: vec![0.0; 13],
            mfcc_var: vec![0.0; 13],
            spectral_centroid_mean: 1500.0,
            spectral_centroid_var,
            spectral_flatness,
            zero_crossing_rate,
            energy_mean: 0.2,
            energy_var,
            pitch_mean,
            pitch_jitter,
            voiced_ratio: 0.8,
        }
    }

    /// Feature values sitting inside every natural-speech band
    fn human_like() -> FeatureVector {
        features_with(0.015, 180.0, 400_000.0, 0.15, 0.010, 0.10)
    }

    /// Flattened dynamics typical of synthesis output
    fn synthetic_like() -> FeatureVector {
        features_with(0.0, 180.0, 5_000.0, 0.02, 0.0001, 0.05)
    }

    #[test]
    fn test_human_like_input_is_human() {
        let classifier = Classifier::new(ReferenceTable::default());
        let result = classifier.classify(&human_like());

        assert_eq!(result.label, Label::Human);
        assert!(result.confidence < 0.5);
    }

    #[test]
    fn test_synthetic_like_input_is_ai_generated() {
        let classifier = Classifier::new(ReferenceTable::default());
        let result = classifier.classify(&synthetic_like());

        assert_eq!(result.label, Label::AiGenerated);
        assert!(result.confidence >= 0.5);
        assert!(result.explanation.contains("unusually stable pitch"));
    }

    #[test]
    fn test_confidence_bounds_and_threshold() {
        let classifier = Classifier::new(ReferenceTable::default());
        for features in [human_like(), synthetic_like()] {
            let result = classifier.classify(&features);
            assert!((0.0..=1.0).contains(&result.confidence));
            assert_eq!(
                result.label == Label::AiGenerated,
                result.confidence >= 0.5
            );
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::new(ReferenceTable::default());
        let features = synthetic_like();

        let first = classifier.classify(&features);
        let second = classifier.classify(&features);

        assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
        assert_eq!(first.explanation, second.explanation);
        assert_eq!(first.contributing_features, second.contributing_features);
    }

    #[test]
    fn test_contributing_features_ordered_by_magnitude() {
        let classifier = Classifier::new(ReferenceTable::default());
        let result = classifier.classify(&synthetic_like());

        assert_eq!(result.contributing_features.len(), 6);
        for pair in result.contributing_features.windows(2) {
            assert!(pair[0].1.abs() >= pair[1].1.abs());
        }
    }

    #[test]
    fn test_substituted_table_changes_decision() {
        // A table that treats stable pitch as human evidence instead
        let mut inverted = ReferenceTable::default();
        inverted.pitch_jitter.polarity = Polarity::AboveBand;
        inverted.spectral_centroid_var.polarity = Polarity::AboveBand;
        inverted.energy_var.polarity = Polarity::AboveBand;

        let default_result = Classifier::new(ReferenceTable::default()).classify(&synthetic_like());
        let inverted_result = Classifier::new(inverted).classify(&synthetic_like());

        assert_eq!(default_result.label, Label::AiGenerated);
        assert_eq!(inverted_result.label, Label::Human);
    }

    #[test]
    fn test_explanation_names_top_indicators() {
        let classifier = Classifier::new(ReferenceTable::default());
        let result = classifier.classify(&synthetic_like());

        assert!(result.explanation.starts_with("Classified as AI-Generated"));
        // Three indicators joined by semicolons
        assert_eq!(result.explanation.matches(';').count(), 2);
    }
}
