//! Natural-Speech Reference Bands
//!
//! Expected ranges for each scored feature, established from
//! voice-production norms. Bands are plain configuration values: tests
//! substitute alternate tables without touching process state.

use serde::{Deserialize, Serialize};

/// Languages with a dedicated pitch baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Tamil,
    Hindi,
    Malayalam,
    Telugu,
    Kannada,
}

impl Language {
    /// Parse a language tag case-insensitively. Unknown tags yield `None`;
    /// the caller falls back to the default reference table.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "english" => Some(Language::English),
            "tamil" => Some(Language::Tamil),
            "hindi" => Some(Language::Hindi),
            "malayalam" => Some(Language::Malayalam),
            "telugu" => Some(Language::Telugu),
            "kannada" => Some(Language::Kannada),
            _ => None,
        }
    }

    fn all() -> [Language; 6] {
        [
            Language::English,
            Language::Tamil,
            Language::Hindi,
            Language::Malayalam,
            Language::Telugu,
            Language::Kannada,
        ]
    }

    /// Typical mean speaking pitch for the language's speaker population (Hz)
    fn pitch_center(self) -> f64 {
        match self {
            Language::English => 175.0,
            Language::Tamil => 190.0,
            Language::Hindi => 185.0,
            Language::Malayalam => 195.0,
            Language::Telugu => 190.0,
            Language::Kannada => 185.0,
        }
    }
}

/// Which direction of deviation from the band counts as synthetic-like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Polarity {
    /// Values below the band indicate synthesis (e.g. too-stable pitch)
    BelowBand,
    /// Values above the band indicate synthesis
    AboveBand,
    /// Any departure from the band indicates synthesis
    Either,
}

/// Expected range and scoring weight for one feature
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceBand {
    /// Central tendency for natural speech
    pub center: f64,
    /// Band spread; deviations are measured in units of this
    pub spread: f64,
    /// Contribution weight in the combined score
    pub weight: f64,
    /// Deviation direction that maps to synthetic-like
    pub polarity: Polarity,
}

/// Full reference table for one language baseline
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceTable {
    pub pitch_jitter: ReferenceBand,
    pub pitch_mean: ReferenceBand,
    pub spectral_centroid_var: ReferenceBand,
    pub spectral_flatness: ReferenceBand,
    pub energy_var: ReferenceBand,
    pub zero_crossing_rate: ReferenceBand,
}

impl Default for ReferenceTable {
    /// Language-independent baseline. Natural speech shows measurable
    /// pitch jitter, wide spectral and loudness variation from
    /// articulation, and a moderately tonal spectrum; synthesis tends to
    /// flatten all of these.
    fn default() -> Self {
        Self {
            pitch_jitter: ReferenceBand {
                center: 0.015,
                spread: 0.010,
                weight: 2.5,
                polarity: Polarity::BelowBand,
            },
            pitch_mean: ReferenceBand {
                center: 180.0,
                spread: 60.0,
                weight: 0.75,
                polarity: Polarity::Either,
            },
            spectral_centroid_var: ReferenceBand {
                center: 400_000.0,
                spread: 250_000.0,
                weight: 1.5,
                polarity: Polarity::BelowBand,
            },
            spectral_flatness: ReferenceBand {
                center: 0.15,
                spread: 0.10,
                weight: 0.75,
                polarity: Polarity::Either,
            },
            energy_var: ReferenceBand {
                center: 0.010,
                spread: 0.008,
                weight: 1.0,
                polarity: Polarity::BelowBand,
            },
            zero_crossing_rate: ReferenceBand {
                center: 0.10,
                spread: 0.06,
                weight: 0.5,
                polarity: Polarity::Either,
            },
        }
    }
}

impl ReferenceTable {
    /// Default table with the pitch baseline shifted for `language`
    pub fn for_language(language: Language) -> Self {
        let mut table = Self::default();
        table.pitch_mean.center = language.pitch_center();
        table
    }
}

/// The set of reference tables loaded once at process start.
///
/// Immutable after construction and safe for unsynchronized concurrent
/// reads; requests select a table by language tag.
#[derive(Debug, Clone)]
pub struct TableSet {
    default: ReferenceTable,
    per_language: Vec<(Language, ReferenceTable)>,
}

impl TableSet {
    /// Build the built-in tables for all supported languages
    pub fn builtin() -> Self {
        Self {
            default: ReferenceTable::default(),
            per_language: Language::all()
                .into_iter()
                .map(|lang| (lang, ReferenceTable::for_language(lang)))
                .collect(),
        }
    }

    /// Build a set where every language shares one table (test substitution)
    pub fn uniform(table: ReferenceTable) -> Self {
        Self {
            default: table,
            per_language: Vec::new(),
        }
    }

    /// Table for a parsed language tag; `None` selects the default
    pub fn table_for(&self, language: Option<Language>) -> &ReferenceTable {
        language
            .and_then(|lang| {
                self.per_language
                    .iter()
                    .find(|(l, _)| *l == lang)
                    .map(|(_, table)| table)
            })
            .unwrap_or(&self.default)
    }
}
