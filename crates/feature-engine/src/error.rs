//! Feature Extraction Error Types

use thiserror::Error;

/// Errors while extracting features from an audio buffer
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    /// Buffer holds less than one analysis window
    #[error("audio too short for analysis: {samples} samples, need at least {required}")]
    TooShort { samples: usize, required: usize },

    /// No frame passed the voiced test; the signal is silent or too noisy
    /// for the pitch estimator
    #[error("audio is silent or acoustically unusable: no voiced frames detected")]
    NoVoicedFrames,
}
