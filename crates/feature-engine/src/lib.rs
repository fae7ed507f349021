//! Feature Engineering Engine
//!
//! Derives a fixed-schema acoustic feature summary from a decoded audio
//! buffer: MFCC statistics, spectral shape, pitch track statistics, and
//! short-term energy. Extraction is deterministic; identical input always
//! yields a bit-identical feature vector.

mod error;
mod features;
mod fft;
mod mfcc;
mod pitch;
mod statistics;

pub use error::FeatureError;
pub use features::{FeatureExtractor, FeatureVector, FRAME_MS, HOP_MS};
pub use fft::FftProcessor;
pub use mfcc::MelCepstrum;
pub use pitch::PitchDetector;
pub use statistics::Stats;
