//! Feature Vector Assembly

use std::collections::BTreeMap;

use audio_decoder::AudioBuffer;
use serde::Serialize;
use tracing::debug;

use crate::fft::FftProcessor;
use crate::mfcc::MelCepstrum;
use crate::pitch::PitchDetector;
use crate::statistics::{rms, zero_crossing_rate, Stats};
use crate::FeatureError;

/// Analysis window length in milliseconds
pub const FRAME_MS: usize = 25;

/// Hop between consecutive windows in milliseconds
pub const HOP_MS: usize = 10;

/// Fixed-schema acoustic feature summary of one audio buffer.
///
/// The field set is identical for every successful extraction and every
/// value is finite; both are guaranteed by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureVector {
    /// Total duration in seconds
    pub duration: f64,
    /// Per-coefficient MFCC means across frames (13 coefficients)
    pub mfcc_mean: Vec<f64>,
    /// Per-coefficient MFCC variances across frames
    pub mfcc_var: Vec<f64>,
    /// Mean spectral centroid across frames (Hz)
    pub spectral_centroid_mean: f64,
    /// Variance of the spectral centroid across frames
    pub spectral_centroid_var: f64,
    /// Spectral flatness of the frame-averaged spectrum
    pub spectral_flatness: f64,
    /// Zero-crossing rate over the whole signal
    pub zero_crossing_rate: f64,
    /// Mean per-frame RMS energy
    pub energy_mean: f64,
    /// Variance of per-frame RMS energy
    pub energy_var: f64,
    /// Mean fundamental frequency over voiced frames (Hz)
    pub pitch_mean: f64,
    /// Mean cycle-to-cycle relative pitch-period variation over voiced frames
    pub pitch_jitter: f64,
    /// Fraction of frames with a detectable periodic component
    pub voiced_ratio: f64,
}

impl FeatureVector {
    /// Scalar descriptors keyed by name, in fixed order, excluding the raw
    /// duration and the MFCC aggregates. This is the shape the boundary
    /// folds into its `features_summary` response field.
    pub fn summary(&self) -> BTreeMap<&'static str, f64> {
        BTreeMap::from([
            ("spectral_centroid_mean", self.spectral_centroid_mean),
            ("spectral_centroid_var", self.spectral_centroid_var),
            ("spectral_flatness", self.spectral_flatness),
            ("zero_crossing_rate", self.zero_crossing_rate),
            ("energy_mean", self.energy_mean),
            ("energy_var", self.energy_var),
            ("pitch_mean", self.pitch_mean),
            ("pitch_jitter", self.pitch_jitter),
            ("voiced_ratio", self.voiced_ratio),
        ])
    }
}

/// Feature extractor for buffers at one sample rate.
///
/// Frames the signal (25 ms window, 10 ms hop, trailing partial frame
/// discarded), computes per-frame spectra, cepstra, energy, and pitch,
/// then aggregates with mean/variance reductions. Deterministic: no RNG,
/// no clock, no learned component.
pub struct FeatureExtractor {
    sample_rate: u32,
    frame_len: usize,
    hop_len: usize,
    fft: FftProcessor,
    mfcc: MelCepstrum,
    pitch: PitchDetector,
}

impl FeatureExtractor {
    /// Create an extractor for audio at `sample_rate` Hz
    pub fn new(sample_rate: u32) -> Self {
        let frame_len = (sample_rate as usize * FRAME_MS / 1000).max(2);
        let hop_len = (sample_rate as usize * HOP_MS / 1000).max(1);
        let fft = FftProcessor::new(frame_len, sample_rate);
        let mfcc = MelCepstrum::new(sample_rate, fft.fft_size());
        let pitch = PitchDetector::new(sample_rate, frame_len);

        Self {
            sample_rate,
            frame_len,
            hop_len,
            fft,
            mfcc,
            pitch,
        }
    }

    /// Samples required for one analysis window
    pub fn min_samples(&self) -> usize {
        self.frame_len
    }

    /// Extract the fixed-schema feature vector from one buffer.
    ///
    /// Fails with [`FeatureError::TooShort`] when the buffer holds less
    /// than one analysis window, and [`FeatureError::NoVoicedFrames`] when
    /// the pitch estimator finds no usable frame (silence or noise).
    pub fn extract(&self, buffer: &AudioBuffer) -> Result<FeatureVector, FeatureError> {
        let samples = &buffer.samples;
        if samples.len() < self.frame_len {
            return Err(FeatureError::TooShort {
                samples: samples.len(),
                required: self.frame_len,
            });
        }

        let n_frames = (samples.len() - self.frame_len) / self.hop_len + 1;

        let mut centroids = Vec::with_capacity(n_frames);
        let mut energies = Vec::with_capacity(n_frames);
        let mut cepstra: Vec<Vec<f64>> = Vec::with_capacity(n_frames);
        let mut mean_spectrum: Vec<f64> = Vec::new();
        let mut voiced_pitches: Vec<f64> = Vec::new();

        for i in 0..n_frames {
            let start = i * self.hop_len;
            let frame = &samples[start..start + self.frame_len];

            let spectrum = self.fft.magnitude_spectrum(frame);
            centroids.push(self.fft.spectral_centroid(&spectrum));
            cepstra.push(self.mfcc.compute(&spectrum));
            energies.push(rms(frame));

            if mean_spectrum.is_empty() {
                mean_spectrum = spectrum;
            } else {
                for (acc, mag) in mean_spectrum.iter_mut().zip(spectrum.iter()) {
                    *acc += mag;
                }
            }

            if let Some(f0) = self.pitch.detect(frame) {
                voiced_pitches.push(f0);
            }
        }

        if voiced_pitches.is_empty() {
            return Err(FeatureError::NoVoicedFrames);
        }

        for mag in mean_spectrum.iter_mut() {
            *mag /= n_frames as f64;
        }

        let n_coeffs = cepstra[0].len();
        let mut mfcc_mean = vec![0.0; n_coeffs];
        let mut mfcc_var = vec![0.0; n_coeffs];
        for c in 0..n_coeffs {
            let column: Vec<f64> = cepstra.iter().map(|frame| frame[c]).collect();
            let stats = Stats::compute(&column);
            mfcc_mean[c] = stats.mean;
            mfcc_var[c] = stats.variance;
        }

        let centroid_stats = Stats::compute(&centroids);
        let energy_stats = Stats::compute(&energies);
        let pitch_stats = Stats::compute(&voiced_pitches);

        // Jitter: mean relative change between consecutive voiced periods
        let pitch_jitter = if voiced_pitches.len() >= 2 {
            let periods: Vec<f64> = voiced_pitches.iter().map(|f0| 1.0 / f0).collect();
            let total: f64 = periods
                .windows(2)
                .map(|pair| (pair[1] - pair[0]).abs() / pair[0])
                .sum();
            total / (periods.len() - 1) as f64
        } else {
            0.0
        };

        debug!(
            frames = n_frames,
            voiced = voiced_pitches.len(),
            sample_rate = self.sample_rate,
            "extracted acoustic features"
        );

        Ok(FeatureVector {
            duration: buffer.duration(),
            mfcc_mean,
            mfcc_var,
            spectral_centroid_mean: centroid_stats.mean,
            spectral_centroid_var: centroid_stats.variance,
            spectral_flatness: self.fft.spectral_flatness(&mean_spectrum),
            zero_crossing_rate: zero_crossing_rate(samples),
            energy_mean: energy_stats.mean,
            energy_var: energy_stats.variance,
            pitch_mean: pitch_stats.mean,
            pitch_jitter,
            voiced_ratio: voiced_pitches.len() as f64 / n_frames as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sine_buffer(seconds: f64, sample_rate: u32, freq: f64, amplitude: f64) -> AudioBuffer {
        let n = (seconds * sample_rate as f64) as usize;
        let samples = (0..n)
            .map(|i| {
                (amplitude
                    * (2.0 * std::f64::consts::PI * freq * i as f64 / sample_rate as f64).sin())
                    as f32
            })
            .collect();
        AudioBuffer {
            samples,
            sample_rate,
        }
    }

    #[test]
    fn test_extract_sine_wave() {
        let extractor = FeatureExtractor::new(22050);
        let buffer = sine_buffer(1.0, 22050, 220.0, 0.5);

        let features = extractor.extract(&buffer).unwrap();

        assert!((features.duration - 1.0).abs() < 0.025);
        assert!((features.pitch_mean - 220.0).abs() < 15.0);
        // A pure tone has a perfectly stable period
        assert!(features.pitch_jitter < 0.01);
        assert_eq!(features.mfcc_mean.len(), 13);
        assert_eq!(features.mfcc_var.len(), 13);
        assert!(features.voiced_ratio > 0.9);
    }

    #[test]
    fn test_all_values_finite() {
        let extractor = FeatureExtractor::new(22050);
        let buffer = sine_buffer(0.5, 22050, 440.0, 0.5);

        let features = extractor.extract(&buffer).unwrap();

        assert!(features.duration.is_finite());
        assert!(features.mfcc_mean.iter().all(|v| v.is_finite()));
        assert!(features.mfcc_var.iter().all(|v| v.is_finite()));
        for (name, value) in features.summary() {
            assert!(value.is_finite(), "{name} is not finite");
        }
    }

    #[test]
    fn test_deterministic_extraction() {
        let extractor = FeatureExtractor::new(16000);
        let buffer = sine_buffer(0.5, 16000, 180.0, 0.4);

        let first = extractor.extract(&buffer).unwrap();
        let second = extractor.extract(&buffer).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_silence_has_no_voiced_frames() {
        let extractor = FeatureExtractor::new(22050);
        let buffer = AudioBuffer {
            samples: vec![0.0; 22050],
            sample_rate: 22050,
        };

        assert!(matches!(
            extractor.extract(&buffer),
            Err(FeatureError::NoVoicedFrames)
        ));
    }

    #[test]
    fn test_minimum_window_boundary() {
        let extractor = FeatureExtractor::new(22050);
        let required = extractor.min_samples();

        // Exactly one window succeeds
        let mut exact = sine_buffer(1.0, 22050, 220.0, 0.5);
        exact.samples.truncate(required);
        assert!(extractor.extract(&exact).is_ok());

        // One sample short fails with TooShort
        let mut short = exact.clone();
        short.samples.truncate(required - 1);
        assert!(matches!(
            extractor.extract(&short),
            Err(FeatureError::TooShort { .. })
        ));
    }

    #[test]
    fn test_summary_excludes_duration_and_mfcc() {
        let extractor = FeatureExtractor::new(22050);
        let buffer = sine_buffer(0.5, 22050, 220.0, 0.5);
        let summary = extractor.extract(&buffer).unwrap().summary();

        assert!(!summary.contains_key("duration"));
        assert!(!summary.contains_key("mfcc_mean"));
        assert_eq!(summary.len(), 9);
    }

    proptest! {
        #[test]
        fn prop_sine_features_finite_and_stable(
            freq in 100.0f64..350.0,
            amplitude in 0.1f64..0.9,
        ) {
            let extractor = FeatureExtractor::new(16000);
            let buffer = sine_buffer(0.5, 16000, freq, amplitude);

            let first = extractor.extract(&buffer).unwrap();
            let second = extractor.extract(&buffer).unwrap();

            prop_assert_eq!(&first, &second);
            for (_, value) in first.summary() {
                prop_assert!(value.is_finite());
            }
        }
    }
}
