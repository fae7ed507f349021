//! Fundamental Frequency Estimation
//!
//! Per-frame normalized autocorrelation over the speaking range. A frame
//! is voiced when it carries energy and a clear periodic component; only
//! voiced frames contribute to the pitch statistics.

/// Lowest pitch searched (Hz)
const PITCH_FLOOR_HZ: f64 = 80.0;

/// Highest pitch searched (Hz)
const PITCH_CEIL_HZ: f64 = 400.0;

/// Minimum frame RMS for a frame to be considered voiced
const VOICED_RMS_THRESHOLD: f64 = 1e-3;

/// Minimum normalized autocorrelation peak for a voiced decision
const VOICED_PEAK_THRESHOLD: f64 = 0.5;

/// Autocorrelation pitch detector for fixed-length analysis frames
pub struct PitchDetector {
    sample_rate: f64,
    /// Smallest candidate lag (highest pitch)
    min_lag: usize,
    /// Largest candidate lag (lowest pitch)
    max_lag: usize,
}

impl PitchDetector {
    /// Create a detector for frames of `frame_len` samples at `sample_rate` Hz.
    ///
    /// The lag range is clamped so every candidate lag leaves at least half
    /// a frame of overlap for the correlation sum.
    pub fn new(sample_rate: u32, frame_len: usize) -> Self {
        let sr = sample_rate as f64;
        let min_lag = ((sr / PITCH_CEIL_HZ) as usize).max(2);
        let max_lag = ((sr / PITCH_FLOOR_HZ) as usize).min(frame_len / 2);

        Self {
            sample_rate: sr,
            min_lag,
            max_lag,
        }
    }

    /// Estimate the fundamental frequency of one frame in Hz.
    ///
    /// Returns `None` for unvoiced frames: too quiet, or no lag in the
    /// search range reaches the normalized correlation threshold.
    pub fn detect(&self, frame: &[f32]) -> Option<f64> {
        if self.max_lag <= self.min_lag || frame.len() <= self.max_lag {
            return None;
        }

        let samples: Vec<f64> = frame.iter().map(|&s| s as f64).collect();

        let energy: f64 = samples.iter().map(|s| s * s).sum();
        let rms = (energy / samples.len() as f64).sqrt();
        if rms < VOICED_RMS_THRESHOLD {
            return None;
        }

        let mut best_lag = 0usize;
        let mut best_corr = 0.0f64;
        for lag in self.min_lag..=self.max_lag {
            let overlap = samples.len() - lag;
            let corr: f64 = (0..overlap).map(|i| samples[i] * samples[i + lag]).sum();
            // Normalize by the energy of the two segments being compared
            let e0: f64 = samples[..overlap].iter().map(|s| s * s).sum();
            let e1: f64 = samples[lag..].iter().map(|s| s * s).sum();
            let norm = (e0 * e1).sqrt();
            if norm <= 0.0 {
                continue;
            }
            let normalized = corr / norm;
            if normalized > best_corr {
                best_corr = normalized;
                best_lag = lag;
            }
        }

        if best_corr >= VOICED_PEAK_THRESHOLD && best_lag > 0 {
            Some(self.sample_rate / best_lag as f64)
        } else {
            None
        }
    }
}
