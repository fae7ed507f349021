//! FFT-based Frequency Analysis

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Windowed FFT processor producing magnitude spectra for analysis frames
pub struct FftProcessor {
    /// Planned forward FFT
    fft: Arc<dyn Fft<f64>>,
    /// Pre-computed Hann window, one coefficient per frame sample
    window: Vec<f64>,
    /// FFT size (frame length rounded up to the next power of two)
    fft_size: usize,
    /// Sample rate (Hz)
    sample_rate: f64,
}

impl FftProcessor {
    /// Create a processor for frames of `frame_len` samples at `sample_rate` Hz
    pub fn new(frame_len: usize, sample_rate: u32) -> Self {
        let fft_size = frame_len.next_power_of_two();
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);

        // Hann window to reduce spectral leakage
        let window = (0..frame_len)
            .map(|i| {
                0.5 * (1.0
                    - (2.0 * std::f64::consts::PI * i as f64 / (frame_len - 1).max(1) as f64)
                        .cos())
            })
            .collect();

        Self {
            fft,
            window,
            fft_size,
            sample_rate: sample_rate as f64,
        }
    }

    /// FFT size in use (frame length zero-padded to a power of two)
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Compute the magnitude spectrum of one analysis frame.
    ///
    /// Applies the Hann window, zero-pads to the FFT size, and returns
    /// magnitudes for positive frequencies only (`fft_size / 2 + 1` bins).
    pub fn magnitude_spectrum(&self, frame: &[f32]) -> Vec<f64> {
        let mut buffer: Vec<Complex<f64>> = frame
            .iter()
            .zip(self.window.iter())
            .map(|(&s, &w)| Complex::new(s as f64 * w, 0.0))
            .collect();
        buffer.resize(self.fft_size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer[..self.fft_size / 2 + 1]
            .iter()
            .map(|c| c.norm())
            .collect()
    }

    /// Spectral centroid of a magnitude spectrum in Hz.
    ///
    /// Weighted mean frequency: Σ(f_i × |X[i]|) / Σ|X[i]|. Returns 0.0 for
    /// an all-zero spectrum.
    pub fn spectral_centroid(&self, spectrum: &[f64]) -> f64 {
        let bin_width = self.sample_rate / self.fft_size as f64;

        let weighted: f64 = spectrum
            .iter()
            .enumerate()
            .map(|(i, &mag)| i as f64 * bin_width * mag)
            .sum();
        let total: f64 = spectrum.iter().sum();

        if total > 1e-12 {
            weighted / total
        } else {
            0.0
        }
    }

    /// Spectral flatness (Wiener entropy) of a magnitude spectrum.
    ///
    /// Ratio of geometric to arithmetic mean over non-zero bins; 0 for a
    /// pure tone, approaching 1 for white noise.
    pub fn spectral_flatness(&self, spectrum: &[f64]) -> f64 {
        let non_zero: Vec<f64> = spectrum.iter().copied().filter(|&m| m > 1e-12).collect();
        if non_zero.is_empty() {
            return 0.0;
        }

        let log_sum: f64 = non_zero.iter().map(|m| m.ln()).sum();
        let geometric = (log_sum / non_zero.len() as f64).exp();
        let arithmetic = non_zero.iter().sum::<f64>() / non_zero.len() as f64;

        if arithmetic > 1e-12 {
            (geometric / arithmetic).min(1.0)
        } else {
            0.0
        }
    }
}
