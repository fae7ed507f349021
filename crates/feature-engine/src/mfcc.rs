//! Mel-Frequency Cepstral Coefficients
//!
//! Triangular mel filterbank (Slaney scale) over the magnitude spectrum,
//! log compression with a floor, then DCT-II to a compact cepstral vector.

/// Number of mel filterbank bands
const N_MELS: usize = 26;

/// Number of cepstral coefficients retained
pub const N_COEFFS: usize = 13;

/// Mel cepstrum computer for one FFT configuration
pub struct MelCepstrum {
    /// Triangular filterbank, `N_MELS` filters over `fft_size / 2 + 1` bins
    filterbank: Vec<Vec<f64>>,
}

impl MelCepstrum {
    /// Build the filterbank for spectra of `fft_size / 2 + 1` bins at
    /// `sample_rate` Hz, spanning 0 Hz to Nyquist.
    pub fn new(sample_rate: u32, fft_size: usize) -> Self {
        let filterbank =
            Self::mel_filterbank(sample_rate, fft_size, N_MELS, 0.0, sample_rate as f64 / 2.0);
        Self { filterbank }
    }

    /// Compute `N_COEFFS` cepstral coefficients from a magnitude spectrum.
    pub fn compute(&self, spectrum: &[f64]) -> Vec<f64> {
        // Mel-band log energies from the power spectrum
        let log_mel: Vec<f64> = self
            .filterbank
            .iter()
            .map(|filter| {
                let energy: f64 = filter
                    .iter()
                    .zip(spectrum.iter())
                    .map(|(f, m)| f * m * m)
                    .sum();
                energy.max(1e-10).ln()
            })
            .collect();

        // Orthonormal DCT-II
        let n = log_mel.len() as f64;
        (0..N_COEFFS)
            .map(|k| {
                let sum: f64 = log_mel
                    .iter()
                    .enumerate()
                    .map(|(i, &v)| {
                        v * (std::f64::consts::PI * k as f64 * (i as f64 + 0.5) / n).cos()
                    })
                    .sum();
                let scale = if k == 0 {
                    (1.0 / n).sqrt()
                } else {
                    (2.0 / n).sqrt()
                };
                scale * sum
            })
            .collect()
    }

    /// Convert frequency in Hz to mel scale (Slaney / O'Shaughnessy).
    fn hz_to_mel(f: f64) -> f64 {
        const F_SP: f64 = 200.0 / 3.0;
        const MIN_LOG_HZ: f64 = 1000.0;
        const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;
        const LOGSTEP: f64 = 0.068_751_777_42; // ln(6.4) / 27

        if f < MIN_LOG_HZ {
            f / F_SP
        } else {
            MIN_LOG_MEL + (f / MIN_LOG_HZ).ln() / LOGSTEP
        }
    }

    /// Convert mel value to Hz (Slaney / O'Shaughnessy).
    fn mel_to_hz(m: f64) -> f64 {
        const F_SP: f64 = 200.0 / 3.0;
        const MIN_LOG_HZ: f64 = 1000.0;
        const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;
        const LOGSTEP: f64 = 0.068_751_777_42;

        if m < MIN_LOG_MEL {
            m * F_SP
        } else {
            MIN_LOG_HZ * ((m - MIN_LOG_MEL) * LOGSTEP).exp()
        }
    }

    /// Build the triangular mel filterbank matrix.
    fn mel_filterbank(
        sample_rate: u32,
        fft_size: usize,
        n_mels: usize,
        fmin: f64,
        fmax: f64,
    ) -> Vec<Vec<f64>> {
        let n_freqs = fft_size / 2 + 1;

        let mel_min = Self::hz_to_mel(fmin);
        let mel_max = Self::hz_to_mel(fmax);
        let hz_points: Vec<f64> = (0..=n_mels + 1)
            .map(|i| {
                Self::mel_to_hz(mel_min + (mel_max - mel_min) * i as f64 / (n_mels + 1) as f64)
            })
            .collect();

        let fft_freqs: Vec<f64> = (0..n_freqs)
            .map(|i| i as f64 * sample_rate as f64 / fft_size as f64)
            .collect();

        let mut filterbank = vec![vec![0.0f64; n_freqs]; n_mels];
        for i in 0..n_mels {
            let f_lower = hz_points[i];
            let f_center = hz_points[i + 1];
            let f_upper = hz_points[i + 2];

            for (j, &freq) in fft_freqs.iter().enumerate() {
                if freq >= f_lower && freq <= f_center && f_center > f_lower {
                    filterbank[i][j] = (freq - f_lower) / (f_center - f_lower);
                } else if freq > f_center && freq <= f_upper && f_upper > f_center {
                    filterbank[i][j] = (f_upper - freq) / (f_upper - f_center);
                }
            }
        }

        filterbank
    }
}
