//! Statistical Reductions
//!
//! Simple deterministic reductions over per-frame values and raw samples.

/// Mean and population variance of a value sequence
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    /// Mean value
    pub mean: f64,
    /// Population variance
    pub variance: f64,
}

impl Stats {
    /// Compute mean and variance from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        Self { mean, variance }
    }
}

/// Zero-crossing rate over a sample sequence: sign changes per sample pair.
pub fn zero_crossing_rate(samples: &[f32]) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }

    let crossings = samples
        .windows(2)
        .filter(|pair| {
            pair[0].signum() != pair[1].signum() && pair[0] != 0.0 && pair[1] != 0.0
        })
        .count();

    crossings as f64 / (samples.len() - 1) as f64
}

/// Root-mean-square amplitude of one frame.
pub fn rms(frame: &[f32]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    let energy: f64 = frame.iter().map(|&s| s as f64 * s as f64).sum();
    (energy / frame.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_variance() {
        let stats = Stats::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((stats.mean - 3.0).abs() < 1e-9);
        assert!((stats.variance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_values() {
        let stats = Stats::compute(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn test_zero_crossing_rate_alternating() {
        let samples = vec![1.0, -1.0, 1.0, -1.0, 1.0];
        assert!((zero_crossing_rate(&samples) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_crossing_rate_constant() {
        assert_eq!(zero_crossing_rate(&[0.5; 100]), 0.0);
    }

    #[test]
    fn test_rms_of_silence() {
        assert_eq!(rms(&[0.0; 64]), 0.0);
    }

    #[test]
    fn test_rms_of_constant() {
        assert!((rms(&[0.5; 64]) - 0.5).abs() < 1e-6);
    }
}
