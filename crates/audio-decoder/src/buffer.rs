//! Decoded Audio Buffer

/// Decoded mono audio: amplitude samples plus the container's sample rate.
///
/// Samples are nominally in [-1, 1]. Invariants: `sample_rate > 0` and
/// `samples` is non-empty; both are enforced by [`crate::decode`].
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Mono amplitude samples
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Duration of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
