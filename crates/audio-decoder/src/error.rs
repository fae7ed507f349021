//! Decode Error Types

use thiserror::Error;

/// Errors while decoding an audio byte stream
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    /// Input byte string was empty
    #[error("audio payload is empty")]
    Empty,

    /// Input exceeds the size guard
    #[error("audio payload of {bytes} bytes exceeds the {max} byte limit")]
    TooLarge { bytes: usize, max: usize },

    /// Decoded audio exceeds the duration guard
    #[error("audio of {seconds:.1} s exceeds the {max:.0} s limit")]
    TooLong { seconds: f64, max: f64 },

    /// Probe did not recognize the container
    #[error("unrecognized or unsupported audio container: {0}")]
    UnsupportedFormat(String),

    /// Container recognized but the stream is corrupt or truncated
    #[error("malformed or truncated audio stream: {0}")]
    Malformed(String),

    /// Container holds no decodable audio track
    #[error("no decodable audio track in container")]
    NoAudioTrack,

    /// Track header does not declare a sample rate
    #[error("container header is missing a sample rate")]
    MissingSampleRate,

    /// Stream decoded successfully but produced zero samples
    #[error("container decoded to zero samples")]
    NoSamples,
}
