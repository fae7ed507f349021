//! Audio Decoding
//!
//! Turns an encoded audio byte stream (WAV, FLAC, MP3, Ogg/Vorbis, AAC,
//! MP4/M4A) into a mono sample buffer. The container format is detected
//! from the bytes themselves; callers never supply a format hint.

mod buffer;
mod decoder;
mod error;

pub use buffer::AudioBuffer;
pub use decoder::{decode, MAX_DURATION_SECS, MAX_INPUT_BYTES};
pub use error::DecodeError;
