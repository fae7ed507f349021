//! Audio decoder built on symphonia
//!
//! Decoding is a pure function of the input bytes: the probe detects the
//! container from the stream itself, every packet of the selected track is
//! decoded to f32, and multi-channel audio is averaged down to mono.
//! Size and duration guards bound memory and downstream analysis cost.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::debug;

use crate::{AudioBuffer, DecodeError};

/// Maximum accepted payload size, checked before probing
pub const MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Maximum accepted audio duration in seconds
pub const MAX_DURATION_SECS: f64 = 300.0;

/// Decode an encoded audio byte stream into a mono [`AudioBuffer`].
///
/// The container format is detected from the byte stream; no hint is
/// consulted. Fails with [`DecodeError`] on empty, oversized, malformed,
/// truncated, or unrecognized input, or when the decoded audio exceeds
/// [`MAX_DURATION_SECS`].
pub fn decode(bytes: &[u8]) -> Result<AudioBuffer, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    if bytes.len() > MAX_INPUT_BYTES {
        return Err(DecodeError::TooLarge {
            bytes: bytes.len(),
            max: MAX_INPUT_BYTES,
        });
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let codec_params = track.codec_params.clone();

    let sample_rate = codec_params
        .sample_rate
        .ok_or(DecodeError::MissingSampleRate)?;
    if sample_rate == 0 {
        return Err(DecodeError::MissingSampleRate);
    }

    // Reject over-long files up front when the header declares a length
    if let Some(n_frames) = codec_params.n_frames {
        let seconds = n_frames as f64 / sample_rate as f64;
        if seconds > MAX_DURATION_SECS {
            return Err(DecodeError::TooLong {
                seconds,
                max: MAX_DURATION_SECS,
            });
        }
    }

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| DecodeError::UnsupportedFormat(e.to_string()))?;

    let max_samples = (MAX_DURATION_SECS * sample_rate as f64) as usize;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break; // end of stream
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => return Err(DecodeError::Malformed(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        let spec = *decoded.spec();
        let channels = spec.channels.count();
        if channels == 0 {
            return Err(DecodeError::NoAudioTrack);
        }

        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        // Downmix interleaved frames to mono by averaging channels
        for frame in sample_buf.samples().chunks_exact(channels) {
            samples.push(frame.iter().sum::<f32>() / channels as f32);
        }

        if samples.len() > max_samples {
            return Err(DecodeError::TooLong {
                seconds: samples.len() as f64 / sample_rate as f64,
                max: MAX_DURATION_SECS,
            });
        }
    }

    if samples.is_empty() {
        return Err(DecodeError::NoSamples);
    }

    debug!(
        sample_rate,
        samples = samples.len(),
        "decoded audio payload"
    );

    Ok(AudioBuffer {
        samples,
        sample_rate,
    })
}
