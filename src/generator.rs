//! Stereo test tone: sine on the left channel, cosine on the right.

use std::f64::consts::TAU;

use crate::{
    error::{Error, Result},
    wav::{self, WavHeader},
};

/// The generator always writes stereo frames.
pub const CHANNELS: u16 = 2;

/// Peak amplitude of the generated tone.
pub const AMPLITUDE: f64 = 32767.0;

/// Generate `floor(sample_rate * duration_secs)` interleaved stereo frames.
///
/// For frame `i` at `t = i / sample_rate` the left sample is `32767 * sin(2π f t)` and the right
/// one `32767 * cos(2π f t)`. Conversion to `i16` truncates toward zero; it does not round.
/// A zero frequency is allowed and gives a constant (silent left, full-scale right) signal.
pub fn generate(sample_rate: u32, frequency: f64, duration_secs: f64) -> Result<Vec<i16>> {
    let frames = frame_count(sample_rate, frequency, duration_secs)?;
    let rate = f64::from(sample_rate);

    let mut buffer = Vec::with_capacity(frames * usize::from(CHANNELS));
    for i in 0..frames {
        let phase = TAU * frequency * (i as f64 / rate);
        buffer.push((AMPLITUDE * phase.sin()) as i16);
        buffer.push((AMPLITUDE * phase.cos()) as i16);
    }
    Ok(buffer)
}

/// Header describing a buffer produced by [`generate`].
pub fn tone_header(sample_rate: u32, buffer: &[i16]) -> Result<WavHeader> {
    WavHeader::pcm16(CHANNELS, sample_rate, wav::data_size_for(buffer.len())?)
}

fn frame_count(sample_rate: u32, frequency: f64, duration_secs: f64) -> Result<usize> {
    if sample_rate == 0 {
        return Err(Error::InvalidArgument("sample rate must be positive".into()));
    }
    if !frequency.is_finite() {
        return Err(Error::InvalidArgument(format!(
            "frequency must be finite, got {frequency}"
        )));
    }
    if !duration_secs.is_finite() || duration_secs < 0.0 {
        return Err(Error::InvalidArgument(format!(
            "duration must be a non-negative number of seconds, got {duration_secs}"
        )));
    }

    let frames = (f64::from(sample_rate) * duration_secs).floor();
    // Keep the payload addressable by the 32-bit data size field.
    if frames * f64::from(CHANNELS) * 2.0 > f64::from(u32::MAX - wav::HEADER_SIZE as u32) {
        return Err(Error::InvalidArgument(format!(
            "{duration_secs} s at {sample_rate} Hz does not fit in a WAV file"
        )));
    }
    Ok(frames as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_second_of_440_hz() {
        let buffer = generate(8000, 440.0, 1.0).unwrap();
        assert_eq!(buffer.len(), 16000);
        assert_eq!(buffer[0], 0);
        assert!((i32::from(buffer[1]) - 32767).abs() <= 1);
    }

    #[test]
    fn test_sine_cosine_identity() {
        let buffer = generate(44100, 997.0, 0.25).unwrap();
        let expected = AMPLITUDE * AMPLITUDE;
        for frame in buffer.chunks_exact(2) {
            let (l, r) = (f64::from(frame[0]), f64::from(frame[1]));
            // Truncation loses under one unit per channel.
            let energy = l * l + r * r;
            assert!(
                energy <= expected && energy >= expected - 4.0 * AMPLITUDE,
                "frame {frame:?} is off the unit circle: {energy}"
            );
        }
    }

    #[test]
    fn test_frame_count_floors() {
        assert_eq!(generate(1000, 10.0, 0.0125).unwrap().len(), 24);
        assert_eq!(generate(1000, 10.0, 0.0).unwrap().len(), 0);
    }

    #[test]
    fn test_zero_frequency_is_constant() {
        let buffer = generate(8000, 0.0, 0.01).unwrap();
        assert!(buffer.chunks_exact(2).all(|f| f == [0, 32767]));
    }

    #[test]
    fn test_truncates_toward_zero() {
        // Quarter period at 4 samples per cycle: sin = 1, cos ~ 6e-17 before the cast.
        let buffer = generate(4, 1.0, 1.0).unwrap();
        assert_eq!(&buffer[2..4], &[32767, 0]);
        // Half period: sin ~ 1.2e-16 * 32767 truncates to 0, cos = -1.
        assert_eq!(&buffer[4..6], &[0, -32767]);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(matches!(generate(0, 440.0, 1.0), Err(Error::InvalidArgument(_))));
        assert!(generate(8000, f64::NAN, 1.0).is_err());
        assert!(generate(8000, 440.0, -1.0).is_err());
        assert!(generate(8000, 440.0, f64::INFINITY).is_err());
        assert!(generate(u32::MAX, 440.0, 1e6).is_err());
    }

    #[test]
    fn test_tone_header() {
        let buffer = generate(8000, 440.0, 0.5).unwrap();
        let header = tone_header(8000, &buffer).unwrap();
        assert_eq!(header.channels, 2);
        assert_eq!(header.block_align, 4);
        assert_eq!(header.byte_rate, 32000);
        assert_eq!(header.data_size, 16000);
        assert_eq!(header.frames(), 4000);
    }
}
