//! De-interleaving of PCM frames into per-channel sequences, and back.
//!
//! Channel sequences carry the raw sample values as floats (`1000i16` becomes `1000.0`), so a
//! split followed by a join is lossless.

use crate::error::{Error, Result};

/// Split an interleaved buffer into one sequence per channel.
pub fn split(buffer: &[i16], channels: usize) -> Result<Vec<Vec<f32>>> {
    if channels == 0 {
        return Err(Error::InvalidArgument("channel count must be positive".into()));
    }
    if buffer.len() % channels != 0 {
        return Err(Error::InvalidArgument(format!(
            "buffer of {} samples is not a multiple of {channels} channels",
            buffer.len()
        )));
    }

    Ok((0..channels)
        .map(|c| {
            buffer
                .iter()
                .skip(c)
                .step_by(channels)
                .map(|&x| f32::from(x))
                .collect()
        })
        .collect())
}

/// Interleave per-channel sequences back into one buffer, in channel order.
///
/// Values are rounded to the nearest integer and clamped to the `i16` range.
pub fn join(sequences: &[Vec<f32>], channels: usize) -> Result<Vec<i16>> {
    if channels == 0 {
        return Err(Error::InvalidArgument("channel count must be positive".into()));
    }
    if sequences.len() != channels {
        return Err(Error::InvalidArgument(format!(
            "expected {channels} channel sequences, got {}",
            sequences.len()
        )));
    }
    let len = sequences[0].len();
    if let Some(bad) = sequences.iter().position(|s| s.len() != len) {
        return Err(Error::InvalidArgument(format!(
            "channel {bad} has {} samples, channel 0 has {len}",
            sequences[bad].len()
        )));
    }

    let mut buffer = Vec::with_capacity(len * channels);
    for i in 0..len {
        buffer.extend(sequences.iter().map(|s| to_sample(s[i])));
    }
    Ok(buffer)
}

/// Convert a float back to a 16-bit sample, rounding to nearest and saturating.
pub fn to_sample(x: f32) -> i16 {
    // `as` saturates and maps NaN to 0
    x.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_strides_by_channel() {
        let buffer = [1, -1, 2, -2, 3, -3];
        let channels = split(&buffer, 2).unwrap();
        assert_eq!(channels, vec![vec![1.0, 2.0, 3.0], vec![-1.0, -2.0, -3.0]]);
    }

    #[test]
    fn test_split_three_channels() {
        let buffer = [10, 20, 30, 11, 21, 31];
        let channels = split(&buffer, 3).unwrap();
        assert_eq!(channels[0], vec![10.0, 11.0]);
        assert_eq!(channels[1], vec![20.0, 21.0]);
        assert_eq!(channels[2], vec![30.0, 31.0]);
    }

    #[test]
    fn test_join_inverts_split() {
        let buffer: Vec<i16> = (0..60).map(|i| (i * 1093 % 65536 - 32768) as i16).collect();
        for channels in [1, 2, 3, 4, 5, 6] {
            let sequences = split(&buffer, channels).unwrap();
            assert_eq!(join(&sequences, channels).unwrap(), buffer);
        }
    }

    #[test]
    fn test_empty_buffer() {
        let sequences = split(&[], 2).unwrap();
        assert_eq!(sequences, vec![Vec::<f32>::new(), Vec::new()]);
        assert!(join(&sequences, 2).unwrap().is_empty());
    }

    #[test]
    fn test_split_rejects_partial_frame() {
        assert!(matches!(split(&[1, 2, 3], 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(split(&[1, 2], 0), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_join_rejects_unequal_lengths() {
        let sequences = vec![vec![1.0, 2.0], vec![1.0]];
        assert!(matches!(join(&sequences, 2), Err(Error::InvalidArgument(_))));
        assert!(matches!(
            join(&sequences[..1], 2),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_to_sample_rounds_and_saturates() {
        assert_eq!(to_sample(1.4), 1);
        assert_eq!(to_sample(1.6), 2);
        assert_eq!(to_sample(-1.6), -2);
        assert_eq!(to_sample(40000.0), i16::MAX);
        assert_eq!(to_sample(-40000.0), i16::MIN);
    }
}
