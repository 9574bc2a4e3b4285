//! # RIFF/WAVE container codec
//!
//! Reads and writes the canonical 44-byte header of an uncompressed 16-bit PCM file, followed
//! by the interleaved little-endian samples.
//!
//! ```text
//! offset  size  field
//!      0     4  "RIFF"
//!      4     4  overall size (file size - 8)
//!      8     4  "WAVE"
//!     12     4  "fmt "
//!     16     4  fmt block length (16)
//!     20     2  format type (1 = PCM)
//!     22     2  channels
//!     24     4  sample rate
//!     28     4  byte rate (sample rate * block align)
//!     32     2  block align (channels * bits per sample / 8)
//!     34     2  bits per sample (16)
//!     36     4  "data"
//!     40     4  data size in bytes
//!     44     …  samples
//! ```
//!
//! Every field is serialized explicitly with a declared byte order; nothing relies on the memory
//! layout of [`WavHeader`]. Chunks other than `fmt ` followed directly by `data` are not
//! understood.

use bytes::{Buf, BufMut};
use tracing::{debug, warn};

use crate::error::{Error, Result};

pub const HEADER_SIZE: usize = 44;

pub const RIFF: [u8; 4] = *b"RIFF";
pub const WAVE: [u8; 4] = *b"WAVE";
pub const FMT: [u8; 4] = *b"fmt ";
pub const DATA: [u8; 4] = *b"data";

pub const PCM_FORMAT: u16 = 1;
pub const PCM_FMT_LENGTH: u32 = 16;
pub const BITS_PER_SAMPLE: u16 = 16;

const BYTES_PER_SAMPLE: usize = (BITS_PER_SAMPLE / 8) as usize;

/// Everything the 44-byte header carries, field for field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff: [u8; 4],
    /// Total file size minus the 8 bytes of `riff` and this field.
    pub overall_size: u32,
    pub wave: [u8; 4],
    pub fmt_marker: [u8; 4],
    pub fmt_length: u32,
    pub format_type: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data_marker: [u8; 4],
    /// Payload size in bytes.
    pub data_size: u32,
}

impl WavHeader {
    /// Build a 16-bit PCM header, deriving `block_align`, `byte_rate` and `overall_size`.
    pub fn pcm16(channels: u16, sample_rate: u32, data_size: u32) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidArgument("channel count must be positive".into()));
        }
        if sample_rate == 0 {
            return Err(Error::InvalidArgument("sample rate must be positive".into()));
        }
        let block_align = channels
            .checked_mul(BITS_PER_SAMPLE / 8)
            .ok_or_else(|| Error::InvalidArgument(format!("too many channels: {channels}")))?;
        let byte_rate = sample_rate.checked_mul(u32::from(block_align)).ok_or_else(|| {
            Error::InvalidArgument(format!(
                "byte rate overflows for {sample_rate} Hz x {channels} channels"
            ))
        })?;

        let header = Self {
            riff: RIFF,
            overall_size: 0,
            wave: WAVE,
            fmt_marker: FMT,
            fmt_length: PCM_FMT_LENGTH,
            format_type: PCM_FORMAT,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample: BITS_PER_SAMPLE,
            data_marker: DATA,
            data_size: 0,
        };
        header.with_data_size(data_size)
    }

    /// Same header describing a payload of `data_size` bytes.
    pub fn with_data_size(self, data_size: u32) -> Result<Self> {
        let overall_size = overall_size_for(data_size)?;
        Ok(Self {
            overall_size,
            data_size,
            ..self
        })
    }

    /// Number of whole frames in the payload. Trailing bytes of a partial frame are not counted.
    pub fn frames(&self) -> usize {
        if self.block_align == 0 {
            return 0;
        }
        (self.data_size / u32::from(self.block_align)) as usize
    }

    /// Number of interleaved samples in the whole frames of the payload.
    pub fn samples(&self) -> usize {
        self.frames() * usize::from(self.channels)
    }

    /// Whether `block_align` and `byte_rate` agree with the fields they derive from.
    pub fn is_consistent(&self) -> bool {
        let block_align = u32::from(self.channels) * u32::from(self.bits_per_sample) / 8;
        u32::from(self.block_align) == block_align
            && u64::from(self.byte_rate) == u64::from(self.sample_rate) * u64::from(block_align)
    }

    /// Parse and validate the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::Format(format!(
                "stream is {} bytes, shorter than the {HEADER_SIZE}-byte header",
                bytes.len()
            )));
        }

        let mut buf = &bytes[..HEADER_SIZE];
        let header = Self {
            riff: get_marker(&mut buf),
            overall_size: buf.get_u32_le(),
            wave: get_marker(&mut buf),
            fmt_marker: get_marker(&mut buf),
            fmt_length: buf.get_u32_le(),
            format_type: buf.get_u16_le(),
            channels: buf.get_u16_le(),
            sample_rate: buf.get_u32_le(),
            byte_rate: buf.get_u32_le(),
            block_align: buf.get_u16_le(),
            bits_per_sample: buf.get_u16_le(),
            data_marker: get_marker(&mut buf),
            data_size: buf.get_u32_le(),
        };

        expect_marker("RIFF", header.riff, RIFF)?;
        expect_marker("WAVE", header.wave, WAVE)?;
        expect_marker("fmt ", header.fmt_marker, FMT)?;
        expect_marker("data", header.data_marker, DATA)?;

        if header.format_type != PCM_FORMAT {
            return Err(Error::Format(format!(
                "unsupported format type {} (only integer PCM is supported)",
                header.format_type
            )));
        }
        if header.bits_per_sample != BITS_PER_SAMPLE {
            return Err(Error::Format(format!(
                "unsupported sample width of {} bits (only 16 is supported)",
                header.bits_per_sample
            )));
        }
        if header.channels == 0 {
            return Err(Error::Format("header declares zero channels".into()));
        }
        if header.sample_rate == 0 {
            return Err(Error::Format("header declares a sample rate of 0 Hz".into()));
        }
        if usize::from(header.block_align) != usize::from(header.channels) * BYTES_PER_SAMPLE {
            return Err(Error::Format(format!(
                "block align {} does not match {} channels of 16-bit samples",
                header.block_align, header.channels
            )));
        }

        Ok(header)
    }

    /// Serialize the header fields in wire order.
    pub fn write_to(&self, out: &mut impl BufMut) {
        out.put_slice(&self.riff);
        out.put_u32_le(self.overall_size);
        out.put_slice(&self.wave);
        out.put_slice(&self.fmt_marker);
        out.put_u32_le(self.fmt_length);
        out.put_u16_le(self.format_type);
        out.put_u16_le(self.channels);
        out.put_u32_le(self.sample_rate);
        out.put_u32_le(self.byte_rate);
        out.put_u16_le(self.block_align);
        out.put_u16_le(self.bits_per_sample);
        out.put_slice(&self.data_marker);
        out.put_u32_le(self.data_size);
    }
}

/// Decode a complete file image into its header and interleaved samples.
///
/// The sample count is `data_size / block_align` whole frames; bytes of a trailing partial frame
/// are dropped. A payload shorter than the whole frames it declares is a [`Error::Format`].
pub fn decode(bytes: &[u8]) -> Result<(WavHeader, Vec<i16>)> {
    let header = WavHeader::parse(bytes)?;
    debug!(
        channels = header.channels,
        sample_rate = header.sample_rate,
        data_size = header.data_size,
        block_align = header.block_align,
        "Decoded WAV header"
    );

    if !header.is_consistent() {
        warn!(
            "Header byte rate {} does not match {} Hz x {} bytes per frame",
            header.byte_rate, header.sample_rate, header.block_align
        );
    }

    let partial = header.data_size % u32::from(header.block_align);
    if partial != 0 {
        warn!(
            "Dropping {} trailing bytes of a partial frame (data size {} is not a multiple of block align {})",
            partial, header.data_size, header.block_align
        );
    }

    let needed = header.samples() * BYTES_PER_SAMPLE;
    let payload = &bytes[HEADER_SIZE..];
    if payload.len() < needed {
        return Err(Error::Format(format!(
            "truncated payload: header declares {needed} bytes of samples, found {}",
            payload.len()
        )));
    }

    let mut buf = &payload[..needed];
    let mut samples = Vec::with_capacity(header.samples());
    while buf.has_remaining() {
        samples.push(buf.get_i16_le());
    }

    Ok((header, samples))
}

/// Encode a header and its interleaved samples into a complete file image.
///
/// `overall_size` is recomputed from `data_size`. The header must declare exactly the bytes
/// `samples` occupies; nothing is produced otherwise.
pub fn encode(header: &WavHeader, samples: &[i16]) -> Result<Vec<u8>> {
    if header.channels == 0 {
        return Err(Error::InvalidArgument("channel count must be positive".into()));
    }
    if samples.len() % usize::from(header.channels) != 0 {
        return Err(Error::InvalidArgument(format!(
            "{} samples is not a whole number of {}-channel frames",
            samples.len(),
            header.channels
        )));
    }
    let payload_size = samples.len() * BYTES_PER_SAMPLE;
    if u64::from(header.data_size) != payload_size as u64 {
        return Err(Error::InvalidArgument(format!(
            "header declares {} data bytes but {} samples occupy {payload_size}",
            header.data_size,
            samples.len()
        )));
    }

    let header = WavHeader {
        overall_size: overall_size_for(header.data_size)?,
        ..*header
    };

    let mut out = Vec::with_capacity(HEADER_SIZE + payload_size);
    header.write_to(&mut out);
    for &sample in samples {
        out.put_i16_le(sample);
    }
    Ok(out)
}

/// Payload size in bytes for `samples` interleaved 16-bit samples.
pub fn data_size_for(samples: usize) -> Result<u32> {
    samples
        .checked_mul(BYTES_PER_SAMPLE)
        .and_then(|size| u32::try_from(size).ok())
        .ok_or_else(|| {
            Error::InvalidArgument(format!("{samples} samples do not fit in a WAV data chunk"))
        })
}

fn overall_size_for(data_size: u32) -> Result<u32> {
    data_size
        .checked_add((HEADER_SIZE - 8) as u32)
        .ok_or_else(|| Error::InvalidArgument(format!("data size {data_size} is too large")))
}

fn get_marker(buf: &mut &[u8]) -> [u8; 4] {
    let mut marker = [0; 4];
    buf.copy_to_slice(&mut marker);
    marker
}

fn expect_marker(name: &str, found: [u8; 4], expected: [u8; 4]) -> Result<()> {
    if found != expected {
        return Err(Error::Format(format!(
            "expected {name:?} marker, found {:?}",
            String::from_utf8_lossy(&found)
        )));
    }
    Ok(())
}
