//! File-level operations behind the two tools.
//!
//! Whole files are buffered in memory. Output is encoded completely before anything is written,
//! so a failed run never leaves a header without its payload.

use std::{fs, path::Path};

use tracing::{debug, info};

use crate::{
    analysis, channels,
    config::{FilterConfig, ToneConfig},
    error::Result,
    filter::RcLowPass,
    generator,
    wav::{self, WavHeader},
};

/// What a filter pass did.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterReport {
    /// Header of the written file.
    pub header: WavHeader,
    pub frames: usize,
    pub alpha: f32,
    pub input_rms: f32,
    pub output_rms: f32,
}

/// Low-pass every channel of an encoded file image and return the encoded result.
pub fn filter_bytes(bytes: &[u8], config: &FilterConfig) -> Result<(Vec<u8>, FilterReport)> {
    config.validate()?;
    let (header, samples) = wav::decode(bytes)?;
    let channel_count = usize::from(header.channels);

    let filter = RcLowPass::from_cutoff(config.cutoff_hz as f32, header.sample_rate as f32)?;
    debug!(
        cutoff_hz = config.cutoff_hz,
        alpha = filter.alpha(),
        "Filtering {} channels",
        channel_count
    );

    let input = channels::split(&samples, channel_count)?;
    let output = filter.apply_channels(&input);
    for (channel, (before, after)) in input.iter().zip(output.iter()).enumerate() {
        debug!(
            channel,
            input_rms = analysis::power(before),
            output_rms = analysis::power(after),
            "Filtered channel"
        );
    }

    let filtered = channels::join(&output, channel_count)?;
    // Re-derived rather than copied, so a bad byte rate in the input is not carried over.
    let out_header = WavHeader::pcm16(
        header.channels,
        header.sample_rate,
        wav::data_size_for(filtered.len())?,
    )?;
    let encoded = wav::encode(&out_header, &filtered)?;

    let report = FilterReport {
        header: out_header,
        frames: out_header.frames(),
        alpha: filter.alpha(),
        input_rms: analysis::power(&input.concat()),
        output_rms: analysis::power(&output.concat()),
    };
    Ok((encoded, report))
}

/// Read `input`, low-pass it and write the result to `output`.
pub fn filter_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &FilterConfig,
) -> Result<FilterReport> {
    let (input, output) = (input.as_ref(), output.as_ref());
    let bytes = fs::read(input)?;
    debug!("Read {} bytes from {}", bytes.len(), input.display());

    let (encoded, report) = filter_bytes(&bytes, config)?;
    fs::write(output, &encoded)?;
    info!(
        "Filtered {} frames of {} into {}",
        report.frames,
        input.display(),
        output.display()
    );
    Ok(report)
}

/// What a tone generation produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneReport {
    /// Header of the written file.
    pub header: WavHeader,
    /// Dominant frequency measured on the left channel, `None` for a constant signal.
    pub peak_hz: Option<f64>,
}

/// Generate the stereo test tone and return its report and encoded file image.
pub fn generate_bytes(config: &ToneConfig) -> Result<(Vec<u8>, ToneReport)> {
    config.validate()?;
    let buffer = generator::generate(config.sample_rate, config.frequency, config.duration_secs)?;
    let header = generator::tone_header(config.sample_rate, &buffer)?;

    // One second of the left channel is plenty to locate the tone.
    let left: Vec<f64> = buffer
        .iter()
        .step_by(usize::from(generator::CHANNELS))
        .take(config.sample_rate as usize)
        .map(|&x| f64::from(x))
        .collect();
    let peak_hz = analysis::peak_frequency(&left, f64::from(config.sample_rate));
    debug!(peak_hz = ?peak_hz, "Generated {} frames", header.frames());

    let encoded = wav::encode(&header, &buffer)?;
    Ok((encoded, ToneReport { header, peak_hz }))
}

/// Generate the stereo test tone into `output`.
pub fn generate_file(config: &ToneConfig, output: impl AsRef<Path>) -> Result<ToneReport> {
    let output = output.as_ref();
    let (encoded, report) = generate_bytes(config)?;
    fs::write(output, &encoded)?;
    info!("File {} generated", output.display());
    Ok(report)
}
