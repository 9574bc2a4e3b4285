//! Write a stereo test tone: sine on the left channel, cosine on the right.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rcwav::{cli, config::ToneConfig, pipeline};

#[derive(Parser, Debug)]
#[command(name = "sine_gen")]
#[command(about = "Generate a 16-bit stereo sine/cosine WAV file")]
#[command(version)]
struct Args {
    /// Sample rate in Hz
    sample_rate: u32,

    /// Tone frequency in Hz
    frequency: f64,

    /// Duration in seconds
    duration: f64,

    /// Output WAV file
    output: PathBuf,
}

fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();

    let config = ToneConfig {
        sample_rate: args.sample_rate,
        frequency: args.frequency,
        duration_secs: args.duration,
    };
    let report = pipeline::generate_file(&config, &args.output)
        .with_context(|| format!("Failed to generate {}", args.output.display()))?;

    match report.peak_hz {
        Some(peak_hz) => info!(peak_hz, frames = report.header.frames(), "Tone written"),
        None => info!(frames = report.header.frames(), "Constant signal written"),
    }
    Ok(())
}
