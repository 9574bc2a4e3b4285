//! Apply a one-pole RC low-pass filter to every channel of a 16-bit PCM WAV file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rcwav::{cli, config::FilterConfig, config::DEFAULT_CUTOFF_HZ, pipeline};

#[derive(Parser, Debug)]
#[command(name = "rc_filter")]
#[command(about = "Low-pass filter a 16-bit PCM WAV file")]
#[command(version)]
struct Args {
    /// Input WAV file
    input: PathBuf,

    /// Output WAV file
    output: PathBuf,

    /// Cutoff frequency in Hz
    #[arg(short, long, default_value_t = DEFAULT_CUTOFF_HZ)]
    cutoff: f64,
}

fn main() -> Result<()> {
    cli::init_tracing();
    let args = Args::parse();

    let config = FilterConfig {
        cutoff_hz: args.cutoff,
    };
    let report = pipeline::filter_file(&args.input, &args.output, &config).with_context(|| {
        format!(
            "Failed to filter {} into {}",
            args.input.display(),
            args.output.display()
        )
    })?;

    info!(
        alpha = report.alpha,
        input_rms = report.input_rms,
        output_rms = report.output_rms,
        "Filtering complete, result saved to {}",
        args.output.display()
    );
    Ok(())
}
