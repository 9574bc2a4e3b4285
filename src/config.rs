//! Run parameters for the two tools. Everything comes from the command line; there is no
//! config file and no persisted state.

use crate::error::{Error, Result};

/// Cutoff used when none is given on the command line.
pub const DEFAULT_CUTOFF_HZ: f64 = 1000.0;

/// Low-pass filter configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterConfig {
    pub cutoff_hz: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cutoff_hz: DEFAULT_CUTOFF_HZ,
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.cutoff_hz.is_finite() || self.cutoff_hz <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "cutoff must be a positive frequency, got {} Hz",
                self.cutoff_hz
            )));
        }
        Ok(())
    }
}

/// Test tone configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneConfig {
    pub sample_rate: u32,
    pub frequency: f64,
    pub duration_secs: f64,
}

impl ToneConfig {
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidArgument("sample rate must be positive".into()));
        }
        if !self.frequency.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "frequency must be finite, got {}",
                self.frequency
            )));
        }
        if !self.duration_secs.is_finite() || self.duration_secs < 0.0 {
            return Err(Error::InvalidArgument(format!(
                "duration must be a non-negative number of seconds, got {}",
                self.duration_secs
            )));
        }
        Ok(())
    }
}
