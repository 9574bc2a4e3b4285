//! # One-pole RC low-pass filter
//!
//! A discrete approximation of an analog resistor-capacitor low-pass:
//!
//! ```text
//! alpha = dt / (RC + dt)
//! y[0]  = alpha * x[0]
//! y[n]  = alpha * x[n] + (1 - alpha) * y[n-1]
//! ```
//!
//! `RC` is the time constant in seconds (`1 / (2π * cutoff_hz)`) and `dt` the sample interval
//! (`1 / sample_rate`). The filter's only state is the previous output, which starts at zero, so
//! the first output is biased toward zero rather than toward `x[0]`.

use crate::{
    error::{Error, Result},
    float::Float,
};

/// Smoothing coefficient derived once from `RC` and `dt`, shared by every channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RcLowPass<T> {
    alpha: T,
}

impl<T: Float> RcLowPass<T> {
    /// Build the filter from a time constant and a sample interval, both in seconds.
    ///
    /// `rc` may be zero (the filter then passes its input through); `dt` must be positive.
    pub fn new(rc: T, dt: T) -> Result<Self> {
        if !rc.is_finite() || !dt.is_finite() || rc < T::zero() || dt <= T::zero() {
            return Err(Error::InvalidArgument(format!(
                "filter needs RC >= 0 and dt > 0, got RC = {rc:?}, dt = {dt:?}"
            )));
        }
        Ok(Self {
            alpha: dt / (rc + dt),
        })
    }

    /// Build the filter for a cutoff frequency at a given sample rate, both in Hz.
    pub fn from_cutoff(cutoff_hz: T, sample_rate: T) -> Result<Self> {
        if !(cutoff_hz > T::zero()) || !(sample_rate > T::zero()) {
            return Err(Error::InvalidArgument(format!(
                "cutoff and sample rate must be positive, got {cutoff_hz:?} Hz at {sample_rate:?} Hz"
            )));
        }
        Self::new(time_constant(cutoff_hz), T::one() / sample_rate)
    }

    pub fn alpha(&self) -> T {
        self.alpha
    }

    /// Filter one sequence from a zeroed state. Empty input gives empty output.
    pub fn apply(&self, input: &[T]) -> Vec<T> {
        let mut state = self.one_pole();
        input.iter().map(|&x| state.process(x)).collect()
    }

    /// Filter every channel independently, each with its own fresh state.
    pub fn apply_channels(&self, channels: &[Vec<T>]) -> Vec<Vec<T>> {
        channels.iter().map(|channel| self.apply(channel)).collect()
    }

    /// Streaming form of the filter, for callers feeding one sample at a time.
    pub fn one_pole(&self) -> OnePole<T> {
        OnePole {
            alpha: self.alpha,
            prev_output: T::zero(),
        }
    }
}

/// `RC = 1 / (2π * cutoff_hz)`.
pub fn time_constant<T: Float>(cutoff_hz: T) -> T {
    T::one() / (T::TAU() * cutoff_hz)
}

/// The recurrence with its single piece of state, the previous output.
#[derive(Debug, Clone)]
pub struct OnePole<T> {
    alpha: T,
    prev_output: T,
}

impl<T: Float> OnePole<T> {
    pub fn process(&mut self, input: T) -> T {
        let output = self.alpha * input + (T::one() - self.alpha) * self.prev_output;
        self.prev_output = output;
        output
    }
}
