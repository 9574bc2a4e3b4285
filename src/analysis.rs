//! Level and spectrum measurements used to report what a pass did to a signal.

use std::sync::Arc;

use rustfft::num_complex::Complex;

use crate::float::Float;

/// Root-mean-square level of `buf`; zero for an empty buffer.
pub fn power<T: Float>(buf: &[T]) -> T {
    if buf.is_empty() {
        return T::zero();
    }
    let sum = buf.iter().fold(T::zero(), |acc, &x| acc + x * x);
    (sum / from_usize::<T>(buf.len())).sqrt()
}

pub struct Fft<T: Float> {
    forward: Arc<dyn rustfft::Fft<T>>,
    size: usize,
}

impl<T: Float> Fft<T> {
    pub fn new(size: usize) -> Self {
        let mut planner = rustfft::FftPlanner::new();
        Self {
            forward: planner.plan_fft_forward(size),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn forward(&self, buffer: &mut [Complex<T>]) {
        self.forward.process(buffer);
    }
}

pub fn hann_window<T: Float>(size: usize) -> Vec<T> {
    let half = T::one() / (T::one() + T::one());
    (0..size)
        .map(|i| half * (T::one() - (from_usize::<T>(i) * T::TAU() / from_usize::<T>(size)).cos()))
        .collect()
}

/// Magnitudes of bins `0..=n/2` of the Hann-windowed spectrum of `buf`.
pub fn magnitude_spectrum<T: Float>(buf: &[T]) -> Vec<T> {
    if buf.is_empty() {
        return Vec::new();
    }
    let fft = Fft::<T>::new(buf.len());
    let mut spectrum: Vec<_> = hann_window::<T>(buf.len())
        .into_iter()
        .zip(buf.iter())
        .map(|(w, &x)| Complex::new(w * x, T::zero()))
        .collect();
    fft.forward(&mut spectrum);
    spectrum.truncate(fft.size() / 2 + 1);
    spectrum.into_iter().map(|c| c.norm()).collect()
}

/// Centre frequency of the strongest non-DC bin, or `None` if every such bin is empty.
pub fn peak_frequency<T: Float>(buf: &[T], sample_rate: T) -> Option<T> {
    let spectrum = magnitude_spectrum(buf);
    let (bin, magnitude) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .fold(None, |best: Option<(usize, T)>, (i, &m)| match best {
            Some((_, best_m)) if best_m >= m => best,
            _ => Some((i, m)),
        })?;
    if magnitude <= T::zero() {
        return None;
    }
    Some(from_usize::<T>(bin) * sample_rate / from_usize::<T>(buf.len()))
}

// usize -> f32/f64 cannot fail, it can only round
fn from_usize<T: Float>(n: usize) -> T {
    T::from_usize(n).unwrap_or_else(T::nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tone(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (std::f32::consts::TAU * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_power_of_sine_and_empty() {
        let rms = power(&tone(100.0, 8000.0, 8000));
        assert!((rms - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3, "got {rms}");
        assert_eq!(power::<f32>(&[]), 0.0);
        assert_eq!(power(&[3.0f64, -3.0]), 3.0);
    }

    #[test]
    fn test_hann_window_shape() {
        let window = hann_window::<f64>(8);
        assert_eq!(window[0], 0.0);
        assert!((window[4] - 1.0).abs() < 1e-12);
        assert!((window[2] - window[6]).abs() < 1e-12);
    }

    #[test]
    fn test_peak_frequency_finds_tone() {
        // 1000 Hz lands exactly on bin 128 of a 1024-point transform at 8 kHz.
        let peak = peak_frequency(&tone(1000.0, 8000.0, 1024), 8000.0).unwrap();
        assert!((peak - 1000.0).abs() < 1e-3, "got {peak}");
    }

    #[test]
    fn test_spectrum_length_and_degenerate_input() {
        assert_eq!(magnitude_spectrum(&tone(50.0, 1000.0, 64)).len(), 33);
        assert!(magnitude_spectrum::<f32>(&[]).is_empty());
        assert_eq!(peak_frequency::<f32>(&[1.0], 8000.0), None);
        assert_eq!(peak_frequency(&[0.0f64; 256], 8000.0), None);
    }
}
