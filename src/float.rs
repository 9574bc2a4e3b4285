use rustfft::{num_traits, FftNum};

/// Sample type accepted by the filter and the spectral helpers (`f32` or `f64`).
pub trait Float: FftNum + num_traits::Float + num_traits::FloatConst {}

impl<T: FftNum + num_traits::Float + num_traits::FloatConst> Float for T {}
