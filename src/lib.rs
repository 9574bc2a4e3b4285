pub mod analysis;
pub mod channels;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod float;
pub mod generator;
pub mod pipeline;
pub mod wav;

pub use error::{Error, Result};
pub use filter::RcLowPass;
pub use float::Float;
pub use wav::WavHeader;
