//! Signal processing utilities

pub mod stats;

pub use stats::{mean, median, resample_linear, window_median};
