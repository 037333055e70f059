// src/core/calibrator.rs
//
// Display confidence: the raw top-class probability plus a small zero-mean
// Gaussian perturbation, clamped to [0, 1].

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{EcgError, Result};

pub struct ConfidenceCalibrator<R: Rng> {
    noise: Normal<f32>,
    rng: R,
}

impl<R: Rng> ConfidenceCalibrator<R> {
    pub fn new(sigma: f32, rng: R) -> Result<Self> {
        let noise = Normal::new(0.0, sigma)
            .map_err(|e| EcgError::Config(format!("calibration sigma {}: {}", sigma, e)))?;
        Ok(Self { noise, rng })
    }

    /// Repeated calls on the same input are independent draws
    pub fn calibrate(&mut self, probability: f32) -> f32 {
        (probability + self.noise.sample(&mut self.rng)).clamp(0.0, 1.0)
    }
}
