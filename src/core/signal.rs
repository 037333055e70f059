// src/core/signal.rs
//
// Image to 1-D signal derivation. Uses the `image` crate for
// format-agnostic decoding and resampling.

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, Luma};
use log::debug;
use std::path::Path;

use super::dsp::stats::{mean, resample_linear};
use crate::config::PipelineConfig;
use crate::error::{EcgError, Result};

/// Fixed-length trace derived from one ECG image
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
}

impl Signal {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Turns a raster image into a canonical-length [`Signal`]
#[derive(Debug, Clone)]
pub struct SignalDeriver {
    resolution: u32,
    length: usize,
}

impl SignalDeriver {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            resolution: config.working_resolution,
            length: config.canonical_length,
        }
    }

    pub fn canonical_length(&self) -> usize {
        self.length
    }

    /// Decode an image file and derive its signal
    pub fn derive_from_path(&self, path: &Path) -> Result<Signal> {
        let image = image::open(path)
            .map_err(|e| EcgError::ImageFormat(format!("{}: {}", path.display(), e)))?;
        self.derive(&image)
    }

    /// Decode an in-memory encoded image and derive its signal
    pub fn derive_from_bytes(&self, bytes: &[u8]) -> Result<Signal> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| EcgError::ImageFormat(e.to_string()))?;
        self.derive(&image)
    }

    /// Derive the signal: grayscale at the working resolution, intensities
    /// scaled to [0, 1], each row averaged across its width, then the row
    /// profile linearly resampled to the canonical length.
    pub fn derive(&self, image: &DynamicImage) -> Result<Signal> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EcgError::ImageFormat(format!(
                "degenerate image {}x{}",
                image.width(),
                image.height()
            )));
        }

        let gray = to_gray(image);
        let resized: GrayImage =
            image::imageops::resize(&gray, self.resolution, self.resolution, FilterType::Nearest);

        let profile: Vec<f32> = resized
            .rows()
            .map(|row| {
                let values: Vec<f32> = row.map(|p| p.0[0] as f32 / 255.0).collect();
                mean(&values)
            })
            .collect();

        let samples = resample_linear(&profile, self.length);
        debug!(
            "derived signal: {} samples from {}x{} image (profile mean {:.4})",
            samples.len(),
            image.width(),
            image.height(),
            mean(&profile)
        );

        Ok(Signal::new(samples))
    }
}

/// Grayscale with ITU-R 601-2 weights (299/587/114, rounded). Colour
/// input must not go through `to_luma8`, which uses Rec. 709 weights.
fn to_gray(image: &DynamicImage) -> GrayImage {
    if !image.color().has_color() {
        return image.to_luma8();
    }
    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let luma = (r as u32 * 299 + g as u32 * 587 + b as u32 * 114 + 500) / 1000;
        Luma([luma as u8])
    })
}
