// src/config/pipeline.rs
//
// Numeric parameters of the report pipeline, with a builder for overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EcgError, Result};

/// Lead reported as affected when only a single derived trace is available.
pub const DEFAULT_AFFECTED_LEAD: &str = "II";

/// Pipeline parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sample count the classifier expects (L)
    pub canonical_length: usize,
    /// Square working resolution the image is resampled to
    pub working_resolution: u32,
    /// Leading samples used as the isoelectric baseline
    pub baseline_window: usize,
    /// Assumed index where the QRS complex ends
    pub qrs_end_offset: usize,
    /// Width of the ST window following the QRS end
    pub st_window_width: usize,
    /// Symmetric elevation/depression threshold on the ST level
    pub st_threshold: f32,
    /// Standard deviation of the confidence perturbation
    pub calibration_sigma: f32,
    /// Lead recorded in `leads_affected`
    pub default_lead: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canonical_length: 187,
            working_resolution: 256,
            baseline_window: 50,
            qrs_end_offset: 100,
            st_window_width: 20,
            st_threshold: 0.1,
            calibration_sigma: 0.02,
            default_lead: DEFAULT_AFFECTED_LEAD.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file; missing keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| EcgError::io(path, e))?;
        let config: Self = serde_json::from_str(&text)
            .map_err(|e| EcgError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every analysis window fits inside the canonical signal
    pub fn validate(&self) -> Result<()> {
        if self.canonical_length == 0 {
            return Err(EcgError::Config("canonical_length must be positive".into()));
        }
        if self.working_resolution == 0 {
            return Err(EcgError::Config("working_resolution must be positive".into()));
        }
        if self.baseline_window == 0 || self.baseline_window > self.canonical_length {
            return Err(EcgError::Config(format!(
                "baseline_window {} does not fit a signal of {} samples",
                self.baseline_window, self.canonical_length
            )));
        }
        if self.st_window_width == 0
            || self.qrs_end_offset + self.st_window_width > self.canonical_length
        {
            return Err(EcgError::Config(format!(
                "ST window {}..{} does not fit a signal of {} samples",
                self.qrs_end_offset,
                self.qrs_end_offset + self.st_window_width,
                self.canonical_length
            )));
        }
        if !(self.st_threshold.is_finite() && self.st_threshold >= 0.0) {
            return Err(EcgError::Config("st_threshold must be finite and non-negative".into()));
        }
        if !(self.calibration_sigma.is_finite() && self.calibration_sigma >= 0.0) {
            return Err(EcgError::Config(
                "calibration_sigma must be finite and non-negative".into(),
            ));
        }
        if self.default_lead.trim().is_empty() {
            return Err(EcgError::Config("default_lead must not be empty".into()));
        }
        Ok(())
    }
}

/// Builder for custom pipeline parameters
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    pub fn from_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn canonical_length(mut self, len: usize) -> Self {
        self.config.canonical_length = len;
        self
    }

    pub fn working_resolution(mut self, size: u32) -> Self {
        self.config.working_resolution = size;
        self
    }

    pub fn baseline_window(mut self, len: usize) -> Self {
        self.config.baseline_window = len;
        self
    }

    pub fn st_window(mut self, qrs_end: usize, width: usize) -> Self {
        self.config.qrs_end_offset = qrs_end;
        self.config.st_window_width = width;
        self
    }

    pub fn st_threshold(mut self, threshold: f32) -> Self {
        self.config.st_threshold = threshold;
        self
    }

    pub fn calibration_sigma(mut self, sigma: f32) -> Self {
        self.config.calibration_sigma = sigma;
        self
    }

    pub fn default_lead(mut self, lead: impl Into<String>) -> Self {
        self.config.default_lead = lead.into();
        self
    }

    pub fn build(self) -> Result<PipelineConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
