// src/metadata.rs
//
// Printed-metadata reader for ECG images. Runs the Tesseract OCR
// executable and reduces its output to a conservative character set.
// Independent of the diagnostic pipeline.

use log::{debug, warn};
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{EcgError, Result};

const DEFAULT_TESSERACT: &str = "tesseract";

pub struct MetadataExtractor {
    tesseract: PathBuf,
    strip: Regex,
    collapse: Regex,
}

impl MetadataExtractor {
    pub fn new() -> Result<Self> {
        Self::with_engine(DEFAULT_TESSERACT)
    }

    /// Use a specific Tesseract executable
    pub fn with_engine(tesseract: impl Into<PathBuf>) -> Result<Self> {
        let strip = Regex::new(r"[^a-zA-Z0-9\s\t\n/\\.,-]+")
            .map_err(|e| EcgError::Config(e.to_string()))?;
        let collapse = Regex::new(r"(\n|\s|\t)(\n|\s|\t)+")
            .map_err(|e| EcgError::Config(e.to_string()))?;
        Ok(Self {
            tesseract: tesseract.into(),
            strip,
            collapse,
        })
    }

    /// OCR an image and return its cleaned text
    pub fn extract(&self, image: &Path) -> Result<String> {
        debug!("running {} on {}", self.tesseract.display(), image.display());
        let output = Command::new(&self.tesseract)
            .arg(image)
            .arg("stdout")
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => EcgError::OcrEngineUnavailable(self.tesseract.clone()),
                _ => EcgError::io(&self.tesseract, e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("tesseract exited with {}: {}", output.status, stderr.trim());
            return Err(EcgError::Ocr(format!(
                "{} exited with {}: {}",
                self.tesseract.display(),
                output.status,
                stderr.trim()
            )));
        }

        Ok(self.clean(&String::from_utf8_lossy(&output.stdout)))
    }

    /// Drop characters outside the whitelist, then collapse each whitespace
    /// run to its first character
    pub fn clean(&self, raw: &str) -> String {
        let stripped = self.strip.replace_all(raw, "");
        self.collapse.replace_all(&stripped, "${1}").into_owned()
    }
}
