//! Error types for the report pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the analysis pipeline and its adjacent utilities.
///
/// Validation findings are never errors; they travel as warnings on the
/// finished report.
#[derive(Debug, Error)]
pub enum EcgError {
    /// Image could not be decoded, or decoded to an empty raster
    #[error("image format error: {0}")]
    ImageFormat(String),

    /// The classifier failed or returned a malformed probability vector
    #[error("classifier error: {0}")]
    Classifier(String),

    /// OCR executable is missing from the host
    #[error("OCR engine unavailable: {}", .0.display())]
    OcrEngineUnavailable(PathBuf),

    /// OCR engine ran but did not produce usable text
    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EcgError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, EcgError>;
