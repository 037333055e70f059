//! Core pipeline stages

pub mod analysis;
pub mod analyzer;
pub mod calibrator;
pub mod classifier;
pub mod dsp;
pub mod signal;

pub use analyzer::{AnalysisOutcome, AnalyzerBuilder, EcgAnalyzer};
pub use calibrator::ConfidenceCalibrator;
pub use classifier::{ClassProbabilities, Classifier, DiagnosticClass, LinearClassifier};
pub use signal::{Signal, SignalDeriver};
