//! ecgreport - ECG image analysis and diagnostic reports
//!
//! Turns a scanned or photographed ECG image into a structured diagnostic
//! report: a one-dimensional signal is derived from the image, classified
//! into one of five rhythm/morphology classes, and combined with an ST
//! segment measurement, a territory lookup, and rule-based clinical
//! validation notes.
//!
//! ## Module Structure
//!
//! - `core` - Signal derivation, classification, calibration, and analysis
//! - `report` - Report records, document assembly, and the text renderer
//! - `config` - Pipeline parameters and clinical reference tables
//! - `metadata` - OCR of printed metadata (Tesseract)
//! - `synth` - Synthetic ECG traces
//! - `cli` - Command-line interface
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ecgreport::core::{EcgAnalyzer, LinearClassifier};
//! use rand::SeedableRng;
//! use std::path::Path;
//!
//! let model = LinearClassifier::from_json_file("weights.json")?;
//! let analyzer = EcgAnalyzer::builder().build(model)?;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let outcome = analyzer.analyze_path(Path::new("scan.png"), &mut rng)?;
//! let document = analyzer.render(&outcome.report);
//!
//! println!("{}", ecgreport::report::render_text(&document));
//! ```
//!
//! ## Territories
//!
//! | Territory         | Leads                 |
//! |-------------------|-----------------------|
//! | Anterior          | V2, V3, V4            |
//! | Inferior          | II, III, aVF          |
//! | Lateral           | I, aVL, V5, V6        |
//! | Posterior         | V1, V2                |
//! | Right Ventricular | V1, V4R               |
//!
//! With the single-lead pipeline only `II` is ever affected, so no default
//! territory matches and MI reports carry "Undetermined Type".

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Pipeline parameters and clinical tables
pub mod config;

pub mod error;
pub mod metadata;

// Report records and rendering
pub mod report;

pub mod synth;

// Re-export commonly used types at crate root for convenience
pub use config::{ClinicalTables, PipelineConfig, PipelineConfigBuilder};
pub use core::{
    AnalysisOutcome, AnalyzerBuilder, ClassProbabilities, Classifier, DiagnosticClass,
    EcgAnalyzer, LinearClassifier, Signal, SignalDeriver,
};
pub use error::{EcgError, Result};
pub use report::{render_text, Document, DocumentRenderer, Report};
