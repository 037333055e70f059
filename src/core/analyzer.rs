// src/core/analyzer.rs
//
// High-level ECG analysis API with builder pattern.
//
// One call runs the whole pipeline for one image: derive the signal,
// classify it, calibrate the confidence, analyse the ST segment, and
// assemble the frozen report. Nothing is shared between calls except the
// read-only configuration and tables.

use image::DynamicImage;
use log::info;
use rand::Rng;
use std::path::Path;

use super::analysis::{StAnalysis, StSegmentAnalyzer};
use super::calibrator::ConfidenceCalibrator;
use super::classifier::{ClassProbabilities, Classifier};
use super::signal::{Signal, SignalDeriver};
use crate::config::{ClinicalTables, PipelineConfig};
use crate::error::{EcgError, Result};
use crate::report::{Document, DocumentRenderer, Report, ReportAssembler};

/// Everything one pipeline run produced
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub probabilities: ClassProbabilities,
    pub st_analysis: StAnalysis,
}

/// Builder for EcgAnalyzer configuration
pub struct AnalyzerBuilder {
    config: PipelineConfig,
    tables: ClinicalTables,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
            tables: ClinicalTables::default(),
        }
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn tables(mut self, tables: ClinicalTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn build<C: Classifier>(self, classifier: C) -> Result<EcgAnalyzer<C>> {
        self.config.validate()?;
        Ok(EcgAnalyzer {
            deriver: SignalDeriver::new(&self.config),
            st_analyzer: StSegmentAnalyzer::new(&self.config),
            config: self.config,
            tables: self.tables,
            classifier,
        })
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Main ECG analyzer
pub struct EcgAnalyzer<C> {
    config: PipelineConfig,
    tables: ClinicalTables,
    deriver: SignalDeriver,
    st_analyzer: StSegmentAnalyzer,
    classifier: C,
}

impl<C: Classifier> EcgAnalyzer<C> {
    /// Create analyzer with default configuration and tables
    pub fn new(classifier: C) -> Result<Self> {
        AnalyzerBuilder::new().build(classifier)
    }

    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn tables(&self) -> &ClinicalTables {
        &self.tables
    }

    pub fn analyze_path<R: Rng>(&self, path: &Path, rng: &mut R) -> Result<AnalysisOutcome> {
        info!("analyzing {}", path.display());
        let signal = self.deriver.derive_from_path(path)?;
        self.analyze_signal(&signal, rng)
    }

    pub fn analyze_image<R: Rng>(&self, image: &DynamicImage, rng: &mut R) -> Result<AnalysisOutcome> {
        let signal = self.deriver.derive(image)?;
        self.analyze_signal(&signal, rng)
    }

    /// Run every stage after signal derivation
    pub fn analyze_signal<R: Rng>(&self, signal: &Signal, rng: &mut R) -> Result<AnalysisOutcome> {
        if signal.len() != self.config.canonical_length {
            return Err(EcgError::Classifier(format!(
                "signal has {} samples, pipeline expects {}",
                signal.len(),
                self.config.canonical_length
            )));
        }

        let probabilities = self.classifier.classify(signal)?;
        let (class, raw_confidence) = probabilities.top();
        info!("predicted {} (p={:.3})", class, raw_confidence);

        let confidence = {
            let mut calibrator = ConfidenceCalibrator::new(self.config.calibration_sigma, &mut *rng)?;
            calibrator.calibrate(raw_confidence)
        };

        let st_analysis = self.st_analyzer.analyze(signal);

        let report = ReportAssembler::new(&self.tables.territories).assemble(
            &probabilities,
            confidence,
            &st_analysis,
            rng,
        );

        Ok(AnalysisOutcome {
            report,
            probabilities,
            st_analysis,
        })
    }

    /// Lay out a frozen report with this analyzer's reference table
    pub fn render(&self, report: &Report) -> Document {
        DocumentRenderer::new(&self.tables.lead_reference).render(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::DiagnosticClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed(raw: [f32; 5]) -> impl Fn(&Signal) -> Result<ClassProbabilities> {
        move |_: &Signal| ClassProbabilities::from_raw(&raw)
    }

    #[test]
    fn test_classifier_failure_is_fatal() {
        let failing = |_: &Signal| -> Result<ClassProbabilities> {
            Err(EcgError::Classifier("model offline".into()))
        };
        let analyzer = EcgAnalyzer::new(failing).unwrap();
        let result = analyzer.analyze_signal(&Signal::new(vec![0.5; 187]), &mut StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(EcgError::Classifier(_))));
    }

    #[test]
    fn test_wrong_length_signal_rejected() {
        let analyzer = EcgAnalyzer::new(fixed([1.0, 0.0, 0.0, 0.0, 0.0])).unwrap();
        let result = analyzer.analyze_signal(&Signal::new(vec![0.5; 10]), &mut StdRng::seed_from_u64(1));
        assert!(result.is_err());
    }

    #[test]
    fn test_pipeline_on_signal() {
        let analyzer = EcgAnalyzer::new(fixed([0.05, 0.05, 0.8, 0.05, 0.05])).unwrap();
        let mut samples = vec![0.2; 187];
        for s in &mut samples[100..120] {
            *s = 0.6;
        }
        let outcome = analyzer
            .analyze_signal(&Signal::new(samples), &mut StdRng::seed_from_u64(4))
            .unwrap();

        assert!(outcome.st_analysis.elevation);
        assert_eq!(outcome.report.diagnosis(), DiagnosticClass::MyocardialInfarction);
        assert_eq!(outcome.report.summary().territory.label(), "Undetermined Type");
        assert!((0.0..=1.0).contains(&outcome.report.confidence()));
        assert!((outcome.report.confidence() - 0.8).abs() < 0.2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = PipelineConfig {
            canonical_length: 20,
            ..PipelineConfig::default()
        };
        let result = EcgAnalyzer::<crate::core::classifier::LinearClassifier>::builder()
            .config(config)
            .build(fixed([1.0, 0.0, 0.0, 0.0, 0.0]));
        assert!(matches!(result, Err(EcgError::Config(_))));
    }
}
