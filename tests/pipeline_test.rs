// tests/pipeline_test.rs
//
// End-to-end runs of the analysis pipeline through the library API.

mod test_utils;

use ecgreport::config::{ClinicalTables, LeadGroup, LeadGroupTable, PipelineConfig};
use ecgreport::core::analysis::validation::{
    BRADYCARDIA, IRREGULAR_RHYTHM, MI_WITHOUT_ELEVATION, TACHYCARDIA,
};
use ecgreport::core::{
    ClassProbabilities, DiagnosticClass, EcgAnalyzer, LinearClassifier, Signal, SignalDeriver,
};
use ecgreport::report::{Rhythm, StSegment};
use ecgreport::synth::TraceKind;
use ecgreport::EcgError;
use image::{DynamicImage, GrayImage, Luma};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;
use test_utils::*;

#[test]
fn test_signal_length_independent_of_image_size() {
    let deriver = SignalDeriver::new(&PipelineConfig::default());
    for (w, h) in [(600, 256), (50, 900), (1, 1), (1024, 17)] {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(w, h, Luma([128])));
        let signal = deriver.derive(&img).unwrap();
        assert_eq!(signal.len(), CANONICAL_LENGTH, "{}x{}", w, h);
        assert!(signal.samples().iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}

#[test]
fn test_trace_images_derive() {
    let dir = tempdir().unwrap();
    let deriver = SignalDeriver::new(&PipelineConfig::default());
    for (kind, name) in [(TraceKind::Normal, "normal.png"), (TraceKind::Infarction, "mi.png")] {
        let path = write_trace_image(dir.path(), name, kind, 11);
        let signal = deriver.derive_from_path(&path).unwrap();
        assert_eq!(signal.len(), CANONICAL_LENGTH);
        let samples = signal.samples();
        assert!(samples.iter().all(|&v| (0.0..=1.0).contains(&v)));
        // Rows the trace crosses are darker than blank rows
        let min = samples.iter().copied().fold(f32::INFINITY, f32::min);
        let max = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(min < max);
        assert_eq!(max, 1.0);
    }
}

#[test]
fn test_undecodable_file_is_image_format_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("scan.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let analyzer = EcgAnalyzer::new(fixed_classifier([1.0, 0.0, 0.0, 0.0, 0.0])).unwrap();
    let result = analyzer.analyze_path(&path, &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(EcgError::ImageFormat(_))));
}

#[test]
fn test_same_seed_same_report() {
    let dir = tempdir().unwrap();
    let path = write_trace_image(dir.path(), "scan.png", TraceKind::Normal, 5);
    let analyzer = EcgAnalyzer::new(fixed_classifier([0.7, 0.1, 0.1, 0.05, 0.05])).unwrap();

    let a = analyzer.analyze_path(&path, &mut StdRng::seed_from_u64(42)).unwrap();
    let b = analyzer.analyze_path(&path, &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a.report.summary(), b.report.summary());
    assert_eq!(a.report.warnings(), b.report.warnings());
    assert_eq!(a.st_analysis, b.st_analysis);
}

#[test]
fn test_linear_model_from_file() {
    let dir = tempdir().unwrap();
    let model_path = write_bias_model(dir.path(), [0.0, 0.0, 8.0, 0.0, 0.0]);
    let model = LinearClassifier::from_json_file(&model_path).unwrap();
    assert_eq!(model.input_len(), CANONICAL_LENGTH);

    let image = write_trace_image(dir.path(), "scan.png", TraceKind::Infarction, 3);
    let analyzer = EcgAnalyzer::new(model).unwrap();
    let outcome = analyzer.analyze_path(&image, &mut StdRng::seed_from_u64(9)).unwrap();

    let report = &outcome.report;
    assert_eq!(report.diagnosis(), DiagnosticClass::MyocardialInfarction);
    assert_eq!(report.summary().st_segment, StSegment::Elevation);
    assert!((0.0..=1.0).contains(&report.confidence()));
    assert!(!report.warnings().iter().any(|w| w == MI_WITHOUT_ELEVATION));
}

#[test]
fn test_malformed_model_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, r#"{"weights": [[1.0, 2.0]], "bias": [0.0]}"#).unwrap();
    assert!(matches!(
        LinearClassifier::from_json_file(&path),
        Err(EcgError::Classifier(_))
    ));
}

#[test]
fn test_classifier_error_aborts_run() {
    let analyzer = EcgAnalyzer::new(|_: &Signal| -> ecgreport::Result<ClassProbabilities> {
        Err(EcgError::Classifier("inference failed".into()))
    })
    .unwrap();
    let result = analyzer.analyze_signal(&shaped_signal(0.5, 0.5), &mut StdRng::seed_from_u64(1));
    assert!(matches!(result, Err(EcgError::Classifier(_))));
}

#[test]
fn test_territory_only_for_infarction() {
    let analyzer = EcgAnalyzer::new(fixed_classifier([0.9, 0.05, 0.02, 0.02, 0.01])).unwrap();
    let outcome = analyzer
        .analyze_signal(&shaped_signal(0.2, 0.6), &mut StdRng::seed_from_u64(2))
        .unwrap();
    assert!(outcome.st_analysis.elevation);
    assert_eq!(outcome.report.summary().territory.label(), "N/A");
}

#[test]
fn test_default_tables_leave_mi_undetermined() {
    let analyzer = EcgAnalyzer::new(fixed_classifier([0.1, 0.1, 0.6, 0.1, 0.1])).unwrap();
    let outcome = analyzer
        .analyze_signal(&shaped_signal(0.2, 0.6), &mut StdRng::seed_from_u64(2))
        .unwrap();
    assert_eq!(outcome.report.summary().territory.label(), "Undetermined Type");
}

#[test]
fn test_custom_tables_name_territory() {
    let tables = ClinicalTables {
        territories: LeadGroupTable::new(vec![
            LeadGroup::new("Lateral", &["I", "aVL"], "ST elevation >= 1mm"),
            LeadGroup::new("Inferior", &["II"], "ST elevation >= 1mm"),
            LeadGroup::new("Inferior Extended", &["II"], "ST elevation >= 1mm"),
        ])
        .unwrap(),
        ..ClinicalTables::default()
    };
    let analyzer = EcgAnalyzer::<LinearClassifier>::builder()
        .tables(tables)
        .build(fixed_classifier([0.1, 0.1, 0.6, 0.1, 0.1]))
        .unwrap();
    let outcome = analyzer
        .analyze_signal(&shaped_signal(0.2, 0.6), &mut StdRng::seed_from_u64(2))
        .unwrap();
    // First full match in table order wins
    assert_eq!(outcome.report.summary().territory.label(), "Inferior");
}

#[test]
fn test_warnings_follow_final_fields() {
    let analyzer = EcgAnalyzer::new(fixed_classifier([0.8, 0.05, 0.05, 0.05, 0.05])).unwrap();

    for seed in 0..40 {
        let outcome = analyzer
            .analyze_signal(&shaped_signal(0.3, 0.3), &mut StdRng::seed_from_u64(seed))
            .unwrap();
        let summary = outcome.report.summary();
        let rate: i64 = summary.heart_rate.trim_end_matches(" BPM").parse().unwrap();
        assert!((50..110).contains(&rate));
        assert!((0.6..1.0).contains(&summary.rr_interval_secs));
        assert_eq!(summary.patient_id.len(), 8);

        let warnings = outcome.report.warnings();
        assert_eq!(warnings.iter().any(|w| w == BRADYCARDIA), rate < 60);
        assert_eq!(warnings.iter().any(|w| w == TACHYCARDIA), rate > 100);
        assert_eq!(
            warnings.iter().any(|w| w == IRREGULAR_RHYTHM),
            summary.rhythm == Rhythm::Irregular
        );
        assert!(!warnings.iter().any(|w| w == MI_WITHOUT_ELEVATION));
    }
}

#[test]
fn test_rendered_document() {
    let analyzer = EcgAnalyzer::new(fixed_classifier([0.1, 0.1, 0.6, 0.1, 0.1])).unwrap();
    let outcome = analyzer
        .analyze_signal(&shaped_signal(0.2, 0.6), &mut StdRng::seed_from_u64(8))
        .unwrap();

    let first = analyzer.render(&outcome.report);
    let second = analyzer.render(&outcome.report);
    assert_eq!(first, second);
    assert_eq!(
        ecgreport::render_text(&first),
        ecgreport::render_text(&second)
    );

    assert_eq!(first.sections.len(), 3);
    let lead_wise = first.section("Lead-Wise Analysis Summary").unwrap();
    assert_eq!(lead_wise.table.row_count(), 12);
    assert_eq!(
        first.warnings.is_some(),
        !outcome.report.warnings().is_empty()
    );

    let text = ecgreport::render_text(&first);
    assert!(text.contains("Overall Assessment"));
    assert!(text.contains(&outcome.report.confidence_display()));

    let json: serde_json::Value = serde_json::from_str(&first.to_json().unwrap()).unwrap();
    assert_eq!(json["patient_id"], outcome.report.patient_id());
}
