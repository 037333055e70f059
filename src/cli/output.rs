//! Terminal summaries and report file writing

use anyhow::{Context, Result};
use colorful::Colorful;
use std::fs;
use std::path::{Path, PathBuf};

use super::args::OutputFormat;
use crate::core::{AnalysisOutcome, ClassProbabilities, DiagnosticClass};
use crate::report::{render_text, Document};
use crate::synth::typical_characteristics;

const BAR_WIDTH: usize = 30;

/// Print the on-screen summary for one analyzed image
pub fn print_summary(path: &Path, outcome: &AnalysisOutcome, verbose: bool) {
    let report = &outcome.report;
    println!("Analyzing: {}", path.display().to_string().cyan());
    println!("  Patient ID: {}", report.patient_id());

    let diagnosis = report.diagnosis().label();
    let colored = match report.diagnosis() {
        DiagnosticClass::Normal => diagnosis.green(),
        DiagnosticClass::MyocardialInfarction => diagnosis.red(),
        _ => diagnosis.yellow(),
    };
    println!("  Diagnosis: {}", colored);
    println!("  Interpretation Accuracy: {}", report.confidence_display());
    println!("  MI Type: {}", report.summary().territory);

    if report.warnings().is_empty() {
        println!("  Validation: {}", "no warnings".green());
    } else {
        println!("  {}", "Validation Warnings:".yellow());
        for warning in report.warnings() {
            println!("    - {}", warning.as_str().yellow());
        }
    }

    if verbose {
        println!("\n  ST level: {:+.4}", outcome.st_analysis.level);
        println!("  Prediction confidence by class:");
        print!("{}", format_probability_bars(&outcome.probabilities));

        let features = typical_characteristics(report.diagnosis());
        if !features.is_empty() {
            println!("  Typical ECG characteristics:");
            for feature in features {
                println!("    - {}", feature);
            }
        }
    }
}

/// One indented line per class with a proportional bar
pub fn format_probability_bars(probabilities: &ClassProbabilities) -> String {
    probabilities
        .iter()
        .map(|(class, p)| {
            let filled = ((p * BAR_WIDTH as f32).round() as usize).min(BAR_WIDTH);
            format!(
                "    {:<22} {:>5.1}% |{}{}|\n",
                class.label(),
                p * 100.0,
                "#".repeat(filled),
                " ".repeat(BAR_WIDTH - filled)
            )
        })
        .collect()
}

/// Serialize a document in the requested format
pub fn format_document(doc: &Document, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(doc)),
        OutputFormat::Json => doc.to_json().context("Failed to serialize report"),
    }
}

/// Write `ECG_Report_<patient id>.<ext>` into `dir`
pub fn write_document(doc: &Document, dir: &Path, format: OutputFormat) -> Result<PathBuf> {
    let path = dir.join(format!("ECG_Report_{}.{}", doc.patient_id, format.extension()));
    let body = format_document(doc, format)?;
    fs::write(&path, body).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}
