// src/report/document.rs
//
// Layout of a frozen report as a sectioned, table-structured document.
// Pure formatting: every value is a lookup into the report or the lead
// reference table.

use serde::Serialize;

use super::record::Report;
use crate::config::{LeadReferenceTable, CANONICAL_LEADS};

pub const DOCUMENT_TITLE: &str = "ECG Analysis Report";
pub const WARNINGS_HEADING: &str = "Clinical Validation Notes:";

/// Table body of a section
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Table {
    /// Two-column labelled table
    KeyValue {
        key_header: String,
        value_header: String,
        rows: Vec<(String, String)>,
    },
    /// Grid with named columns
    Grid {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
}

impl Table {
    pub fn row_count(&self) -> usize {
        match self {
            Table::KeyValue { rows, .. } => rows.len(),
            Table::Grid { rows, .. } => rows.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Roman numeral shown before the heading
    pub number: String,
    pub heading: String,
    pub table: Table,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningsBlock {
    pub heading: String,
    /// Each line already carries its "- " marker
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    pub patient_id: String,
    pub generated_at: String,
    pub sections: Vec<Section>,
    pub warnings: Option<WarningsBlock>,
}

impl Document {
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct DocumentRenderer<'a> {
    reference: &'a LeadReferenceTable,
}

impl<'a> DocumentRenderer<'a> {
    pub fn new(reference: &'a LeadReferenceTable) -> Self {
        Self { reference }
    }

    pub fn render(&self, report: &Report) -> Document {
        let sections = vec![
            overall_assessment(report),
            lead_ii_analysis(report),
            self.lead_wise_summary(report),
        ];

        let warnings = if report.warnings().is_empty() {
            None
        } else {
            Some(WarningsBlock {
                heading: WARNINGS_HEADING.to_string(),
                lines: report.warnings().iter().map(|w| format!("- {}", w)).collect(),
            })
        };

        Document {
            title: DOCUMENT_TITLE.to_string(),
            patient_id: report.patient_id().to_string(),
            generated_at: report.generated_at().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            sections,
            warnings,
        }
    }

    fn lead_wise_summary(&self, report: &Report) -> Section {
        let summary = report.summary();
        // One QT value repeated on every lead; per-lead QT is not measured
        let qt = summary.lead_ii.qt_interval_ms.to_string();

        let rows = CANONICAL_LEADS
            .iter()
            .map(|&lead| {
                let (amplitude, duration) = match self.reference.get(lead) {
                    Some(r) => (r.amplitude.clone(), r.duration.clone()),
                    None => ("N/A".to_string(), "N/A".to_string()),
                };
                let morphology = if summary.affected_leads.contains(lead) {
                    "Abnormal"
                } else {
                    "Normal"
                };
                vec![
                    lead.to_string(),
                    amplitude,
                    duration,
                    morphology.to_string(),
                    qt.clone(),
                ]
            })
            .collect();

        Section {
            number: "III".into(),
            heading: "Lead-Wise Analysis Summary".into(),
            table: Table::Grid {
                columns: ["Lead", "Amplitude (mV)", "Duration (ms)", "Morphology", "QT (ms)"]
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                rows,
            },
        }
    }
}

fn key_value(pairs: Vec<(&str, String)>) -> Vec<(String, String)> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn overall_assessment(report: &Report) -> Section {
    let s = report.summary();
    Section {
        number: "I".into(),
        heading: "Overall Assessment".into(),
        table: Table::KeyValue {
            key_header: "Parameter".into(),
            value_header: "Value".into(),
            rows: key_value(vec![
                ("Heart Rate", s.heart_rate.clone()),
                ("RR Interval", report.rr_interval_display()),
                ("Heart Rhythm", s.rhythm.to_string()),
                ("Cardiac Axis", s.cardiac_axis.clone()),
                ("ST Segment", s.st_segment.to_string()),
                ("Diagnosis", s.diagnosis.to_string()),
                ("MI Type", s.territory.to_string()),
                ("Interpretation Accuracy", report.confidence_display()),
            ]),
        },
    }
}

fn lead_ii_analysis(report: &Report) -> Section {
    let d = &report.summary().lead_ii;
    let mv = |v: f32| format!("{} mV", v);
    let ms = |v: u32| format!("{} ms", v);
    Section {
        number: "II".into(),
        heading: "Detailed Lead II Analysis".into(),
        table: Table::KeyValue {
            key_header: "Wave/Interval".into(),
            value_header: "Measurement".into(),
            rows: key_value(vec![
                ("P wave Amp", mv(d.p_wave_amp_mv)),
                ("P wave Dur", ms(d.p_wave_dur_ms)),
                ("QRS Amp", mv(d.qrs_amp_mv)),
                ("QRS Dur", ms(d.qrs_dur_ms)),
                ("T wave Amp", mv(d.t_wave_amp_mv)),
                ("T wave Dur", ms(d.t_wave_dur_ms)),
                ("PR interval", ms(d.pr_interval_ms)),
                ("QT interval", ms(d.qt_interval_ms)),
                ("QTc interval", ms(d.qtc_interval_ms)),
                ("ST segment", d.st_segment.to_string()),
            ]),
        },
    }
}
