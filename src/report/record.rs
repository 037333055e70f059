// src/report/record.rs
//
// The report record. A `ClinicalSummary` is the provisional, still editable
// set of fields; `finalize` runs validation over it and freezes the result
// into a `Report` that only hands out shared references.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::core::analysis::{validate, Territory};
use crate::core::classifier::DiagnosticClass;

/// ST-segment state printed in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StSegment {
    Normal,
    Elevation,
    Depression,
}

impl StSegment {
    /// Reported ST state follows the predicted class
    pub fn from_diagnosis(diagnosis: DiagnosticClass) -> Self {
        match diagnosis {
            DiagnosticClass::MyocardialInfarction => StSegment::Elevation,
            DiagnosticClass::StDepression => StSegment::Depression,
            _ => StSegment::Normal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StSegment::Normal => "Normal",
            StSegment::Elevation => "Elevation",
            StSegment::Depression => "Depression",
        }
    }
}

impl fmt::Display for StSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rhythm {
    Regular,
    Irregular,
}

impl Rhythm {
    pub fn label(&self) -> &'static str {
        match self {
            Rhythm::Regular => "Regular",
            Rhythm::Irregular => "Irregular",
        }
    }
}

impl fmt::Display for Rhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lead-II wave and interval measurements.
///
/// These are illustrative reference values, not measured from the signal;
/// only `st_segment` reflects the analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadIIDetail {
    pub p_wave_amp_mv: f32,
    pub p_wave_dur_ms: u32,
    pub qrs_amp_mv: f32,
    pub qrs_dur_ms: u32,
    pub t_wave_amp_mv: f32,
    pub t_wave_dur_ms: u32,
    pub pr_interval_ms: u32,
    pub qt_interval_ms: u32,
    pub qtc_interval_ms: u32,
    pub st_segment: StSegment,
}

impl LeadIIDetail {
    pub fn illustrative(st_segment: StSegment) -> Self {
        Self {
            p_wave_amp_mv: 0.25,
            p_wave_dur_ms: 80,
            qrs_amp_mv: 1.8,
            qrs_dur_ms: 100,
            t_wave_amp_mv: 0.35,
            t_wave_dur_ms: 160,
            pr_interval_ms: 160,
            qt_interval_ms: 400,
            qtc_interval_ms: 430,
            st_segment,
        }
    }
}

/// Every report field except the validation warnings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClinicalSummary {
    /// Opaque short token, not a real identifier
    pub patient_id: String,
    /// Display text, e.g. "72 BPM"
    pub heart_rate: String,
    pub rr_interval_secs: f32,
    pub rhythm: Rhythm,
    pub cardiac_axis: String,
    pub st_segment: StSegment,
    pub diagnosis: DiagnosticClass,
    pub territory: Territory,
    /// Calibrated confidence in [0, 1]
    pub confidence: f32,
    pub affected_leads: BTreeSet<String>,
    pub lead_ii: LeadIIDetail,
}

impl ClinicalSummary {
    /// Validate the completed fields and freeze them with their warnings
    pub fn finalize(self) -> Report {
        let warnings = validate(&self);
        Report {
            summary: self,
            warnings,
            generated_at: Utc::now(),
        }
    }
}

/// Frozen report; warnings are computed once from the final fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    summary: ClinicalSummary,
    warnings: Vec<String>,
    generated_at: DateTime<Utc>,
}

impl Report {
    pub fn summary(&self) -> &ClinicalSummary {
        &self.summary
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn patient_id(&self) -> &str {
        &self.summary.patient_id
    }

    pub fn diagnosis(&self) -> DiagnosticClass {
        self.summary.diagnosis
    }

    pub fn confidence(&self) -> f32 {
        self.summary.confidence
    }

    /// Confidence as shown to readers, one decimal place
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.summary.confidence * 100.0)
    }

    pub fn rr_interval_display(&self) -> String {
        format!("{:.2} sec", self.summary.rr_interval_secs)
    }
}
