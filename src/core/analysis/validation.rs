// src/core/analysis/validation.rs
//
// Cross-field clinical consistency checks. Findings are warnings, never
// errors: every rule runs, and each one that applies appends its message.

use std::num::IntErrorKind;

use crate::core::classifier::DiagnosticClass;
use crate::report::{ClinicalSummary, Rhythm, StSegment};

pub const BRADYCARDIA: &str = "Bradycardia detected (<60 BPM)";
pub const TACHYCARDIA: &str = "Tachycardia detected (>100 BPM)";
pub const IRREGULAR_RHYTHM: &str = "Irregular rhythm requires further investigation";
pub const MI_WITHOUT_ELEVATION: &str =
    "MI diagnosis without ST elevation - consider alternative diagnoses";

/// Leading integer of a heart-rate field such as "72 BPM"; 0 when the
/// first token is not an integer. Out-of-range values saturate.
pub fn parse_heart_rate(text: &str) -> i64 {
    let Some(token) = text.split_whitespace().next() else {
        return 0;
    };
    match token.parse::<i64>() {
        Ok(rate) => rate,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

/// Validate an assembled summary. Rule order is the output order.
pub fn validate(summary: &ClinicalSummary) -> Vec<String> {
    let mut warnings = Vec::new();

    let rate = parse_heart_rate(&summary.heart_rate);
    if rate < 60 {
        warnings.push(BRADYCARDIA.to_string());
    } else if rate > 100 {
        warnings.push(TACHYCARDIA.to_string());
    }

    if summary.rhythm == Rhythm::Irregular {
        warnings.push(IRREGULAR_RHYTHM.to_string());
    }

    if summary.diagnosis == DiagnosticClass::MyocardialInfarction
        && summary.st_segment != StSegment::Elevation
    {
        warnings.push(MI_WITHOUT_ELEVATION.to_string());
    }

    warnings
}
